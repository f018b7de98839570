pub mod credential;
pub mod generator;
pub mod schema;
pub mod session;
pub mod sql_policy;
pub mod table;
