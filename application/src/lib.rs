pub mod query_service;
pub mod safety_service;
