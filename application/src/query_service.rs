use crate::safety_service::SafetyService;
use domain::generator::SqlGenerator;
use domain::table::ResultTable;
use infrastructure::sqlite_executor::SqliteExecutor;
use shared::types::Result;

/// The question pipeline, split into its two externally visible stages so the
/// CLI can show the generated SQL (and label generation vs execution errors)
/// between them.
pub struct QueryService<G: SqlGenerator> {
    generator: G,
    executor: SqliteExecutor,
    safety: SafetyService,
}

impl<G: SqlGenerator> QueryService<G> {
    pub fn new(generator: G, executor: SqliteExecutor, safety: SafetyService) -> Self {
        Self {
            generator,
            executor,
            safety,
        }
    }

    /// Stage one: question in, trimmed SQL text out. The model's reply is
    /// trusted as SQL once cleaned; screening happens at execution.
    pub async fn generate(&self, question: &str) -> Result<String> {
        let sql = self.generator.generate_sql(question).await?;
        Ok(sql.trim().to_string())
    }

    pub fn needs_confirmation(&self, sql: &str) -> bool {
        self.safety.needs_confirmation(sql)
    }

    /// Stage two: screen the statement, then run it. A zero-row table is a
    /// success here; the caller treats it as informational and skips history.
    pub fn execute(&self, sql: &str) -> Result<ResultTable> {
        self.safety.validate(sql)?;
        self.executor.query(sql)
    }
}
