use shared::types::Result;

/// Seam between the pipeline and whatever turns a question into SQL. The
/// production implementation calls the Gemini API; tests substitute fixed or
/// failing generators.
pub trait SqlGenerator {
    fn generate_sql(
        &self,
        question: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
