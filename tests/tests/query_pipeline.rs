use application::query_service::QueryService;
use application::safety_service::SafetyService;
use domain::generator::SqlGenerator;
use domain::session::Session;
use domain::sql_policy::SqlPolicy;
use infrastructure::sqlite_executor::SqliteExecutor;
use presentation::render::format_table;
use shared::types::Result;
use tempfile::TempDir;

/// Generator that always answers with the same SQL text.
struct FixedSql(&'static str);

impl SqlGenerator for FixedSql {
    fn generate_sql(
        &self,
        _question: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send {
        let sql = self.0.to_string();
        async move { Ok(sql) }
    }
}

/// Generator that always fails, standing in for network/auth/quota errors.
struct FailingGenerator;

impl SqlGenerator for FailingGenerator {
    fn generate_sql(
        &self,
        _question: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send {
        async { Err(anyhow::anyhow!("quota exceeded")) }
    }
}

fn seeded_db(dir: &TempDir) -> String {
    let path = dir.path().join("econ.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE economicdata (
             country_name TEXT,
             year INTEGER,
             [Inflation (CPI %)] REAL,
             [GDP (Current USD)] REAL
         );
         INSERT INTO economicdata VALUES ('France', 2020, 0.5, 2.6e12);
         INSERT INTO economicdata VALUES ('France', 2019, 1.1, 2.7e12);
         INSERT INTO economicdata VALUES ('Germany', 2020, 0.4, 3.8e12);",
    )
    .unwrap();
    path.display().to_string()
}

fn service_with<G: SqlGenerator>(generator: G, db_path: &str) -> QueryService<G> {
    QueryService::new(
        generator,
        SqliteExecutor::new(db_path, true),
        SafetyService::new(SqlPolicy::Strict),
    )
}

/// Drive one question the way the REPL does: generate, execute, and record
/// only a successful non-empty result.
async fn ask<G: SqlGenerator>(
    session: &mut Session,
    service: &QueryService<G>,
    question: &str,
) -> std::result::Result<usize, String> {
    let sql = service
        .generate(question)
        .await
        .map_err(|e| format!("Gemini Error: {e:#}"))?;
    let table = service
        .execute(&sql)
        .map_err(|e| format!("SQL Error: {e:#}"))?;
    let rows = table.row_count();
    session.record(question, &sql, table);
    Ok(rows)
}

#[tokio::test]
async fn france_inflation_scenario_appends_one_record() {
    let dir = TempDir::new().unwrap();
    let sql = "SELECT [Inflation (CPI %)] FROM economicdata \
               WHERE country_name = 'France' AND year = 2020";
    let service = service_with(FixedSql(sql), &seeded_db(&dir));
    let mut session = Session::new();

    let question = "What was inflation in France in 2020?";
    let rows = ask(&mut session, &service, question).await.unwrap();
    assert_eq!(rows, 1);

    assert_eq!(session.history().len(), 1);
    let record = &session.history()[0];
    assert_eq!(record.question, question);
    assert_eq!(record.sql, sql);
    assert_eq!(record.result.rows, vec![vec!["0.5".to_string()]]);
}

#[tokio::test]
async fn generator_failure_creates_no_history() {
    let dir = TempDir::new().unwrap();
    let service = service_with(FailingGenerator, &seeded_db(&dir));
    let mut session = Session::new();

    let err = ask(&mut session, &service, "anything?").await.unwrap_err();
    assert!(err.starts_with("Gemini Error:"), "got: {err}");
    assert!(err.contains("quota exceeded"));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn failing_sql_creates_no_history() {
    let dir = TempDir::new().unwrap();
    let service = service_with(FixedSql("SELECT * FROM missing_table"), &seeded_db(&dir));
    let mut session = Session::new();

    let err = ask(&mut session, &service, "anything?").await.unwrap_err();
    assert!(err.starts_with("SQL Error:"), "got: {err}");
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn zero_rows_is_success_without_history() {
    let dir = TempDir::new().unwrap();
    let service = service_with(
        FixedSql("SELECT * FROM economicdata WHERE year = 1800"),
        &seeded_db(&dir),
    );
    let mut session = Session::new();

    let rows = ask(&mut session, &service, "data from 1800?").await.unwrap();
    assert_eq!(rows, 0);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn mutating_sql_is_blocked_and_table_survives() {
    let dir = TempDir::new().unwrap();
    let db_path = seeded_db(&dir);
    let service = service_with(FixedSql("DROP TABLE economicdata"), &db_path);
    let mut session = Session::new();

    let err = ask(&mut session, &service, "drop everything").await.unwrap_err();
    assert!(err.starts_with("SQL Error:"), "got: {err}");
    assert!(session.history().is_empty());

    // The guard refused before execution; the table is untouched.
    let check = service_with(FixedSql("SELECT COUNT(*) FROM economicdata"), &db_path);
    let rows = ask(&mut session, &check, "count rows").await.unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn fenced_model_output_is_cleaned_before_execution() {
    // Fences come back from the generator edge already stripped; a generator
    // emitting padded whitespace still executes cleanly after the trim.
    let dir = TempDir::new().unwrap();
    let service = service_with(
        FixedSql("\n  SELECT country_name FROM economicdata WHERE year = 2020  \n"),
        &seeded_db(&dir),
    );
    let mut session = Session::new();

    let rows = ask(&mut session, &service, "countries in 2020?").await.unwrap();
    assert_eq!(rows, 2);
    assert_eq!(
        session.history()[0].sql,
        "SELECT country_name FROM economicdata WHERE year = 2020"
    );
}

#[tokio::test]
async fn history_orders_and_snapshots_match_what_was_rendered() {
    let dir = TempDir::new().unwrap();
    let db_path = seeded_db(&dir);
    let mut session = Session::new();

    let first = service_with(
        FixedSql("SELECT year FROM economicdata WHERE country_name = 'France' ORDER BY year"),
        &db_path,
    );
    ask(&mut session, &first, "years with French data?").await.unwrap();

    let second = service_with(
        FixedSql("SELECT country_name FROM economicdata WHERE year = 2020 ORDER BY country_name"),
        &db_path,
    );
    ask(&mut session, &second, "countries in 2020?").await.unwrap();

    // Stored in insertion order, displayed most-recent-first.
    let stored: Vec<&str> = session.history().iter().map(|r| r.question.as_str()).collect();
    assert_eq!(stored, ["years with French data?", "countries in 2020?"]);
    let shown: Vec<&str> = session.recent().map(|r| r.question.as_str()).collect();
    assert_eq!(shown, ["countries in 2020?", "years with French data?"]);

    // The retained snapshot renders identically to a fresh run of the query.
    let replay = second.execute(&session.history()[1].sql).unwrap();
    assert_eq!(
        format_table(&session.history()[1].result),
        format_table(&replay)
    );
}
