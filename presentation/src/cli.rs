use crate::render;
use application::query_service::QueryService;
use application::safety_service::SafetyService;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use domain::credential::validate_api_key;
use domain::generator::SqlGenerator;
use domain::session::Session;
use domain::sql_policy::SqlPolicy;
use infrastructure::config::Config;
use infrastructure::gemini_client::GeminiClient;
use infrastructure::sqlite_executor::SqliteExecutor;
use shared::confirmation::ask_confirmation;
use shared::telemetry::Telemetry;
use shared::types::Result;

#[derive(Parser)]
#[command(name = "datachat")]
#[command(about = "Ask questions about the global economic dataset in plain English", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long)]
    pub db: Option<String>,

    /// Gemini model to use
    #[arg(long)]
    pub model: Option<String>,

    /// Relax the read-only SQL guard (still asks before running a write)
    #[arg(long)]
    pub unsafe_mode: bool,

    /// One-shot question (if empty, starts the interactive prompt)
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,
}

pub struct CliApp {
    config: Config,
    session: Session,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: Session::new(),
        }
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        self.ensure_api_key()?;

        let policy = if cli.unsafe_mode {
            SqlPolicy::Permissive
        } else {
            SqlPolicy::Strict
        };
        let db_path = cli.db.unwrap_or_else(|| self.config.db_path.clone());
        let model = cli.model.unwrap_or_else(|| self.config.gemini_model.clone());
        let api_key = self
            .session
            .api_key()
            .unwrap_or_default()
            .to_string();

        let client = GeminiClient::new(&self.config.gemini_base_url, &model, &api_key);
        let executor = SqliteExecutor::new(db_path, !cli.unsafe_mode);
        let service = QueryService::new(client, executor, SafetyService::new(policy));

        let question = cli.question.join(" ");
        if !question.trim().is_empty() {
            self.handle_question(&service, question.trim()).await;
            return Ok(());
        }

        self.repl(&service).await
    }

    /// Credential gate: nothing model-facing runs until a key with the right
    /// prefix is stored. A rejected entry leaves the session without a key
    /// and asks again.
    fn ensure_api_key(&mut self) -> Result<()> {
        if let Some(key) = self.config.gemini_api_key.take() {
            match validate_api_key(&key) {
                Ok(()) => {
                    self.session.set_api_key(key);
                    return Ok(());
                }
                Err(err) => println!("{}", format!("{err} (from GEMINI_API_KEY)").red()),
            }
        }

        while self.session.needs_credential() {
            let key: String = Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Gemini API key")
                .interact()?;
            match validate_api_key(&key) {
                Ok(()) => self.session.set_api_key(key),
                Err(err) => println!("{}", err.to_string().red()),
            }
        }
        Ok(())
    }

    async fn repl(&mut self, service: &QueryService<GeminiClient>) -> Result<()> {
        println!(
            "{}",
            "Ask questions about the economic dataset. 'history' lists past queries, 'exit' quits."
                .cyan()
        );
        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Question")
                .allow_empty(true)
                .interact_text()?;
            let input = input.trim().to_string();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                break;
            }
            if let Some(rest) = history_command(&input) {
                self.show_history(rest);
                continue;
            }
            self.handle_question(service, &input).await;
        }
        Ok(())
    }

    /// One question through the full pipeline. Every failure is printed and
    /// swallowed so the prompt stays usable for the next attempt.
    async fn handle_question<G: SqlGenerator>(&mut self, service: &QueryService<G>, question: &str) {
        eprintln!("{}", "Generating SQL query with Gemini...".dimmed());
        let timer = Telemetry::new();
        let sql = match service.generate(question).await {
            Ok(sql) => sql,
            Err(err) => {
                println!("{}", format!("Gemini Error: {err:#}").red());
                return;
            }
        };
        if sql.is_empty() {
            println!("{}", "Gemini Error: model returned an empty response".red());
            return;
        }

        render::print_sql(&sql);
        eprintln!("{}", format!("(generated in {})", timer.elapsed_label()).dimmed());

        if service.needs_confirmation(&sql) {
            match ask_confirmation("Statement is not read-only. Run it anyway?", false) {
                Ok(true) => {}
                Ok(false) => {
                    println!("{}", "Query cancelled.".yellow());
                    return;
                }
                Err(err) => {
                    println!("{}", format!("{err:#}").red());
                    return;
                }
            }
        }

        let timer = Telemetry::new();
        match service.execute(&sql) {
            Err(err) => println!("{}", format!("SQL Error: {err:#}").red()),
            Ok(table) if table.is_empty() => {
                println!(
                    "{}",
                    "Query ran successfully but returned no results.".yellow()
                );
            }
            Ok(table) => {
                println!("{}", "Query executed successfully!".green());
                render::print_result_table(&table);
                eprintln!("{}", format!("(executed in {})", timer.elapsed_label()).dimmed());
                self.session.record(question, &sql, table);
            }
        }
    }

    fn show_history(&self, arg: &str) {
        if self.session.history().is_empty() {
            println!("{}", "No successful queries yet.".yellow());
            return;
        }
        if arg.is_empty() {
            render::print_history_list(self.session.history());
            return;
        }
        match arg.parse::<usize>().ok().and_then(|n| {
            self.session.entry(n).map(|record| (n, record))
        }) {
            Some((number, record)) => render::print_history_entry(number, record),
            None => println!(
                "{}",
                format!(
                    "No such history entry '{arg}' (1..={})",
                    self.session.history().len()
                )
                .red()
            ),
        }
    }
}

fn history_command(input: &str) -> Option<&str> {
    let rest = input.strip_prefix("history")?;
    if rest.is_empty() {
        return Some("");
    }
    // Require a space so a question starting with "historyX" is not captured.
    rest.strip_prefix(' ').map(str::trim)
}
