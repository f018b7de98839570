use anyhow::bail;
use shared::types::Result;

/// Keywords that would mutate the database or its handle state. The model's
/// output is untrusted text headed straight for an interpreter, so a strict
/// policy only lets read statements through.
const MUTATING_KEYWORDS: &[&str] = &[
    "insert", "update", "delete", "drop", "create", "alter", "replace",
    "truncate", "attach", "detach", "pragma", "vacuum", "reindex", "begin",
    "commit", "rollback",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlPolicy {
    /// Single read-only statement only. The default.
    Strict,
    /// No statement screening; the operator opted out with --unsafe-mode.
    Permissive,
}

impl SqlPolicy {
    pub fn validate(&self, sql: &str) -> Result<()> {
        if matches!(self, SqlPolicy::Permissive) {
            return Ok(());
        }

        let candidate = strip_trailing_semicolons(sql);
        if candidate.is_empty() {
            bail!("empty SQL statement");
        }
        if candidate.contains(';') {
            bail!("multi-statement SQL is not allowed; submit exactly one statement");
        }

        let normalized = candidate.to_ascii_lowercase();
        if let Some(keyword) = first_mutating_keyword(&normalized) {
            bail!("mutating SQL keyword `{keyword}` is not allowed");
        }

        let allowed = normalized.starts_with("select")
            || normalized.starts_with("with")
            || normalized.starts_with("explain select")
            || normalized.starts_with("explain query plan select");
        if !allowed {
            bail!(
                "only SELECT, WITH ... SELECT, and EXPLAIN ... SELECT statements are allowed \
                 (statement starts with `{}`)",
                leading_keyword(&normalized)
            );
        }

        Ok(())
    }

    /// Whether a statement reads rather than writes, judged by its leading
    /// keyword alone. Used to decide when permissive mode should still ask
    /// before running.
    pub fn is_select_like(sql: &str) -> bool {
        let normalized = strip_trailing_semicolons(sql).to_ascii_lowercase();
        normalized.starts_with("select")
            || normalized.starts_with("with")
            || normalized.starts_with("explain")
    }
}

fn strip_trailing_semicolons(raw: &str) -> &str {
    let mut candidate = raw.trim();
    while let Some(stripped) = candidate.strip_suffix(';') {
        candidate = stripped.trim_end();
    }
    candidate
}

fn first_mutating_keyword(normalized_sql: &str) -> Option<&'static str> {
    normalized_sql
        .split(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
        .find_map(|token| MUTATING_KEYWORDS.iter().copied().find(|kw| *kw == token))
}

fn leading_keyword(normalized_sql: &str) -> &str {
    normalized_sql
        .split(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
        .find(|token| !token.is_empty())
        .unwrap_or("unknown")
}
