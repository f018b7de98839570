use crate::table::ResultTable;
use serde::{Deserialize, Serialize};

/// One successful, non-empty query: the question as asked, the SQL that ran,
/// and the rows as they were rendered. Never mutated after being appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub question: String,
    pub sql: String,
    pub result: ResultTable,
}

/// Per-session mutable state: the credential and the query history. Created
/// empty, touched only by its own session's sequential handler, dropped at
/// process exit. Nothing persists across sessions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    api_key: Option<String>,
    history: Vec<QueryRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_credential(&self) -> bool {
        self.api_key.is_none()
    }

    /// Store a credential verbatim. Callers validate the prefix first; the
    /// server only sees the key on the first generation call.
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Append a history record. Empty results are refused so that every
    /// retained record corresponds to a query that returned at least one row.
    pub fn record(&mut self, question: &str, sql: &str, result: ResultTable) -> bool {
        if result.is_empty() {
            return false;
        }
        self.history.push(QueryRecord {
            question: question.to_string(),
            sql: sql.to_string(),
            result,
        });
        true
    }

    /// History in insertion order.
    pub fn history(&self) -> &[QueryRecord] {
        &self.history
    }

    /// History most-recent-first, the order the sidebar shows it in.
    pub fn recent(&self) -> impl Iterator<Item = &QueryRecord> {
        self.history.iter().rev()
    }

    /// Look up a record by its insertion number (1-based, as displayed).
    pub fn entry(&self, number: usize) -> Option<&QueryRecord> {
        number.checked_sub(1).and_then(|i| self.history.get(i))
    }
}
