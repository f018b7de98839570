use domain::sql_policy::SqlPolicy;
use shared::types::Result;

/// Owns the statement policy and the rule for when a statement still needs a
/// human to sign off: permissive mode skips screening, so anything that does
/// not read gets an explicit confirmation instead.
pub struct SafetyService {
    policy: SqlPolicy,
}

impl SafetyService {
    pub fn new(policy: SqlPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(&self, sql: &str) -> Result<()> {
        self.policy.validate(sql)
    }

    pub fn needs_confirmation(&self, sql: &str) -> bool {
        matches!(self.policy, SqlPolicy::Permissive) && !SqlPolicy::is_select_like(sql)
    }
}
