use anyhow::bail;
use shared::types::Result;

/// Google API keys share this prefix; anything else is rejected before any
/// network call is attempted. The key's actual validity is only discovered
/// on the first generation request.
pub const API_KEY_PREFIX: &str = "AIza";

pub fn validate_api_key(key: &str) -> Result<()> {
    if key.starts_with(API_KEY_PREFIX) {
        Ok(())
    } else {
        bail!("Invalid API key. It must start with '{API_KEY_PREFIX}'")
    }
}
