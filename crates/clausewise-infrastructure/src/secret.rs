//! API key loading.
//!
//! The `GROQ_API_KEY` environment variable wins; otherwise the key is read
//! from `secret.toml` in the base directory. Error messages never contain
//! the key itself.

use clausewise_core::error::{ClausewiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    pub groq_api_key: Option<String>,
}

/// Loads the Groq API key from the environment or `<base_dir>/secret.toml`.
pub async fn load_api_key(base_dir: impl AsRef<Path>) -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }

    let secret_path = base_dir.as_ref().join("secret.toml");
    let content = match fs::read_to_string(&secret_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClausewiseError::internal(format!(
                "no API key: set {} or create {:?}",
                API_KEY_ENV, secret_path
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let secrets: SecretConfig = toml::from_str(&content)?;
    secrets
        .groq_api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            ClausewiseError::internal(format!("{:?} has no groq_api_key entry", secret_path))
        })
}
