use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub results_page_size: u32,
    pub currency_symbol: String,
    pub ticket_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .ok_or_else(|| AppError::Config("API_BASE_URL must be set".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let results_page_size: u32 = parse_or(&lookup, "RESULTS_PAGE_SIZE", 8)?;
        if results_page_size == 0 {
            return Err(AppError::Config(
                "RESULTS_PAGE_SIZE must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            api_token: lookup("API_TOKEN").filter(|t| !t.is_empty()),
            request_timeout_secs: parse_or(&lookup, "API_TIMEOUT_SECS", 30)?,
            results_page_size,
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or_else(|| "₹".to_string()),
            ticket_dir: lookup("TICKET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number", key))),
        None => Ok(default),
    }
}
