use std::env;

/// Origins allowed when `ALLOWED_ORIGINS` is unset: the API's own port and
/// the usual frontend dev server.
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Browser origins permitted to call the API with credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads a comma-separated origin list from `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let list = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        Self::from_list(&list)
    }

    /// Splits `list` on commas, trimming entries and dropping empty ones and
    /// repeats.
    pub fn from_list(list: &str) -> Self {
        let mut allowed_origins: Vec<String> = Vec::new();
        for origin in list.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let origin = origin.trim_end_matches('/');
            if !allowed_origins.iter().any(|known| known == origin) {
                allowed_origins.push(origin.to_string());
            }
        }

        Self { allowed_origins }
    }
}
