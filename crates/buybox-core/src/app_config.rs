#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Log output carries ANSI colours only in development.
    #[must_use]
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }
}

pub const DEFAULT_MARKETPLACE_BASE_URL: &str = "https://www.amazon.com.br";
pub const DEFAULT_LOCALE: &str = "pt_BR";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
pub const DEFAULT_MAX_WORKERS: usize = 6;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRIES_PER_CYCLE: u32 = 2;
pub const DEFAULT_MAX_BLOCKED_CYCLES: u32 = 3;
pub const DEFAULT_BLOCKED_BACKOFF_BASE: f64 = 1.8;

/// Host-supplied settings for a resolution run.
///
/// Every field has a default for the Brazilian marketplace, so
/// an empty environment yields a usable config.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub marketplace_base_url: String,
    pub locale: String,
    pub user_agent: String,
    /// Size of the worker pool; each worker owns one HTTP session.
    pub max_workers: usize,
    pub request_timeout_secs: u64,
    /// Immediate retries inside one fetch cycle (`attempts = retries + 1`).
    pub retries_per_cycle: u32,
    /// Highest cycle index of the recovery loop (`cycles = limit + 1`).
    pub max_blocked_cycles: u32,
    /// Base of the exponential backoff applied between recovery cycles.
    pub blocked_backoff_base: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            log_level: "info".to_owned(),
            marketplace_base_url: DEFAULT_MARKETPLACE_BASE_URL.to_owned(),
            locale: DEFAULT_LOCALE.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_workers: DEFAULT_MAX_WORKERS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            retries_per_cycle: DEFAULT_RETRIES_PER_CYCLE,
            max_blocked_cycles: DEFAULT_MAX_BLOCKED_CYCLES,
            blocked_backoff_base: DEFAULT_BLOCKED_BACKOFF_BASE,
        }
    }
}
