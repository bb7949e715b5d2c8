use crate::ConfigError;

/// Runtime configuration for the fetch/normalize/store flow.
///
/// The two external pointers (`off_user_agent`, `database_url`) are optional
/// here: each collaborator decides whether it needs one and refuses to build
/// without it via [`AppConfig::require_user_agent`] /
/// [`AppConfig::require_database_url`].
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub off_user_agent: Option<String>,
    pub off_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Returns the catalog user agent, or an error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `OFF_USER_AGENT` was not set.
    pub fn require_user_agent(&self) -> Result<&str, ConfigError> {
        self.off_user_agent
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OFF_USER_AGENT".to_string()))
    }

    /// Returns the database URL, or an error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if neither `DATABASE_URL` nor
    /// `POSTGRES_URL` was set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("off_user_agent", &self.off_user_agent)
            .field("off_base_url", &self.off_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("log_level", &self.log_level)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
