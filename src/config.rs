//! Runtime settings
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. an optional YAML file,
//! 2. environment variables (`CANVAS_API_TOKEN`, `CANVAS_DOMAIN`, `CANVAS_BASE_URL`),
//! 3. command-line flags.
//!
//! ```yaml
//! domain: school.instructure.com
//! http:
//!   timeout_secs: 30
//!   max_retries: 3
//!   rate_limit:
//!     requests_per_second: 10
//!     burst_size: 10
//! pagination:
//!   max_pages: 500
//!   max_duration_secs: 300
//!   per_page: 100
//! ```

use crate::canvas::{api_base_url, CanvasClientConfig};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PageLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "CANVAS_API_TOKEN";
/// Environment variable holding the Canvas domain
pub const ENV_DOMAIN: &str = "CANVAS_DOMAIN";
/// Environment variable overriding the full API base URL
pub const ENV_BASE_URL: &str = "CANVAS_BASE_URL";

// ============================================================================
// Settings
// ============================================================================

/// All runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Bearer token for the Canvas API
    #[serde(default)]
    pub api_token: Option<String>,

    /// Canvas host, e.g. `school.instructure.com`
    #[serde(default)]
    pub domain: Option<String>,

    /// Full API base URL; takes precedence over `domain`
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP channel settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Pagination ceiling and page size
    #[serde(default)]
    pub pagination: PaginationSettings,
}

/// HTTP channel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries for idempotent requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Token bucket; `null` disables rate limiting
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            user_agent: None,
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

#[allow(clippy::unnecessary_wraps)]
fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Maximum pages per logical fetch, the first included
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Wall-clock budget per logical fetch; `null` for none
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: Option<u64>,

    /// `per_page` sent on GET requests; `null` leaves the server default
    #[serde(default = "default_per_page")]
    pub per_page: Option<u32>,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_duration_secs: default_max_duration(),
            per_page: default_per_page(),
        }
    }
}

fn default_max_pages() -> u32 {
    500
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_duration() -> Option<u64> {
    Some(300)
}

#[allow(clippy::unnecessary_wraps)]
fn default_per_page() -> Option<u32> {
    Some(100)
}

/// Resolved connection credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub base_url: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml_str(&text)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an environment lookup; empty values are ignored
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(domain) = var(ENV_DOMAIN) {
            self.domain = Some(domain);
        }
        if let Some(base_url) = var(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
    }

    /// Token and API base URL, failing on whichever is missing
    pub fn credentials(&self) -> Result<Credentials> {
        let token = self
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_config("api_token"))?;

        let base_url = match (&self.base_url, &self.domain) {
            (Some(url), _) if !url.trim().is_empty() => {
                url::Url::parse(url)?;
                url.trim_end_matches('/').to_string()
            }
            (_, Some(domain)) => api_base_url(domain)?,
            _ => return Err(Error::missing_config("domain")),
        };

        Ok(Credentials {
            token: token.to_string(),
            base_url,
        })
    }

    /// Build the client configuration
    pub fn client_config(&self) -> Result<CanvasClientConfig> {
        let credentials = self.credentials()?;

        let mut http = HttpClientConfig::builder()
            .base_url(credentials.base_url)
            .bearer_token(credentials.token)
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries);
        http = match &self.http.rate_limit {
            Some(limit) => http.rate_limit(limit.clone()),
            None => http.no_rate_limit(),
        };
        if let Some(agent) = &self.http.user_agent {
            http = http.user_agent(agent.clone());
        }

        Ok(CanvasClientConfig {
            http: http.build(),
            limits: PageLimits {
                max_pages: self.pagination.max_pages.max(1),
                max_duration: self.pagination.max_duration_secs.map(Duration::from_secs),
            },
            per_page: self.pagination.per_page,
        })
    }
}
