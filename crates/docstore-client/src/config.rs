//! Client configuration.
//!
//! Settings are layered: defaults, then an optional TOML or JSON file, then
//! `DOCSTORE_*` environment variables.
//!
//! ```toml
//! project_id = "demo"
//! database_id = "(default)"
//! timeout = "10s"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use docstore_core::DocumentRoot;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Public API endpoint.
pub const DEFAULT_API_URL: &str = "https://firestore.googleapis.com/v1";

/// Name of the default database of a project.
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, without a trailing slash.
    pub api_url: String,
    /// Project that owns the database.
    pub project_id: String,
    /// Database within the project.
    pub database_id: String,
    /// Bearer token attached to every request.
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            project_id: String::new(),
            database_id: DEFAULT_DATABASE_ID.to_string(),
            auth_token: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("docstore/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from a file.
    pub fn from_file(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        match extension {
            "toml" => toml::from_str(&content)
                .map_err(|e| ClientError::config(format!("invalid TOML: {e}"))),
            "json" => serde_json::from_str(&content)
                .map_err(|e| ClientError::config(format!("invalid JSON: {e}"))),
            _ => Err(ClientError::config(format!(
                "unsupported config format: {extension}"
            ))),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Recognized variables: `DOCSTORE_API_URL`, `DOCSTORE_PROJECT_ID`,
    /// `DOCSTORE_DATABASE_ID`, `DOCSTORE_AUTH_TOKEN`, `DOCSTORE_TIMEOUT`
    /// (`30s`, `500ms` or plain seconds) and `DOCSTORE_EMULATOR_HOST`
    /// (`host:port`, takes precedence over `DOCSTORE_API_URL`).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DOCSTORE_API_URL") {
            self.api_url = url;
        }

        if let Ok(host) = std::env::var("DOCSTORE_EMULATOR_HOST") {
            self.api_url = format!("http://{host}/v1");
        }

        if let Ok(project) = std::env::var("DOCSTORE_PROJECT_ID") {
            self.project_id = project;
        }

        if let Ok(database) = std::env::var("DOCSTORE_DATABASE_ID") {
            self.database_id = database;
        }

        if let Ok(token) = std::env::var("DOCSTORE_AUTH_TOKEN") {
            self.auth_token = Some(token);
        }

        if let Ok(timeout) = std::env::var("DOCSTORE_TIMEOUT") {
            if let Ok(timeout) = humantime_serde::parse_duration(&timeout) {
                self.timeout = timeout;
            }
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if self.project_id.is_empty() {
            return Err(ClientError::config("project_id is required"));
        }

        if self.database_id.is_empty() {
            return Err(ClientError::config("database_id is required"));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ClientError::config(
                "api_url must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }

        Ok(())
    }

    /// URL of the database's documents collection; API routes are appended
    /// as `{base_url}:{route}`.
    pub fn base_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.api_url.trim_end_matches('/'),
            self.project_id,
            self.database_id
        )
    }

    /// Prefix that turns relative document paths into absolute names.
    pub fn document_root(&self) -> DocumentRoot {
        DocumentRoot::new(&self.project_id, &self.database_id)
    }
}

/// Builder for `ClientConfig`.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API root.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the project.
    #[must_use]
    pub fn project_id(mut self, project: impl Into<String>) -> Self {
        self.config.project_id = project.into();
        self
    }

    /// Set the database.
    #[must_use]
    pub fn database_id(mut self, database: impl Into<String>) -> Self {
        self.config.database_id = database.into();
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientResult<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Duration (de)serialization accepting `"500ms"`, `"30s"`, `"2m"`, `"1h"`
/// or a bare number of seconds.
mod humantime_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Ok(Duration::from_secs(secs)),
            Raw::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
        }
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, String> {
        let s = s.trim();
        let (number, unit_secs, unit_millis) = if let Some(n) = s.strip_suffix("ms") {
            (n, 0, 1)
        } else if let Some(n) = s.strip_suffix('s') {
            (n, 1, 0)
        } else if let Some(n) = s.strip_suffix('m') {
            (n, 60, 0)
        } else if let Some(n) = s.strip_suffix('h') {
            (n, 3600, 0)
        } else {
            (s, 1, 0)
        };

        let n: u64 = number
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s:?}"))?;

        let out_of_range = || format!("duration out of range: {s:?}");
        let secs = n.checked_mul(unit_secs).ok_or_else(out_of_range)?;
        let millis = n.checked_mul(unit_millis).ok_or_else(out_of_range)?;

        Duration::from_secs(secs)
            .checked_add(Duration::from_millis(millis))
            .ok_or_else(out_of_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.database_id, "(default)");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.auth_token.is_none());
        assert!(config.user_agent.starts_with("docstore/"));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .project_id("demo")
            .auth_token("secret")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.project_id, "demo");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::builder().build().is_err());

        assert!(ClientConfig::builder()
            .project_id("demo")
            .api_url("ftp://example.com")
            .build()
            .is_err());

        assert!(ClientConfig::builder()
            .project_id("demo")
            .timeout(Duration::ZERO)
            .build()
            .is_err());

        assert!(ClientConfig::builder()
            .project_id("demo")
            .database_id("")
            .build()
            .is_err());

        assert!(ClientConfig::builder().project_id("demo").build().is_ok());
    }

    #[test]
    fn test_base_url_and_root() {
        let config = ClientConfig::builder()
            .api_url("http://localhost:8080/v1/")
            .project_id("demo")
            .build()
            .unwrap();

        assert_eq!(
            config.base_url(),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents"
        );
        assert_eq!(
            config.document_root().as_str(),
            "projects/demo/databases/(default)/documents/"
        );
    }

    #[test]
    fn test_toml_config() {
        let toml = r#"
project_id = "demo"
database_id = "orders"
timeout = "10s"
auth_token = "from-file"
"#;
        let config: ClientConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.project_id, "demo");
        assert_eq!(config.database_id, "orders");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.auth_token.as_deref(), Some("from-file"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_token_not_serialized() {
        let config = ClientConfig::builder()
            .project_id("demo")
            .auth_token("secret")
            .build()
            .unwrap();

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("auth_token").is_none());
        assert_eq!(json["timeout"], "30s");
    }

    #[test]
    fn test_parse_duration() {
        use humantime_serde::parse_duration;

        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("15"), Ok(Duration::from_secs(15)));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        use humantime_serde::parse_duration;

        assert_eq!(
            parse_duration("10000000000000000h"),
            Err("duration out of range: \"10000000000000000h\"".to_string())
        );
        assert_eq!(
            parse_duration(&format!("{}ms", u64::MAX)),
            Ok(Duration::from_millis(u64::MAX))
        );

        let err = toml::from_str::<ClientConfig>(
            "project_id = \"demo\"\ntimeout = \"10000000000000000h\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duration out of range"));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("DOCSTORE_PROJECT_ID", "env-project");
        std::env::set_var("DOCSTORE_EMULATOR_HOST", "localhost:8681");
        std::env::set_var("DOCSTORE_TIMEOUT", "7");

        let config = ClientConfig::default().with_env_overrides();

        std::env::remove_var("DOCSTORE_PROJECT_ID");
        std::env::remove_var("DOCSTORE_EMULATOR_HOST");
        std::env::remove_var("DOCSTORE_TIMEOUT");

        assert_eq!(config.project_id, "env-project");
        assert_eq!(config.api_url, "http://localhost:8681/v1");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }
}
