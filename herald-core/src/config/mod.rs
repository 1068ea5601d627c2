//! Configuration management for Herald Core

use crate::template::PlaceholderPolicy;
use anyhow::{bail, Context, Result};
use std::env;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Which transport delivers messages
    pub transport: TransportConfig,
    /// Template source and rendering policy
    pub templates: TemplateConfig,
    /// Asynchronous dispatch executor sizing
    pub executor: ExecutorConfig,
    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

/// Transport configuration - one variant per supported transport
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TransportConfig {
    /// No transport; every send fails with `NotConfigured`
    None,

    /// Log messages instead of sending them
    #[default]
    Console,

    /// SMTP relay
    Smtp(SmtpConfig),
}

impl TransportConfig {
    /// Check if a transport is configured (not None)
    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Get the transport type as a string
    pub fn transport_type(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Console => "console",
            Self::Smtp(_) => "smtp",
        }
    }
}

/// SMTP configuration for email sending
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SmtpConfig {
    /// SMTP server host
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    /// SMTP server port (typically 587 for STARTTLS, 25 for unencrypted)
    pub port: u16,

    /// Username for authentication (optional)
    pub username: Option<String>,

    /// Password for authentication (optional)
    pub password: Option<String>,

    /// Use STARTTLS
    pub use_tls: bool,

    /// From email address
    #[validate(email)]
    pub from_email: String,

    /// From name (optional)
    pub from_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Directory holding `<id>.<extension>` template files
    pub dir: String,
    pub extension: String,
    /// Fail on placeholders missing from the context instead of keeping them
    pub strict_placeholders: bool,
}

impl TemplateConfig {
    pub fn placeholder_policy(&self) -> PlaceholderPolicy {
        if self.strict_placeholders {
            PlaceholderPolicy::Strict
        } else {
            PlaceholderPolicy::Lenient
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: "templates".to_string(),
            extension: "html".to_string(),
            strict_placeholders: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Dispatches running at the same time
    pub max_concurrency: usize,
    /// Submissions allowed to wait for a free slot
    pub queue_capacity: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            queue_capacity: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "text" or "json"
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(default)
        };

        let transport = match var("HERALD_TRANSPORT", "console").to_lowercase().as_str() {
            "none" => TransportConfig::None,
            "console" => TransportConfig::Console,
            "smtp" => {
                let smtp = SmtpConfig {
                    host: lookup("SMTP_HOST").context("SMTP_HOST is required")?,
                    port: var("SMTP_PORT", "587")
                        .parse()
                        .context("Invalid SMTP_PORT")?,
                    username: lookup("SMTP_USERNAME"),
                    password: lookup("SMTP_PASSWORD"),
                    use_tls: flag("SMTP_USE_TLS", true),
                    from_email: lookup("SMTP_FROM_EMAIL")
                        .context("SMTP_FROM_EMAIL is required")?,
                    from_name: lookup("SMTP_FROM_NAME"),
                };
                smtp.validate().context("Invalid SMTP configuration")?;
                TransportConfig::Smtp(smtp)
            }
            other => bail!("Unknown HERALD_TRANSPORT: {}", other),
        };

        let executor = ExecutorConfig {
            max_concurrency: var("HERALD_MAX_CONCURRENCY", "10")
                .parse()
                .context("Invalid HERALD_MAX_CONCURRENCY")?,
            queue_capacity: var("HERALD_QUEUE_CAPACITY", "50")
                .parse()
                .context("Invalid HERALD_QUEUE_CAPACITY")?,
        };
        if executor.max_concurrency == 0 {
            bail!("HERALD_MAX_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            transport,
            templates: TemplateConfig {
                dir: var("HERALD_TEMPLATE_DIR", "templates"),
                extension: var("HERALD_TEMPLATE_EXTENSION", "html"),
                strict_placeholders: flag("HERALD_STRICT_PLACEHOLDERS", false),
            },
            executor,
            telemetry: TelemetryConfig {
                log_format: var("LOG_FORMAT", "text").to_lowercase(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.transport, TransportConfig::Console);
        assert_eq!(config.templates.dir, "templates");
        assert_eq!(config.templates.extension, "html");
        assert_eq!(config.templates.placeholder_policy(), PlaceholderPolicy::Lenient);
        assert_eq!(config.executor.max_concurrency, 10);
        assert_eq!(config.executor.queue_capacity, 50);
        assert_eq!(config.telemetry.log_format, "text");
    }

    #[test]
    fn test_smtp_transport() {
        let config = load(&[
            ("HERALD_TRANSPORT", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USE_TLS", "false"),
            ("SMTP_FROM_EMAIL", "noreply@example.com"),
            ("SMTP_FROM_NAME", "Herald"),
        ])
        .unwrap();

        match config.transport {
            TransportConfig::Smtp(smtp) => {
                assert_eq!(smtp.host, "smtp.example.com");
                assert_eq!(smtp.port, 2525);
                assert!(!smtp.use_tls);
                assert_eq!(smtp.from_name.as_deref(), Some("Herald"));
                assert!(smtp.username.is_none());
            }
            other => panic!("Expected SMTP transport, got {:?}", other),
        }
    }

    #[test]
    fn test_smtp_requires_host() {
        let err = load(&[
            ("HERALD_TRANSPORT", "smtp"),
            ("SMTP_FROM_EMAIL", "noreply@example.com"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SMTP_HOST"));
    }

    #[test]
    fn test_smtp_rejects_invalid_from_email() {
        let result = load(&[
            ("HERALD_TRANSPORT", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_FROM_EMAIL", "not-an-email"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("HERALD_TRANSPORT", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "abc"),
            ("SMTP_FROM_EMAIL", "noreply@example.com"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SMTP_PORT"));
    }

    #[test]
    fn test_unknown_transport() {
        assert!(load(&[("HERALD_TRANSPORT", "carrier-pigeon")]).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(load(&[("HERALD_MAX_CONCURRENCY", "0")]).is_err());
    }

    #[test]
    fn test_strict_placeholders_and_json_logs() {
        let config = load(&[
            ("HERALD_STRICT_PLACEHOLDERS", "TRUE"),
            ("LOG_FORMAT", "JSON"),
            ("HERALD_TRANSPORT", "none"),
        ])
        .unwrap();

        assert_eq!(config.templates.placeholder_policy(), PlaceholderPolicy::Strict);
        assert_eq!(config.telemetry.log_format, "json");
        assert!(!config.transport.is_configured());
    }

    #[test]
    fn test_transport_type() {
        let smtp = load(&[
            ("HERALD_TRANSPORT", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_FROM_EMAIL", "test@example.com"),
        ])
        .unwrap();
        assert_eq!(smtp.transport.transport_type(), "smtp");
        assert!(smtp.transport.is_configured());

        let console = load(&[("HERALD_TRANSPORT", "Console")]).unwrap();
        assert_eq!(console.transport.transport_type(), "console");
        assert!(console.transport.is_configured());
    }
}
