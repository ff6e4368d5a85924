//! Settings model types.

use serde::{Deserialize, Serialize};

/// Security/encryption mode for the mail source connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Security {
    /// No encryption (not recommended).
    None,
    /// Implicit TLS (connect directly with TLS).
    #[default]
    Tls,
    /// STARTTLS upgrade after plaintext connect.
    StartTls,
}

impl Security {
    /// Get display name for the security mode.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None (insecure)",
            Self::Tls => "SSL/TLS",
            Self::StartTls => "STARTTLS",
        }
    }
}

/// Mail source server configuration.
///
/// Consumed by whichever adapter implements the source contract; the
/// core never opens the connection itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Server hostname.
    pub host: String,
    /// Server port (default: 995 for TLS, 110 otherwise).
    pub port: u16,
    /// Security mode.
    pub security: Security,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl SourceConfig {
    /// Get the conventional POP3 port for the security mode.
    #[must_use]
    pub const fn default_port(security: Security) -> u16 {
        match security {
            Security::None | Security::StartTls => 110,
            Security::Tls => 995,
        }
    }
}

/// What to do about duplicates when the active persistence protocol
/// cannot deduplicate.
///
/// The legacy tables have no source-identifier column, so a pass against
/// them cannot tell new messages from ones ingested before. That choice
/// must be made explicitly rather than silently inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Run the pass anyway; every fetched message is persisted again on
    /// every pass.
    AllowReingestion,
    /// Refuse to open the legacy store for ingestion at all.
    Reject,
}

/// Which persistence protocol a deployment writes with.
///
/// The two protocols are never mixed at runtime; a store is opened in
/// exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum StoreMode {
    /// One uidl-deduplicated row per message.
    Single,
    /// The legacy inquiry/reply-ticket table pair.
    Legacy {
        /// How to handle the protocol's inability to deduplicate.
        duplicates: DuplicatePolicy,
    },
}

/// Deployment settings for the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the `SQLite` database file.
    pub database_path: String,
    /// Mail source connection settings.
    pub source: SourceConfig,
    /// Persistence protocol selection.
    pub store: StoreMode,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(SourceConfig::default_port(Security::Tls), 995);
        assert_eq!(SourceConfig::default_port(Security::None), 110);
        assert_eq!(SourceConfig::default_port(Security::StartTls), 110);
    }

    #[test]
    fn test_settings_deserialize() {
        let json = r#"{
            "database_path": "mailkeep.db",
            "source": {
                "host": "pop.example.com",
                "port": 995,
                "security": "tls",
                "username": "inbox@example.com",
                "password": "secret"
            },
            "store": { "mode": "legacy", "duplicates": "allow_reingestion" }
        }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.source.host, "pop.example.com");
        assert_eq!(settings.source.security, Security::Tls);
        assert_eq!(
            settings.store,
            StoreMode::Legacy {
                duplicates: DuplicatePolicy::AllowReingestion
            }
        );
    }

    #[test]
    fn test_single_mode_deserialize() {
        let store: StoreMode = serde_json::from_str(r#"{ "mode": "single" }"#).unwrap();
        assert_eq!(store, StoreMode::Single);
    }
}
