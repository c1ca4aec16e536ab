use thiserror::Error;
use url::Url;

use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `other`, skipping warnings already present.
    pub fn extend(&mut self, other: ConfigWarnings) {
        for warning in other.items {
            if !self.items.contains(&warning) {
                self.items.push(warning);
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("database URL must use the postgres:// or postgresql:// scheme, got '{scheme}'")]
    UnsupportedDatabaseScheme { scheme: String },
    #[error("database URL is not a valid URL: {reason}")]
    InvalidDatabaseUrl { reason: String },
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },
    #[error("database max_connections must be at least 1")]
    ZeroConnections,
    #[error("CORS wildcard origins are not allowed in production")]
    DangerousCorsWildcard,
}

/// Rejects configurations the server cannot run with and collects warnings
/// for ones it can run with but probably should not.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    let url = Url::parse(config.database.url.trim()).map_err(|err| {
        ConfigGuardRailError::InvalidDatabaseUrl {
            reason: err.to_string(),
        }
    })?;
    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(ConfigGuardRailError::UnsupportedDatabaseScheme {
            scheme: url.scheme().to_string(),
        });
    }

    if config.database.connect_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroTimeout {
            name: "database connect_timeout",
        });
    }
    if config.database.query_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroTimeout {
            name: "database query_timeout",
        });
    }
    if config.database.max_connections == 0 {
        return Err(ConfigGuardRailError::ZeroConnections);
    }

    if config.environment.is_development() {
        if config.cors.is_wildcard_included() {
            warnings.push("CORS allows any origin");
        }
    } else {
        if config.cors.is_wildcard_included() {
            return Err(ConfigGuardRailError::DangerousCorsWildcard);
        }
        if url.password().is_none() && url.username().is_empty() {
            warnings.push_with_hint(
                "database URL carries no credentials",
                "Set DATABASE_URL to include a user for production deployments",
            );
        }
    }

    Ok(warnings)
}
