use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    models::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, Environment,
        ServerConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_DATABASE_URL,
        DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
        DEFAULT_QUERY_TIMEOUT,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["cinedex.toml", "config/cinedex.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, then the config file, then the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`ConfigLoader::load`] with the environment supplied by the
    /// caller instead of read from the process.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        debug!(path = %path.display(), "configuration file loaded");
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
    env_file_loaded: bool,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No cinedex.toml detected; using environment variables and defaults",
            "Pass --config or set CINEDEX_CONFIG to point at a configuration file",
        );
    }

    let FileConfig {
        environment: file_environment,
        server: file_server,
        database: file_database,
        cors: file_cors,
    } = file_config.unwrap_or_default();

    let environment = match env.environment.or(file_environment) {
        Some(raw) => raw
            .parse::<Environment>()
            .map_err(|reason| ConfigLoadError::InvalidEnvironment { reason })?,
        None => Environment::default(),
    };

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
    };

    let database = DatabaseConfig {
        url: env
            .database_url
            .filter(|value| !value.trim().is_empty())
            .or(file_database.url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        connect_timeout: resolve_duration(
            "database connect_timeout",
            env.database_connect_timeout
                .or(file_database.connect_timeout),
            DEFAULT_CONNECT_TIMEOUT,
        )?,
        query_timeout: resolve_duration(
            "database query_timeout",
            env.database_query_timeout.or(file_database.query_timeout),
            DEFAULT_QUERY_TIMEOUT,
        )?,
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_default(),
    };

    let config = Config {
        environment,
        server,
        database,
        cors,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded,
        },
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

fn resolve_duration(
    name: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match raw {
        Some(value) => humantime::parse_duration(value.trim()).map_err(
            |source| ConfigLoadError::InvalidDuration {
                name,
                value,
                source,
            },
        ),
        None => Ok(default),
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {name} '{value}'")]
    InvalidDuration {
        name: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("{reason}")]
    InvalidEnvironment { reason: String },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let load = ConfigLoader::new()
            .load_with_env(EnvConfig::default(), false)
            .unwrap();
        let config = load.config;

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.database.url,
            "postgres://localhost:5432/movies?sslmode=disable"
        );
        assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.database.query_timeout, Duration::from_secs(3));
        assert_eq!(config.database.max_connections, 10);
        assert!(config.cors.allowed_origins.is_empty());
        assert!(!load.warnings.is_empty());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            environment = "production"

            [server]
            port = 9000

            [database]
            url = "postgres://catalog:secret@db:5432/movies"
            query_timeout = "750ms"

            [cors]
            allowed_origins = ["https://movies.example"]
            "#,
        );

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default(), false)
            .unwrap();
        let config = load.config;

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.query_timeout, Duration::from_millis(750));
        assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://movies.example".to_string()]
        );
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
        assert!(load.warnings.is_empty());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            r#"
            [server]
            port = 9000

            [database]
            connect_timeout = "10s"
            "#,
        );
        let env = EnvConfig {
            server_port: Some(7000),
            database_connect_timeout: Some("2s".into()),
            database_url: Some("postgresql://u@localhost/films".into()),
            ..EnvConfig::default()
        };

        let config = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env, false)
            .unwrap()
            .config;

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.database.url, "postgresql://u@localhost/films");
    }

    #[test]
    fn env_config_path_is_honoured() {
        let file = write_config("environment = \"production\"\n");
        let env = EnvConfig {
            config_path: Some(file.path().to_path_buf()),
            ..EnvConfig::default()
        };

        let config = ConfigLoader::new()
            .load_with_env(env, false)
            .unwrap()
            .config;
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = ConfigLoader::new()
            .with_config_path(&missing)
            .load_with_env(EnvConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn malformed_toml_reports_the_path() {
        let file = write_config("[server\nport = 1");

        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default(), false)
            .unwrap_err();
        match err {
            ConfigLoadError::Parse { path, .. } => {
                assert_eq!(path, file.path())
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_duration_and_environment_are_rejected() {
        let env = EnvConfig {
            database_query_timeout: Some("soon".into()),
            ..EnvConfig::default()
        };
        let err = ConfigLoader::new()
            .load_with_env(env, false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidDuration { .. }));

        let env = EnvConfig {
            environment: Some("staging".into()),
            ..EnvConfig::default()
        };
        let err = ConfigLoader::new()
            .load_with_env(env, false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidEnvironment { .. }));
    }

    #[test]
    fn guard_rails_reject_zero_timeouts() {
        let env = EnvConfig {
            database_connect_timeout: Some("0s".into()),
            ..EnvConfig::default()
        };

        let err = ConfigLoader::new()
            .load_with_env(env, false)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::GuardRail(ConfigGuardRailError::ZeroTimeout { .. })
        ));
    }
}
