//! Configuration loading for the Cinedex server.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables (optionally seeded from `.env`). Command-line
//! overrides are applied by the server on top of the loaded [`Config`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    Config, ConfigMetadata, CorsConfig, DatabaseConfig, Environment,
    ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
