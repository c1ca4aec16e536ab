use std::{fmt, sync::Arc};

use cinedex_config::Config;
use cinedex_core::{CatalogService, CatalogUnitOfWork, PostgresDatabase};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub config: Arc<Config>,
    /// Absent when the catalog is not backed by PostgreSQL (tests).
    pub postgres: Option<PostgresDatabase>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(unit_of_work: &CatalogUnitOfWork, config: Arc<Config>) -> Self {
        Self {
            catalog: CatalogService::new(unit_of_work),
            config,
            postgres: None,
        }
    }

    pub fn from_postgres(db: PostgresDatabase, config: Arc<Config>) -> Self {
        let unit_of_work = CatalogUnitOfWork::from_postgres(&db);
        Self {
            postgres: Some(db),
            ..Self::new(&unit_of_work, config)
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
