//! Shared server state

use super::config::Config;
use crate::catalog::CatalogService;
use crate::orders::{AdmissionService, LifecycleManager, OrderQuery, OrderStorage};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
///
/// Cloning is cheap: the storage holds its database behind an `Arc`, and
/// the services are thin handles over it.
#[derive(Clone)]
pub struct ServerState {
    pub storage: OrderStorage,
    pub catalog: Arc<CatalogService>,
    pub admission: AdmissionService,
    pub lifecycle: LifecycleManager,
    pub query: OrderQuery,
}

impl ServerState {
    /// Initialize storage, catalog, and services from configuration
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let db_path = std::path::Path::new(&config.work_dir).join("orders.redb");
        let storage = OrderStorage::open(&db_path)?;

        let catalog = match &config.menu_file {
            Some(path) => CatalogService::from_json_file(path)?,
            None => {
                info!("MENU_FILE not set, using built-in menu");
                CatalogService::with_items(CatalogService::default_menu())
            }
        };
        let catalog = Arc::new(catalog);

        info!(
            db_path = %db_path.display(),
            menu_items = catalog.len(),
            occupied_tables = storage.occupied_tables()?.len(),
            "Server state initialized"
        );

        Ok(Self {
            admission: AdmissionService::new(storage.clone(), catalog.clone()),
            lifecycle: LifecycleManager::new(storage.clone()),
            query: OrderQuery::new(storage.clone()),
            storage,
            catalog,
        })
    }
}
