use crate::config::Config;
use crate::pricing::PriceConfig;
use crate::storage::ProductStore;
use crate::working_list::WorkingList;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
    pub list: Arc<Mutex<WorkingList>>,
    pub prices: PriceConfig,
    pub store_timeout: Duration,
}

impl AppState {
    pub fn new(config: &Config, store: ProductStore, list: WorkingList) -> Self {
        Self {
            store,
            list: Arc::new(Mutex::new(list)),
            prices: config.prices,
            store_timeout: config.store_timeout,
        }
    }
}
