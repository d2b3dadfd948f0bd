pub mod app;
pub mod batch;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod state;
pub mod storage;
pub mod ui;
pub mod working_list;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::ProductStore;
pub use working_list::WorkingList;
