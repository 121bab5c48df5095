pub mod app;
pub mod catalog;
pub mod change;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod selection;
pub mod state;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
