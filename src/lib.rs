pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

pub use routes::{create_app, AppState};
