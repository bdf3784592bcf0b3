pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod panels;
pub mod router;
pub mod session;
pub mod ui;

pub use error::{AppError, Result};
