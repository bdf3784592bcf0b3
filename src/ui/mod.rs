//! GUI views and application state.

pub mod admin_panel;
pub mod app;
pub mod components;
pub mod employee_panel;
pub mod home;
pub mod login;
pub mod notifications_panel;
pub mod secretaria_panel;

pub use app::{App, AppInit};
