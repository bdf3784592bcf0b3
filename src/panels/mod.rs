//! Panel state independent of the GUI toolkit.

pub mod admin;
pub mod notifications;
pub mod outcome;
pub mod secretaria;

pub use admin::AdminPanel;
pub use notifications::{DecisionDraft, NotificationsPanel};
pub use outcome::Outcome;
pub use secretaria::SecretariaPanel;
