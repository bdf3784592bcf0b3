//! Pending notifications and the approve/reject workflow.
//!
//! Each network call is split into a `begin_*` half that validates and
//! flips the busy flag, and a `finish_*` half that reconciles local state
//! with the result. The GUI runs the call in between on the tokio runtime;
//! tests and headless callers can use the async helpers that compose both.

use super::outcome::Outcome;
use crate::api::Backend;
use crate::error::Result;
use crate::models::{Decision, DecisionAction, Notification};

pub const EMPTY_RESPONSE_MESSAGE: &str = "Por favor, ingresa un mensaje de respuesta";
pub const SUBMIT_FAILED_MESSAGE: &str = "Error al procesar la respuesta. Intenta nuevamente.";

/// The notification being answered and how.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionDraft {
    pub notification: Notification,
    pub action: DecisionAction,
}

/// State of the notifications panel.
///
/// The response dialog is open exactly when a draft exists.
#[derive(Debug, Default)]
pub struct NotificationsPanel {
    notifications: Vec<Notification>,
    loading: bool,
    draft: Option<DecisionDraft>,
    response_message: String,
    submitting: bool,
}

impl NotificationsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_modal_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&DecisionDraft> {
        self.draft.as_ref()
    }

    pub fn selected(&self) -> Option<&Notification> {
        self.draft.as_ref().map(|d| &d.notification)
    }

    pub fn action(&self) -> Option<DecisionAction> {
        self.draft.as_ref().map(|d| d.action)
    }

    pub fn response_message(&self) -> &str {
        &self.response_message
    }

    /// Bound to the response text box.
    pub fn response_message_mut(&mut self) -> &mut String {
        &mut self.response_message
    }

    pub fn set_response_message(&mut self, message: impl Into<String>) {
        self.response_message = message.into();
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        self.draft.is_some() && !self.submitting && !self.response_message.trim().is_empty()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the list with the fetched one. A failure leaves it empty.
    pub fn finish_load(&mut self, result: Result<Vec<Notification>>) {
        self.loading = false;
        match result {
            Ok(notifications) => {
                tracing::info!("Loaded {} pending notifications", notifications.len());
                self.notifications = notifications;
            }
            Err(e) => {
                tracing::warn!("Error fetching notifications: {}", e);
                self.notifications.clear();
            }
        }
    }

    pub async fn load_notifications(&mut self, backend: &dyn Backend) {
        self.begin_load();
        let result = backend.list_notifications().await;
        self.finish_load(result);
    }

    /// Open the response dialog for `notification`.
    pub fn open_decision(&mut self, notification: &Notification, action: DecisionAction) {
        if self.submitting {
            return;
        }
        self.draft = Some(DecisionDraft {
            notification: notification.clone(),
            action,
        });
        self.response_message.clear();
    }

    /// Discard the dialog. Ignored while a submission is in flight.
    pub fn close_modal(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.draft = None;
        self.response_message.clear();
        true
    }

    /// Validate the dialog and mark the submission as in flight.
    ///
    /// On `Err` nothing changed and no request must be sent.
    pub fn begin_submit(&mut self) -> std::result::Result<Decision, Outcome> {
        if self.submitting {
            return Err(Outcome::invalid("Ya se está enviando una respuesta"));
        }
        let Some(draft) = &self.draft else {
            return Err(Outcome::invalid("No hay ninguna notificación seleccionada"));
        };
        if self.response_message.trim().is_empty() {
            return Err(Outcome::invalid(EMPTY_RESPONSE_MESSAGE));
        }

        self.submitting = true;
        Ok(Decision {
            notification_id: draft.notification.id,
            action: draft.action,
            response_message: self.response_message.clone(),
            user_id: draft.notification.user_id,
        })
    }

    /// Apply the backend's answer to a submission started by `begin_submit`.
    pub fn finish_submit(&mut self, decision: &Decision, result: Result<()>) -> Outcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(
                    "Notification {} {}",
                    decision.notification_id,
                    decision.action.past_participle()
                );
                self.notifications.retain(|n| n.id != decision.notification_id);
                self.draft = None;
                self.response_message.clear();
                Outcome::success(format!(
                    "Notificación {} exitosamente",
                    decision.action.past_participle()
                ))
            }
            Err(e) => {
                tracing::error!("Decision for notification {} failed: {}", decision.notification_id, e);
                Outcome::failed(SUBMIT_FAILED_MESSAGE)
            }
        }
    }

    pub async fn submit_decision(&mut self, backend: &dyn Backend) -> Outcome {
        let decision = match self.begin_submit() {
            Ok(decision) => decision,
            Err(outcome) => return outcome,
        };
        let result = backend.submit_decision(&decision).await;
        self.finish_submit(&decision, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures::fixture_notifications;
    use crate::api::mock::MockBackend;
    use crate::error::AppError;
    use chrono::{TimeZone, Utc};
    use crate::models::NotificationType;

    fn loaded_panel() -> NotificationsPanel {
        let mut panel = NotificationsPanel::new();
        panel.begin_load();
        panel.finish_load(Ok(fixture_notifications()));
        panel
    }

    fn notification_one() -> Notification {
        Notification {
            id: 1,
            user_id: 101,
            kind: NotificationType::Request,
            message: "X".to_string(),
            sent_at: Utc.with_ymd_and_hms(2024, 7, 8, 10, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_load_replaces_list_and_clears_loading() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_notifications()
            .times(1)
            .returning(|| Ok(fixture_notifications()));

        let mut panel = NotificationsPanel::new();
        panel.load_notifications(&backend).await;

        assert!(!panel.is_loading());
        assert_eq!(panel.notifications().len(), 4);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_list_empty() {
        let mut backend = MockBackend::new();
        backend.expect_list_notifications().returning(|| {
            Err(AppError::Status {
                status: 500,
                url: "http://localhost/notificaciones".to_string(),
            })
        });

        let mut panel = loaded_panel();
        panel.load_notifications(&backend).await;

        assert!(!panel.is_loading());
        assert!(panel.notifications().is_empty());
    }

    #[test]
    fn test_begin_load_sets_loading() {
        let mut panel = NotificationsPanel::new();
        panel.begin_load();
        assert!(panel.is_loading());
    }

    #[test]
    fn test_open_decision_opens_modal_with_clean_message() {
        let mut panel = loaded_panel();
        panel.set_response_message("leftover");

        let n = panel.notifications()[1].clone();
        panel.open_decision(&n, DecisionAction::Approve);

        assert!(panel.is_modal_open());
        assert_eq!(panel.selected().map(|n| n.id), Some(2));
        assert_eq!(panel.action(), Some(DecisionAction::Approve));
        assert_eq!(panel.response_message(), "");
    }

    #[test]
    fn test_close_modal_discards_draft() {
        let mut panel = loaded_panel();
        let n = panel.notifications()[0].clone();
        panel.open_decision(&n, DecisionAction::Reject);
        panel.set_response_message("draft");

        assert!(panel.close_modal());
        assert!(!panel.is_modal_open());
        assert_eq!(panel.action(), None);
        assert_eq!(panel.response_message(), "");
        assert_eq!(panel.notifications().len(), 4);
    }

    #[tokio::test]
    async fn test_blank_message_sends_nothing() {
        let mut backend = MockBackend::new();
        backend.expect_submit_decision().never();

        let mut panel = loaded_panel();
        let n = panel.notifications()[0].clone();
        panel.open_decision(&n, DecisionAction::Approve);

        for blank in ["", "   ", "\n\t"] {
            panel.set_response_message(blank);
            assert!(!panel.can_submit());
            let outcome = panel.submit_decision(&backend).await;
            assert_eq!(outcome, Outcome::invalid(EMPTY_RESPONSE_MESSAGE));
            assert!(!panel.is_submitting());
            assert!(panel.is_modal_open());
        }
    }

    #[tokio::test]
    async fn test_submit_without_selection_sends_nothing() {
        let mut backend = MockBackend::new();
        backend.expect_submit_decision().never();

        let mut panel = loaded_panel();
        panel.set_response_message("hola");
        let outcome = panel.submit_decision(&backend).await;

        assert!(matches!(outcome, Outcome::Invalid(_)));
    }

    #[tokio::test]
    async fn test_rejection_scenario_removes_notification() {
        let mut backend = MockBackend::new();
        backend
            .expect_submit_decision()
            .withf(|d| {
                d.notification_id == 1
                    && d.action == DecisionAction::Reject
                    && d.response_message == "Denied, insufficient justification"
                    && d.user_id == 101
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut panel = NotificationsPanel::new();
        panel.finish_load(Ok(vec![notification_one()]));
        panel.open_decision(&notification_one(), DecisionAction::Reject);
        panel.set_response_message("Denied, insufficient justification");

        let outcome = panel.submit_decision(&backend).await;

        assert!(outcome.is_success());
        assert!(outcome.message().contains("rechazada"));
        assert!(panel.notifications().iter().all(|n| n.id != 1));
        assert!(!panel.is_modal_open());
        assert_eq!(panel.selected(), None);
        assert_eq!(panel.response_message(), "");
        assert!(!panel.is_submitting());
    }

    #[tokio::test]
    async fn test_approval_message() {
        let mut backend = MockBackend::new();
        backend.expect_submit_decision().returning(|_| Ok(()));

        let mut panel = loaded_panel();
        let n = panel.notifications()[2].clone();
        panel.open_decision(&n, DecisionAction::Approve);
        panel.set_response_message("Revisado");

        let outcome = panel.submit_decision(&backend).await;

        assert_eq!(outcome, Outcome::success("Notificación aprobada exitosamente"));
        let ids: Vec<i64> = panel.notifications().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_state_for_retry() {
        let mut backend = MockBackend::new();
        backend.expect_submit_decision().times(1).returning(|_| {
            Err(AppError::Status {
                status: 503,
                url: "http://localhost/notificaciones".to_string(),
            })
        });

        let mut panel = loaded_panel();
        let before = panel.notifications().to_vec();
        let n = before[0].clone();
        panel.open_decision(&n, DecisionAction::Reject);
        panel.set_response_message("No procede");

        let outcome = panel.submit_decision(&backend).await;

        assert_eq!(outcome, Outcome::failed(SUBMIT_FAILED_MESSAGE));
        assert_eq!(panel.notifications(), before.as_slice());
        assert!(panel.is_modal_open());
        assert_eq!(panel.selected().map(|n| n.id), Some(n.id));
        assert_eq!(panel.response_message(), "No procede");
        assert!(panel.can_submit());
    }

    #[test]
    fn test_in_flight_submission_blocks_second_submit_and_close() {
        let mut panel = loaded_panel();
        let n = panel.notifications()[0].clone();
        panel.open_decision(&n, DecisionAction::Approve);
        panel.set_response_message("Ok");

        let decision = panel.begin_submit().unwrap();
        assert!(panel.is_submitting());
        assert!(!panel.can_submit());
        assert!(panel.begin_submit().is_err());
        assert!(!panel.close_modal());
        assert!(panel.is_modal_open());

        let outcome = panel.finish_submit(&decision, Ok(()));
        assert!(outcome.is_success());
        assert!(!panel.is_submitting());
    }

    #[test]
    fn test_finish_for_vanished_notification_is_harmless() {
        let mut panel = loaded_panel();
        let n = panel.notifications()[0].clone();
        panel.open_decision(&n, DecisionAction::Approve);
        panel.set_response_message("Ok");
        let decision = panel.begin_submit().unwrap();

        // A reload while the request was in flight dropped the item.
        panel.finish_load(Ok(Vec::new()));
        let outcome = panel.finish_submit(&decision, Ok(()));

        assert!(outcome.is_success());
        assert!(panel.notifications().is_empty());
        assert!(!panel.is_modal_open());
    }
}
