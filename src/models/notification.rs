//! Notifications awaiting an operator decision.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A server-originated item that needs approval or rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "userId", alias = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "type", alias = "tipo")]
    pub kind: NotificationType,
    #[serde(alias = "mensaje")]
    pub message: String,
    #[serde(rename = "sentAt", alias = "fechaEnvio")]
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    /// Send time in local time, e.g. `08 Jul 2024, 10:30`.
    pub fn sent_at_display(&self) -> String {
        self.sent_at.with_timezone(&Local).format("%d %b %Y, %H:%M").to_string()
    }
}

/// Notification category. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationType {
    Request,
    Approval,
    Alert,
    Other(String),
}

impl NotificationType {
    pub fn label(&self) -> &str {
        match self {
            NotificationType::Request => "Solicitud",
            NotificationType::Approval => "Aprobación",
            NotificationType::Alert => "Alerta",
            NotificationType::Other(s) => s,
        }
    }
}

impl From<String> for NotificationType {
    fn from(s: String) -> Self {
        match s.trim() {
            "Request" | "Solicitud" => NotificationType::Request,
            "Approval" | "Aprobación" | "Aprobacion" => NotificationType::Approval,
            "Alert" | "Alerta" => NotificationType::Alert,
            _ => NotificationType::Other(s),
        }
    }
}

impl From<NotificationType> for String {
    fn from(kind: NotificationType) -> Self {
        match kind {
            NotificationType::Request => "Request".to_string(),
            NotificationType::Approval => "Approval".to_string(),
            NotificationType::Alert => "Alert".to_string(),
            NotificationType::Other(s) => s,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the operator decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Approve,
    Reject,
}

impl DecisionAction {
    /// Button and dialog verb.
    pub fn verb(&self) -> &'static str {
        match self {
            DecisionAction::Approve => "Aprobar",
            DecisionAction::Reject => "Rechazar",
        }
    }

    /// Past participle used in result messages.
    pub fn past_participle(&self) -> &'static str {
        match self {
            DecisionAction::Approve => "aprobada",
            DecisionAction::Reject => "rechazada",
        }
    }
}

/// Body of `POST /notificaciones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub notification_id: i64,
    pub action: DecisionAction,
    pub response_message: String,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_english_keys() {
        let json = r#"{"id":1,"userId":101,"type":"Request","message":"X","sentAt":"2024-07-08T10:30:00Z"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();

        assert_eq!(n.id, 1);
        assert_eq!(n.user_id, 101);
        assert_eq!(n.kind, NotificationType::Request);
        assert_eq!(n.sent_at, Utc.with_ymd_and_hms(2024, 7, 8, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_deserialize_legacy_spanish_keys() {
        let json = r#"{
            "id": 3, "idUsuario": 103, "tipo": "Alerta",
            "mensaje": "Intento de acceso", "fechaEnvio": "2024-07-08T08:45:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();

        assert_eq!(n.user_id, 103);
        assert_eq!(n.kind, NotificationType::Alert);
        assert_eq!(n.message, "Intento de acceso");
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let kind = NotificationType::from("Recordatorio".to_string());
        assert_eq!(kind, NotificationType::Other("Recordatorio".to_string()));
        assert_eq!(kind.label(), "Recordatorio");
        assert_eq!(NotificationType::from("Aprobación".to_string()), NotificationType::Approval);
    }

    #[test]
    fn test_decision_wire_shape() {
        let decision = Decision {
            notification_id: 1,
            action: DecisionAction::Reject,
            response_message: "Denied".to_string(),
            user_id: 101,
        };
        let value = serde_json::to_value(&decision).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "notificationId": 1,
                "action": "reject",
                "responseMessage": "Denied",
                "userId": 101
            })
        );
    }
}
