//! In-memory backend serving demo data.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::Backend;
use crate::error::Result;
use crate::models::{Decision, Notification, NotificationType, RoleCode, UserRecord};

/// Backend that never touches the network.
///
/// Decided notifications disappear from later listings.
pub struct FixtureBackend {
    notifications: Mutex<Vec<Notification>>,
    users: Vec<UserRecord>,
}

impl Default for FixtureBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBackend {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(fixture_notifications()),
            users: fixture_users(),
        }
    }
}

#[async_trait]
impl Backend for FixtureBackend {
    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        let pending = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        Ok(pending.clone())
    }

    async fn submit_decision(&self, decision: &Decision) -> Result<()> {
        let mut pending = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        pending.retain(|n| n.id != decision.notification_id);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.users.clone())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// The four pending notifications the console ships with.
pub fn fixture_notifications() -> Vec<Notification> {
    let at = |d, h, m| Utc.with_ymd_and_hms(2024, 7, d, h, m, 0).single().unwrap_or_default();

    vec![
        Notification {
            id: 1,
            user_id: 101,
            kind: NotificationType::Request,
            message: "Solicitud de permisos para acceder al módulo de reportes".to_string(),
            sent_at: at(8, 10, 30),
        },
        Notification {
            id: 2,
            user_id: 102,
            kind: NotificationType::Approval,
            message: "Necesita aprobación para cambios en configuración del sistema".to_string(),
            sent_at: at(8, 9, 15),
        },
        Notification {
            id: 3,
            user_id: 103,
            kind: NotificationType::Alert,
            message: "Intento de acceso no autorizado detectado".to_string(),
            sent_at: at(8, 8, 45),
        },
        Notification {
            id: 4,
            user_id: 104,
            kind: NotificationType::Request,
            message: "Solicitud de vacaciones del 15 al 25 de julio".to_string(),
            sent_at: at(7, 16, 20),
        },
    ]
}

fn fixture_users() -> Vec<UserRecord> {
    let user = |id, role, doc: &str, name: &str, email: &str, dept: Option<&str>| UserRecord {
        id,
        role: RoleCode(role),
        document_number: doc.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        department: dept.map(str::to_string),
    };

    vec![
        user(1, 1, "1000001", "Andrea Ruiz", "andrea.ruiz@chronoguard.com", None),
        user(2, 2, "1000002", "Marta Gil", "marta.gil@chronoguard.com", Some("Administración")),
        user(101, 3, "1000101", "Luis Pérez", "luis.perez@chronoguard.com", Some("Ventas")),
        user(102, 3, "1000102", "Sofía Torres", "sofia.torres@chronoguard.com", Some("Soporte")),
        user(103, 3, "1000103", "Jorge Díaz", "jorge.diaz@chronoguard.com", None),
        user(104, 3, "1000104", "Elena Mora", "elena.mora@chronoguard.com", Some("Ventas")),
    ]
}
