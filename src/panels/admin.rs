//! Administrator user directory with client-side search.

use super::outcome::Outcome;
use crate::api::Backend;
use crate::error::Result;
use crate::models::{RoleCode, UserRecord};

#[derive(Debug, Default)]
pub struct AdminPanel {
    users: Vec<UserRecord>,
    loading: bool,
    pub search: String,
    pub role_filter: Option<RoleCode>,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Distinct role codes present, ascending.
    pub fn roles(&self) -> Vec<RoleCode> {
        let mut roles: Vec<RoleCode> = self.users.iter().map(|u| u.role).collect();
        roles.sort_by_key(|r| r.0);
        roles.dedup();
        roles
    }

    /// Mark a load as started. Returns `false` if one is already in flight.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish_load(&mut self, result: Result<Vec<UserRecord>>) -> Option<Outcome> {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                if self.role_filter.is_some_and(|r| !self.users.iter().any(|u| u.role == r)) {
                    self.role_filter = None;
                }
                None
            }
            Err(e) => {
                tracing::warn!("Error fetching users: {}", e);
                Some(Outcome::failed(format!("Error al obtener usuarios: {e}")))
            }
        }
    }

    pub async fn load_users(&mut self, backend: &dyn Backend) -> Option<Outcome> {
        if !self.begin_load() {
            return None;
        }
        let result = backend.list_users().await;
        self.finish_load(result)
    }

    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.role_filter.is_some()
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.role_filter = None;
    }

    /// Users matching the search text and role filter, in source order.
    pub fn filtered(&self) -> Vec<&UserRecord> {
        let needle = self.search.trim().to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                let search_match = needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.document_number.to_lowercase().contains(&needle);
                let role_match = self.role_filter.is_none_or(|r| r == u.role);
                search_match && role_match
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FixtureBackend;

    async fn loaded() -> AdminPanel {
        let mut panel = AdminPanel::new();
        let outcome = panel.load_users(&FixtureBackend::new()).await;
        assert_eq!(outcome, None);
        panel
    }

    #[tokio::test]
    async fn test_no_filter_returns_everyone() {
        let panel = loaded().await;
        assert_eq!(panel.filtered().len(), panel.users().len());
        assert!(!panel.has_filters());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let mut panel = loaded().await;

        panel.search = "PÉREZ".to_string();
        let names: Vec<&str> = panel.filtered().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Luis Pérez"]);

        panel.search = "1000102".to_string();
        assert_eq!(panel.filtered().len(), 1);

        panel.search = "@chronoguard.com".to_string();
        assert_eq!(panel.filtered().len(), panel.users().len());
    }

    #[tokio::test]
    async fn test_role_filter_combines_with_search() {
        let mut panel = loaded().await;
        panel.role_filter = Some(RoleCode::EMPLOYEE);
        assert_eq!(panel.filtered().len(), 4);

        panel.search = "ventas".to_string();
        assert!(panel.filtered().is_empty());

        panel.search = "elena".to_string();
        assert_eq!(panel.filtered().len(), 1);

        panel.clear_filters();
        assert_eq!(panel.filtered().len(), panel.users().len());
    }

    #[tokio::test]
    async fn test_roles_are_distinct_and_sorted() {
        let panel = loaded().await;
        assert_eq!(panel.roles(), vec![RoleCode(1), RoleCode(2), RoleCode(3)]);
    }

    #[tokio::test]
    async fn test_second_load_while_loading_is_ignored() {
        let mut panel = AdminPanel::new();
        assert!(panel.begin_load());

        let outcome = panel.load_users(&FixtureBackend::new()).await;
        assert_eq!(outcome, None);
        assert!(panel.is_loading());
        assert!(panel.users().is_empty());

        panel.finish_load(Ok(Vec::new()));
        assert!(panel.begin_load());
    }

    #[test]
    fn test_stale_role_filter_is_dropped_on_reload() {
        let mut panel = AdminPanel::new();
        panel.role_filter = Some(RoleCode(9));
        panel.finish_load(Ok(Vec::new()));
        assert_eq!(panel.role_filter, None);
    }
}
