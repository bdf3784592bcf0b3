//! Static path-to-view table.
//!
//! The session check here only decides which view to show. It is a
//! convenience for the operator, not an access control; the backend must
//! enforce authorization on its own.

use crate::session::SessionStore;

/// Every view reachable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Admin,
    Secretaria,
    Employee,
    EmployeeRequests,
    EmployeeSchedules,
    EmployeeShifts,
    EmployeeNotifications,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Login,
        Route::Admin,
        Route::Secretaria,
        Route::Employee,
        Route::EmployeeRequests,
        Route::EmployeeSchedules,
        Route::EmployeeShifts,
        Route::EmployeeNotifications,
    ];

    /// Look up a route by exact path. A single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Admin => "/admin",
            Route::Secretaria => "/secretaria",
            Route::Employee => "/empleado",
            Route::EmployeeRequests => "/empleado/solicitudes",
            Route::EmployeeSchedules => "/empleado/horarios",
            Route::EmployeeShifts => "/empleado/turnos",
            Route::EmployeeNotifications => "/empleado/notificaciones",
        }
    }

    /// Window title for the view.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Inicio",
            Route::Login => "Iniciar sesión",
            Route::Admin => "Panel de Administración",
            Route::Secretaria => "Panel de Secretaria",
            Route::Employee => "Panel de Empleado",
            Route::EmployeeRequests => "Solicitudes",
            Route::EmployeeSchedules => "Horarios",
            Route::EmployeeShifts => "Turnos",
            Route::EmployeeNotifications => "Panel de Notificaciones",
        }
    }

    /// Whether the view expects a signed-in user.
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Secretaria)
    }
}

/// Redirect guarded routes to the root when nobody is signed in.
pub fn guard(route: Route, session: &SessionStore) -> Route {
    if route.requires_session() && !session.is_signed_in() {
        tracing::debug!("No session for {}, redirecting to /", route.path());
        return Route::Home;
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_round_trips_through_its_path() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_tolerates_trailing_slash() {
        assert_eq!(Route::from_path("/secretaria/"), Some(Route::Secretaria));
        assert_eq!(Route::from_path("/"), Some(Route::Home));
    }

    #[test]
    fn test_unknown_and_parameterised_paths_are_rejected() {
        assert_eq!(Route::from_path("/empleado/42"), None);
        assert_eq!(Route::from_path("/notificaciones"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_guard_redirects_secretaria_without_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::load(dir.path().join("session.toml")).unwrap();

        assert_eq!(guard(Route::Secretaria, &session), Route::Home);
        assert_eq!(guard(Route::Admin, &session), Route::Admin);
    }

    #[test]
    fn test_guard_allows_secretaria_with_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::load(dir.path().join("session.toml")).unwrap();
        session.sign_in("7").unwrap();

        assert_eq!(guard(Route::Secretaria, &session), Route::Secretaria);
    }
}
