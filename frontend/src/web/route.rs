//! Route definitions.
//!
//! Pure domain layer with no DOM or `web_sys` dependency: the application's
//! routes, their URL paths, and which of them sit behind the session guard.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login form (default route).
    #[default]
    Login,
    /// Account creation form.
    Register,
    /// Study dashboard (guarded).
    Dashboard,
    /// Profile editor (guarded).
    Profile,
    /// Notification preferences (guarded).
    Notifications,
    /// Study-session progress reports (guarded).
    Reports,
    /// Unknown path.
    NotFound,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/registro" => Self::Register,
            "/panel" => Self::Dashboard,
            "/perfil" => Self::Profile,
            "/notificaciones" => Self::Notifications,
            "/reportes" => Self::Reports,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/registro",
            Self::Dashboard => "/panel",
            Self::Profile => "/perfil",
            Self::Notifications => "/notificaciones",
            Self::Reports => "/reportes",
            Self::NotFound => "/404",
        }
    }

    /// Routes rendered behind the session guard.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Profile | Self::Notifications | Self::Reports
        )
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/registro"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/panel"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/perfil"), AppRoute::Profile);
        assert_eq!(AppRoute::from_path("/notificaciones"), AppRoute::Notifications);
        assert_eq!(AppRoute::from_path("/reportes"), AppRoute::Reports);
        assert_eq!(AppRoute::from_path("/otra-cosa"), AppRoute::NotFound);
    }

    #[test]
    fn every_route_roundtrips_through_its_own_path() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Profile,
            AppRoute::Notifications,
            AppRoute::Reports,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn guard_only_covers_protected_views() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Profile.requires_auth());
        assert!(AppRoute::Notifications.requires_auth());
        assert!(AppRoute::Reports.requires_auth());
    }
}
