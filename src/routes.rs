//! The five navigable routes and the one authorization predicate every gate uses.

use std::fmt;

use crate::domain::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Dashboard,
    Login,
    Register,
    Admin,
}

impl Route {
    pub const ALL: [Route; 5] = [Self::Home, Self::Dashboard, Self::Login, Self::Register, Self::Admin];

    /// Resolves a path. Anything unrecognised resolves to [`Route::Home`].
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = trimmed.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/dashboard" => Self::Dashboard,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/admin" => Self::Admin,
            _ => Self::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Dashboard => "/dashboard",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Admin => "/admin",
        }
    }

    /// Role the route demands, if any.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

impl Access {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Decides whether `user` may enter `route`.
///
/// Anonymous visitors are sent to [`Route::Login`]; signed-in users lacking the
/// required role are sent to [`Route::Dashboard`].
pub fn authorize(route: Route, user: Option<&User>) -> Access {
    match (route.required_role(), user) {
        (None, _) => Access::Granted,
        (Some(_), None) => Access::Redirect(Route::Login),
        (Some(role), Some(user)) if user.role == role => Access::Granted,
        (Some(_), Some(_)) => Access::Redirect(Route::Dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User::new("1", "Admin User", "admin@sweetshop.com", Role::Admin)
    }

    fn customer() -> User {
        User::new("2", "Customer User", "customer@sweetshop.com", Role::Customer)
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_paths_resolve_home() {
        assert_eq!(Route::from_path("/nowhere"), Route::Home);
        assert_eq!(Route::from_path("/admin/secret"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/admin/"), Route::Admin);
        assert_eq!(Route::from_path("/login?next=/admin"), Route::Login);
    }

    #[test]
    fn test_admin_gate() {
        assert_eq!(authorize(Route::Admin, None), Access::Redirect(Route::Login));
        assert_eq!(authorize(Route::Admin, Some(&customer())), Access::Redirect(Route::Dashboard));
        assert_eq!(authorize(Route::Admin, Some(&admin())), Access::Granted);
    }

    #[test]
    fn test_open_routes_admit_everyone() {
        for route in [Route::Home, Route::Dashboard, Route::Login, Route::Register] {
            assert!(authorize(route, None).is_granted());
            assert!(authorize(route, Some(&customer())).is_granted());
            assert!(authorize(route, Some(&admin())).is_granted());
        }
    }
}
