//! Route table and authentication guard for the navigation shell

/// The admin screens reachable from the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Users,
    UserAdd,
    UserEdit(i64),
    Categories,
    Workspaces,
    Profile,
}

impl Route {
    /// Path string for a route
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Users => "/users".to_string(),
            Route::UserAdd => "/users/add".to_string(),
            Route::UserEdit(id) => format!("/users/{}/edit", id),
            Route::Categories => "/categories".to_string(),
            Route::Workspaces => "/workspaces".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Match a path against the route table
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "" => return Some(Route::Dashboard),
            "/login" => return Some(Route::Login),
            "/users" => return Some(Route::Users),
            "/users/add" => return Some(Route::UserAdd),
            "/categories" => return Some(Route::Categories),
            "/workspaces" => return Some(Route::Workspaces),
            "/profile" => return Some(Route::Profile),
            _ => {}
        }
        let rest = path.strip_prefix("/users/")?;
        let id = rest.strip_suffix("/edit")?;
        id.parse().ok().map(Route::UserEdit)
    }
}

/// Resolve a requested route against the session.
///
/// Without a token every route renders the login screen; the requested
/// path is not preserved across the redirect. With a token, a request for
/// the login screen lands on the dashboard instead.
pub fn guard(authenticated: bool, requested: Route) -> Route {
    if !authenticated {
        Route::Login
    } else if requested == Route::Login {
        Route::Dashboard
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        for route in [
            Route::Login,
            Route::Dashboard,
            Route::Users,
            Route::UserAdd,
            Route::UserEdit(42),
            Route::Categories,
            Route::Workspaces,
            Route::Profile,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(Route::parse("/users/abc/edit"), None);
        assert_eq!(Route::parse("/nope"), None);
    }

    #[test]
    fn guard_redirects_everything_without_a_token() {
        assert_eq!(guard(false, Route::Users), Route::Login);
        assert_eq!(guard(false, Route::UserEdit(7)), Route::Login);
        assert_eq!(guard(false, Route::Login), Route::Login);
    }

    #[test]
    fn guard_passes_through_with_a_token() {
        assert_eq!(guard(true, Route::Users), Route::Users);
        assert_eq!(guard(true, Route::Login), Route::Dashboard);
    }
}
