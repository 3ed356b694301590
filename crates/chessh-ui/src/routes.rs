//! Routes the shell links to.

use std::fmt;

/// A page in the shell.
///
/// Route handling itself lives elsewhere; this enum only gives the
/// views typed link targets instead of string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: where signing out lands.
    Root,
    /// `/home`: the authenticated home area.
    Home,
    /// `/auth-successful`: where the OAuth callback redirects to.
    AuthSuccessful,
    /// `/password`: password settings.
    Password,
    /// `/keys`: SSH key management.
    Keys,
}

impl Route {
    /// Every known route, in navigation order.
    pub const ALL: [Route; 5] = [
        Route::Root,
        Route::Home,
        Route::AuthSuccessful,
        Route::Password,
        Route::Keys,
    ];

    /// The URL path for this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Home => "/home",
            Route::AuthSuccessful => "/auth-successful",
            Route::Password => "/password",
            Route::Keys => "/keys",
        }
    }

    /// Parses a URL path. A trailing slash and query string are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|route| route.path() == trimmed)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_round_trips_every_route() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_ignores_trailing_slash_and_query() {
        assert_eq!(Route::from_path("/home/"), Some(Route::Home));
        assert_eq!(
            Route::from_path("/auth-successful?code=x"),
            Some(Route::AuthSuccessful)
        );
        assert_eq!(Route::from_path(""), Some(Route::Root));
    }

    #[test]
    fn test_from_path_unknown_returns_none() {
        assert_eq!(Route::from_path("/api/player/token/me"), None);
    }
}
