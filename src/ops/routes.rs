use std::fmt;

use crate::io::auth::Session;

/// Path the guard sends signed-out visitors to
pub const LOGIN_PATH: &str = "/login";
/// Where `/app` lands
pub const APP_INDEX_TARGET: &str = "/app/okr";

/// Every page the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    AppIndex,
    Dashboard,
    Okr,
    Backlog,
    Notes,
    NotFound,
}

impl Route {
    /// Match a path. Query strings, fragments and a trailing slash are
    /// ignored.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Route::Landing,
            "/login" => Route::Login,
            "/app" => Route::AppIndex,
            "/app/dashboard" => Route::Dashboard,
            "/app/okr" => Route::Okr,
            "/app/backlog" => Route::Backlog,
            "/app/notes" => Route::Notes,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::AppIndex => "/app",
            Route::Dashboard => "/app/dashboard",
            Route::Okr => "/app/okr",
            Route::Backlog => "/app/backlog",
            Route::Notes => "/app/notes",
            Route::NotFound => "*",
        }
    }

    /// Whether the route needs a signed-in session
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            Route::AppIndex | Route::Dashboard | Route::Okr | Route::Backlog | Route::Notes
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::Landing => "landing",
            Route::Login => "login",
            Route::AppIndex => "app",
            Route::Dashboard => "dashboard",
            Route::Okr => "okr",
            Route::Backlog => "backlog",
            Route::Notes => "notes",
            Route::NotFound => "not found",
        };
        f.write_str(name)
    }
}

/// What navigating to a path does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(&'static str),
}

/// Resolve `path` for `session`, applying the sign-in guard.
pub fn resolve(path: &str, session: &Session) -> Resolution {
    let route = Route::parse(path);
    if route.is_protected() && !session.is_authenticated() {
        return Resolution::Redirect(LOGIN_PATH);
    }
    match route {
        Route::AppIndex => Resolution::Redirect(APP_INDEX_TARGET),
        other => Resolution::Render(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;

    fn session(signed_in: bool) -> Session {
        let mut store = MemoryStore::new();
        let mut session = Session::load(&store);
        if signed_in {
            session.login(&mut store).unwrap();
        }
        session
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse(""), Route::Landing);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/app/"), Route::AppIndex);
        assert_eq!(Route::parse("/app/notes?tag=sync"), Route::Notes);
        assert_eq!(Route::parse("/app/okr#top"), Route::Okr);
        assert_eq!(Route::parse("/app/reports"), Route::NotFound);
    }

    #[test]
    fn test_every_route_round_trips_through_its_path() {
        for route in [
            Route::Landing,
            Route::Login,
            Route::AppIndex,
            Route::Dashboard,
            Route::Okr,
            Route::Backlog,
            Route::Notes,
        ] {
            assert_eq!(Route::parse(route.path()), route);
        }
    }

    #[test]
    fn test_signed_out_protected_route_redirects_to_login() {
        let out = session(false);
        assert_eq!(resolve("/app/okr", &out), Resolution::Redirect("/login"));
        assert_eq!(resolve("/app", &out), Resolution::Redirect("/login"));
        assert_eq!(resolve("/", &out), Resolution::Render(Route::Landing));
        assert_eq!(resolve("/login", &out), Resolution::Render(Route::Login));
    }

    #[test]
    fn test_signed_in_routes_render() {
        let signed_in = session(true);
        assert_eq!(resolve("/app/backlog", &signed_in), Resolution::Render(Route::Backlog));
        assert_eq!(resolve("/app", &signed_in), Resolution::Redirect("/app/okr"));
    }

    #[test]
    fn test_unknown_path_is_not_found_regardless_of_session() {
        assert_eq!(resolve("/nope", &session(false)), Resolution::Render(Route::NotFound));
        assert_eq!(resolve("/app/nope", &session(true)), Resolution::Render(Route::NotFound));
    }
}
