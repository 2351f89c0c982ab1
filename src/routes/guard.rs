//! Navigation guard
//!
//! Runs before every route renders. It only looks at the session's derived
//! authentication flag; the token is not revalidated against the backend.

use super::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    Allowed,
    Redirected(Route),
}

pub fn check(target: &Route, authenticated: bool) -> Navigation {
    if target.requires_auth() && !authenticated {
        Navigation::Redirected(Route::Login {})
    } else {
        Navigation::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_routes() -> Vec<Route> {
        vec![
            Route::Home {},
            Route::Login {},
            Route::Register {},
            Route::ArticleCreate {},
            Route::ArticleDetail { id: 1 },
            Route::Profile {},
            Route::Rankings {},
            Route::Assistant {},
        ]
    }

    #[test]
    fn test_gated_routes_redirect_when_logged_out() {
        for route in all_routes() {
            let expected = if route.requires_auth() {
                Navigation::Redirected(Route::Login {})
            } else {
                Navigation::Allowed
            };
            assert_eq!(check(&route, false), expected, "route {}", route);
        }
    }

    #[test]
    fn test_everything_allowed_when_logged_in() {
        for route in all_routes() {
            assert_eq!(check(&route, true), Navigation::Allowed, "route {}", route);
        }
    }

    #[test]
    fn test_gated_set() {
        let gated: Vec<String> = all_routes()
            .into_iter()
            .filter(Route::requires_auth)
            .map(|r| r.to_string())
            .collect();
        assert_eq!(gated, vec!["/create", "/profile", "/assistant"]);
    }

    #[test]
    fn test_paths_resolve_to_routes() {
        assert_eq!("/create".parse::<Route>().ok(), Some(Route::ArticleCreate {}));
        assert_eq!("/article/42".parse::<Route>().ok(), Some(Route::ArticleDetail { id: 42 }));
        assert_eq!(Route::Rankings {}.to_string(), "/rankings");

        let target = "/profile".parse::<Route>().ok().unwrap();
        assert_eq!(check(&target, false), Navigation::Redirected(Route::Login {}));
    }
}
