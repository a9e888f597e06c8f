use std::fmt;
use std::str::FromStr;

/// The three views reachable by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Watchlist,
    Movie(String),
}

impl FromStr for Route {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Ok(Route::Home),
            "/watchlist" => Ok(Route::Watchlist),
            _ => match trimmed.strip_prefix("/movie/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::Movie(id.to_string())),
                _ => Err(format!(
                    "Unknown path '{}'. Use '/', '/watchlist' or '/movie/<id>'",
                    path
                )),
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Watchlist => write!(f, "/watchlist"),
            Route::Movie(id) => write!(f, "/movie/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!("/".parse::<Route>(), Ok(Route::Home));
        assert_eq!("/watchlist".parse::<Route>(), Ok(Route::Watchlist));
        assert_eq!("/watchlist/".parse::<Route>(), Ok(Route::Watchlist));
        assert_eq!("/movie/550".parse::<Route>(), Ok(Route::Movie("550".to_string())));
    }

    #[test]
    fn test_movie_route_keeps_unknown_ids() {
        // Unknown ids are resolved by the detail view as "not found"
        assert_eq!("/movie/abc".parse::<Route>(), Ok(Route::Movie("abc".to_string())));
    }

    #[test]
    fn test_rejects_unknown_paths() {
        assert!("/movies".parse::<Route>().is_err());
        assert!("/movie/".parse::<Route>().is_err());
        assert!("/movie/1/credits".parse::<Route>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for path in ["/", "/watchlist", "/movie/13"] {
            assert_eq!(path.parse::<Route>().unwrap().to_string(), path);
        }
    }
}
