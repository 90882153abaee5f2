//! Route model and path parsing.

use std::fmt::{Display, Formatter};

pub const INTAKE_PATH: &str = "/";
pub const BROWSE_PATH: &str = "/second";
/// Query parameter that marks a browse entry right after a successful submit.
pub const SUCCESS_PARAM: &str = "success";

/// Known application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Identity intake form at `/`.
    Intake,
    /// Record browser at `/second`; `success` mirrors the query marker.
    Browse { success: bool },
}

impl Route {
    /// Browse route carrying the success marker.
    pub fn browse_after_submit() -> Self {
        Self::Browse { success: true }
    }

    /// Parses a path with optional query string.
    ///
    /// Returns `None` for unknown paths. Any `success` parameter, whatever its
    /// value, counts as the marker.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };
        let path = match path.trim_end_matches('/') {
            "" => INTAKE_PATH,
            other => other,
        };

        match path {
            INTAKE_PATH => Some(Self::Intake),
            BROWSE_PATH => Some(Self::Browse {
                success: query.is_some_and(has_success_param),
            }),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Intake => INTAKE_PATH,
            Self::Browse { .. } => BROWSE_PATH,
        }
    }

    pub fn is_browse(self) -> bool {
        matches!(self, Self::Browse { .. })
    }

    pub fn has_success_marker(self) -> bool {
        matches!(self, Self::Browse { success: true })
    }

    /// Same route with the success marker stripped.
    pub fn canonical(self) -> Self {
        match self {
            Self::Browse { .. } => Self::Browse { success: false },
            other => other,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Browse { success: true } => write!(f, "{BROWSE_PATH}?{SUCCESS_PARAM}=true"),
            other => f.write_str(other.path()),
        }
    }
}

fn has_success_param(query: &str) -> bool {
    query
        .split('&')
        .map(|pair| pair.split_once('=').map_or(pair, |(key, _)| key))
        .any(|key| key == SUCCESS_PARAM)
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Intake));
        assert_eq!(Route::parse(""), Some(Route::Intake));
        assert_eq!(
            Route::parse("/second"),
            Some(Route::Browse { success: false })
        );
        assert_eq!(
            Route::parse("/second/"),
            Some(Route::Browse { success: false })
        );
        assert_eq!(Route::parse("/third"), None);
    }

    #[test]
    fn success_marker_is_detected_among_other_params() {
        assert_eq!(
            Route::parse("/second?success=true"),
            Some(Route::Browse { success: true })
        );
        assert_eq!(
            Route::parse("/second?tab=1&success"),
            Some(Route::Browse { success: true })
        );
        assert_eq!(
            Route::parse("/second?successful=1"),
            Some(Route::Browse { success: false })
        );
    }

    #[test]
    fn display_round_trips_marker() {
        let route = Route::browse_after_submit();
        assert_eq!(route.to_string(), "/second?success=true");
        assert_eq!(route.canonical().to_string(), "/second");
        assert_eq!(Route::Intake.to_string(), "/");
    }
}
