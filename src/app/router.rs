//! Route table.
//!
//! Paths mirror the web client's URLs so `start_route` accepts the same values
//! users already know.

use std::fmt;

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Jobs,
    PostJob,
    PostedJobs,
    AppliedJobs,
    Admin,
}

impl Route {
    /// Navigation order; digit keys `1`..`6` follow it.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Jobs,
        Self::PostJob,
        Self::PostedJobs,
        Self::AppliedJobs,
        Self::Admin,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Jobs => "/dashboard",
            Self::PostJob => "/job-post",
            Self::PostedJobs => "/job-application",
            Self::AppliedJobs => "/job-status",
            Self::Admin => "/admin-cz",
        }
    }

    /// Parses a path; a trailing slash and a missing leading slash are accepted.
    ///
    /// ```
    /// use jobboard::app::Route;
    ///
    /// assert_eq!(Route::from_path("/dashboard"), Some(Route::Jobs));
    /// assert_eq!(Route::from_path("job-status/"), Some(Route::AppliedJobs));
    /// assert_eq!(Route::from_path("/nope"), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|route| route.path().trim_matches('/') == trimmed)
    }

    /// Whether the route needs a signed-in session.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Home | Self::Jobs)
    }

    /// Label used in the navigation bar and header.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Jobs => "Find Jobs",
            Self::PostJob => "Post a Job",
            Self::PostedJobs => "Posted Jobs",
            Self::AppliedJobs => "Applied Jobs",
            Self::Admin => "Admin",
        }
    }

    /// Route bound to a digit key (`'1'` is Home).
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
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
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path(""), Some(Route::Home));
    }

    #[test]
    fn only_home_and_jobs_are_public() {
        let public: Vec<Route> = Route::ALL.into_iter().filter(|r| !r.requires_auth()).collect();
        assert_eq!(public, vec![Route::Home, Route::Jobs]);
    }

    #[test]
    fn digits_map_in_order() {
        assert_eq!(Route::from_digit('1'), Some(Route::Home));
        assert_eq!(Route::from_digit('6'), Some(Route::Admin));
        assert_eq!(Route::from_digit('0'), None);
        assert_eq!(Route::from_digit('7'), None);
    }
}
