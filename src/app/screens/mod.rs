//! Per-screen state containers.
//!
//! A screen is created when its route is opened and dropped on the next
//! navigation; nothing is cached across screens. Screens never talk to the host:
//! they return [`Effect`]s that the application state turns into actions
//! stamped with the current mount id.

pub mod admin;
pub mod applied;
pub mod jobs;
pub mod post_job;
pub mod posted_jobs;

pub use admin::{AdminAccess, AdminScreen, AdminSection};
pub use applied::AppliedJobsScreen;
pub use jobs::JobsScreen;
pub use post_job::PostJobScreen;
pub use posted_jobs::{PostedJobsScreen, PostedRow};

use super::router::Route;
use crate::api::ApiCall;
use crate::domain::{JobBoardError, Result, Session};
use crate::worker::AttachmentPurpose;

/// Response body of a request that passed the status check, or why it failed.
pub type Reply<'a> = Result<&'a [u8]>;

/// Host work requested by a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue an API call.
    Call(ApiCall),
    /// Read a file on the worker thread.
    LoadAttachment {
        purpose: AttachmentPurpose,
        path: String,
    },
    /// Navigate to `route` after the confirmation delay.
    Redirect(Route),
}

/// Loading flag plus the messages shown above (or instead of) the content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl ScreenStatus {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn loaded(&mut self) {
        self.loading = false;
    }

    /// Stops loading and shows `message` as the screen error.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.notice = None;
        self.error = Some(message.into());
    }

    /// Replaces any error with a confirmation message.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.error = None;
        self.notice = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.notice = None;
    }
}

/// Wrapping selection over a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub index: usize,
}

impl ListCursor {
    pub fn down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    pub fn up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
    }

    /// Keeps the index inside `0..len` after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.index = if len == 0 { 0 } else { self.index.min(len - 1) };
    }
}

/// The mounted screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home,
    Jobs(JobsScreen),
    PostJob(PostJobScreen),
    PostedJobs(PostedJobsScreen),
    AppliedJobs(AppliedJobsScreen),
    Admin(AdminScreen),
    /// A gated route was opened without a session.
    SignInRequired { requested: Route },
}

impl Screen {
    /// Creates the screen for `route` together with its initial fetch.
    ///
    /// Gated routes resolve to [`Screen::SignInRequired`] for anonymous
    /// sessions and issue nothing.
    #[must_use]
    pub fn open(route: Route, session: &Session) -> (Self, Vec<Effect>) {
        if route.requires_auth() && !session.is_signed_in() {
            tracing::debug!(route = %route, "route requires sign-in");
            return (Self::SignInRequired { requested: route }, vec![]);
        }

        let email = session_email(session);

        match route {
            Route::Home => (Self::Home, vec![]),
            Route::Jobs => {
                let (screen, effects) = JobsScreen::mount();
                (Self::Jobs(screen), effects)
            }
            Route::PostJob => (Self::PostJob(PostJobScreen::default()), vec![]),
            Route::PostedJobs => {
                let (screen, effects) = PostedJobsScreen::mount(email);
                (Self::PostedJobs(screen), effects)
            }
            Route::AppliedJobs => {
                let (screen, effects) = AppliedJobsScreen::mount(email);
                (Self::AppliedJobs(screen), effects)
            }
            Route::Admin => {
                let (screen, effects) = AdminScreen::mount(email);
                (Self::Admin(screen), effects)
            }
        }
    }

    /// Route this screen was opened for.
    #[must_use]
    pub const fn route(&self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::Jobs(_) => Route::Jobs,
            Self::PostJob(_) => Route::PostJob,
            Self::PostedJobs(_) => Route::PostedJobs,
            Self::AppliedJobs(_) => Route::AppliedJobs,
            Self::Admin(_) => Route::Admin,
            Self::SignInRequired { requested } => *requested,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<&ScreenStatus> {
        match self {
            Self::Jobs(s) => Some(&s.status),
            Self::PostJob(s) => Some(&s.status),
            Self::PostedJobs(s) => Some(&s.status),
            Self::AppliedJobs(s) => Some(&s.status),
            Self::Admin(s) => Some(&s.status),
            Self::Home | Self::SignInRequired { .. } => None,
        }
    }
}

/// Logs a failed request with its operation name.
pub(crate) fn log_failure(operation: &str, err: &JobBoardError) {
    tracing::warn!(operation = operation, error = %err, "request failed");
}

/// Email of the signed-in user, or empty for anonymous sessions.
pub(crate) fn session_email(session: &Session) -> String {
    session
        .identity()
        .map(|identity| identity.email.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Identity;

    #[test]
    fn cursor_wraps_and_clamps() {
        let mut cursor = ListCursor::default();
        cursor.up(3);
        assert_eq!(cursor.index, 2);
        cursor.down(3);
        assert_eq!(cursor.index, 0);
        cursor.index = 5;
        cursor.clamp(2);
        assert_eq!(cursor.index, 1);
        cursor.clamp(0);
        assert_eq!(cursor.index, 0);
    }

    #[test]
    fn anonymous_gated_route_issues_nothing() {
        let (screen, effects) = Screen::open(Route::Admin, &Session::Anonymous);
        assert_eq!(screen, Screen::SignInRequired { requested: Route::Admin });
        assert!(effects.is_empty());
    }

    #[test]
    fn signed_in_admin_checks_access() {
        let session = Session::SignedIn(Identity {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        });
        let (screen, effects) = Screen::open(Route::Admin, &session);
        assert_eq!(screen.route(), Route::Admin);
        assert_eq!(
            effects,
            vec![Effect::Call(ApiCall::AdminOverview {
                email: "ada@example.com".into()
            })]
        );
    }
}
