//! Applicant view of their own applications and review statuses.

use super::{log_failure, Effect, ListCursor, Reply, ScreenStatus};
use crate::api::response::parse_applications;
use crate::api::{ApiCall, RequestTag};
use crate::app::patch::remove_by_key;
use crate::domain::{Application, Result};

pub const LOAD_FAILED: &str = "Failed to fetch applications";
pub const WITHDRAW_FAILED: &str = "Failed to delete application";
pub const NO_APPLICATIONS: &str = "You have not applied to any jobs yet.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedJobsScreen {
    pub email: String,
    pub applications: Vec<Application>,
    pub cursor: ListCursor,
    pub status: ScreenStatus,
}

impl AppliedJobsScreen {
    #[must_use]
    pub fn mount(email: String) -> (Self, Vec<Effect>) {
        let call = ApiCall::ApplicationsByApplicant { email: email.clone() };
        let screen = Self {
            email,
            status: ScreenStatus::loading(),
            ..Self::default()
        };
        (screen, vec![Effect::Call(call)])
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Application> {
        self.applications.get(self.cursor.index)
    }

    pub fn move_down(&mut self) {
        self.cursor.down(self.applications.len());
    }

    pub fn move_up(&mut self) {
        self.cursor.up(self.applications.len());
    }

    #[must_use]
    pub fn withdraw_selected(&self) -> Vec<Effect> {
        self.selected()
            .map(|app| {
                Effect::Call(ApiCall::WithdrawApplication {
                    application_id: app.id.clone(),
                })
            })
            .into_iter()
            .collect()
    }

    pub fn on_response(&mut self, tag: &RequestTag, reply: Reply<'_>) -> Vec<Effect> {
        match tag {
            RequestTag::AppliedJobs => match reply.and_then(load_applications) {
                Ok(applications) => {
                    tracing::debug!(application_count = applications.len(), "applications loaded");
                    self.applications = applications;
                    self.status.loaded();
                    self.cursor.clamp(self.applications.len());
                }
                Err(e) => {
                    log_failure("applied jobs", &e);
                    self.status.fail(LOAD_FAILED);
                }
            },
            RequestTag::WithdrawApplication { application_id } => match reply {
                Ok(_) => {
                    remove_by_key(&mut self.applications, application_id);
                    self.cursor.clamp(self.applications.len());
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("withdraw application", &e);
                    self.status.fail(WITHDRAW_FAILED);
                }
            },
            other => tracing::debug!(tag = ?other, "unexpected response on applied jobs screen"),
        }
        vec![]
    }
}

/// Decodes the list and checks every application carries its job summary.
fn load_applications(body: &[u8]) -> Result<Vec<Application>> {
    let applications = parse_applications(body)?;
    for app in &applications {
        app.require_job()?;
    }
    Ok(applications)
}
