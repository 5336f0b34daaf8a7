//! Details/apply dialog coordination on the jobs screen.
//!
//! ```text
//!            select(j)              apply()
//!   Idle ───────────────▶ Details(j) ───────▶ Apply(j)
//!    ▲  ◀─────────────────────┘ close()          │
//!    └───────────────────────────────────────────┘ cancel() / succeed()
//! ```
//!
//! `select` and `open_apply` are accepted from any state, so at most one dialog
//! is ever open and selecting another job replaces the current one.

use crate::domain::Job;
use crate::forms::{ApplicationForm, FormCursor, ValidApplication, ValidationErrors};

/// State of an open apply dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyDialog {
    pub job: Job,
    pub form: ApplicationForm,
    pub cursor: FormCursor,
    /// Set from submit until the apply request completes; blocks resubmits.
    pub submitting: bool,
    /// Submission failure shown inside the dialog.
    pub error: Option<String>,
    pub validation: ValidationErrors,
    /// Validated application waiting for its resume to be read.
    pub pending: Option<ValidApplication>,
}

impl ApplyDialog {
    #[must_use]
    pub fn new(job: Job, applicant_name: &str) -> Self {
        Self {
            job,
            form: ApplicationForm::prefilled(applicant_name),
            cursor: FormCursor::default(),
            submitting: false,
            error: None,
            validation: ValidationErrors::new(),
            pending: None,
        }
    }
}

/// Which dialog is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Idle,
    Details(Job),
    Apply(Box<ApplyDialog>),
}

/// Owns the dialog state and enforces its transitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogCoordinator {
    state: Dialog,
}

impl DialogCoordinator {
    #[must_use]
    pub const fn state(&self) -> &Dialog {
        &self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.state, Dialog::Idle)
    }

    /// Job shown by the open dialog.
    #[must_use]
    pub fn job(&self) -> Option<&Job> {
        match &self.state {
            Dialog::Idle => None,
            Dialog::Details(job) => Some(job),
            Dialog::Apply(apply) => Some(&apply.job),
        }
    }

    #[must_use]
    pub fn apply_dialog(&self) -> Option<&ApplyDialog> {
        match &self.state {
            Dialog::Apply(apply) => Some(apply),
            _ => None,
        }
    }

    pub fn apply_dialog_mut(&mut self) -> Option<&mut ApplyDialog> {
        match &mut self.state {
            Dialog::Apply(apply) => Some(apply),
            _ => None,
        }
    }

    /// Shows the details of `job`, replacing whatever was open.
    pub fn select(&mut self, job: Job) {
        tracing::debug!(job_id = %job.id, "dialog: details");
        self.state = Dialog::Details(job);
    }

    /// Moves from details to the apply form of the same job.
    ///
    /// Returns `false` (and changes nothing) unless details are open.
    pub fn apply(&mut self, applicant_name: &str) -> bool {
        match std::mem::take(&mut self.state) {
            Dialog::Details(job) => {
                tracing::debug!(job_id = %job.id, "dialog: details -> apply");
                self.state = Dialog::Apply(Box::new(ApplyDialog::new(job, applicant_name)));
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Opens the apply form for `job` directly, closing any other dialog.
    pub fn open_apply(&mut self, job: Job, applicant_name: &str) {
        tracing::debug!(job_id = %job.id, "dialog: apply");
        self.state = Dialog::Apply(Box::new(ApplyDialog::new(job, applicant_name)));
    }

    /// Closes the details dialog. Returns `false` if details were not open.
    pub fn close(&mut self) -> bool {
        if matches!(self.state, Dialog::Details(_)) {
            self.state = Dialog::Idle;
            true
        } else {
            false
        }
    }

    /// Abandons the apply form.
    ///
    /// Returns `false` if it was not open or its submission is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.apply_dialog().is_some_and(|apply| apply.submitting) {
            tracing::debug!("dialog: cancel ignored while submitting");
            return false;
        }
        self.leave_apply()
    }

    /// Closes the apply form after a successful submission.
    pub fn succeed(&mut self) -> bool {
        self.leave_apply()
    }

    fn leave_apply(&mut self) -> bool {
        if matches!(self.state, Dialog::Apply(_)) {
            self.state = Dialog::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, JobType};

    fn job(id: &str) -> Job {
        Job {
            id: id.to_string(),
            name: format!("Job {id}"),
            job_type: JobType::FullTime,
            category: Category::Technology,
            location: "Remote".to_string(),
            description: String::new(),
            salary_range: "1-2".to_string(),
            company_name: "Acme".to_string(),
            is_available: true,
            verified: true,
            image_url: None,
            posted_by: None,
            created_at: None,
        }
    }

    #[test]
    fn apply_replaces_details_of_the_same_job() {
        let mut dialog = DialogCoordinator::default();
        dialog.select(job("a"));
        assert!(dialog.apply("Ada"));
        assert!(matches!(dialog.state(), Dialog::Apply(apply) if apply.job.id == "a"));
        assert!(!dialog.apply("Ada"));

        dialog.select(job("b"));
        assert!(matches!(dialog.state(), Dialog::Details(j) if j.id == "b"));
    }

    #[test]
    fn close_and_cancel_only_leave_their_own_dialog() {
        let mut dialog = DialogCoordinator::default();
        assert!(!dialog.close());
        assert!(!dialog.cancel());

        dialog.open_apply(job("a"), "Ada");
        assert!(!dialog.close());
        assert!(dialog.is_open());
        assert!(dialog.succeed());
        assert!(!dialog.is_open());
        assert!(dialog.job().is_none());
    }

    #[test]
    fn submitting_form_cannot_be_cancelled() {
        let mut dialog = DialogCoordinator::default();
        dialog.open_apply(job("a"), "Ada");
        if let Some(apply) = dialog.apply_dialog_mut() {
            apply.submitting = true;
        }
        assert!(!dialog.cancel());
        assert!(dialog.apply_dialog().is_some());

        assert!(dialog.succeed());
        assert!(!dialog.is_open());
    }
}
