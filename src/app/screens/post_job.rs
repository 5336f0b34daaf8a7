//! Employer job submission.
//!
//! Submitting runs three steps: resolve the poster's user id by email, read the
//! optional image on the worker, then send the multipart `create-job` request.

use super::{log_failure, Effect, Reply, ScreenStatus};
use crate::api::response::parse_user;
use crate::api::{ApiCall, Multipart, RequestTag};
use crate::domain::{Attachment, Session};
use crate::forms::{FormCursor, JobPostingForm, ValidJobPosting, ValidationErrors};
use crate::worker::AttachmentPurpose;

pub const POSTER_NOT_FOUND: &str = "User not found, cannot create job";
pub const JOB_SUBMITTED: &str =
    "Your job has been submitted. After review and confirmation, it will be listed on our portal.";
pub const JOB_FAILED: &str = "Failed to create job";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostJobScreen {
    pub form: JobPostingForm,
    pub cursor: FormCursor,
    pub validation: ValidationErrors,
    pub status: ScreenStatus,
    /// Set from submit until `create-job` completes.
    pub submitting: bool,
    /// Validated posting waiting for the poster lookup or the image.
    pub pending: Option<ValidJobPosting>,
    /// Server id of the signed-in user, once resolved.
    pub poster_id: Option<String>,
}

impl PostJobScreen {
    /// Validates the form and starts the submission.
    ///
    /// Validation failures stay local; nothing is sent.
    pub fn submit(&mut self, session: &Session) -> Vec<Effect> {
        if self.submitting {
            tracing::debug!("job posting already submitting");
            return vec![];
        }
        let Some(identity) = session.identity() else {
            self.status.fail(POSTER_NOT_FOUND);
            return vec![];
        };

        match self.form.validate() {
            Err(errors) => {
                tracing::debug!(error_count = errors.len(), "job posting invalid");
                self.validation = errors;
                vec![]
            }
            Ok(valid) => {
                self.validation = ValidationErrors::new();
                self.status.clear();
                self.submitting = true;
                self.pending = Some(valid);
                vec![Effect::Call(ApiCall::UserByEmail {
                    email: identity.email.clone(),
                })]
            }
        }
    }

    pub fn on_response(&mut self, tag: &RequestTag, reply: Reply<'_>) -> Vec<Effect> {
        match tag {
            RequestTag::LookupPoster => self.on_poster(reply),
            RequestTag::CreateJob => {
                self.submitting = false;
                self.pending = None;
                match reply {
                    Ok(_) => {
                        tracing::info!("job posting created");
                        *self = Self {
                            poster_id: self.poster_id.take(),
                            ..Self::default()
                        };
                        self.status.notify(JOB_SUBMITTED);
                    }
                    Err(e) => {
                        log_failure("create job", &e);
                        self.status.fail(e.server_message().unwrap_or(JOB_FAILED));
                    }
                }
                vec![]
            }
            other => {
                tracing::debug!(tag = ?other, "unexpected response on post job screen");
                vec![]
            }
        }
    }

    fn on_poster(&mut self, reply: Reply<'_>) -> Vec<Effect> {
        match reply.and_then(parse_user) {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "poster resolved");
                self.poster_id = Some(user.id);
                self.continue_submission()
            }
            Err(e) => {
                log_failure("lookup poster", &e);
                self.abort(POSTER_NOT_FOUND);
                vec![]
            }
        }
    }

    fn continue_submission(&mut self) -> Vec<Effect> {
        let Some(valid) = self.pending.as_ref() else {
            return vec![];
        };
        match valid.image_path.clone() {
            Some(path) => vec![Effect::LoadAttachment {
                purpose: AttachmentPurpose::JobImage,
                path,
            }],
            None => self.create_job(None),
        }
    }

    /// Sends `create-job` once the image was read (or failed to be).
    pub fn on_attachment(
        &mut self,
        purpose: AttachmentPurpose,
        loaded: std::result::Result<Attachment, String>,
    ) -> Vec<Effect> {
        if purpose != AttachmentPurpose::JobImage || self.pending.is_none() {
            return vec![];
        }
        match loaded {
            Ok(image) => self.create_job(Some(image)),
            Err(message) => {
                self.abort(&message);
                vec![]
            }
        }
    }

    fn create_job(&mut self, image: Option<Attachment>) -> Vec<Effect> {
        let (Some(valid), Some(poster_id)) = (self.pending.take(), self.poster_id.as_deref()) else {
            self.abort(POSTER_NOT_FOUND);
            return vec![];
        };

        let mut body = Multipart::new().texts(valid.form_fields(poster_id));
        if let Some(image) = image {
            body = body.file(AttachmentPurpose::JobImage.field_name(), image);
        }
        vec![Effect::Call(ApiCall::CreateJob { body })]
    }

    fn abort(&mut self, message: &str) {
        self.submitting = false;
        self.pending = None;
        self.status.fail(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, JobBoardError};

    fn session() -> Session {
        Session::SignedIn(Identity {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        })
    }

    fn valid_screen() -> PostJobScreen {
        PostJobScreen {
            form: JobPostingForm {
                name: "Rust Engineer".into(),
                job_type: "Full-time".into(),
                category: "Technology".into(),
                location: "Berlin".into(),
                description: "Build terminal tools all day".into(),
                salary_range: "50000-70000".into(),
                company_name: "Ferris GmbH".into(),
                is_available: true,
                image_path: String::new(),
            },
            ..PostJobScreen::default()
        }
    }

    #[test]
    fn lookup_then_create_without_image() {
        let mut screen = valid_screen();
        let effects = screen.submit(&session());
        assert_eq!(
            effects,
            vec![Effect::Call(ApiCall::UserByEmail {
                email: "ada@example.com".into()
            })]
        );
        assert!(screen.submit(&session()).is_empty());

        let effects = screen.on_response(
            &RequestTag::LookupPoster,
            Ok(br#"{"_id":"u1","name":"Ada","email":"ada@example.com"}"#),
        );
        assert!(matches!(effects.as_slice(), [Effect::Call(ApiCall::CreateJob { .. })]));

        screen.on_response(&RequestTag::CreateJob, Ok(b"{}"));
        assert_eq!(screen.status.notice.as_deref(), Some(JOB_SUBMITTED));
        assert_eq!(screen.form, JobPostingForm::default());
        assert!(!screen.submitting);
    }

    #[test]
    fn unknown_poster_stops_submission() {
        let mut screen = valid_screen();
        screen.submit(&session());
        let effects = screen.on_response(
            &RequestTag::LookupPoster,
            Err(JobBoardError::Http {
                status: 404,
                message: String::new(),
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(screen.status.error.as_deref(), Some(POSTER_NOT_FOUND));
        assert!(!screen.submitting);
    }

    #[test]
    fn image_is_loaded_before_create() {
        let mut screen = valid_screen();
        screen.form.image_path = "~/logo.png".into();
        screen.submit(&session());
        let effects = screen.on_response(
            &RequestTag::LookupPoster,
            Ok(br#"{"_id":"u1","name":"Ada","email":"ada@example.com"}"#),
        );
        assert_eq!(
            effects,
            vec![Effect::LoadAttachment {
                purpose: AttachmentPurpose::JobImage,
                path: "~/logo.png".into()
            }]
        );
    }
}
