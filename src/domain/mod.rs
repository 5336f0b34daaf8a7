//! Domain layer for the job board plugin.
//!
//! Core types shared by every screen, independent of Zellij APIs and of the
//! HTTP layer: jobs, applications, users and the signed-in session, plus the
//! crate-wide error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`job`]: Job listings, job types and categories
//! - [`application`]: Applications and review statuses
//! - [`user`]: Users, references and the session
//! - [`attachment`]: Files staged for upload

pub mod application;
pub mod attachment;
pub mod error;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationStatus, Education, PostedJob};
pub use attachment::Attachment;
pub use error::{JobBoardError, Result};
pub use job::{Category, Job, JobRef, JobSummary, JobType};
pub use user::{Identity, Session, User, UserRef};
