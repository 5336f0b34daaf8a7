//! Side effects requested by the event handler.
//!
//! The handler never calls into the host. It returns a `Vec<Action>` after each
//! event and the plugin shim executes them in order.
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::Action;
//! use jobboard::worker::{AttachmentPurpose, WorkerMessage};
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_attachment(
//!         AttachmentPurpose::Resume,
//!         "~/cv.pdf".to_string(),
//!         1,
//!     )),
//!     Action::StartTimer { seconds: 2.0 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::HttpRequest;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends an HTTP request through the host.
    ///
    /// The response comes back as a `WebRequestResult` event carrying the
    /// request's context map.
    Request(HttpRequest),

    /// Posts a message to the attachment worker.
    PostToWorker(WorkerMessage),

    /// Arms a one-shot host timer; expiry arrives as a `Timer` event.
    StartTimer {
        seconds: f64,
    },
}
