//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the `jobboard` library and the Zellij plugin
//! system. It implements `ZellijPlugin` and `ZellijWorker`, maps host events to
//! library events and executes the returned actions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     Zellij Main Thread       │
//! │  ┌────────────────────────┐  │
//! │  │    State (plugin)      │  │  ← UI state, event handling
//! │  └────────────────────────┘  │
//! │      │ web_request    │ IPC  │
//! │      ▼                ▼      │
//! │   CareerCraft   ┌──────────┐ │
//! │   REST API      │ Worker   │ │  ← Resume and image file reads
//! │                 └──────────┘ │
//! └──────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: Request `WebAccess` and `FullHdAccess`
//! 3. **Granted**: Open the configured start route
//! 4. **Update**: Map keys, web responses, worker messages and timers to events
//! 5. **Render**: Delegate to the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → [`map_key`] per input mode and screen
//! - `WebRequestResult` → `Event::ApiResponse` (context decoded from the echo map)
//! - `CustomMessage("attachment", ..)` → `Event::WorkerResponse`
//! - `Timer` → `Event::Timer`
//! - `PermissionRequestResult` → `Event::PermissionsResult`

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(plugin::State);
#[cfg(target_family = "wasm")]
register_worker!(plugin::AttachmentWorkerShim, attachment_worker, ATTACHMENT_WORKER);

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;
    use zellij_tile::shim::{post_message_to, post_message_to_plugin};

    use jobboard::api::{RequestContext, WireVerb};
    use jobboard::worker::{ensure_worker_tracing, AttachmentWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
    use jobboard::{handle_event, map_key, Action, Config, Event};
    use serde::{Deserialize, Serialize};

    /// Plugin state wrapper.
    pub struct State {
        app: jobboard::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: jobboard::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            jobboard::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            self.app = jobboard::initialize(&config);

            tracing::debug!("requesting permissions");
            request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);

            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::CustomMessage,
                EventType::Timer,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => {
                    tracing::trace!(bare_key = ?key.bare_key, "key event");
                    match map_key(&self.app, key) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    match RequestContext::from_map(&context) {
                        Some(context) => Event::ApiResponse { context, status, body },
                        None => {
                            tracing::debug!(?context, "web response without a request context");
                            return false;
                        }
                    }
                }
                zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                    match Self::map_custom_message_event(&message, &payload) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::Timer(_) => Event::Timer,
                zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                    granted: status == PermissionStatus::Granted,
                },
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for a in actions {
                        Self::execute_action(&a);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            jobboard::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
                zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
                zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                _ => "Other".to_string(),
            }
        }

        fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
            if message != WORKER_NAME {
                tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
                return None;
            }
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        }

        fn post_worker_message(message: &WorkerMessage) {
            match serde_json::to_string(message) {
                Ok(payload) => {
                    tracing::debug!(payload_len = payload.len(), "posting message to worker");
                    post_message_to(PluginMessage {
                        worker_name: Some(WORKER_NAME.to_string()),
                        name: WORKER_NAME.to_string(),
                        payload,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize worker message");
                }
            }
        }

        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => {
                    hide_self();
                }
                Action::Request(request) => {
                    let (verb, headers) = request.wire_parts();
                    let verb = match verb {
                        WireVerb::Get => HttpVerb::Get,
                        WireVerb::Post => HttpVerb::Post,
                        WireVerb::Put => HttpVerb::Put,
                        WireVerb::Delete => HttpVerb::Delete,
                    };
                    tracing::debug!(url = %request.url, method = ?request.method, "sending request");
                    web_request(
                        request.url.clone(),
                        verb,
                        headers,
                        request.body.clone(),
                        request.context.clone(),
                    );
                }
                Action::PostToWorker(message) => Self::post_worker_message(message),
                Action::StartTimer { seconds } => set_timeout(*seconds),
            }
        }
    }

    /// Worker thread entry point; file I/O is delegated to [`AttachmentWorker`].
    #[derive(Default, Serialize, Deserialize)]
    pub struct AttachmentWorkerShim {
        #[serde(skip)]
        inner: AttachmentWorker,
    }

    impl ZellijWorker<'_> for AttachmentWorkerShim {
        fn on_message(&mut self, message: String, payload: String) {
            ensure_worker_tracing();

            match self.inner.handle_payload(&payload) {
                Ok(response) => {
                    post_message_to_plugin(PluginMessage::new_to_plugin(&message, &response));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "worker could not handle message");
                }
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {}
