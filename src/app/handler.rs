//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that changes the
//! application: key-derived commands, HTTP responses, worker results, timer
//! expiry and the permission prompt. It mutates [`AppState`] and returns the
//! actions the plugin shim must execute, plus whether a re-render is needed.
//!
//! # Event Types
//!
//! - **Navigation**: `Down`, `Up`, `Navigate`, `Reload`, `CloseFocus`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`
//! - **Filters**: `CycleType`, `CycleCategory`, `ClearFilters`
//! - **Dialogs and forms**: `ShowDetails`, `Apply`, `CloseDialog`, `NextField`, `Submit`, ...
//! - **Review and moderation**: `SetStatus`, `Delete`, `Verify`, `SwitchSection`
//! - **Host**: `ApiResponse`, `WorkerResponse`, `Timer`, `PermissionsResult`
//!
//! Responses and worker results carry the mount id of the screen that asked for
//! them and are dropped once that screen has been replaced.
//!
//! # Example
//!
//! ```rust
//! use jobboard::api::ApiClient;
//! use jobboard::app::{handle_event, AppState, Event, Route};
//! use jobboard::domain::Session;
//! use jobboard::ui::Theme;
//!
//! let mut state = AppState::new(Session::Anonymous, ApiClient::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Navigate(Route::Jobs))?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use super::router::Route;
use super::screens::jobs::SIGN_IN_TO_APPLY;
use super::screens::{Effect, Screen};
use crate::api::response::{check_admin_status, check_status};
use crate::api::{RequestContext, RequestTag};
use crate::app::{Action, AppState};
use crate::domain::{ApplicationStatus, Result};
use crate::forms::{FieldKind, FormCursor, FormModel};
use crate::worker::WorkerResponse;

/// Commands and host notifications processed by [`handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the list selection down (wraps to top).
    Down,
    /// Moves the list selection up (wraps to bottom).
    Up,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens a route, replacing the mounted screen.
    Navigate(Route),
    /// Re-mounts the current screen, refetching its data.
    Reload,
    /// Leaves the innermost mode: editing, dialog, then active filters.
    Escape,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the query input (from navigating results).
    FocusSearchBar,
    /// Focuses the filtered results (from typing).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Typed character for the query or the field being edited.
    Char(char),
    /// Deletes the last character of the query or the field being edited.
    Backspace,

    CycleType,
    CycleCategory,
    ClearFilters,

    /// Opens the details dialog for the selected job.
    ShowDetails,
    /// Opens the apply form, from details or for the selected job.
    Apply,
    /// Closes details or cancels the apply form.
    CloseDialog,

    NextField,
    PrevField,
    /// Steps a choice field.
    CycleOption {
        forward: bool,
    },
    /// Flips a toggle field.
    ToggleField,
    /// Starts typing into the focused field.
    StartEditing,
    StopEditing,
    /// Submits the apply form or the job posting form.
    Submit,

    /// Owner review of the selected application.
    SetStatus(ApplicationStatus),
    /// Deletes or withdraws the selected row.
    Delete,
    /// Admin verification of the selected job.
    Verify,
    /// Switches between the admin job and application sections.
    SwitchSection,

    /// An HTTP response delivered by the host.
    ApiResponse {
        context: RequestContext,
        /// Status code; `0` when no response was received.
        status: u16,
        body: Vec<u8>,
    },
    /// A result from the attachment worker.
    WorkerResponse(WorkerResponse),
    /// The confirmation timer expired.
    Timer,
    /// Outcome of the startup permission request.
    PermissionsResult {
        granted: bool,
    },
}

impl Event {
    /// Short name recorded on the handler span.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::CloseFocus => "close_focus",
            Self::Navigate(_) => "navigate",
            Self::Reload => "reload",
            Self::Escape => "escape",
            Self::SearchMode => "search_mode",
            Self::FocusSearchBar => "focus_search_bar",
            Self::FocusResults => "focus_results",
            Self::ExitSearch => "exit_search",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::CycleType => "cycle_type",
            Self::CycleCategory => "cycle_category",
            Self::ClearFilters => "clear_filters",
            Self::ShowDetails => "show_details",
            Self::Apply => "apply",
            Self::CloseDialog => "close_dialog",
            Self::NextField => "next_field",
            Self::PrevField => "prev_field",
            Self::CycleOption { .. } => "cycle_option",
            Self::ToggleField => "toggle_field",
            Self::StartEditing => "start_editing",
            Self::StopEditing => "stop_editing",
            Self::Submit => "submit",
            Self::SetStatus(_) => "set_status",
            Self::Delete => "delete",
            Self::Verify => "verify",
            Self::SwitchSection => "switch_section",
            Self::ApiResponse { .. } => "api_response",
            Self::WorkerResponse(_) => "worker_response",
            Self::Timer => "timer",
            Self::PermissionsResult { .. } => "permissions_result",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the view changed and the pane should re-render.
///
/// # Errors
///
/// Currently every failure is absorbed into screen state; the `Result` is kept
/// so host-facing failures can surface to the shim.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Down => Ok((move_selection(state, true), vec![])),
        Event::Up => Ok((move_selection(state, false), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Navigate(route) => Ok((true, state.navigate(*route))),
        Event::Reload => {
            tracing::debug!(route = %state.screen.route(), "reloading screen");
            Ok((true, state.reload()))
        }
        Event::Escape => Ok((escape(state), vec![])),

        Event::SearchMode => {
            let Screen::Jobs(jobs) = &mut state.screen else {
                return Ok((false, vec![]));
            };
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            jobs.clear_query();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            let query_empty = state
                .jobs_screen()
                .map_or(true, |jobs| jobs.filter.query.is_empty());
            state.input_mode = if query_empty {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            if let Screen::Jobs(jobs) = &mut state.screen {
                tracing::debug!(query = %jobs.filter.query, "exiting search mode");
                jobs.clear_query();
            }
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(_) => {
                let Screen::Jobs(jobs) = &mut state.screen else {
                    return Ok((false, vec![]));
                };
                jobs.push_query(*c);
                tracing::trace!(query = %jobs.filter.query, char = %c, "search query updated");
                Ok((true, vec![]))
            }
            InputMode::Editing => Ok((
                with_active_form(state, |form, cursor| form.input_char(cursor.index, *c)).is_some(),
                vec![],
            )),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(_) => {
                let Screen::Jobs(jobs) = &mut state.screen else {
                    return Ok((false, vec![]));
                };
                jobs.pop_query();
                Ok((true, vec![]))
            }
            InputMode::Editing => Ok((
                with_active_form(state, |form, cursor| form.backspace(cursor.index)).is_some(),
                vec![],
            )),
            InputMode::Normal => Ok((false, vec![])),
        },

        Event::CycleType | Event::CycleCategory | Event::ClearFilters => {
            let Screen::Jobs(jobs) = &mut state.screen else {
                return Ok((false, vec![]));
            };
            match event {
                Event::CycleType => jobs.cycle_type(),
                Event::CycleCategory => jobs.cycle_category(),
                _ => jobs.clear_filters(),
            }
            tracing::debug!(
                job_type = ?jobs.filter.job_type,
                category = ?jobs.filter.category,
                visible = jobs.visible.len(),
                "filters changed"
            );
            Ok((true, vec![]))
        }

        Event::ShowDetails => {
            let Screen::Jobs(jobs) = &mut state.screen else {
                return Ok((false, vec![]));
            };
            let shown = jobs.show_details();
            if shown {
                state.input_mode = InputMode::Normal;
            }
            Ok((shown, vec![]))
        }
        Event::Apply => {
            let Screen::Jobs(jobs) = &mut state.screen else {
                return Ok((false, vec![]));
            };
            let changed = jobs.start_apply(&state.session);
            if changed {
                state.input_mode = InputMode::Normal;
            }
            Ok((changed, vec![]))
        }
        Event::CloseDialog => {
            let Screen::Jobs(jobs) = &mut state.screen else {
                return Ok((false, vec![]));
            };
            let closed = jobs.dialog.close() || jobs.dialog.cancel();
            state.input_mode = InputMode::Normal;
            Ok((closed, vec![]))
        }

        Event::NextField | Event::PrevField => {
            let forward = matches!(event, Event::NextField);
            let editable = with_active_form(state, |form, cursor| {
                let count = form.fields().len();
                if forward {
                    cursor.next(count);
                } else {
                    cursor.prev(count);
                }
                is_text_field(form, cursor)
            });
            match editable {
                Some(editable) => {
                    if state.input_mode == InputMode::Editing && !editable {
                        state.input_mode = InputMode::Normal;
                    }
                    Ok((true, vec![]))
                }
                None => Ok((false, vec![])),
            }
        }
        Event::CycleOption { forward } => Ok((
            with_active_form(state, |form, cursor| form.cycle(cursor.index, *forward)).is_some(),
            vec![],
        )),
        Event::ToggleField => Ok((
            with_active_form(state, |form, cursor| form.toggle(cursor.index)).is_some(),
            vec![],
        )),
        Event::StartEditing => {
            let editable = with_active_form(state, |form, cursor| {
                if is_text_field(form, cursor) {
                    return true;
                }
                match form.fields().get(cursor.index).map(|spec| spec.kind) {
                    Some(FieldKind::Choice) => form.cycle(cursor.index, true),
                    Some(FieldKind::Toggle) => form.toggle(cursor.index),
                    _ => {}
                }
                false
            });
            match editable {
                Some(true) => {
                    state.input_mode = InputMode::Editing;
                    Ok((true, vec![]))
                }
                Some(false) => Ok((true, vec![])),
                None => Ok((false, vec![])),
            }
        }
        Event::StopEditing => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Submit => {
            state.input_mode = InputMode::Normal;
            let effects = match &mut state.screen {
                Screen::Jobs(jobs) => jobs.submit_application(),
                Screen::PostJob(post) => post.submit(&state.session),
                _ => return Ok((false, vec![])),
            };
            Ok((true, state.run_effects(effects)))
        }

        Event::SetStatus(status) => {
            let effects = match &state.screen {
                Screen::PostedJobs(posted) => posted.set_status(*status),
                _ => vec![],
            };
            Ok((false, state.run_effects(effects)))
        }
        Event::Delete => {
            let effects = match &state.screen {
                Screen::PostedJobs(posted) => posted.delete_selected(),
                Screen::AppliedJobs(applied) => applied.withdraw_selected(),
                Screen::Admin(admin) => admin.delete_selected(),
                _ => vec![],
            };
            Ok((false, state.run_effects(effects)))
        }
        Event::Verify => {
            let effects = match &state.screen {
                Screen::Admin(admin) => admin.verify_selected(),
                _ => vec![],
            };
            Ok((false, state.run_effects(effects)))
        }
        Event::SwitchSection => {
            let Screen::Admin(admin) = &mut state.screen else {
                return Ok((false, vec![]));
            };
            admin.switch_section();
            Ok((true, vec![]))
        }

        Event::ApiResponse {
            context,
            status,
            body,
        } => Ok(handle_api_response(state, context, *status, body)),
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
        Event::Timer => {
            let actions = state.fire_timer();
            Ok((!actions.is_empty(), actions))
        }
        Event::PermissionsResult { granted } => {
            state.permissions_granted = *granted;
            if *granted {
                tracing::info!(route = %state.start_route, "permissions granted");
                let route = state.start_route;
                Ok((true, state.navigate(route)))
            } else {
                tracing::warn!("permissions denied, API requests are unavailable");
                Ok((true, vec![]))
            }
        }
    }
}

fn move_selection(state: &mut AppState, down: bool) -> bool {
    match &mut state.screen {
        Screen::Jobs(jobs) if !jobs.dialog.is_open() => {
            if down {
                jobs.move_down();
            } else {
                jobs.move_up();
            }
        }
        Screen::PostedJobs(posted) => {
            if down {
                posted.move_down();
            } else {
                posted.move_up();
            }
        }
        Screen::AppliedJobs(applied) => {
            if down {
                applied.move_down();
            } else {
                applied.move_up();
            }
        }
        Screen::Admin(admin) => {
            if down {
                admin.move_down();
            } else {
                admin.move_up();
            }
        }
        _ => return false,
    }
    true
}

fn escape(state: &mut AppState) -> bool {
    if state.input_mode != InputMode::Normal {
        state.input_mode = InputMode::Normal;
        return true;
    }
    let Screen::Jobs(jobs) = &mut state.screen else {
        return false;
    };
    if jobs.dialog.is_open() {
        return jobs.dialog.close() || jobs.dialog.cancel();
    }
    if jobs.status.error.as_deref() == Some(SIGN_IN_TO_APPLY) {
        jobs.status.clear();
        return true;
    }
    if jobs.filter.is_active() {
        jobs.clear_filters();
        return true;
    }
    false
}

/// Runs `edit` on the form that currently has focus, if any.
///
/// Forms are locked while their submission is in flight.
fn with_active_form<T>(
    state: &mut AppState,
    edit: impl FnOnce(&mut dyn FormModel, &mut FormCursor) -> T,
) -> Option<T> {
    match &mut state.screen {
        Screen::Jobs(jobs) => {
            let apply = jobs.dialog.apply_dialog_mut()?;
            if apply.submitting {
                return None;
            }
            apply.error = None;
            Some(edit(&mut apply.form, &mut apply.cursor))
        }
        Screen::PostJob(post) if !post.submitting => Some(edit(&mut post.form, &mut post.cursor)),
        _ => None,
    }
}

fn is_text_field(form: &dyn FormModel, cursor: &FormCursor) -> bool {
    matches!(
        form.fields().get(cursor.index).map(|spec| spec.kind),
        Some(FieldKind::Text | FieldKind::Multiline | FieldKind::Path)
    )
}

fn handle_api_response(
    state: &mut AppState,
    context: &RequestContext,
    status: u16,
    body: &[u8],
) -> (bool, Vec<Action>) {
    let checked = if context.tag == RequestTag::AdminOverview {
        check_admin_status(status, body)
    } else {
        check_status(status, body)
    };
    let reply = checked.map(|()| body);

    if context.tag == RequestTag::RegisterUser {
        match reply {
            Ok(_) => tracing::debug!("user registered"),
            Err(e) => tracing::warn!(error = %e, "user registration failed"),
        }
        return (false, vec![]);
    }

    if !state.is_current(context.mount) {
        tracing::debug!(
            tag = ?context.tag,
            mount = context.mount,
            current = state.mount_id,
            "dropping response for unmounted screen"
        );
        return (false, vec![]);
    }

    tracing::debug!(tag = ?context.tag, status, "response received");

    let effects = match &mut state.screen {
        Screen::Jobs(jobs) => jobs.on_response(&context.tag, reply),
        Screen::PostJob(post) => post.on_response(&context.tag, reply),
        Screen::PostedJobs(posted) => posted.on_response(&context.tag, reply),
        Screen::AppliedJobs(applied) => applied.on_response(&context.tag, reply),
        Screen::Admin(admin) => admin.on_response(&context.tag, reply),
        Screen::Home | Screen::SignInRequired { .. } => {
            tracing::debug!(tag = ?context.tag, "response for a screen without requests");
            Vec::<Effect>::new()
        }
    };
    (true, state.run_effects(effects))
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    if !state.is_current(response.mount()) {
        tracing::debug!(
            mount = response.mount(),
            current = state.mount_id,
            "dropping worker result for unmounted screen"
        );
        return (false, vec![]);
    }

    let purpose = response.purpose();
    let loaded = match response {
        WorkerResponse::AttachmentLoaded { attachment, .. } => {
            tracing::debug!(
                purpose = ?purpose,
                file_name = %attachment.file_name,
                size = attachment.bytes.len(),
                "attachment loaded"
            );
            Ok(attachment.clone())
        }
        WorkerResponse::Error { message, .. } => {
            tracing::warn!(purpose = ?purpose, error = %message, "attachment failed");
            Err(message.clone())
        }
    };

    let effects = match &mut state.screen {
        Screen::Jobs(jobs) => jobs.on_attachment(purpose, loaded, &state.session),
        Screen::PostJob(post) => post.on_attachment(purpose, loaded),
        _ => vec![],
    };
    (true, state.run_effects(effects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::domain::{Identity, Session};
    use crate::ui::theme::Theme;

    fn signed_in() -> AppState {
        let session = Session::SignedIn(Identity {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        });
        AppState::new(session, ApiClient::default(), Theme::default())
    }

    fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: &str) -> (bool, Vec<Action>) {
        let event = Event::ApiResponse {
            context: RequestContext {
                tag,
                mount: state.mount_id,
            },
            status,
            body: body.as_bytes().to_vec(),
        };
        handle_event(state, &event).unwrap()
    }

    const JOBS: &str = r#"{"data":[
        {"_id":"j1","name":"Rust Engineer","type":"Full-time","category":"Technology","location":"Berlin","description":"d","salaryRange":"1","companyName":"Ferris","isAvailable":true,"verified":true},
        {"_id":"j2","name":"Nurse","type":"Part-time","category":"Healthcare","location":"Oslo","description":"d","salaryRange":"1","companyName":"Clinic","isAvailable":true,"verified":true}
    ]}"#;

    #[test]
    fn search_typing_filters_jobs() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Navigate(Route::Jobs)).unwrap();
        respond(&mut state, RequestTag::ListJobs, 200, JOBS);

        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "oslo".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        let jobs = state.jobs_screen().unwrap();
        assert_eq!(jobs.visible.len(), 1);
        assert_eq!(jobs.selected_job().unwrap().id, "j2");

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.jobs_screen().unwrap().visible.len(), 2);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn editing_types_into_the_focused_field() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Navigate(Route::PostJob)).unwrap();
        handle_event(&mut state, &Event::StartEditing).unwrap();
        assert_eq!(state.input_mode, InputMode::Editing);
        handle_event(&mut state, &Event::Char('R')).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();

        let Screen::PostJob(post) = &state.screen else {
            panic!("expected post job screen");
        };
        assert_eq!(post.form.value(0), "R");
    }

    #[test]
    fn escape_closes_dialog_before_filters() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Navigate(Route::Jobs)).unwrap();
        respond(&mut state, RequestTag::ListJobs, 200, JOBS);
        handle_event(&mut state, &Event::CycleType).unwrap();
        handle_event(&mut state, &Event::ShowDetails).unwrap();

        handle_event(&mut state, &Event::Escape).unwrap();
        let jobs = state.jobs_screen().unwrap();
        assert!(!jobs.dialog.is_open());
        assert!(jobs.filter.is_active());

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!state.jobs_screen().unwrap().filter.is_active());
    }

    #[test]
    fn escape_dismisses_the_sign_in_prompt() {
        let mut state = AppState::new(Session::Anonymous, ApiClient::default(), Theme::default());
        handle_event(&mut state, &Event::Navigate(Route::Jobs)).unwrap();
        respond(&mut state, RequestTag::ListJobs, 200, JOBS);
        handle_event(&mut state, &Event::Apply).unwrap();
        assert_eq!(state.jobs_screen().unwrap().status.error.as_deref(), Some(SIGN_IN_TO_APPLY));
        assert!(matches!(state.compute_viewmodel(24, 80).body, crate::ui::Body::Message(_)));

        let (render, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(render);
        assert!(state.jobs_screen().unwrap().status.error.is_none());
        assert!(matches!(state.compute_viewmodel(24, 80).body, crate::ui::Body::Table(_)));
    }

    #[test]
    fn permissions_open_the_start_route() {
        let mut state = signed_in();
        state.start_route = Route::AppliedJobs;
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert_eq!(state.screen.route(), Route::AppliedJobs);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn registration_failures_are_only_logged() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Navigate(Route::Home)).unwrap();
        let before = state.screen.clone();
        let (render, actions) = respond(&mut state, RequestTag::RegisterUser, 500, "{}");
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.screen, before);
    }
}
