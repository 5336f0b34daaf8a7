//! End-to-end application flow: form input, worker file read, multipart
//! submission, confirmation and the delayed redirect.

use std::io::Write;

use jobboard::api::{ApiClient, HttpMethod, RequestContext, RequestTag};
use jobboard::app::screens::Screen;
use jobboard::app::{handle_event, Action, AppState, Event, Route};
use jobboard::domain::{Identity, Session};
use jobboard::worker::{AttachmentWorker, WorkerMessage, WorkerResponse};
use jobboard::Theme;

const JOBS: &str = r#"{"data":[
    {"_id":"j1","name":"Rust Engineer","type":"Full-time","category":"Technology","location":"Berlin",
     "description":"Systems work","salaryRange":"50000-70000","companyName":"Ferris","isAvailable":true,"verified":true},
    {"_id":"j2","name":"Hidden","type":"Contract","category":"Finance","location":"Paris",
     "description":"Not verified yet","salaryRange":"1-2","companyName":"Bank","isAvailable":true,"verified":false}
]}"#;

fn signed_in() -> AppState {
    let session = Session::SignedIn(Identity {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
    });
    AppState::new(session, ApiClient::new("https://api.test"), Theme::default())
}

fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: &str) -> Vec<Action> {
    let context = RequestContext {
        tag,
        mount: state.mount_id,
    };
    let event = Event::ApiResponse {
        context,
        status,
        body: body.as_bytes().to_vec(),
    };
    handle_event(state, &event).unwrap().1
}

fn type_text(state: &mut AppState, text: &str) {
    handle_event(state, &Event::StartEditing).unwrap();
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
    handle_event(state, &Event::StopEditing).unwrap();
}

/// Fills every required field after the prefilled name, ending on the resume path.
fn fill_application(state: &mut AppState, resume: &str) {
    for value in ["BSc Computer Science", "University of London", "1843", "rust, math"] {
        handle_event(state, &Event::NextField).unwrap();
        type_text(state, value);
    }
    handle_event(state, &Event::NextField).unwrap();
    type_text(state, "I like engines.");
    handle_event(state, &Event::NextField).unwrap();
    handle_event(state, &Event::NextField).unwrap();
    type_text(state, resume);
}

fn single_worker_message(actions: Vec<Action>) -> WorkerMessage {
    match actions.as_slice() {
        [Action::PostToWorker(message)] => message.clone(),
        other => panic!("expected one worker message, got {other:?}"),
    }
}

fn open_apply_form(state: &mut AppState) {
    handle_event(state, &Event::Navigate(Route::Jobs)).unwrap();
    respond(state, RequestTag::ListJobs, 200, JOBS);
    assert_eq!(state.jobs_screen().unwrap().visible.len(), 1);

    handle_event(state, &Event::ShowDetails).unwrap();
    handle_event(state, &Event::Apply).unwrap();
    let apply = state.jobs_screen().unwrap().dialog.apply_dialog().unwrap();
    assert_eq!(apply.form.applicant_name, "Ada Lovelace");
}

#[test]
fn application_is_submitted_and_redirects_after_confirmation() {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    resume.write_all(b"%PDF-1.4 resume").unwrap();
    let resume_path = resume.path().to_string_lossy().to_string();

    let mut state = signed_in();
    open_apply_form(&mut state);
    fill_application(&mut state, &resume_path);

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let message = single_worker_message(actions);

    let response = AttachmentWorker::default().handle_message(message);
    assert!(matches!(response, WorkerResponse::AttachmentLoaded { .. }));

    let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    let [Action::Request(request)] = actions.as_slice() else {
        panic!("expected the apply request, got {actions:?}");
    };
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://api.test/apply/j1/apply");
    assert!(request.headers["Content-Type"].starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"education[graduationYear]\"\r\n\r\n1843\r\n"));
    assert!(body.contains("name=\"email\"\r\n\r\nada@example.com\r\n"));
    assert!(body.contains("%PDF-1.4 resume"));

    let actions = respond(&mut state, RequestTag::SubmitApplication { job_id: "j1".into() }, 201, "{}");
    assert_eq!(actions, vec![Action::StartTimer { seconds: 2.0 }]);
    assert!(!state.jobs_screen().unwrap().dialog.is_open());

    let (_, actions) = handle_event(&mut state, &Event::Timer).unwrap();
    assert_eq!(state.screen.route(), Route::AppliedJobs);
    assert!(matches!(
        actions.as_slice(),
        [Action::Request(r)] if r.url == "https://api.test/applications/ada%40example.com"
    ));
}

#[test]
fn invalid_form_never_reaches_the_worker() {
    let mut state = signed_in();
    open_apply_form(&mut state);

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    assert!(actions.is_empty());

    let apply = state.jobs_screen().unwrap().dialog.apply_dialog().unwrap();
    assert!(!apply.submitting);
    assert_eq!(apply.validation.for_field("resumeFile"), Some("Please select a resume file"));
}

#[test]
fn missing_resume_is_reported_in_the_form() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.pdf");

    let mut state = signed_in();
    open_apply_form(&mut state);
    fill_application(&mut state, &missing.to_string_lossy());

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let response = AttachmentWorker::default().handle_message(single_worker_message(actions));
    assert!(matches!(response, WorkerResponse::Error { .. }));

    let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    assert!(actions.is_empty());
    let apply = state.jobs_screen().unwrap().dialog.apply_dialog().unwrap();
    assert!(!apply.submitting);
    assert!(apply.error.is_some());
}

#[test]
fn rejected_application_shows_the_server_message() {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    resume.write_all(b"cv").unwrap();

    let mut state = signed_in();
    open_apply_form(&mut state);
    fill_application(&mut state, &resume.path().to_string_lossy());

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let response = AttachmentWorker::default().handle_message(single_worker_message(actions));
    handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

    let actions = respond(
        &mut state,
        RequestTag::SubmitApplication { job_id: "j1".into() },
        400,
        r#"{"message":"You have already applied for this job"}"#,
    );
    assert!(actions.is_empty());

    let apply = state.jobs_screen().unwrap().dialog.apply_dialog().unwrap();
    assert_eq!(apply.error.as_deref(), Some("You have already applied for this job"));
    assert!(!apply.submitting);
    assert!(state.pending_redirect.is_none());
}

#[test]
fn worker_result_for_a_replaced_screen_is_dropped() {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    resume.write_all(b"cv").unwrap();

    let mut state = signed_in();
    open_apply_form(&mut state);
    fill_application(&mut state, &resume.path().to_string_lossy());

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let response = AttachmentWorker::default().handle_message(single_worker_message(actions));

    handle_event(&mut state, &Event::Navigate(Route::Home)).unwrap();
    let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
    assert!(matches!(state.screen, Screen::Home));
}

#[test]
fn in_flight_application_cannot_be_closed() {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    resume.write_all(b"cv").unwrap();

    let mut state = signed_in();
    open_apply_form(&mut state);
    fill_application(&mut state, &resume.path().to_string_lossy());

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let response = AttachmentWorker::default().handle_message(single_worker_message(actions));
    handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

    handle_event(&mut state, &Event::CloseDialog).unwrap();
    handle_event(&mut state, &Event::Escape).unwrap();
    let apply = state.jobs_screen().unwrap().dialog.apply_dialog().unwrap();
    assert!(apply.submitting);

    let actions = respond(&mut state, RequestTag::SubmitApplication { job_id: "j1".into() }, 201, "{}");
    assert_eq!(actions, vec![Action::StartTimer { seconds: 2.0 }]);
    assert!(!state.jobs_screen().unwrap().dialog.is_open());
}

#[test]
fn forbidden_application_keeps_the_server_message() {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    resume.write_all(b"cv").unwrap();

    let mut state = signed_in();
    open_apply_form(&mut state);
    fill_application(&mut state, &resume.path().to_string_lossy());

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let response = AttachmentWorker::default().handle_message(single_worker_message(actions));
    handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

    respond(
        &mut state,
        RequestTag::SubmitApplication { job_id: "j1".into() },
        403,
        r#"{"message":"Employers cannot apply for jobs"}"#,
    );
    let apply = state.jobs_screen().unwrap().dialog.apply_dialog().unwrap();
    assert_eq!(apply.error.as_deref(), Some("Employers cannot apply for jobs"));
}
