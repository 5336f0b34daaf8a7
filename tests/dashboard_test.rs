//! Owner, applicant and admin dashboards driven through `handle_event`.

use jobboard::api::{ApiClient, HttpMethod, HttpRequest, RequestContext, RequestTag, WireVerb};
use jobboard::app::screens::{AdminAccess, AdminScreen, AppliedJobsScreen, PostedJobsScreen, Screen};
use jobboard::app::{handle_event, Action, AppState, Event, Route};
use jobboard::domain::{ApplicationStatus, Identity, Session};
use jobboard::ui::Body;
use jobboard::Theme;

const POSTED: &str = r#"{"jobs":[
    {"job":{"_id":"j1","name":"Nurse","type":"Contract","category":"Healthcare","verified":true},
     "applications":[
        {"_id":"a1","applicantId":{"_id":"u1","name":"Ada","email":"ada@x.io"},"status":"Applied"},
        {"_id":"a2","applicantId":{"_id":"u2","name":"Bob","email":"bob@x.io"},"status":"Accepted"}
     ]},
    {"job":{"_id":"j2","name":"Teacher","type":"Full-time","category":"Education","verified":false},
     "applications":[]}
]}"#;

const OVERVIEW: &str = r#"{
    "jobs":[
        {"_id":"j9","name":"Analyst","type":"Part-time","category":"Finance","verified":false},
        {"_id":"j1","name":"Nurse","type":"Contract","category":"Healthcare","verified":true}
    ],
    "applications":[
        {"_id":"a1","jobId":{"_id":"j1","name":"Nurse","companyName":"Clinic","location":"Oslo"},
         "applicantId":{"_id":"u1","name":"Ada","email":"ada@x.io"},"status":"Applied"},
        {"_id":"a3","jobId":{"_id":"j1","name":"Nurse","companyName":"Clinic","location":"Oslo"},
         "applicantId":{"_id":"u3","name":"Cy","email":"cy@x.io"},"status":"Rejected"}
    ]
}"#;

const APPLIED: &str = r#"{"data":[
    {"_id":"a1","jobId":{"_id":"j1","name":"Nurse","companyName":"Clinic","location":"Oslo"},"status":"Shortlisted"},
    {"_id":"a4","jobId":{"_id":"j2","name":"Teacher","companyName":"School","location":"Bergen"},"status":"Applied"}
]}"#;

fn owner() -> AppState {
    let session = Session::SignedIn(Identity {
        name: "Olga".into(),
        email: "olga@x.io".into(),
    });
    AppState::new(session, ApiClient::new("https://api.test"), Theme::default())
}

fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: &str) -> Vec<Action> {
    let event = Event::ApiResponse {
        context: RequestContext {
            tag,
            mount: state.mount_id,
        },
        status,
        body: body.as_bytes().to_vec(),
    };
    handle_event(state, &event).unwrap().1
}

fn only_request(actions: &[Action]) -> &HttpRequest {
    match actions {
        [Action::Request(request)] => request,
        other => panic!("expected one request, got {other:?}"),
    }
}

fn posted(state: &AppState) -> &PostedJobsScreen {
    match &state.screen {
        Screen::PostedJobs(screen) => screen,
        other => panic!("expected posted jobs screen, got {other:?}"),
    }
}

fn admin(state: &AppState) -> &AdminScreen {
    match &state.screen {
        Screen::Admin(screen) => screen,
        other => panic!("expected admin screen, got {other:?}"),
    }
}

fn applied(state: &AppState) -> &AppliedJobsScreen {
    match &state.screen {
        Screen::AppliedJobs(screen) => screen,
        other => panic!("expected applied jobs screen, got {other:?}"),
    }
}

#[test]
fn owner_review_patches_the_selected_application() {
    let mut state = owner();
    let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::PostedJobs)).unwrap();
    assert_eq!(only_request(&actions).url, "https://api.test/posted-jobs/olga%40x.io");
    respond(&mut state, RequestTag::PostedJobs, 200, POSTED);

    handle_event(&mut state, &Event::Down).unwrap();
    assert_eq!(posted(&state).selected_application().unwrap().id, "a1");

    let (_, actions) = handle_event(&mut state, &Event::SetStatus(ApplicationStatus::Accepted)).unwrap();
    assert!(actions.is_empty());

    let (_, actions) = handle_event(&mut state, &Event::SetStatus(ApplicationStatus::Shortlisted)).unwrap();
    let request = only_request(&actions);
    assert_eq!(request.method, HttpMethod::Patch);
    assert_eq!(request.url, "https://api.test/posted-jobs/applications/a1/status");
    assert!(String::from_utf8_lossy(&request.body).contains("Shortlisted"));

    let (verb, headers) = request.wire_parts();
    assert_eq!(verb, WireVerb::Post);
    assert_eq!(headers.get("X-HTTP-Method-Override").map(String::as_str), Some("PATCH"));

    respond(
        &mut state,
        RequestTag::SetStatus {
            application_id: "a1".into(),
            status: ApplicationStatus::Shortlisted,
        },
        200,
        "{}",
    );
    let app = posted(&state).selected_application().unwrap();
    assert_eq!(app.status, ApplicationStatus::Shortlisted);
    assert!(posted(&state).status.error.is_none());
}

#[test]
fn failed_owner_delete_keeps_the_posting() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::PostedJobs)).unwrap();
    respond(&mut state, RequestTag::PostedJobs, 200, POSTED);

    let (_, actions) = handle_event(&mut state, &Event::Delete).unwrap();
    assert_eq!(only_request(&actions).url, "https://api.test/posted-jobs/jobs/j1");

    respond(&mut state, RequestTag::OwnerDeleteJob { job_id: "j1".into() }, 500, "");
    assert_eq!(posted(&state).postings.len(), 2);
    assert!(posted(&state).status.error.is_some());

    respond(&mut state, RequestTag::OwnerDeleteJob { job_id: "j1".into() }, 200, "{}");
    assert_eq!(posted(&state).postings.len(), 1);
    assert!(posted(&state).status.error.is_none());
}

#[test]
fn admin_verifies_and_deletes_locally() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::Admin)).unwrap();
    respond(&mut state, RequestTag::AdminOverview, 200, OVERVIEW);
    assert_eq!(admin(&state).access, AdminAccess::Granted);

    let untouched_job = admin(&state).jobs[1].clone();
    let untouched_application = admin(&state).applications[1].clone();

    let (_, actions) = handle_event(&mut state, &Event::Verify).unwrap();
    assert_eq!(only_request(&actions).url, "https://api.test/admin/verify-job/j9");
    respond(&mut state, RequestTag::VerifyJob { job_id: "j9".into() }, 200, "{}");
    assert!(admin(&state).jobs[0].verified);
    assert_eq!(admin(&state).jobs[1], untouched_job);

    let (_, actions) = handle_event(&mut state, &Event::Verify).unwrap();
    assert!(actions.is_empty());

    handle_event(&mut state, &Event::SwitchSection).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Delete).unwrap();
    assert_eq!(only_request(&actions).method, HttpMethod::Delete);
    respond(
        &mut state,
        RequestTag::AdminDeleteApplication {
            application_id: "a1".into(),
        },
        200,
        "{}",
    );
    assert_eq!(admin(&state).applications, vec![untouched_application]);
    assert_eq!(admin(&state).jobs.len(), 2);
}

#[test]
fn owner_deletes_one_application_and_keeps_its_sibling() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::PostedJobs)).unwrap();
    respond(&mut state, RequestTag::PostedJobs, 200, POSTED);
    let sibling = posted(&state).postings[0].applications[1].clone();
    let other_posting = posted(&state).postings[1].clone();

    handle_event(&mut state, &Event::Down).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Delete).unwrap();
    let request = only_request(&actions);
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, "https://api.test/posted-jobs/applications/a1");

    let tag = RequestTag::OwnerDeleteApplication {
        application_id: "a1".into(),
    };
    respond(&mut state, tag.clone(), 500, "");
    assert_eq!(posted(&state).postings[0].applications.len(), 2);

    respond(&mut state, tag, 200, "{}");
    let postings = &posted(&state).postings;
    assert_eq!(postings[0].applications, vec![sibling]);
    assert_eq!(postings[1], other_posting);
    assert!(posted(&state).status.error.is_none());
}

#[test]
fn forbidden_overview_denies_admin_access() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::Admin)).unwrap();
    respond(&mut state, RequestTag::AdminOverview, 403, r#"{"message":"Forbidden"}"#);

    assert_eq!(admin(&state).access, AdminAccess::Denied);
    let (_, actions) = handle_event(&mut state, &Event::Delete).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn withdraw_failure_keeps_the_application() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::AppliedJobs)).unwrap();
    respond(&mut state, RequestTag::AppliedJobs, 200, APPLIED);
    assert_eq!(applied(&state).applications.len(), 2);

    let (_, actions) = handle_event(&mut state, &Event::Delete).unwrap();
    assert_eq!(only_request(&actions).url, "https://api.test/applications/delete/a1");

    let tag = RequestTag::WithdrawApplication {
        application_id: "a1".into(),
    };
    respond(&mut state, tag.clone(), 0, "connection refused");
    assert_eq!(applied(&state).applications.len(), 2);

    let sibling = applied(&state).applications[1].clone();
    respond(&mut state, tag, 204, "");
    assert_eq!(applied(&state).applications, vec![sibling]);
}

#[test]
fn failed_withdraw_replaces_the_list_with_the_error() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::AppliedJobs)).unwrap();
    respond(&mut state, RequestTag::AppliedJobs, 200, APPLIED);
    assert!(matches!(state.compute_viewmodel(24, 80).body, Body::Table(_)));

    handle_event(&mut state, &Event::Delete).unwrap();
    let tag = RequestTag::WithdrawApplication {
        application_id: "a1".into(),
    };
    respond(&mut state, tag, 500, "");

    let vm = state.compute_viewmodel(24, 80);
    match vm.body {
        Body::Message(empty) => assert_eq!(empty.message, "Failed to delete application"),
        other => panic!("expected the error in place of the list, got {other:?}"),
    }
    assert!(vm.status.is_none());
    assert_eq!(applied(&state).applications.len(), 2);
}

#[test]
fn invalid_job_posting_sends_nothing() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::PostJob)).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    assert!(actions.is_empty());
    match &state.screen {
        Screen::PostJob(post) => {
            assert!(!post.submitting);
            assert!(!post.validation.is_empty());
        }
        other => panic!("expected post job screen, got {other:?}"),
    }
}

#[test]
fn responses_for_an_earlier_mount_are_ignored() {
    let mut state = owner();
    handle_event(&mut state, &Event::Navigate(Route::PostedJobs)).unwrap();
    let stale_mount = state.mount_id;
    handle_event(&mut state, &Event::Reload).unwrap();

    let event = Event::ApiResponse {
        context: RequestContext {
            tag: RequestTag::PostedJobs,
            mount: stale_mount,
        },
        status: 200,
        body: POSTED.as_bytes().to_vec(),
    };
    let (render, actions) = handle_event(&mut state, &event).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
    assert!(posted(&state).postings.is_empty());
    assert!(posted(&state).status.loading);
}

#[test]
fn gated_routes_need_a_session() {
    let mut state = AppState::new(Session::Anonymous, ApiClient::default(), Theme::default());
    for route in [Route::PostJob, Route::PostedJobs, Route::AppliedJobs, Route::Admin] {
        let (_, actions) = handle_event(&mut state, &Event::Navigate(route)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.screen, Screen::SignInRequired { requested: route });
    }
}
