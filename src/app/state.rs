//! Application state and view model computation.
//!
//! [`AppState`] owns the session, the API client, the mounted screen and the
//! input mode. Every navigation mounts a fresh screen under a new mount id;
//! requests and worker messages are stamped with that id so results for a
//! screen that has since been replaced can be recognized and dropped.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns the mounted screen into a renderable
//! [`UIViewModel`]: list windowing around the selection, query highlighting,
//! form field views, the dialog overlay and mode-specific footer hints.
//!
//! # Example
//!
//! ```rust
//! use jobboard::api::ApiClient;
//! use jobboard::app::{AppState, Route};
//! use jobboard::domain::Session;
//! use jobboard::ui::Theme;
//!
//! let mut state = AppState::new(Session::Anonymous, ApiClient::default(), Theme::default());
//! let actions = state.navigate(Route::Jobs);
//! assert_eq!(actions.len(), 1);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.header.title.contains("Verified Job Vacancies"));
//! ```

use super::actions::Action;
use super::dialog::Dialog;
use super::filter::highlight_ranges;
use super::modes::InputMode;
use super::router::Route;
use super::screens::{
    admin, applied, posted_jobs, AdminAccess, AdminScreen, AdminSection, AppliedJobsScreen, Effect,
    JobsScreen, PostedJobsScreen, PostedRow, Screen, ScreenStatus,
};
use crate::api::{ApiCall, ApiClient};
use crate::domain::{Application, ApplicationStatus, Job, Session};
use crate::forms::{FormCursor, FormModel, ValidationErrors};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Badge, Body, DialogView, DisplayItem, EmptyState, FieldView, FooterInfo, FormView, HeaderInfo,
    NavInfo, NavItem, SearchBarInfo, StatusLine, TableView, Tone, UIViewModel,
};
use crate::worker::WorkerMessage;

/// Seconds between a successful application and the redirect to its status.
pub const DEFAULT_CONFIRMATION_DELAY_SECS: f64 = 2.0;

pub const HOME_HEADLINE: &str = "Forge Your Path to Success";
pub const HOME_TAGLINE: &str =
    "Empowering Developers to Shape Their Careers. Connecting Talent with Opportunities for a Brighter Future.";

/// Rows used by header, nav, borders, status line, table header and footer.
const NORMAL_CHROME_ROWS: usize = 8;

/// Normal chrome plus the three-line search box.
const SEARCH_CHROME_ROWS: usize = 11;

/// Characters of a row title before it is truncated.
const TITLE_WIDTH: usize = 35;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Session,
    pub api: ApiClient,
    pub theme: Theme,
    pub screen: Screen,

    /// Incremented on every navigation.
    pub mount_id: u64,

    pub input_mode: InputMode,

    /// Route opened once permissions are granted.
    pub start_route: Route,

    pub confirmation_delay_secs: f64,
    pub redirect_after_apply: bool,

    /// Route to open when the confirmation timer fires, with the mount that armed it.
    pub pending_redirect: Option<(Route, u64)>,

    /// Set once `create-user` has been issued for this plugin instance.
    pub user_registered: bool,

    pub permissions_granted: bool,
}

impl AppState {
    /// Creates the state with the home screen mounted and nothing requested.
    #[must_use]
    pub fn new(session: Session, api: ApiClient, theme: Theme) -> Self {
        Self {
            session,
            api,
            theme,
            screen: Screen::Home,
            mount_id: 0,
            input_mode: InputMode::Normal,
            start_route: Route::Home,
            confirmation_delay_secs: DEFAULT_CONFIRMATION_DELAY_SECS,
            redirect_after_apply: true,
            pending_redirect: None,
            user_registered: false,
            permissions_granted: false,
        }
    }

    /// Replaces the mounted screen and issues its initial fetch.
    ///
    /// Opening the home screen signed in also registers the user once per
    /// plugin instance.
    pub fn navigate(&mut self, route: Route) -> Vec<Action> {
        let _span = tracing::debug_span!("navigate", route = %route).entered();

        self.mount_id += 1;
        self.input_mode = InputMode::Normal;
        self.pending_redirect = None;

        let (screen, mut effects) = Screen::open(route, &self.session);
        self.screen = screen;
        if route == Route::Home {
            effects.extend(self.registration());
        }

        tracing::debug!(mount = self.mount_id, effect_count = effects.len(), "screen mounted");
        self.run_effects(effects)
    }

    /// Re-mounts the current screen.
    pub fn reload(&mut self) -> Vec<Action> {
        self.navigate(self.screen.route())
    }

    fn registration(&mut self) -> Vec<Effect> {
        if self.user_registered {
            return vec![];
        }
        let Some(identity) = self.session.identity() else {
            return vec![];
        };
        self.user_registered = true;
        vec![Effect::Call(ApiCall::CreateUser {
            name: identity.name.clone(),
            email: identity.email.clone(),
        })]
    }

    /// Turns screen effects into actions stamped with the current mount id.
    pub fn run_effects(&mut self, effects: Vec<Effect>) -> Vec<Action> {
        let mut actions = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Call(call) => {
                    actions.push(Action::Request(self.api.build(&call, self.mount_id)));
                }
                Effect::LoadAttachment { purpose, path } => {
                    actions.push(Action::PostToWorker(WorkerMessage::load_attachment(
                        purpose,
                        path,
                        self.mount_id,
                    )));
                }
                Effect::Redirect(route) if self.redirect_after_apply => {
                    self.pending_redirect = Some((route, self.mount_id));
                    actions.push(Action::StartTimer {
                        seconds: self.confirmation_delay_secs,
                    });
                }
                Effect::Redirect(route) => {
                    tracing::debug!(route = %route, "redirect disabled by configuration");
                }
            }
        }
        actions
    }

    /// Handles expiry of the confirmation timer.
    ///
    /// Navigates only if the screen that armed the timer is still mounted.
    pub fn fire_timer(&mut self) -> Vec<Action> {
        match self.pending_redirect.take() {
            Some((route, mount)) if mount == self.mount_id => self.navigate(route),
            Some((route, mount)) => {
                tracing::debug!(route = %route, mount, current = self.mount_id, "stale redirect dropped");
                vec![]
            }
            None => vec![],
        }
    }

    /// Whether a result stamped with `mount` belongs to the mounted screen.
    #[must_use]
    pub const fn is_current(&self, mount: u64) -> bool {
        mount == self.mount_id
    }

    #[must_use]
    pub const fn jobs_screen(&self) -> Option<&JobsScreen> {
        match &self.screen {
            Screen::Jobs(screen) => Some(screen),
            _ => None,
        }
    }

    /// Computes a renderable view model for the given terminal size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let available = self.calculate_available_rows(rows);
        let now = chrono::Utc::now().timestamp();
        let title_width = TITLE_WIDTH.min(cols.saturating_sub(4).max(8));

        let (body, dialog) = match &self.screen {
            Screen::Home => (
                Body::Message(EmptyState {
                    message: HOME_HEADLINE.to_string(),
                    subtitle: HOME_TAGLINE.to_string(),
                }),
                None,
            ),
            Screen::Jobs(screen) => (
                jobs_body(screen, available, title_width, now),
                self.dialog_view(screen, now),
            ),
            Screen::PostJob(screen) => (
                Body::Form(form_view(
                    &screen.form,
                    screen.cursor,
                    &screen.validation,
                    self.input_mode == InputMode::Editing,
                    screen.submitting,
                )),
                None,
            ),
            Screen::PostedJobs(screen) => (posted_body(screen, available, title_width), None),
            Screen::AppliedJobs(screen) => (applied_body(screen, available, title_width), None),
            Screen::Admin(screen) => (admin_body(screen, available, title_width), None),
            Screen::SignInRequired { requested } => (
                Body::Message(EmptyState {
                    message: "Sign in required".to_string(),
                    subtitle: format!(
                        "Set user_email in the plugin configuration to open {}.",
                        requested.path()
                    ),
                }),
                None,
            ),
        };

        let status = self.compute_status(&body);

        UIViewModel {
            header: self.compute_header(),
            nav: self.compute_nav(),
            search_bar: self.compute_search_bar(),
            status,
            body,
            dialog,
            footer: self.compute_footer(),
        }
    }

    fn dialog_view(&self, screen: &JobsScreen, now: i64) -> Option<DialogView> {
        match screen.dialog.state() {
            Dialog::Idle => None,
            Dialog::Details(job) => Some(DialogView::Details {
                title: job.name.clone(),
                lines: job_details(job, now),
            }),
            Dialog::Apply(apply) => Some(DialogView::Apply {
                title: format!("Apply for {}", apply.job.name),
                form: form_view(
                    &apply.form,
                    apply.cursor,
                    &apply.validation,
                    self.input_mode == InputMode::Editing,
                    apply.submitting,
                ),
                error: apply.error.clone(),
            }),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.screen {
            Screen::Home => "Welcome to CareerCraft".to_string(),
            Screen::Jobs(screen) => format!("Verified Job Vacancies ({})", screen.visible.len()),
            Screen::PostJob(_) => "Post a Job".to_string(),
            Screen::PostedJobs(screen) => {
                format!("Posted Jobs and Applications ({})", screen.postings.len())
            }
            Screen::AppliedJobs(screen) => {
                format!("Jobs You Have Applied To ({})", screen.applications.len())
            }
            Screen::Admin(_) => "Admin Dashboard".to_string(),
            Screen::SignInRequired { requested } => requested.title().to_string(),
        };
        HeaderInfo {
            title: format!(" CareerCraft | {title} "),
        }
    }

    fn compute_nav(&self) -> NavInfo {
        let active = self.screen.route();
        let items = Route::ALL
            .iter()
            .zip('1'..='6')
            .map(|(route, key)| NavItem {
                key,
                title: route.title().to_string(),
                is_active: *route == active,
            })
            .collect();

        let identity = self.session.identity().map_or_else(
            || "Not signed in".to_string(),
            |identity| format!("Signed in as {} <{}>", identity.name, identity.email),
        );

        NavInfo { items, identity }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let screen = self.jobs_screen()?;
        let searching = matches!(self.input_mode, InputMode::Search(_));
        if !searching && !screen.filter.is_active() {
            return None;
        }

        let job_type = screen.filter.job_type.map_or("All", |t| t.as_str());
        let category = screen.filter.category.map_or("All", |c| c.as_str());

        Some(SearchBarInfo {
            query: screen.filter.query.clone(),
            filters: format!("type: {job_type}  category: {category}"),
            is_typing: self.input_mode == InputMode::Search(super::modes::SearchFocus::Typing),
        })
    }

    fn compute_status(&self, body: &Body) -> Option<StatusLine> {
        if let Screen::PostJob(screen) = &self.screen {
            if screen.submitting {
                return Some(StatusLine {
                    message: "Submitting job...".to_string(),
                    tone: Tone::Info,
                });
            }
        }

        let status = self.screen.status()?;
        if let Some(error) = &status.error {
            if matches!(body, Body::Message(m) if &m.message == error) {
                return None;
            }
            return Some(StatusLine {
                message: error.clone(),
                tone: Tone::Error,
            });
        }
        status.notice.as_ref().map(|notice| StatusLine {
            message: notice.clone(),
            tone: Tone::Success,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        use super::modes::SearchFocus;

        const NAV: &str = "1-6: screens  q: quit";

        let keybindings = match (&self.screen, self.input_mode) {
            (_, InputMode::Editing) => "Type to edit  Tab: next field  Enter/Esc: done".to_string(),
            (_, InputMode::Search(SearchFocus::Typing)) => {
                "Esc: exit search  Enter: results  Type to filter".to_string()
            }
            (_, InputMode::Search(SearchFocus::Navigating)) => {
                "Esc: exit search  /: edit query  j/k: navigate  Enter: details  a: apply".to_string()
            }
            (Screen::Jobs(screen), InputMode::Normal) => match screen.dialog.state() {
                Dialog::Details(_) => "a/Enter: apply  Esc: close".to_string(),
                Dialog::Apply(_) => {
                    "j/k: field  h/l: change  Space: toggle  Enter: edit  s: submit  Esc: cancel".to_string()
                }
                Dialog::Idle => format!(
                    "j/k: navigate  Enter: details  a: apply  /: search  t: type  c: category  x: clear  {NAV}"
                ),
            },
            (Screen::PostJob(_), InputMode::Normal) => {
                format!("j/k: field  h/l: change  Space: toggle  Enter: edit  s: submit  {NAV}")
            }
            (Screen::PostedJobs(_), InputMode::Normal) => format!(
                "j/k: navigate  s: shortlist  r: reject  u: applied  d: delete  Ctrl+r: reload  {NAV}"
            ),
            (Screen::AppliedJobs(_), InputMode::Normal) => {
                format!("j/k: navigate  d: withdraw  Ctrl+r: reload  {NAV}")
            }
            (Screen::Admin(_), InputMode::Normal) => {
                format!("j/k: navigate  Tab: section  v: verify  d: delete  Ctrl+r: reload  {NAV}")
            }
            (Screen::Home, InputMode::Normal) => format!("Enter: find jobs  {NAV}"),
            (Screen::SignInRequired { .. }, InputMode::Normal) => NAV.to_string(),
        };

        FooterInfo { keybindings }
    }

    /// Rows left for list items once the chrome is drawn.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        if self.compute_search_bar().is_some() {
            total_rows.saturating_sub(SEARCH_CHROME_ROWS)
        } else {
            total_rows.saturating_sub(NORMAL_CHROME_ROWS)
        }
    }
}

/// Loading, error and empty states shared by every list screen.
///
/// Any screen error, from a load or a failed mutation, replaces the list.
fn list_body(
    status: &ScreenStatus,
    is_empty: bool,
    empty_message: &str,
    table: impl FnOnce() -> TableView,
) -> Body {
    if status.loading {
        return Body::Loading;
    }
    if let Some(error) = &status.error {
        return Body::Message(EmptyState {
            message: error.clone(),
            subtitle: "Press Ctrl+r to reload.".to_string(),
        });
    }
    if is_empty {
        return Body::Message(EmptyState {
            message: empty_message.to_string(),
            subtitle: String::new(),
        });
    }
    Body::Table(table())
}

/// Window of `available` rows centered on `selected`, as `start..end`.
fn visible_window(len: usize, selected: usize, available: usize) -> (usize, usize) {
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);

    if end - start < available && len >= available {
        start = end.saturating_sub(available);
    }
    (start, end)
}

fn windowed_table(
    columns: (String, String),
    items: Vec<DisplayItem>,
    selected: usize,
    available: usize,
) -> TableView {
    let (start, end) = visible_window(items.len(), selected, available);
    let rows = items
        .into_iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(index, mut item)| {
            item.is_selected = index == selected;
            item
        })
        .collect();

    TableView {
        columns,
        rows,
        selected_index: selected.saturating_sub(start),
    }
}

fn row(title: String, detail: String, badge: Option<Badge>) -> DisplayItem {
    DisplayItem {
        title,
        detail,
        badge,
        is_selected: false,
        indent: false,
        highlight_ranges: vec![],
    }
}

fn status_badge(status: ApplicationStatus) -> Badge {
    let tone = match status {
        ApplicationStatus::Applied => Tone::Info,
        ApplicationStatus::Shortlisted => Tone::Warning,
        ApplicationStatus::Rejected => Tone::Error,
        ApplicationStatus::Accepted => Tone::Success,
    };
    Badge {
        label: status.as_str().to_string(),
        tone,
    }
}

fn verified_badge(job: &Job) -> Badge {
    if job.verified {
        Badge {
            label: "Verified".to_string(),
            tone: Tone::Success,
        }
    } else {
        Badge {
            label: "Unverified".to_string(),
            tone: Tone::Warning,
        }
    }
}

fn jobs_body(screen: &JobsScreen, available: usize, title_width: usize, now: i64) -> Body {
    let empty = if screen.filter.is_active() {
        "No jobs match your filters."
    } else {
        "No verified jobs available."
    };

    list_body(&screen.status, screen.visible.is_empty(), empty, || {
        let items = screen
            .visible_jobs()
            .into_iter()
            .map(|job| {
                let title = truncate(&job.name, title_width);
                let mut detail = format!("{} · {} · {}", job.company_name, job.location, job.category);
                if let Some(ago) = job.posted_ago(now) {
                    detail.push_str(&format!(" · {ago}"));
                }
                let badge = if job.is_available {
                    Badge {
                        label: job.job_type.as_str().to_string(),
                        tone: Tone::Info,
                    }
                } else {
                    Badge {
                        label: job.availability().to_string(),
                        tone: Tone::Muted,
                    }
                };
                DisplayItem {
                    highlight_ranges: highlight_ranges(&title, &screen.filter.query),
                    ..row(title, detail, Some(badge))
                }
            })
            .collect();
        windowed_table(
            ("JOB".to_string(), "COMPANY · LOCATION · CATEGORY".to_string()),
            items,
            screen.cursor.index,
            available,
        )
    })
}

fn job_details(job: &Job, now: i64) -> Vec<String> {
    let mut lines = vec![
        format!("Company:   {}", job.company_name),
        format!("Location:  {}", job.location),
        format!("Type:      {}", job.job_type),
        format!("Category:  {}", job.category),
        format!("Salary:    {}", job.salary_range),
        format!("Status:    {}", job.availability()),
    ];
    if let Some(ago) = job.posted_ago(now) {
        lines.push(format!("Posted:    {ago}"));
    }
    lines.push(String::new());
    lines.push(job.description.clone());
    lines
}

fn form_view<F: FormModel>(
    form: &F,
    cursor: FormCursor,
    validation: &ValidationErrors,
    editing: bool,
    submitting: bool,
) -> FormView {
    let fields = form
        .fields()
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let is_focused = index == cursor.index;
            FieldView {
                label: spec.label.to_string(),
                value: form.value(index),
                kind: spec.kind,
                required: spec.required,
                is_focused,
                is_editing: is_focused && editing,
                error: validation.for_field(spec.key).map(ToString::to_string),
            }
        })
        .collect();

    FormView {
        fields,
        summary: validation.messages().into_iter().map(ToString::to_string).collect(),
        is_submitting: submitting,
    }
}

fn applicant_row(app: &Application, title_width: usize) -> DisplayItem {
    let (name, email) = app.require_applicant().map_or_else(
        |_| (app.applicant_name.clone(), String::new()),
        |user| (user.name.clone(), user.email.clone()),
    );
    let education = &app.education;
    let detail = format!(
        "{email} · {}, {} ({}) · {}",
        education.degree,
        education.institution,
        education.graduation_year,
        app.skills_line()
    );
    DisplayItem {
        indent: true,
        ..row(truncate(&name, title_width), detail, Some(status_badge(app.status)))
    }
}

fn posted_body(screen: &PostedJobsScreen, available: usize, title_width: usize) -> Body {
    list_body(&screen.status, screen.postings.is_empty(), posted_jobs::NO_JOBS, || {
        let items = screen
            .rows()
            .into_iter()
            .filter_map(|posted_row| match posted_row {
                PostedRow::Job(i) => {
                    let posting = screen.postings.get(i)?;
                    let job = &posting.job;
                    let detail = if !job.verified {
                        posted_jobs::UNDER_VERIFICATION.to_string()
                    } else if posting.applications.is_empty() {
                        format!("{} · {} · {}", job.company_name, job.location, posted_jobs::NO_APPLICATIONS)
                    } else {
                        format!(
                            "{} · {} · {} applications",
                            job.company_name,
                            job.location,
                            posting.applications.len()
                        )
                    };
                    Some(row(truncate(&job.name, title_width), detail, Some(verified_badge(job))))
                }
                PostedRow::Application(i, j) => screen
                    .application(i, j)
                    .map(|app| applicant_row(app, title_width)),
            })
            .collect();
        windowed_table(
            ("JOB / APPLICANT".to_string(), "DETAILS".to_string()),
            items,
            screen.cursor.index,
            available,
        )
    })
}

fn applied_body(screen: &AppliedJobsScreen, available: usize, title_width: usize) -> Body {
    list_body(&screen.status, screen.applications.is_empty(), applied::NO_APPLICATIONS, || {
        let items = screen
            .applications
            .iter()
            .map(|app| {
                let (name, company) = app.require_job().map_or_else(
                    |_| ("Unknown job".to_string(), String::new()),
                    |job| (job.name.clone(), job.company_name.clone()),
                );
                let detail = format!("{company} · {}", app.status.applicant_message());
                row(truncate(&name, title_width), detail, Some(status_badge(app.status)))
            })
            .collect();
        windowed_table(
            ("JOB".to_string(), "COMPANY · STATUS".to_string()),
            items,
            screen.cursor.index,
            available,
        )
    })
}

fn admin_body(screen: &AdminScreen, available: usize, title_width: usize) -> Body {
    if screen.access == AdminAccess::Denied {
        return Body::Message(EmptyState {
            message: admin::ACCESS_DENIED.to_string(),
            subtitle: "Ask an administrator to grant you access.".to_string(),
        });
    }

    let other = screen.section.other().title();
    match screen.section {
        AdminSection::Jobs => list_body(&screen.status, screen.jobs.is_empty(), admin::NO_JOBS, || {
            let items = screen
                .jobs
                .iter()
                .map(|job| {
                    let poster = job
                        .posted_by
                        .as_ref()
                        .and_then(|p| p.populated())
                        .map_or_else(String::new, |user| format!(" · by {}", user.email));
                    let detail = format!("{} · {}{poster}", job.company_name, job.location);
                    row(truncate(&job.name, title_width), detail, Some(verified_badge(job)))
                })
                .collect();
            windowed_table(
                (format!("JOB POSTS ({})", screen.jobs.len()), format!("Tab: {other}")),
                items,
                screen.job_cursor.index,
                available,
            )
        }),
        AdminSection::Applications => list_body(
            &screen.status,
            screen.applications.is_empty(),
            admin::NO_APPLICATIONS,
            || {
                let items = screen
                    .applications
                    .iter()
                    .map(|app| {
                        let applicant = app
                            .require_applicant()
                            .map_or_else(|_| app.applicant_name.clone(), |user| user.name.clone());
                        let job = app
                            .require_job()
                            .map_or_else(|_| String::new(), |job| format!("{} at {}", job.name, job.company_name));
                        row(truncate(&applicant, title_width), job, Some(status_badge(app.status)))
                    })
                    .collect();
                windowed_table(
                    (
                        format!("JOB APPLICATIONS ({})", screen.applications.len()),
                        format!("Tab: {other}"),
                    ),
                    items,
                    screen.application_cursor.index,
                    available,
                )
            },
        ),
    }
}
