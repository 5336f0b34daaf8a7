//! Key bindings.
//!
//! Maps a Zellij key press to an [`Event`] according to the input mode, the
//! mounted screen and any open dialog. Keys without a binding map to `None`
//! and leave the state untouched.
//!
//! | Context            | Keys                                                     |
//! |--------------------|----------------------------------------------------------|
//! | anywhere           | `Ctrl+n`/`Ctrl+p` move, `Ctrl+r` reload                  |
//! | normal             | `j`/`k` move, `1`-`6` screens, `q` hide                   |
//! | jobs               | `/` search, `Enter` details, `a` apply, `t`/`c`/`x` filters |
//! | forms              | `Tab`/`j`/`k` field, `h`/`l` option, `Space` toggle, `Enter` edit, `s` submit |
//! | posted jobs        | `s` shortlist, `r` reject, `u` applied, `d` delete         |
//! | applied jobs       | `d` withdraw                                             |
//! | admin              | `Tab` section, `v` verify, `d` delete                    |

use super::dialog::Dialog;
use super::handler::Event;
use super::modes::{InputMode, SearchFocus};
use super::router::Route;
use super::screens::Screen;
use super::state::AppState;
use crate::domain::ApplicationStatus;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Translates a key press into an event, or `None` when the key is unbound.
#[must_use]
pub fn map_key(state: &AppState, key: &KeyWithModifier) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::Down),
            BareKey::Char('p') => Some(Event::Up),
            BareKey::Char('r') => Some(Event::Reload),
            BareKey::Char('s') if in_form(state) => Some(Event::Submit),
            _ => None,
        };
    }

    match state.input_mode {
        InputMode::Editing => map_editing(key),
        InputMode::Search(SearchFocus::Typing) => map_search_typing(key),
        InputMode::Search(SearchFocus::Navigating) => map_search_navigating(key),
        InputMode::Normal => map_normal(state, key),
    }
}

fn in_form(state: &AppState) -> bool {
    match &state.screen {
        Screen::PostJob(_) => true,
        Screen::Jobs(jobs) => jobs.dialog.apply_dialog().is_some(),
        _ => false,
    }
}

fn map_editing(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Esc | BareKey::Enter => Some(Event::StopEditing),
        BareKey::Tab => Some(Event::NextField),
        BareKey::Backspace => Some(Event::Backspace),
        BareKey::Char(c) => Some(Event::Char(c)),
        _ => None,
    }
}

fn map_search_typing(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Esc => Some(Event::ExitSearch),
        BareKey::Enter => Some(Event::FocusResults),
        BareKey::Backspace => Some(Event::Backspace),
        BareKey::Down => Some(Event::Down),
        BareKey::Up => Some(Event::Up),
        BareKey::Char(c) => Some(Event::Char(c)),
        _ => None,
    }
}

fn map_search_navigating(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Esc => Some(Event::ExitSearch),
        BareKey::Char('/') => Some(Event::FocusSearchBar),
        BareKey::Down | BareKey::Char('j') => Some(Event::Down),
        BareKey::Up | BareKey::Char('k') => Some(Event::Up),
        BareKey::Enter => Some(Event::ShowDetails),
        BareKey::Char('a') => Some(Event::Apply),
        _ => None,
    }
}

fn map_normal(state: &AppState, key: &KeyWithModifier) -> Option<Event> {
    let screen_event = match &state.screen {
        Screen::Jobs(jobs) => match jobs.dialog.state() {
            Dialog::Details(_) => return map_details(key).or_else(|| map_global(key)),
            Dialog::Apply(_) => return map_form(key, true).or_else(|| map_global(key)),
            Dialog::Idle => map_jobs(key),
        },
        Screen::PostJob(_) => return map_form(key, false).or_else(|| map_global(key)),
        Screen::PostedJobs(_) => map_posted(key),
        Screen::AppliedJobs(_) => match key.bare_key {
            BareKey::Char('d') => Some(Event::Delete),
            _ => None,
        },
        Screen::Admin(_) => match key.bare_key {
            BareKey::Tab => Some(Event::SwitchSection),
            BareKey::Char('v') => Some(Event::Verify),
            BareKey::Char('d') => Some(Event::Delete),
            _ => None,
        },
        Screen::Home => match key.bare_key {
            BareKey::Enter => Some(Event::Navigate(Route::Jobs)),
            _ => None,
        },
        Screen::SignInRequired { .. } => None,
    };

    screen_event.or_else(|| map_list(key)).or_else(|| map_global(key))
}

fn map_global(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Char('q') => Some(Event::CloseFocus),
        BareKey::Char(c) => Route::from_digit(c).map(Event::Navigate),
        _ => None,
    }
}

fn map_list(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Down | BareKey::Char('j') => Some(Event::Down),
        BareKey::Up | BareKey::Char('k') => Some(Event::Up),
        _ => None,
    }
}

fn map_jobs(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Char('/') => Some(Event::SearchMode),
        BareKey::Enter => Some(Event::ShowDetails),
        BareKey::Char('a') => Some(Event::Apply),
        BareKey::Char('t') => Some(Event::CycleType),
        BareKey::Char('c') => Some(Event::CycleCategory),
        BareKey::Char('x') => Some(Event::ClearFilters),
        BareKey::Esc => Some(Event::Escape),
        _ => None,
    }
}

fn map_details(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Char('a') | BareKey::Enter => Some(Event::Apply),
        BareKey::Esc => Some(Event::CloseDialog),
        _ => None,
    }
}

fn map_form(key: &KeyWithModifier, in_dialog: bool) -> Option<Event> {
    match key.bare_key {
        BareKey::Tab | BareKey::Down | BareKey::Char('j') => Some(Event::NextField),
        BareKey::Up | BareKey::Char('k') => Some(Event::PrevField),
        BareKey::Left | BareKey::Char('h') => Some(Event::CycleOption { forward: false }),
        BareKey::Right | BareKey::Char('l') => Some(Event::CycleOption { forward: true }),
        BareKey::Char(' ') => Some(Event::ToggleField),
        BareKey::Enter | BareKey::Char('i') => Some(Event::StartEditing),
        BareKey::Char('s') => Some(Event::Submit),
        BareKey::Esc if in_dialog => Some(Event::CloseDialog),
        _ => None,
    }
}

fn map_posted(key: &KeyWithModifier) -> Option<Event> {
    match key.bare_key {
        BareKey::Char('s') => Some(Event::SetStatus(ApplicationStatus::Shortlisted)),
        BareKey::Char('r') => Some(Event::SetStatus(ApplicationStatus::Rejected)),
        BareKey::Char('u') => Some(Event::SetStatus(ApplicationStatus::Applied)),
        BareKey::Char('d') => Some(Event::Delete),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::domain::{Identity, Session};
    use crate::ui::theme::Theme;

    fn key(c: char) -> KeyWithModifier {
        KeyWithModifier::new(BareKey::Char(c))
    }

    fn state_on(route: Route) -> AppState {
        let session = Session::SignedIn(Identity {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        });
        let mut state = AppState::new(session, ApiClient::default(), Theme::default());
        state.navigate(route);
        state
    }

    #[test]
    fn digits_navigate_from_lists() {
        let state = state_on(Route::AppliedJobs);
        assert_eq!(map_key(&state, &key('6')), Some(Event::Navigate(Route::Admin)));
        assert_eq!(map_key(&state, &key('d')), Some(Event::Delete));
        assert_eq!(map_key(&state, &key('j')), Some(Event::Down));
    }

    #[test]
    fn posted_jobs_review_keys() {
        let state = state_on(Route::PostedJobs);
        assert_eq!(
            map_key(&state, &key('s')),
            Some(Event::SetStatus(ApplicationStatus::Shortlisted))
        );
        assert_eq!(
            map_key(&state, &key('u')),
            Some(Event::SetStatus(ApplicationStatus::Applied))
        );
    }

    #[test]
    fn editing_captures_letters() {
        let mut state = state_on(Route::PostJob);
        assert_eq!(map_key(&state, &key('j')), Some(Event::NextField));
        state.input_mode = InputMode::Editing;
        assert_eq!(map_key(&state, &key('j')), Some(Event::Char('j')));
        assert_eq!(map_key(&state, &key('1')), Some(Event::Char('1')));
    }

    #[test]
    fn ctrl_bindings_work_in_every_mode() {
        let mut state = state_on(Route::Jobs);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        let reload = KeyWithModifier::new(BareKey::Char('r')).with_ctrl_modifier();
        assert_eq!(map_key(&state, &reload), Some(Event::Reload));
        assert_eq!(map_key(&state, &key('r')), Some(Event::Char('r')));
    }
}
