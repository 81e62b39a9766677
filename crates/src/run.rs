use crate::actions::{Action, handle_action};
use crate::choices::Choices;
use crate::error::{ChoiceError, Result};
use crate::options::Overrides;
use crate::render::styles::STYLE_HINT;
use bubbletea_rs::{Program, command::Cmd, event::KeyMsg, model::Model as TeaModel};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use tracing::debug;

pub const KEYS_HINT: &str = "(Press <space> to select, <a> to toggle all, <i> to invert selection)";

// A question plus the list it is answered from.
#[derive(Debug, Default)]
pub struct Session {
    pub message: String,
    pub choices: Choices,
}

impl Session {
    pub fn new(message: impl Into<String>, choices: Choices) -> Self {
        Session {
            message: message.into(),
            choices,
        }
    }

    pub fn view(&self) -> String {
        format!(
            "? {} {}{}",
            self.message,
            STYLE_HINT.render(KEYS_HINT),
            self.choices.render_current(&Overrides::default())
        )
    }

    // Map a key to an action; `None` for keys the list does not handle.
    pub fn action_for(key: &KeyCode) -> Option<Action> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
            KeyCode::Tab => Some(Action::Tab),
            KeyCode::Char(' ') => Some(Action::Space),
            KeyCode::Char('a') => Some(Action::ToggleAll),
            KeyCode::Char('i') => Some(Action::Invert),
            KeyCode::Char(d @ '1'..='9') => d
                .to_digit(10)
                .and_then(|n| usize::try_from(n).ok())
                .map(Action::Number),
            _ => None,
        }
    }
}

// bubbletea-rs builds the model through `init()`, so the session is parked
// here until the program starts.
static PENDING: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

struct TeaAdapter {
    inner: Session,
    submitted: bool,
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let inner = PENDING
            .lock()
            .ok()
            .and_then(|mut pending| pending.take())
            .unwrap_or_default();
        (
            TeaAdapter {
                inner,
                submitted: false,
            },
            None,
        )
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        let km = msg.downcast_ref::<KeyMsg>()?;
        match &km.key {
            KeyCode::Esc => return Some(bubbletea_rs::quit()),
            KeyCode::Char('c') | KeyCode::Char('C')
                if km.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Some(bubbletea_rs::quit());
            }
            KeyCode::Enter => {
                self.submitted = true;
                return Some(bubbletea_rs::quit());
            }
            key => {
                if let Some(action) = Session::action_for(key) {
                    handle_action(&mut self.inner.choices, action);
                }
            }
        }
        None
    }

    fn view(&self) -> String {
        self.inner.view()
    }
}

// Run the session in the terminal. Returns the choices as left by the
// user, or `None` when the prompt was cancelled.
pub async fn run(session: Session) -> Result<Option<Choices>> {
    if let Ok(mut pending) = PENDING.lock() {
        *pending = Some(session);
    }

    let program = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()
        .map_err(|e| ChoiceError::Session(format!("failed to build program: {e:?}")))?;
    let finished = program
        .run()
        .await
        .map_err(|e| ChoiceError::Session(format!("program error: {e:?}")))?;

    debug!(submitted = finished.submitted, "session finished");
    Ok(finished.submitted.then_some(finished.inner.choices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::util::strip_ansi;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(Session::action_for(&KeyCode::Up), Some(Action::Up));
        assert_eq!(Session::action_for(&KeyCode::Char('j')), Some(Action::Down));
        assert_eq!(Session::action_for(&KeyCode::Char(' ')), Some(Action::Space));
        assert_eq!(Session::action_for(&KeyCode::Char('a')), Some(Action::ToggleAll));
        assert_eq!(Session::action_for(&KeyCode::Char('i')), Some(Action::Invert));
        assert_eq!(Session::action_for(&KeyCode::Char('3')), Some(Action::Number(3)));
        assert_eq!(Session::action_for(&KeyCode::Char('0')), None);
        assert_eq!(Session::action_for(&KeyCode::Char('x')), None);
    }

    #[test]
    fn view_shows_message_hint_and_rows() {
        let mut choices = Choices::new(["foo", "bar"], Options::default()).unwrap();
        choices.position = 1;
        let session = Session::new("Pick", choices);
        let out = strip_ansi(&session.view());
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(format!("? Pick {KEYS_HINT}").as_str()));
        assert!(lines.next().unwrap().ends_with("foo"));
        assert!(lines.next().unwrap().ends_with("bar"));
    }

    #[test]
    fn view_does_not_move_the_cursor() {
        let mut choices = Choices::new(["foo", "bar"], Options::default()).unwrap();
        choices.position = 1;
        let session = Session::new("Pick", choices);
        session.view();
        assert_eq!(session.choices.position, 1);
    }
}
