use crate::choice::Bulk;
use crate::choices::{Choices, Selection};
use tracing::trace;

// Keypress-level actions a prompt can apply to its choice list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    // 1-based row number typed by the user.
    Number(usize),
    Up,
    Down,
    Enter,
    Tab,
    Space,
    ToggleAll,
    Invert,
}

// Apply `action` and return the cursor position afterwards.
pub fn handle_action(c: &mut Choices, action: Action) -> usize {
    trace!(?action, position = c.position, "action");
    match action {
        Action::Number(n) => handle_number(c, n),
        Action::Up => handle_up(c),
        Action::Down => handle_down(c),
        Action::Enter | Action::Tab => c.position,
        Action::Space => handle_space(c),
        Action::ToggleAll => handle_toggle_all(c),
        Action::Invert => handle_invert(c),
    }
}

fn handle_number(c: &mut Choices, n: usize) -> usize {
    if n == 0 || n > c.real_len() {
        return c.position;
    }
    c.position = n - 1;
    if c.options().radio {
        c.radio();
    } else {
        c.toggle(n - 1, false);
    }
    c.position
}

fn handle_down(c: &mut Choices) -> usize {
    let len = c.real_len();
    c.position = if c.position + 1 < len { c.position + 1 } else { 0 };
    c.position
}

fn handle_up(c: &mut Choices) -> usize {
    let len = c.real_len();
    c.position = if c.position > 0 {
        c.position - 1
    } else {
        len.saturating_sub(1)
    };
    c.position
}

fn handle_space(c: &mut Choices) -> usize {
    c.radio();
    c.position
}

fn handle_toggle_all(c: &mut Choices) -> usize {
    // The synthetic rows are found by tag; a user choice may be keyed "all".
    let all_checked = c
        .bulk_index(Bulk::SelectAll)
        .and_then(|pos| c.is_checked(pos));
    match all_checked {
        Some(was) if c.real_len() > 2 => {
            if was {
                c.uncheck(Selection::All);
                c.set_bulk(Bulk::SelectNone, true);
            } else {
                c.check(Selection::All);
                c.set_bulk(Bulk::SelectNone, false);
            }
        }
        _ => {
            c.toggle(Selection::All, false);
        }
    }
    c.position
}

fn handle_invert(c: &mut Choices) -> usize {
    c.toggle(Selection::All, false);
    c.sync_bulk();
    c.position
}
