//! tickbox - checkbox and radio choice lists for terminal prompts
//!
//! Library crate holding the choice model, its rendering and the keypress
//! actions; the binary wraps them in an interactive session.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod actions;
pub mod choice;
pub mod choices;
pub mod error;
pub mod options;
pub mod render;
pub mod run;
pub mod separator;
pub mod util;

pub use actions::{Action, handle_action};
pub use choice::{Choice, ChoiceInput, Disabled, Entry, RawChoice, State, normalize};
pub use choices::{Choices, ChoicesInput, Query, Selection, Target};
pub use error::{ChoiceError, Result};
pub use options::{Answers, Checkbox, Options, Overrides, Symbols};
pub use render::{Paginate, Paginator};
pub use separator::Separator;
