use crate::choice::{Bulk, Choice};
use crate::choices::Choices;
use crate::error::{ChoiceError, kind_of};
use crate::util::as_index;
use serde_json::Value;
use tracing::debug;

// A single choice, by position in the indexable list or by key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Key(String),
}

impl From<usize> for Target {
    fn from(i: usize) -> Self {
        Target::Index(i)
    }
}

impl From<&str> for Target {
    fn from(k: &str) -> Self {
        Target::Key(k.to_string())
    }
}

impl From<String> for Target {
    fn from(k: String) -> Self {
        Target::Key(k)
    }
}

impl TryFrom<&Value> for Target {
    type Error = ChoiceError;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        if let Some(i) = as_index(v) {
            return Ok(Target::Index(i));
        }
        match v {
            Value::String(k) => Ok(Target::Key(k.clone())),
            other => Err(ChoiceError::InvalidIndex {
                found: kind_of(other),
            }),
        }
    }
}

// What a check/uncheck/toggle applies to. `Many` is applied element by
// element, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    One(Target),
    Many(Vec<Target>),
}

impl From<Target> for Selection {
    fn from(t: Target) -> Self {
        Selection::One(t)
    }
}

impl From<usize> for Selection {
    fn from(i: usize) -> Self {
        Selection::One(i.into())
    }
}

impl From<&str> for Selection {
    fn from(k: &str) -> Self {
        Selection::One(k.into())
    }
}

impl From<String> for Selection {
    fn from(k: String) -> Self {
        Selection::One(k.into())
    }
}

impl<T: Into<Target>> From<Vec<T>> for Selection {
    fn from(list: Vec<T>) -> Self {
        Selection::Many(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Target>, const N: usize> From<[T; N]> for Selection {
    fn from(list: [T; N]) -> Self {
        Selection::Many(list.into_iter().map(Into::into).collect())
    }
}

impl Choices {
    // Positions a selection resolves to, in application order.
    fn resolve(&self, sel: Selection) -> Vec<Option<usize>> {
        match sel {
            Selection::All => (0..self.real_len()).map(Some).collect(),
            Selection::One(t) => vec![self.get_index(t)],
            Selection::Many(ts) => ts.into_iter().map(|t| self.get_index(t)).collect(),
        }
    }

    fn set_checked(&mut self, sel: Selection, on: bool) -> &mut Self {
        for pos in self.resolve(sel).into_iter().flatten() {
            if let Some(c) = self.choice_at_mut(pos) {
                c.checked = on;
            }
        }
        self
    }

    pub fn check(&mut self, sel: impl Into<Selection>) -> &mut Self {
        self.set_checked(sel.into(), true)
    }

    pub fn uncheck(&mut self, sel: impl Into<Selection>) -> &mut Self {
        self.set_checked(sel.into(), false)
    }

    // Flip the selected choices. With `radio`, each resolved choice
    // becomes the only checked one.
    pub fn toggle(&mut self, sel: impl Into<Selection>, radio: bool) -> &mut Self {
        for pos in self.resolve(sel.into()).into_iter().flatten() {
            if radio {
                let entries = &mut self.entries;
                for (i, &e) in self.items.iter().enumerate() {
                    if let Some(c) = entries[e].as_choice_mut() {
                        c.checked = i == pos;
                    }
                }
            } else if let Some(c) = self.choice_at_mut(pos) {
                c.toggle();
            }
        }
        self
    }

    pub(crate) fn bulk_index(&self, bulk: Bulk) -> Option<usize> {
        self.items().position(|c| c.bulk == Some(bulk))
    }

    pub(crate) fn set_bulk(&mut self, bulk: Bulk, on: bool) {
        if let Some(pos) = self.bulk_index(bulk) {
            self.set_checked(Selection::One(Target::Index(pos)), on);
        }
    }

    // Accept the row under the cursor, honouring the all/none rows.
    pub fn radio(&mut self) -> &mut Self {
        let pos = self.position;
        if self.real_len() <= 1 {
            return self.toggle(pos, false);
        }
        let Some((bulk, was_checked)) = self.choice_at(pos).map(|c| (c.bulk, c.checked)) else {
            return self;
        };
        debug!(position = pos, ?bulk, "radio select");

        match bulk {
            Some(Bulk::SelectAll) => {
                let on = !was_checked;
                self.set_checked(Selection::All, on);
                self.set_bulk(Bulk::SelectNone, !on);
            }
            Some(Bulk::SelectNone) => {
                self.uncheck(Selection::All);
                self.check(pos);
            }
            None => {
                self.set_bulk(Bulk::SelectAll, false);
                self.set_bulk(Bulk::SelectNone, false);
                self.toggle(pos, false);
            }
        }
        self
    }

    pub(crate) fn sync_bulk(&mut self) {
        if !self.has_bulk() {
            return;
        }
        let real = self.items().filter(|c| !c.is_bulk()).count();
        let checked = self.checked_choices().len();
        match checked {
            0 => {
                self.set_bulk(Bulk::SelectNone, true);
                self.set_bulk(Bulk::SelectAll, false);
            }
            n if n == real => {
                self.set_bulk(Bulk::SelectNone, false);
                self.set_bulk(Bulk::SelectAll, true);
            }
            _ => {
                self.set_bulk(Bulk::SelectAll, false);
                self.set_bulk(Bulk::SelectNone, false);
            }
        }
    }

    // Checked choices, synthetic all/none rows excluded.
    pub fn checked_choices(&self) -> Vec<&Choice> {
        self.items()
            .filter(|c| c.checked && !c.is_bulk())
            .collect()
    }

    // Values of the checked choices, or whole records when the
    // `objects` option is set.
    pub fn checked(&self) -> Vec<Value> {
        let answers = self.answers();
        self.checked_choices()
            .into_iter()
            .map(|c| {
                if self.options().objects {
                    c.to_json(answers)
                } else {
                    c.value.clone()
                }
            })
            .collect()
    }
}
