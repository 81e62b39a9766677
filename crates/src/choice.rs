use crate::error::{ChoiceError, Result, kind_of};
use crate::options::{Answers, Options};
use crate::separator::Separator;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub type DisabledFn = Arc<dyn Fn(&Answers) -> Disabled + Send + Sync>;

// Whether a choice can be selected. `When` is evaluated against the
// current answers on every access; its result is never cached.
#[derive(Clone, Default)]
pub enum Disabled {
    #[default]
    No,
    Yes,
    Reason(String),
    When(DisabledFn),
}

impl Disabled {
    pub fn when<F, R>(f: F) -> Self
    where
        F: Fn(&Answers) -> R + Send + Sync + 'static,
        R: Into<Disabled>,
    {
        Disabled::When(Arc::new(move |answers| f(answers).into()))
    }

    // Collapse `When` into one of the static states.
    pub fn resolve(&self, answers: &Answers) -> Disabled {
        match self {
            Disabled::When(f) => f(answers).resolve(answers),
            other => other.clone(),
        }
    }

    pub fn is_disabled(&self, answers: &Answers) -> bool {
        !matches!(self.resolve(answers), Disabled::No)
    }

    // Text shown after a disabled label.
    pub fn reason(&self, answers: &Answers) -> Option<String> {
        match self.resolve(answers) {
            Disabled::Yes => Some("Disabled".to_string()),
            Disabled::Reason(r) => Some(r),
            _ => None,
        }
    }

    fn to_json(&self, answers: &Answers) -> Value {
        match self.resolve(answers) {
            Disabled::Reason(r) => Value::String(r),
            Disabled::Yes => Value::Bool(true),
            _ => Value::Bool(false),
        }
    }
}

impl fmt::Debug for Disabled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disabled::No => f.write_str("No"),
            Disabled::Yes => f.write_str("Yes"),
            Disabled::Reason(r) => f.debug_tuple("Reason").field(r).finish(),
            Disabled::When(_) => f.write_str("When(<fn>)"),
        }
    }
}

impl From<bool> for Disabled {
    fn from(b: bool) -> Self {
        if b {
            Disabled::Yes
        } else {
            Disabled::No
        }
    }
}

impl From<&str> for Disabled {
    fn from(s: &str) -> Self {
        Disabled::Reason(s.to_string())
    }
}

impl From<String> for Disabled {
    fn from(s: String) -> Self {
        Disabled::Reason(s)
    }
}

impl<'de> Deserialize<'de> for Disabled {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Reason(String),
            Null(()),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(b) => b.into(),
            Raw::Reason(r) => r.into(),
            Raw::Null(()) => Disabled::No,
        })
    }
}

// Distinguishes `"value": null` (present) from a missing `value`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// A choice record as written by the caller, before normalization.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawChoice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub disabled: Disabled,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawChoice {
    pub fn named(name: impl Into<String>) -> Self {
        RawChoice {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn separator(line: Option<String>) -> Self {
        RawChoice {
            kind: Some("separator".to_string()),
            line,
            ..Default::default()
        }
    }

    pub fn is_separator(&self) -> bool {
        self.kind.as_deref() == Some("separator")
    }
}

// Anything that can become a row of a choice list.
#[derive(Clone, Debug)]
pub enum ChoiceInput {
    Text(String),
    Record(RawChoice),
    Choice(Choice),
    Separator(Separator),
}

impl From<&str> for ChoiceInput {
    fn from(s: &str) -> Self {
        ChoiceInput::Text(s.to_string())
    }
}

impl From<String> for ChoiceInput {
    fn from(s: String) -> Self {
        ChoiceInput::Text(s)
    }
}

impl From<RawChoice> for ChoiceInput {
    fn from(r: RawChoice) -> Self {
        ChoiceInput::Record(r)
    }
}

impl From<Choice> for ChoiceInput {
    fn from(c: Choice) -> Self {
        ChoiceInput::Choice(c)
    }
}

impl From<Separator> for ChoiceInput {
    fn from(s: Separator) -> Self {
        ChoiceInput::Separator(s)
    }
}

impl TryFrom<Value> for ChoiceInput {
    type Error = ChoiceError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::String(s) => Ok(ChoiceInput::Text(s)),
            Value::Object(_) => Ok(ChoiceInput::Record(serde_json::from_value(v)?)),
            other => Err(ChoiceError::InvalidChoice {
                found: kind_of(&other),
            }),
        }
    }
}

// The synthetic bulk-selection rows injected in radio mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bulk {
    SelectAll,
    SelectNone,
}

#[derive(Clone, Debug)]
pub struct Choice {
    pub name: String,
    pub value: Value,
    pub short: String,
    pub key: String,
    pub checked: bool,
    pub disabled: Disabled,
    pub extra: Map<String, Value>,
    pub(crate) index: Option<usize>,
    pub(crate) bulk: Option<Bulk>,
}

impl Choice {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Choice {
            value: Value::String(name.clone()),
            short: name.clone(),
            key: name.clone(),
            name,
            checked: false,
            disabled: Disabled::No,
            extra: Map::new(),
            index: None,
            bulk: None,
        }
    }

    pub fn from_record(raw: RawChoice) -> Result<Self> {
        let RawChoice {
            name,
            value,
            short,
            key,
            checked,
            disabled,
            extra,
            ..
        } = raw;

        let name = name
            .filter(|n| !n.is_empty())
            .or_else(|| value.as_ref().and_then(label_of))
            .ok_or(ChoiceError::MissingName)?;
        let value = value.unwrap_or_else(|| Value::String(name.clone()));
        let short = short.filter(|s| !s.is_empty()).unwrap_or_else(|| name.clone());
        let key = key.filter(|k| !k.is_empty()).unwrap_or_else(|| short.clone());

        Ok(Choice {
            name,
            value,
            short,
            key,
            checked,
            disabled,
            extra,
            index: None,
            bulk: None,
        })
    }

    pub(crate) fn bulk(bulk: Bulk) -> Self {
        let mut c = Choice::new(match bulk {
            Bulk::SelectAll => "all",
            Bulk::SelectNone => "none",
        });
        c.bulk = Some(bulk);
        c
    }

    // Offset in the indexable list, `None` for rows that were never indexed.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_bulk(&self) -> bool {
        self.bulk.is_some()
    }

    pub fn toggle(&mut self) -> &mut Self {
        self.checked = !self.checked;
        self
    }

    pub fn is_disabled(&self, answers: &Answers) -> bool {
        self.disabled.is_disabled(answers)
    }

    pub fn state(&self, answers: &Answers) -> State {
        if self.is_disabled(answers) {
            State::Disabled
        } else if self.checked {
            State::On
        } else {
            State::Off
        }
    }

    // Value of a named property: a built-in field or an extra record key.
    pub fn field(&self, field: &str, answers: &Answers) -> Option<Value> {
        match field {
            "name" => Some(Value::String(self.name.clone())),
            "value" => Some(self.value.clone()),
            "short" => Some(Value::String(self.short.clone())),
            "key" => Some(Value::String(self.key.clone())),
            "checked" => Some(Value::Bool(self.checked)),
            "disabled" => Some(self.disabled.to_json(answers)),
            "index" => self.index.map(Value::from),
            _ => self.extra.get(field).cloned(),
        }
    }

    pub fn to_json(&self, answers: &Answers) -> Value {
        let mut out = self.extra.clone();
        out.insert("name".into(), Value::String(self.name.clone()));
        out.insert("value".into(), self.value.clone());
        out.insert("short".into(), Value::String(self.short.clone()));
        out.insert("key".into(), Value::String(self.key.clone()));
        out.insert("checked".into(), Value::Bool(self.checked));
        if self.is_disabled(answers) {
            out.insert("disabled".into(), self.disabled.to_json(answers));
        }
        Value::Object(out)
    }

    pub fn render(&self, position: usize, opts: &Options) -> String {
        crate::render::line::choice_line(self, position, opts)
    }
}

fn label_of(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    On,
    Off,
    Disabled,
}

// One row of a choice list.
#[derive(Clone, Debug)]
pub enum Entry {
    Choice(Choice),
    Separator(Separator),
}

impl Entry {
    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Entry::Choice(c) => Some(c),
            Entry::Separator(_) => None,
        }
    }

    pub fn as_choice_mut(&mut self) -> Option<&mut Choice> {
        match self {
            Entry::Choice(c) => Some(c),
            Entry::Separator(_) => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Entry::Separator(_))
    }

    pub fn render(&self, position: usize, opts: &Options) -> String {
        match self {
            Entry::Choice(c) => c.render(position, opts),
            Entry::Separator(s) => s.render(),
        }
    }
}

// Turn any input shape into a row. Already-built choices and separators
// come back untouched.
pub fn normalize(input: impl Into<ChoiceInput>) -> Result<Entry> {
    match input.into() {
        ChoiceInput::Text(s) => Ok(Entry::Choice(Choice::new(s))),
        ChoiceInput::Choice(c) => Ok(Entry::Choice(c)),
        ChoiceInput::Separator(s) => Ok(Entry::Separator(s)),
        ChoiceInput::Record(raw) if raw.is_separator() => {
            let line = raw.line.or_else(|| match raw.value {
                Some(Value::String(s)) => Some(s),
                _ => None,
            });
            Ok(Entry::Separator(line.map(Separator::new).unwrap_or_default()))
        }
        ChoiceInput::Record(raw) => Ok(Entry::Choice(Choice::from_record(raw)?)),
    }
}
