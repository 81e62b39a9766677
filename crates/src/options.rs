use crate::error::{ChoiceError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

// Answers collected so far by the driving prompt, handed to
// `disabled` predicates.
pub type Answers = Map<String, Value>;

// Label formatter applied to every rendered row.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Symbols {
    pub on: String,
    pub off: String,
    pub disabled: String,
}

// `checkbox: false` hides the glyphs, `true` keeps the defaults, an object
// replaces them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Checkbox {
    #[default]
    Default,
    Hidden,
    Custom(Symbols),
}

impl<'de> Deserialize<'de> for Checkbox {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Symbols(Symbols),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Checkbox::Default,
            Raw::Flag(false) => Checkbox::Hidden,
            Raw::Symbols(s) => Checkbox::Custom(s),
        })
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    pub answers: Answers,
    pub radio: bool,
    pub objects: bool,
    pub pointer: Option<String>,
    pub checkbox: Checkbox,
    pub limit: Option<usize>,
    #[serde(skip)]
    pub format: Option<Formatter>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("answers", &self.answers)
            .field("radio", &self.radio)
            .field("objects", &self.objects)
            .field("pointer", &self.pointer)
            .field("checkbox", &self.checkbox)
            .field("limit", &self.limit)
            .field("format", &self.format.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Options {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ChoiceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_format(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.format = Some(Arc::new(f));
        self
    }

    // Copy of these options with per-render overrides laid on top.
    pub fn merged(&self, overrides: &Overrides) -> Options {
        let mut out = self.clone();
        if let Some(p) = &overrides.pointer {
            out.pointer = Some(p.clone());
        }
        if let Some(c) = &overrides.checkbox {
            out.checkbox = c.clone();
        }
        if overrides.limit.is_some() {
            out.limit = overrides.limit;
        }
        out
    }
}

// Options that may be swapped for a single `render_with` call.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub pointer: Option<String>,
    pub checkbox: Option<Checkbox>,
    pub limit: Option<usize>,
}
