// The choice collection: ordered rows, the indexable subset, and key lookup.

pub mod query;
pub mod state;

pub use query::Query;
pub use state::{Selection, Target};

use crate::choice::{Bulk, Choice, ChoiceInput, Entry, normalize};
use crate::error::Result;
use crate::options::{Answers, Options, Overrides};
use crate::render::{Paginate, Paginator};
use crate::separator::Separator;
use crate::util::arrayify;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

// Input accepted by `Choices::wrap_or_create`.
#[derive(Debug)]
pub enum ChoicesInput {
    Existing(Choices),
    List(Vec<ChoiceInput>),
}

impl From<Choices> for ChoicesInput {
    fn from(c: Choices) -> Self {
        ChoicesInput::Existing(c)
    }
}

impl<T: Into<ChoiceInput>> From<Vec<T>> for ChoicesInput {
    fn from(list: Vec<T>) -> Self {
        ChoicesInput::List(list.into_iter().map(Into::into).collect())
    }
}

pub struct Choices {
    // Cursor offset into the indexable choices.
    pub position: usize,
    options: Options,
    // Display order, separators included.
    entries: Vec<Entry>,
    // Offsets into `entries` of the indexable choices.
    items: Vec<usize>,
    // key -> offset into `items`; later duplicates win.
    keymap: HashMap<String, usize>,
    keys: Vec<String>,
    original: Vec<ChoiceInput>,
    paginator: Box<dyn Paginate>,
}

impl fmt::Debug for Choices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Choices")
            .field("position", &self.position)
            .field("options", &self.options)
            .field("entries", &self.entries)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl Default for Choices {
    fn default() -> Self {
        Choices::empty(Options::default())
    }
}

impl Choices {
    pub fn empty(options: Options) -> Self {
        Choices {
            position: 0,
            options,
            entries: Vec::new(),
            items: Vec::new(),
            keymap: HashMap::new(),
            keys: Vec::new(),
            original: Vec::new(),
            paginator: Box::new(Paginator::default()),
        }
    }

    pub fn new<I, T>(choices: I, options: Options) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ChoiceInput>,
    {
        let list: Vec<ChoiceInput> = choices.into_iter().map(Into::into).collect();
        debug!(count = list.len(), radio = options.radio, "initializing choices");
        let mut out = Choices::empty(options);
        out.original = list.clone();
        out.add_choices(list)?;
        Ok(out)
    }

    // Hands back an existing collection untouched, otherwise builds one.
    pub fn wrap_or_create(input: impl Into<ChoicesInput>, options: Options) -> Result<Self> {
        match input.into() {
            ChoicesInput::Existing(c) => {
                trace!("reusing existing choices");
                Ok(c)
            }
            ChoicesInput::List(list) => Choices::new(list, options),
        }
    }

    // Build from a JSON list of strings and objects. Nested arrays are
    // flattened; a lone value is treated as a one-element list.
    pub fn from_json(value: Value, options: Options) -> Result<Self> {
        let list = arrayify(value)
            .into_iter()
            .map(ChoiceInput::try_from)
            .collect::<Result<Vec<_>>>()?;
        Choices::new(list, options)
    }

    pub fn with_paginator(mut self, paginator: impl Paginate + 'static) -> Self {
        self.paginator = Box::new(paginator);
        self
    }

    pub fn choice(&self, input: impl Into<ChoiceInput>) -> Result<Entry> {
        normalize(input)
    }

    pub fn separator(&self, line: Option<&str>) -> Separator {
        line.map(Separator::new).unwrap_or_default()
    }

    pub fn add_choice(&mut self, input: impl Into<ChoiceInput>) -> Result<&mut Self> {
        let mut entry = normalize(input)?;
        if let Entry::Choice(choice) = &mut entry {
            if choice.is_disabled(&self.options.answers) {
                choice.index = None;
            } else {
                let pos = self.items.len();
                choice.index = Some(pos);
                if self.keymap.insert(choice.key.clone(), pos).is_some() {
                    debug!(key = %choice.key, "duplicate choice key, later entry wins");
                }
                self.keys.push(choice.key.clone());
                self.items.push(self.entries.len());
            }
            trace!(name = %choice.name, index = ?choice.index, "added choice");
        }
        self.entries.push(entry);
        Ok(self)
    }

    pub fn add_choices<I, T>(&mut self, choices: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<ChoiceInput>,
    {
        let mut list: Vec<ChoiceInput> = choices.into_iter().map(Into::into).collect();

        if self.options.radio && list.len() >= 2 && !self.has_bulk() {
            debug!("adding all/none choices for radio mode");
            let head = vec![
                ChoiceInput::Separator(Separator::blank()),
                ChoiceInput::Choice(Choice::bulk(Bulk::SelectAll)),
                ChoiceInput::Choice(Choice::bulk(Bulk::SelectNone)),
                ChoiceInput::Separator(Separator::default()),
            ];
            list.splice(0..0, head);
        }

        for input in list {
            self.add_choice(input)?;
        }
        Ok(())
    }

    // Append choices from JSON, flattening nested arrays.
    pub fn push_json(&mut self, value: Value) -> Result<()> {
        for v in arrayify(value) {
            self.add_choice(ChoiceInput::try_from(v)?)?;
        }
        Ok(())
    }

    pub(crate) fn has_bulk(&self) -> bool {
        self.items().any(Choice::is_bulk)
    }

    // Number of rows, separators included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // Number of indexable choices.
    pub fn real_len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &Choice> + '_ {
        self.items
            .iter()
            .filter_map(move |&e| self.entries[e].as_choice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> + '_ {
        self.items()
    }

    pub fn filter(&self, mut pred: impl FnMut(&Choice) -> bool) -> Vec<&Choice> {
        self.items().filter(|c| pred(c)).collect()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn original(&self) -> &[ChoiceInput] {
        &self.original
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn answers(&self) -> &Answers {
        &self.options.answers
    }

    pub fn answers_mut(&mut self) -> &mut Answers {
        &mut self.options.answers
    }

    pub fn set_answer(&mut self, name: impl Into<String>, value: Value) {
        self.options.answers.insert(name.into(), value);
    }

    pub(crate) fn choice_at(&self, pos: usize) -> Option<&Choice> {
        self.items
            .get(pos)
            .and_then(|&e| self.entries[e].as_choice())
    }

    pub(crate) fn choice_at_mut(&mut self, pos: usize) -> Option<&mut Choice> {
        let e = *self.items.get(pos)?;
        self.entries[e].as_choice_mut()
    }

    pub fn is_valid_index(&self, idx: usize) -> bool {
        idx < self.items.len()
    }

    // Offset of a choice in the indexable list. Never fails: anything
    // unknown or out of range is `None`.
    pub fn get_index(&self, target: impl Into<Target>) -> Option<usize> {
        match target.into() {
            Target::Index(i) => self.is_valid_index(i).then_some(i),
            Target::Key(k) => self.keymap.get(&k).copied(),
        }
    }

    pub fn get(&self, target: impl Into<Target>) -> Option<&Choice> {
        self.get_index(target).and_then(|pos| self.choice_at(pos))
    }

    pub fn get_mut(&mut self, target: impl Into<Target>) -> Option<&mut Choice> {
        let pos = self.get_index(target)?;
        self.choice_at_mut(pos)
    }

    // Lookup by a dynamically typed index or key.
    pub fn get_json(&self, target: &Value) -> Result<Option<&Choice>> {
        let target = Target::try_from(target)?;
        Ok(self.get(target))
    }

    pub fn has_choice(&self, target: impl Into<Target>) -> bool {
        self.get(target).is_some()
    }

    pub fn key_at(&self, idx: usize) -> Option<&str> {
        self.choice_at(idx).map(|c| c.key.as_str())
    }

    pub fn is_checked(&self, target: impl Into<Target>) -> Option<bool> {
        self.get(target).map(|c| c.checked)
    }

    pub fn render(&mut self, position: usize) -> String {
        self.render_with(position, &Overrides::default())
    }

    // Render every row with the cursor at `position`, then hand the text
    // to the paginator.
    pub fn render_with(&mut self, position: usize, overrides: &Overrides) -> String {
        self.position = position;
        self.render_current(overrides)
    }

    // Render at the current `position` without moving the cursor.
    pub fn render_current(&self, overrides: &Overrides) -> String {
        let position = self.position;
        let opts = self.options.merged(overrides);

        let mut buf = String::new();
        let mut active_row = 0;
        for entry in &self.entries {
            if entry.as_choice().and_then(Choice::index) == Some(position) {
                active_row = buf.matches('\n').count();
            }
            buf.push_str(&entry.render(position, &opts));
        }

        let text = format!("\n{}", buf.trim_end());
        self.paginator.paginate(&text, active_row, opts.limit)
    }
}
