use crate::choice::{Choice, State};
use crate::options::{Checkbox, Options};
use crate::render::styles::{
    STYLE_BULK, STYLE_DIM, STYLE_DISABLED, STYLE_ON, STYLE_POINTER, glyphs,
};
use crate::util::padding;

// A custom pointer is used verbatim, the default one is colored.
pub fn pointer_glyph(opts: &Options) -> String {
    match &opts.pointer {
        Some(p) => p.clone(),
        None => STYLE_POINTER.render(glyphs::POINTER),
    }
}

pub fn symbol_for(state: State, opts: &Options) -> String {
    match &opts.checkbox {
        Checkbox::Hidden => String::new(),
        Checkbox::Custom(s) => match state {
            State::On => s.on.clone(),
            State::Off => s.off.clone(),
            State::Disabled => s.disabled.clone(),
        },
        Checkbox::Default => match state {
            State::On => STYLE_ON.render(glyphs::ON),
            State::Off => glyphs::OFF.to_string(),
            State::Disabled => STYLE_DISABLED.render(glyphs::DISABLED),
        },
    }
}

// One row: pointer (or equal-width padding), state glyph, label, newline.
pub fn choice_line(choice: &Choice, position: usize, opts: &Options) -> String {
    let reason = choice.disabled.reason(&opts.answers);

    let mut label = if choice.is_bulk() {
        STYLE_BULK.render(&choice.name)
    } else {
        choice.name.clone()
    };
    if let Some(r) = &reason {
        label.push_str(&format!(" ({r})"));
    }
    if let Some(format) = &opts.format {
        label = format(&label);
    }

    let state = match (&reason, choice.checked) {
        (Some(_), _) => State::Disabled,
        (None, true) => State::On,
        (None, false) => State::Off,
    };
    if state == State::Disabled {
        label = STYLE_DIM.render(&label);
    }

    let pointer = pointer_glyph(opts);
    let prefix = if state != State::Disabled && choice.index() == Some(position) {
        pointer
    } else {
        padding(&pointer)
    };

    format!(
        "{prefix}{} {}\n",
        symbol_for(state, opts),
        label.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Disabled;
    use crate::options::Symbols;
    use crate::util::strip_ansi;

    fn indexed(name: &str, index: usize) -> Choice {
        let mut c = Choice::new(name);
        c.index = Some(index);
        c
    }

    #[test]
    fn active_row_shows_pointer() {
        let c = indexed("foo", 0);
        let out = strip_ansi(&choice_line(&c, 0, &Options::default()));
        assert_eq!(out, format!("{}{} foo\n", glyphs::POINTER, glyphs::OFF));
    }

    #[test]
    fn inactive_row_is_padded_to_pointer_width() {
        let c = indexed("foo", 1);
        let out = strip_ansi(&choice_line(&c, 0, &Options::default()));
        assert_eq!(out, format!(" {} foo\n", glyphs::OFF));

        let opts = Options {
            pointer: Some("-->".into()),
            ..Default::default()
        };
        let out = strip_ansi(&choice_line(&c, 0, &opts));
        assert_eq!(out, format!("   {} foo\n", glyphs::OFF));
    }

    #[test]
    fn custom_pointer_is_not_styled() {
        let c = indexed("foo", 0);
        let opts = Options {
            pointer: Some(">".into()),
            ..Default::default()
        };
        assert_eq!(choice_line(&c, 0, &opts), format!(">{} foo\n", glyphs::OFF));
    }

    #[test]
    fn checked_row_uses_on_glyph() {
        let mut c = indexed("foo", 0);
        c.checked = true;
        let line = choice_line(&c, 3, &Options::default());
        assert!(line.contains(&STYLE_ON.render(glyphs::ON)));
        assert_eq!(strip_ansi(&line), format!(" {} foo\n", glyphs::ON));
    }

    #[test]
    fn disabled_row_hides_pointer_and_shows_reason() {
        let mut c = indexed("foo", 0);
        c.disabled = Disabled::Yes;
        let out = strip_ansi(&choice_line(&c, 0, &Options::default()));
        assert_eq!(out, format!(" {} foo (Disabled)\n", glyphs::DISABLED));

        c.disabled = Disabled::Reason("N/A".into());
        c.checked = true;
        let out = strip_ansi(&choice_line(&c, 0, &Options::default()));
        assert_eq!(out, format!(" {} foo (N/A)\n", glyphs::DISABLED));
    }

    #[test]
    fn format_callback_rewrites_label() {
        let c = indexed("foo", 1);
        let opts = Options::default().with_format(|s| s.to_uppercase());
        let out = strip_ansi(&choice_line(&c, 0, &opts));
        assert_eq!(out, format!(" {} FOO\n", glyphs::OFF));
    }

    #[test]
    fn checkbox_can_be_hidden_or_replaced() {
        let mut c = indexed("foo", 1);
        let hidden = Options {
            checkbox: Checkbox::Hidden,
            ..Default::default()
        };
        assert_eq!(strip_ansi(&choice_line(&c, 0, &hidden)), "  foo\n");

        c.checked = true;
        let custom = Options {
            checkbox: Checkbox::Custom(Symbols {
                on: "[x]".into(),
                off: "[ ]".into(),
                disabled: "[-]".into(),
            }),
            ..Default::default()
        };
        assert_eq!(strip_ansi(&choice_line(&c, 0, &custom)), " [x] foo\n");
    }

    #[test]
    fn bulk_labels_are_bold() {
        let mut c = Choice::bulk(crate::choice::Bulk::SelectAll);
        c.index = Some(0);
        let line = choice_line(&c, 0, &Options::default());
        assert!(line.contains(&STYLE_BULK.render("all")));
    }
}
