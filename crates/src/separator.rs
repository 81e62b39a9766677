use crate::render::styles::STYLE_RULE;

pub const DEFAULT_RULE: &str = "────────";

// A display-only row. Never indexed, keyed or checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Separator {
    // None draws the default dimmed rule.
    line: Option<String>,
}

impl Separator {
    pub fn new(line: impl Into<String>) -> Self {
        Separator {
            line: Some(line.into()),
        }
    }

    pub fn blank() -> Self {
        Separator::new("")
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    // Separators ignore the cursor entirely.
    pub fn render(&self) -> String {
        match &self.line {
            Some(l) => format!("{l}\n"),
            None => format!(" {}\n", STYLE_RULE.render(DEFAULT_RULE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::strip_ansi;

    #[test]
    fn renders_custom_line_verbatim() {
        assert_eq!(Separator::new(" ---").render(), " ---\n");
        assert_eq!(Separator::blank().render(), "\n");
    }

    #[test]
    fn default_separator_draws_rule() {
        let out = strip_ansi(&Separator::default().render());
        assert_eq!(out, format!(" {DEFAULT_RULE}\n"));
    }

    #[test]
    fn custom_and_default_separators_differ() {
        assert_ne!(Separator::new("==="), Separator::default());
        assert_eq!(Separator::new("==="), Separator::new("==="));
    }
}
