use crate::render::styles::STYLE_HINT;

pub const DEFAULT_LIMIT: usize = 7;
pub const PAGINATION_HINT: &str = "(Move up and down to reveal more choices)";

// Windows a rendered list so only `limit` rows are shown.
//
// `text` starts with a line break followed by one row per line; `active`
// is the row holding the cursor.
pub trait Paginate: Send {
    fn paginate(&self, text: &str, active: usize, limit: Option<usize>) -> String;
}

#[derive(Clone, Debug)]
pub struct Paginator {
    pub hint: String,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            hint: PAGINATION_HINT.to_string(),
        }
    }
}

impl Paginate for Paginator {
    fn paginate(&self, text: &str, active: usize, limit: Option<usize>) -> String {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let body = text.strip_prefix('\n').unwrap_or(text);
        let rows: Vec<&str> = body.split('\n').collect();
        if limit == 0 || rows.len() <= limit {
            return text.to_string();
        }

        // Keep the cursor roughly centred, clamped at both ends.
        let start = active.saturating_sub(limit / 2).min(rows.len() - limit);
        let window = rows[start..start + limit].join("\n");
        format!("\n{window}\n{}", STYLE_HINT.render(&self.hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::strip_ansi;

    fn list(n: usize) -> String {
        let rows: Vec<String> = (0..n).map(|i| format!("row{i}")).collect();
        format!("\n{}", rows.join("\n"))
    }

    #[test]
    fn short_lists_pass_through() {
        let p = Paginator::default();
        let text = list(3);
        assert_eq!(p.paginate(&text, 0, None), text);
        assert_eq!(p.paginate(&text, 0, Some(3)), text);
    }

    #[test]
    fn long_lists_are_windowed_with_hint() {
        let p = Paginator::default();
        let out = strip_ansi(&p.paginate(&list(6), 0, Some(4)));
        assert_eq!(out, format!("\nrow0\nrow1\nrow2\nrow3\n{PAGINATION_HINT}"));
    }

    #[test]
    fn window_follows_the_cursor() {
        let p = Paginator::default();
        let out = strip_ansi(&p.paginate(&list(10), 5, Some(4)));
        assert_eq!(out, format!("\nrow3\nrow4\nrow5\nrow6\n{PAGINATION_HINT}"));

        let out = strip_ansi(&p.paginate(&list(10), 9, Some(4)));
        assert_eq!(out, format!("\nrow6\nrow7\nrow8\nrow9\n{PAGINATION_HINT}"));
    }

    #[test]
    fn default_limit_applies_when_unset() {
        let p = Paginator::default();
        let out = strip_ansi(&p.paginate(&list(DEFAULT_LIMIT + 1), 0, None));
        assert_eq!(out.lines().filter(|l| l.starts_with("row")).count(), DEFAULT_LIMIT);
    }
}
