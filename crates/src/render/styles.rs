use lipgloss::{Color, Style};
use once_cell::sync::Lazy;

pub static STYLE_POINTER: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(0, 238, 238)));
pub static STYLE_ON: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(0, 205, 0)));
pub static STYLE_DISABLED: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(128, 128, 128)));
pub static STYLE_DIM: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
pub static STYLE_BULK: Lazy<Style> = Lazy::new(|| Style::new().bold(true));
pub static STYLE_RULE: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
pub static STYLE_HINT: Lazy<Style> = Lazy::new(|| Style::new().faint(true));

#[cfg(not(windows))]
pub mod glyphs {
    pub const POINTER: &str = "❯";
    pub const ON: &str = "◉";
    pub const OFF: &str = "◯";
    pub const DISABLED: &str = "Ⓘ";
}

#[cfg(windows)]
pub mod glyphs {
    pub const POINTER: &str = ">";
    pub const ON: &str = "(*)";
    pub const OFF: &str = "( )";
    pub const DISABLED: &str = "(|)";
}
