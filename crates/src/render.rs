// Row and page rendering for choice lists.

pub mod line;
pub mod paginate;
pub mod styles;

pub use line::{choice_line, pointer_glyph, symbol_for};
pub use paginate::{DEFAULT_LIMIT, PAGINATION_HINT, Paginate, Paginator};
