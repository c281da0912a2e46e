mod row;
mod template;
mod writer;

pub use row::{DeckRow, Tags};
pub use template::{BackField, escape, format_examples, join_lines};
pub use writer::write_rows;
