//! Serial console input handling

pub mod line;

pub use line::{Line, LineAssembler, MAX_LINE_LEN};
