//! Output: present result elements for people.
//!
//! This is the presentation stage. It provides:
//!
//! - **format**: per-cell number formatting driven by format specs
//! - **grid**: the rectangular display grid and overtitle spans
//! - **text**: monospaced text with box separators
//! - **html**: an HTML `<table>` with `colspan`/`rowspan` overtitles
//!
//! Nothing here mutates a table; every function reads the current state.

pub mod format;
pub mod grid;
pub mod html;
pub mod text;

pub use format::{format_cell, FormatSpec};
pub use grid::{overtitle_spans, Grid, OvertitleSpan};
