//! Data layer: the building blocks a results table is made of.
//!
//! - **CellValue / ColumnType**: tagged scalars and type inference
//! - **NamedAxis**: positional names with generated defaults
//! - **KeyedList**: values looked up by name first, position second
//! - **ColumnStore**: ragged column-major cell storage
//! - **TabularInput**: the neutral shapes data arrives in
//! - **Footnote / ColRowCombination / Status**: annotations on result elements

pub mod axis;
pub mod cell;
pub mod input;
pub mod keyed;
pub mod notes;
pub mod store;

pub use axis::{AxisKind, NamedAxis};
pub use cell::{CellValue, ColumnType};
pub use input::{Matrix, NamedColumn, Record, Table2D, TabularInput};
pub use keyed::KeyedList;
pub use notes::{ColRowCombination, Footnote, Status};
pub use store::ColumnStore;
