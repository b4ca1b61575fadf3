//! Data model: cells, column descriptors, rows and row actions.

mod action;
mod cell;
mod column;
mod row;

pub use action::*;
pub use cell::*;
pub use column::*;
pub use row::*;
