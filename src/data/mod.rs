//! Data representation shared by every pipeline component.
//!
//! All data exchanged between dataloaders, preprocessors, models, and
//! evaluators is a [`Value`]: a closed tagged variant over tabular frames,
//! mappings, sequences, and scalars. Components construct values explicitly,
//! so schema inference and validation pattern-match exhaustively instead of
//! probing shapes at runtime.

mod cell;
mod frame;
mod value;

pub use cell::{Cell, Dtype};
pub use frame::{Column, Frame};
pub use value::Value;
