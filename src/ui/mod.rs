//! Minimal terminal widgets. Rendering goes to stderr so command output
//! on stdout stays shell-evaluable.

mod picker;

pub use picker::{Column, TablePicker};
