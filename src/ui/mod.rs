pub mod binder;
pub mod commands;
pub mod terminal;

pub use binder::{Binder, ClickOutcome, TextKind, TextTarget};
