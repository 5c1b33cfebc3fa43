//! Operator inputs

pub mod button;

pub use button::{ButtonState, DebouncedButton, DEFAULT_DEBOUNCE_MS};
