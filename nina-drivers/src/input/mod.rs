//! Operator and vehicle inputs

pub mod button;
pub mod switches;

pub use button::PinButton;
pub use switches::{DashSwitches, Switch, SwitchStates, SWITCH_COUNT};
