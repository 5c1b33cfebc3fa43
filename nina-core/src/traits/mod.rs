//! Output abstraction traits
//!
//! These traits define the interface between the multiplex scheduler, the
//! display renderers and the register chain driver.

pub mod render;
pub mod shift;

pub use render::ChannelRenderer;
pub use shift::ShiftOut;
