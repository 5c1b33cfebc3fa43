//! Embassy async tasks
//!
//! Tasks on the interrupt executor (edge counting, multiplex ticks) never
//! block. Everything else runs on the thread-mode executor.

pub mod dashboard;
pub mod edge;
pub mod mux;
pub mod status;

pub use dashboard::{dashboard_task, DashIo};
pub use edge::rpm_count_task;
pub use mux::{lamps_mux_task, speedo_mux_task, tach_mux_task};
pub use status::status_task;
