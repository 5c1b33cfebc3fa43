//! Display multiplexing

pub mod scheduler;

pub use scheduler::{MultiplexScheduler, MuxState};
