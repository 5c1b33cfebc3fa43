//! Satellite Telemetry Protocol
//!
//! This crate defines the I2C telemetry exchange between the satellite board
//! (steering-wheel buttons and wheel-speed sensor) and the primary
//! ("brain") board. The primary is the bus master and reads one fixed frame
//! from the satellite at [`SATELLITE_ADDRESS`] whenever it wants fresh data.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────┬─────────────────┬──────────┐
//! │ FLAGS │ SPEED ×10 (LE)  │ CHECKSUM │
//! │ 1B    │ 2B              │ 1B       │
//! └───────┴─────────────────┴──────────┘
//! ```
//!
//! The satellite re-seals the frame after every update, so a read always
//! returns a coherent frame. The primary drops any frame whose checksum does
//! not verify and retries on the next poll.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod packet;
pub mod receiver;

pub use packet::{
    checksum, verify, Frame, PacketError, TelemetryPacket, FRAME_LEN, SATELLITE_ADDRESS,
};
pub use receiver::{ButtonEvents, ReceiverStats, TelemetryReceiver};
