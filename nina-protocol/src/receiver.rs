//! Primary-side telemetry receiver
//!
//! Holds the last accepted packet and turns the satellite's button levels
//! into one-shot press events. Rejected frames are counted and otherwise
//! ignored; the next poll simply tries again.

use crate::packet::{PacketError, TelemetryPacket};

/// Rising edges between two accepted packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvents {
    /// Button A went from released to held
    pub a_pressed: bool,
    /// Button B went from released to held
    pub b_pressed: bool,
}

impl ButtonEvents {
    pub fn any(&self) -> bool {
        self.a_pressed || self.b_pressed
    }
}

/// Frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverStats {
    pub accepted: u32,
    pub rejected: u32,
}

/// Telemetry receiver state
#[derive(Debug, Clone, Default)]
pub struct TelemetryReceiver {
    last: Option<TelemetryPacket>,
    stats: ReceiverStats,
}

impl TelemetryReceiver {
    pub const fn new() -> Self {
        Self {
            last: None,
            stats: ReceiverStats {
                accepted: 0,
                rejected: 0,
            },
        }
    }

    /// Feed the bytes of one bus read
    ///
    /// On success returns the button edges relative to the previous accepted
    /// packet. The first accepted packet only sets the baseline, so buttons
    /// held while the link comes up are not reported as presses.
    pub fn accept(&mut self, bytes: &[u8]) -> Result<ButtonEvents, PacketError> {
        let packet = match TelemetryPacket::from_frame(bytes) {
            Ok(packet) => packet,
            Err(e) => {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                return Err(e);
            }
        };
        self.stats.accepted = self.stats.accepted.wrapping_add(1);

        let events = match self.last {
            Some(prev) => ButtonEvents {
                a_pressed: packet.button_a && !prev.button_a,
                b_pressed: packet.button_b && !prev.button_b,
            },
            None => ButtonEvents::default(),
        };
        self.last = Some(packet);

        Ok(events)
    }

    /// Last accepted packet
    pub fn last(&self) -> Option<&TelemetryPacket> {
        self.last.as_ref()
    }

    /// Speed from the last accepted packet, 0 before the first one
    pub fn speed_x10(&self) -> u16 {
        self.last.map_or(0, |p| p.speed_x10)
    }

    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(a: bool, b: bool, speed: u16) -> [u8; 4] {
        TelemetryPacket::new(a, b, speed).to_frame()
    }

    #[test]
    fn test_first_packet_sets_baseline() {
        let mut rx = TelemetryReceiver::new();
        assert_eq!(rx.speed_x10(), 0);

        let events = rx.accept(&frame(true, true, 420)).unwrap();
        assert!(!events.any());
        assert_eq!(rx.speed_x10(), 420);
    }

    #[test]
    fn test_press_reported_once() {
        let mut rx = TelemetryReceiver::new();
        rx.accept(&frame(false, false, 0)).unwrap();

        let events = rx.accept(&frame(true, false, 0)).unwrap();
        assert!(events.a_pressed);
        assert!(!events.b_pressed);

        // Still held
        let events = rx.accept(&frame(true, false, 0)).unwrap();
        assert!(!events.any());

        // Release then press B
        rx.accept(&frame(false, false, 0)).unwrap();
        let events = rx.accept(&frame(false, true, 0)).unwrap();
        assert!(events.b_pressed);
    }

    #[test]
    fn test_rejected_frame_keeps_last_packet() {
        let mut rx = TelemetryReceiver::new();
        rx.accept(&frame(false, false, 300)).unwrap();

        let mut bad = frame(true, false, 999);
        bad[3] = bad[3].wrapping_add(1);
        assert_eq!(rx.accept(&bad), Err(PacketError::InvalidChecksum));
        assert_eq!(rx.accept(&[0x00]), Err(PacketError::Incomplete));

        assert_eq!(rx.speed_x10(), 300);
        assert_eq!(
            rx.stats(),
            ReceiverStats {
                accepted: 1,
                rejected: 2
            }
        );

        // A press hidden behind a bad frame is still seen on the next good one
        let events = rx.accept(&frame(true, false, 310)).unwrap();
        assert!(events.a_pressed);
    }
}
