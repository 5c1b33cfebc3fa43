//! Telemetry link to the satellite board
//!
//! The primary is the I2C master: every poll reads one frame from the
//! satellite and hands it to a [`TelemetryReceiver`]. Bus errors and bad
//! frames are counted and reported; the last good packet stays valid.

use nina_hal::I2cBus;
use nina_protocol::{
    ButtonEvents, PacketError, ReceiverStats, TelemetryPacket, TelemetryReceiver, FRAME_LEN,
};

/// Link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// The bus transfer failed (NACK, arbitration loss, timeout)
    Bus(E),
    /// A frame arrived but did not verify
    Packet(PacketError),
}

impl<E> From<PacketError> for LinkError<E> {
    fn from(e: PacketError) -> Self {
        LinkError::Packet(e)
    }
}

/// Link counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub frames: ReceiverStats,
    pub bus_errors: u32,
}

/// Master side of the telemetry link
pub struct TelemetryLink<B> {
    bus: B,
    address: u8,
    receiver: TelemetryReceiver,
    bus_errors: u32,
}

impl<B: I2cBus> TelemetryLink<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            receiver: TelemetryReceiver::new(),
            bus_errors: 0,
        }
    }

    /// Read and decode one frame
    ///
    /// Returns the button presses since the previous good frame.
    pub fn poll(&mut self) -> Result<ButtonEvents, LinkError<B::Error>> {
        let mut frame = [0u8; FRAME_LEN];
        if let Err(e) = self.bus.read(self.address, &mut frame) {
            self.bus_errors = self.bus_errors.wrapping_add(1);
            return Err(LinkError::Bus(e));
        }

        Ok(self.receiver.accept(&frame)?)
    }

    /// Last good packet
    pub fn last(&self) -> Option<&TelemetryPacket> {
        self.receiver.last()
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats {
            frames: self.receiver.stats(),
            bus_errors: self.bus_errors,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    /// I2C bus replaying scripted read responses
    #[derive(Default)]
    struct MockBus {
        responses: VecDeque<Result<[u8; FRAME_LEN], Nack>>,
        reads_from: Option<u8>,
    }

    impl I2cBus for MockBus {
        type Error = Nack;

        fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Nack> {
            self.reads_from = Some(address);
            let frame = self.responses.pop_front().unwrap_or(Err(Nack))?;
            buf.copy_from_slice(&frame);
            Ok(())
        }
    }

    fn link(responses: &[Result<[u8; FRAME_LEN], Nack>]) -> TelemetryLink<MockBus> {
        let bus = MockBus {
            responses: responses.iter().copied().collect(),
            reads_from: None,
        };
        TelemetryLink::new(bus, nina_protocol::SATELLITE_ADDRESS)
    }

    #[test]
    fn test_poll_reads_satellite() {
        let frame = TelemetryPacket::new(false, false, 523).to_frame();
        let mut link = link(&[Ok(frame)]);

        assert_eq!(link.poll(), Ok(ButtonEvents::default()));
        assert_eq!(link.bus.reads_from, Some(0x42));
        assert_eq!(link.last().map(|p| p.speed_x10), Some(523));
    }

    #[test]
    fn test_bus_error_counted() {
        let mut link = link(&[Err(Nack)]);
        assert_eq!(link.poll(), Err(LinkError::Bus(Nack)));
        assert_eq!(link.stats().bus_errors, 1);
        assert!(link.last().is_none());
    }

    #[test]
    fn test_corrupt_frame_dropped() {
        let good = TelemetryPacket::new(false, false, 100).to_frame();
        let mut bad = TelemetryPacket::new(true, true, 900).to_frame();
        bad[1] ^= 0x10;
        let pressed = TelemetryPacket::new(true, false, 110).to_frame();

        let mut link = link(&[Ok(good), Ok(bad), Ok(pressed)]);
        link.poll().unwrap();
        assert_eq!(
            link.poll(),
            Err(LinkError::Packet(PacketError::InvalidChecksum))
        );
        assert_eq!(link.last().map(|p| p.speed_x10), Some(100));

        let events = link.poll().unwrap();
        assert!(events.a_pressed);

        let stats = link.stats();
        assert_eq!(stats.frames.accepted, 2);
        assert_eq!(stats.frames.rejected, 1);
        assert_eq!(stats.bus_errors, 0);
    }
}
