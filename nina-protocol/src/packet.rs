//! Telemetry frame encoding and decoding.
//!
//! Frame format (4 bytes, fixed):
//! - FLAGS (1 byte): bit 0 = button A, bit 1 = button B, bits 2-7 reserved (0)
//! - SPEED (2 bytes): vehicle speed in 0.1 km/h, u16 little-endian
//! - CHECKSUM (1 byte): one's complement of the 8-bit sum of bytes 0-2

/// Satellite 7-bit I2C address
pub const SATELLITE_ADDRESS: u8 = 0x42;

/// Encoded frame length
pub const FRAME_LEN: usize = 4;

/// Bytes covered by the checksum
pub const PAYLOAD_LEN: usize = FRAME_LEN - 1;

/// Button A flag
pub const FLAG_BUTTON_A: u8 = 1 << 0;

/// Button B flag
pub const FLAG_BUTTON_B: u8 = 1 << 1;

/// Flags defined by this frame version
pub const FLAGS_KNOWN: u8 = FLAG_BUTTON_A | FLAG_BUTTON_B;

/// An encoded frame
pub type Frame = [u8; FRAME_LEN];

/// Errors that can occur during frame decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Fewer than [`FRAME_LEN`] bytes
    Incomplete,
    /// Checksum mismatch
    InvalidChecksum,
}

/// One's complement of the wrapping byte sum
pub fn checksum(payload: &[u8]) -> u8 {
    !payload.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Check the trailing checksum byte of a frame
pub fn verify(frame: &[u8]) -> bool {
    match frame.split_last() {
        Some((&check, payload)) if frame.len() == FRAME_LEN => checksum(payload) == check,
        _ => false,
    }
}

/// Decoded telemetry from the satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryPacket {
    /// Button A (OK) held
    pub button_a: bool,
    /// Button B (NEXT) held
    pub button_b: bool,
    /// Vehicle speed in 0.1 km/h
    pub speed_x10: u16,
}

impl TelemetryPacket {
    pub const fn new(button_a: bool, button_b: bool, speed_x10: u16) -> Self {
        Self {
            button_a,
            button_b,
            speed_x10,
        }
    }

    /// Flag byte
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.button_a {
            flags |= FLAG_BUTTON_A;
        }
        if self.button_b {
            flags |= FLAG_BUTTON_B;
        }
        flags
    }

    /// Encode with checksum
    pub fn to_frame(&self) -> Frame {
        let [lo, hi] = self.speed_x10.to_le_bytes();
        let payload = [self.flags(), lo, hi];
        [payload[0], payload[1], payload[2], checksum(&payload)]
    }

    /// Decode a frame read from the bus
    ///
    /// Extra trailing bytes are ignored. Reserved flag bits are ignored, so a
    /// newer satellite stays readable.
    pub fn from_frame(bytes: &[u8]) -> Result<Self, PacketError> {
        let frame = bytes.get(..FRAME_LEN).ok_or(PacketError::Incomplete)?;

        if !verify(frame) {
            return Err(PacketError::InvalidChecksum);
        }

        let flags = frame[0];
        Ok(Self {
            button_a: flags & FLAG_BUTTON_A != 0,
            button_b: flags & FLAG_BUTTON_B != 0,
            speed_x10: u16::from_le_bytes([frame[1], frame[2]]),
        })
    }

    /// Speed in km/h
    pub fn speed_kph(&self) -> f32 {
        self.speed_x10 as f32 / 10.0
    }
}
