//! Analog input abstraction

/// One ADC channel
///
/// Returns raw conversion counts; scaling to volts is up to the caller, who
/// knows the reference voltage and resolution.
pub trait AdcReader {
    /// Error type for conversions
    type Error;

    /// Perform one blocking conversion
    fn read(&mut self) -> Result<u16, Self::Error>;
}
