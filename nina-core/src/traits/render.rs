//! Channel renderer trait

/// Fills the register buffer for one multiplex channel
///
/// The scheduler clears `regs` before every call, so a renderer only sets
/// the bits it wants lit. Display state (digits, bar level, lamp mask) lives
/// in the renderer and persists between ticks.
///
/// Runs inside the tick: no blocking, no allocation, bounded work.
pub trait ChannelRenderer {
    /// Render `channel` into `regs`
    ///
    /// `channel` is below the owning scheduler's channel count. Channels the
    /// renderer has no content for are left blank.
    fn render(&self, channel: u8, regs: &mut [u8]);
}
