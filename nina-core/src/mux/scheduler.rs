//! Multiplex scheduler
//!
//! Drives one shift-register chain from a periodic tick. Every tick:
//!
//! ```text
//! clear regs ─► render(channel, regs) ─► shift_out(regs) ─► channel += 1 (mod count)
//! ```
//!
//! A channel is visible for one tick out of `channel_count`, so the full
//! display refreshes every `channel_count × tick period`.

use crate::traits::{ChannelRenderer, ShiftOut};

/// Scheduler run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxState {
    /// Ticks are ignored
    Stopped,
    /// Ticks render and flush
    Running,
}

/// Rotating-channel renderer over an `N`-register chain
#[derive(Debug)]
pub struct MultiplexScheduler<R, S, const N: usize> {
    output: S,
    renderer: Option<R>,
    regs: [u8; N],
    channel: u8,
    channel_count: u8,
    state: MuxState,
    ticks: u32,
}

impl<R, S, const N: usize> MultiplexScheduler<R, S, N>
where
    R: ChannelRenderer,
    S: ShiftOut,
{
    /// Create a stopped scheduler without a renderer
    ///
    /// A `channel_count` of 0 is treated as 1.
    pub fn new(output: S, channel_count: u8) -> Self {
        Self {
            output,
            renderer: None,
            regs: [0; N],
            channel: 0,
            channel_count: channel_count.max(1),
            state: MuxState::Stopped,
            ticks: 0,
        }
    }

    /// Create a stopped scheduler with a renderer installed
    pub fn with_renderer(output: S, channel_count: u8, renderer: R) -> Self {
        let mut mux = Self::new(output, channel_count);
        mux.renderer = Some(renderer);
        mux
    }

    /// Blank the chain
    ///
    /// Call once at power-up, before the first tick, so the registers do not
    /// show their random reset contents.
    pub fn blank(&mut self) {
        self.regs = [0; N];
        self.output.shift_out(&self.regs);
    }

    pub fn start(&mut self) {
        self.state = MuxState::Running;
    }

    /// Stop rendering
    ///
    /// Once this returns no further render or flush happens, provided the
    /// caller serializes `stop` and `on_tick` (the firmware holds both under
    /// one mutex).
    pub fn stop(&mut self) {
        self.state = MuxState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == MuxState::Running
    }

    pub fn state(&self) -> MuxState {
        self.state
    }

    /// Run one tick
    ///
    /// Returns the channel that was rendered, or `None` while stopped.
    pub fn on_tick(&mut self) -> Option<u8> {
        if self.state != MuxState::Running {
            return None;
        }

        let channel = self.channel;

        self.regs = [0; N];
        if let Some(renderer) = &self.renderer {
            renderer.render(channel, &mut self.regs);
        }
        self.output.shift_out(&self.regs);

        self.channel = (channel + 1) % self.channel_count;
        self.ticks = self.ticks.wrapping_add(1);

        Some(channel)
    }

    /// Install or replace the renderer
    pub fn set_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
    }

    /// Remove the renderer; subsequent ticks flush blank registers
    pub fn clear_renderer(&mut self) -> Option<R> {
        self.renderer.take()
    }

    /// Renderer access for the main-loop setters
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Channel the next tick will render
    pub fn current_channel(&self) -> u8 {
        self.channel
    }

    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// Ticks rendered since construction (wrapping)
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Register buffer of the last tick
    pub fn registers(&self) -> &[u8; N] {
        &self.regs
    }

    pub fn output_mut(&mut self) -> &mut S {
        &mut self.output
    }
}
