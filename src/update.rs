//! Host-facing redraw request flags.

use bitflags::bitflags;

bitflags! {
    /// Work the host should schedule after one or more mutations.
    ///
    /// Mutators accumulate flags on the adapter; the host drains them once
    /// per event-loop turn with [`crate::CircleImage::take_update`], so a
    /// burst of setter calls coalesces into a single redraw.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Update: u8 {
        /// The widget must be redrawn.
        const DRAW = 0b0001;
    }
}

impl Update {
    /// Whether a redraw was requested.
    pub fn draw_requested(&self) -> bool {
        self.contains(Update::DRAW)
    }
}
