/// Timing points at which an external DMA engine may start a transfer
#[repr(u8)]
#[derive(Clone, Copy)]
pub enum DmaOccasion {
    HBlank = 0b001,
    VBlank = 0b010,
    Video = 0b100,
}

/// Transfer request latch, consumed by an external DMA engine
pub struct Dma {
    pending: u8,
}

impl Dma {
    pub fn new() -> Self {
        Self { pending: 0 }
    }

    pub fn reset(&mut self) {
        self.pending = 0;
    }

    pub fn request(&mut self, occasion: DmaOccasion) {
        self.pending |= occasion as u8;
    }

    /// Revoke any pending video capture request
    pub fn stop_video_transfer(&mut self) {
        self.pending &= !(DmaOccasion::Video as u8);
    }

    #[inline]
    pub fn is_requested(&self, occasion: DmaOccasion) -> bool {
        self.pending & (occasion as u8) != 0
    }

    /// Consume and clear the pending request bits
    pub fn take_pending(&mut self) -> u8 {
        let pending = self.pending;
        self.pending = 0;
        pending
    }
}

impl Default for Dma {
    fn default() -> Self {
        Self::new()
    }
}
