/// Interrupt kinds raised by the display pipeline
#[repr(u16)]
#[derive(Clone, Copy)]
pub enum IrqSource {
    VBlank = 0b001,
    HBlank = 0b010,
    VCount = 0b100,
}

/// Interrupt request latch, consumed by an external interrupt controller
pub struct Irq {
    reg_if: u16,
}

impl Irq {
    pub fn new() -> Self {
        Self { reg_if: 0 }
    }

    pub fn reset(&mut self) {
        self.reg_if = 0;
    }

    pub fn raise(&mut self, source: IrqSource) {
        self.reg_if |= source as u16;
    }

    pub fn acknowledge(&mut self, source: IrqSource) {
        self.reg_if &= !(source as u16);
    }

    /// Raised interrupt bits not yet acknowledged
    #[inline]
    pub fn pending(&self) -> u16 {
        self.reg_if
    }

    #[inline]
    pub fn is_raised(&self, source: IrqSource) -> bool {
        self.reg_if & (source as u16) != 0
    }
}

impl Default for Irq {
    fn default() -> Self {
        Self::new()
    }
}
