use crate::dma::Dma;
use crate::event::{Event, EventCallback, EventContext, Terminal};
use crate::irq::Irq;
use crate::ppu::{Ppu, Screen};
use crate::scheduler::Scheduler;

/// Owns the scheduler, the display pipeline and its collaborators, and
/// routes every externally visible operation through them
///
/// # Example
///
/// ```
/// use sable_core::{System, FRAME_PERIOD};
/// use sable_core::default::NoScreen;
///
/// let mut emu = System::new(NoScreen);
/// // mode 4 with BG2 enabled
/// emu.write_io_16(0x00, 0x0404);
/// // run exactly one frame of virtual time
/// emu.advance(FRAME_PERIOD);
/// ```
pub struct System<S: Screen> {
    scheduler: Scheduler<Event>,
    ppu: Ppu,
    irq: Irq,
    dma: Dma,
    screen: S,
}

impl<S: Screen> System<S> {
    pub fn new(screen: S) -> Self {
        let mut scheduler = Scheduler::new(Terminal.into());
        let mut ppu = Ppu::new();
        ppu.reset(&mut scheduler);
        Self {
            scheduler,
            ppu,
            irq: Irq::new(),
            dma: Dma::new(),
            screen,
        }
    }

    /// Return to the post-boot state, dropping all pending events
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.irq.reset();
        self.dma.reset();
        self.ppu.reset(&mut self.scheduler);
    }

    /// Advance virtual time by `cycles`, firing every due event in timestamp
    /// order, including events scheduled by callbacks inside the window
    pub fn advance(&mut self, cycles: u64) {
        let target = self.scheduler.now() + cycles;
        while let Some((event, late)) = self.scheduler.pop_due(target) {
            let ctx = EventContext {
                scheduler: &mut self.scheduler,
                irq: &mut self.irq,
                dma: &mut self.dma,
                screen: &mut self.screen,
            };
            event.fire(&mut self.ppu, ctx, late);
        }
        self.scheduler.finish_advance(target);
    }

    /// Current virtual time in cycles
    #[inline]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Cycles left until the next pending timing event
    #[inline]
    pub fn remaining_cycles(&self) -> u64 {
        self.scheduler.remaining_cycles()
    }

    #[inline]
    pub fn screen(&mut self) -> &mut S {
        &mut self.screen
    }

    #[inline]
    pub fn irq(&mut self) -> &mut Irq {
        &mut self.irq
    }

    #[inline]
    pub fn dma(&mut self) -> &mut Dma {
        &mut self.dma
    }

    /// The frame rendered so far, one 0xffrrggbb color per pixel
    pub fn frame(&self) -> &[u32] {
        self.ppu.frame()
    }

    //
    // Bus access; writes catch the pixel pipeline up to the current
    // virtual time before they land, reads never do
    //

    pub fn read_palette_8(&self, address: u32) -> u8 {
        self.ppu.read_palette_8(address)
    }

    pub fn read_palette_16(&self, address: u32) -> u16 {
        self.ppu.read_palette_16(address)
    }

    pub fn read_palette_32(&self, address: u32) -> u32 {
        self.ppu.read_palette_32(address)
    }

    pub fn write_palette_8(&mut self, address: u32, value: u8) {
        let now = self.scheduler.now();
        self.ppu.write_palette_8(address, value, now);
    }

    pub fn write_palette_16(&mut self, address: u32, value: u16) {
        let now = self.scheduler.now();
        self.ppu.write_palette_16(address, value, now);
    }

    pub fn write_palette_32(&mut self, address: u32, value: u32) {
        let now = self.scheduler.now();
        self.ppu.write_palette_32(address, value, now);
    }

    pub fn read_vram_8(&self, address: u32) -> u8 {
        self.ppu.read_vram_8(address)
    }

    pub fn read_vram_16(&self, address: u32) -> u16 {
        self.ppu.read_vram_16(address)
    }

    pub fn read_vram_32(&self, address: u32) -> u32 {
        self.ppu.read_vram_32(address)
    }

    pub fn write_vram_8(&mut self, address: u32, value: u8) {
        let now = self.scheduler.now();
        self.ppu.write_vram_8(address, value, now);
    }

    pub fn write_vram_16(&mut self, address: u32, value: u16) {
        let now = self.scheduler.now();
        self.ppu.write_vram_16(address, value, now);
    }

    pub fn write_vram_32(&mut self, address: u32, value: u32) {
        let now = self.scheduler.now();
        self.ppu.write_vram_32(address, value, now);
    }

    pub fn read_oam_8(&self, address: u32) -> u8 {
        self.ppu.read_oam_8(address)
    }

    pub fn read_oam_16(&self, address: u32) -> u16 {
        self.ppu.read_oam_16(address)
    }

    pub fn read_oam_32(&self, address: u32) -> u32 {
        self.ppu.read_oam_32(address)
    }

    pub fn write_oam_8(&mut self, address: u32, value: u8) {
        self.ppu.write_oam_8(address, value);
    }

    pub fn write_oam_16(&mut self, address: u32, value: u16) {
        self.ppu.write_oam_16(address, value);
    }

    pub fn write_oam_32(&mut self, address: u32, value: u32) {
        self.ppu.write_oam_32(address, value);
    }

    pub fn read_io_8(&self, address: u32) -> u8 {
        self.ppu.read_io_8(address)
    }

    pub fn read_io_16(&self, address: u32) -> u16 {
        self.ppu.read_io_16(address)
    }

    pub fn read_io_32(&self, address: u32) -> u32 {
        self.ppu.read_io_32(address)
    }

    pub fn write_io_8(&mut self, address: u32, value: u8) {
        let now = self.scheduler.now();
        self.ppu.write_io_8(address, value, now);
    }

    pub fn write_io_16(&mut self, address: u32, value: u16) {
        let now = self.scheduler.now();
        self.ppu.write_io_16(address, value, now);
    }

    pub fn write_io_32(&mut self, address: u32, value: u32) {
        let now = self.scheduler.now();
        self.ppu.write_io_32(address, value, now);
    }
}
