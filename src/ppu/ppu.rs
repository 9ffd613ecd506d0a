use log::trace;

use crate::dma::DmaOccasion;
use crate::error::{io_error_read, io_error_write};
use crate::event::{
    ComposerStart, Event, EventContext, HblankComplete, ScanlineComplete,
    VblankHblankComplete, VblankScanlineComplete,
};
use crate::irq::{Irq, IrqSource};
use crate::region::*;
use crate::scheduler::Scheduler;

use super::ram::{Oam, Palette, Vram};
use super::registers::*;
use super::COLOR_TRANSPARENT;

/// Receives each finished frame from the pipeline
///
/// # Example
///
/// ```
/// use sable_core::{DISPLAY_HEIGHT, DISPLAY_WIDTH, Screen};
///
/// struct Canvas {
///     pixels: [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT],
/// }
///
/// impl Screen for Canvas {
///     fn draw(&mut self, frame: &[u32]) {
///         self.pixels.copy_from_slice(frame);
///     }
/// }
/// ```
pub trait Screen {
    /// Called once per completed frame with one 0xffrrggbb color per pixel,
    /// DISPLAY_WIDTH * DISPLAY_HEIGHT long and row-major
    fn draw(&mut self, frame: &[u32]);
}

/// Per-background cursor of the incremental renderer
#[derive(Clone, Copy)]
pub(super) struct BackgroundState {
    pub engaged: bool,
    pub enabled: bool,
    /// Next output position in the line buffer
    pub draw_x: i32,
    /// Current fetch address in image memory
    pub address: u32,
    // text mode
    pub grid_x: u32,
    pub palette_bank: u16,
    pub flip_x: bool,
    pub full_palette: bool,
    // affine and bitmap modes
    pub ref_x: i32,
    pub ref_y: i32,
}

impl BackgroundState {
    fn new() -> Self {
        Self {
            engaged: false,
            enabled: false,
            draw_x: 0,
            address: 0,
            grid_x: 0,
            palette_bank: 0,
            flip_x: false,
            full_palette: false,
            ref_x: 0,
            ref_y: 0,
        }
    }
}

pub(super) struct Renderer {
    /// Cycles into the current draw phase
    pub time: u32,
    /// Virtual time the renderer is caught up to
    pub timestamp: u64,
    pub bg: [BackgroundState; 4],
}

pub(super) struct Composer {
    pub engaged: bool,
    /// Cycles into the current composition pass
    pub time: u32,
    /// Virtual time the composer is caught up to
    pub timestamp: u64,
    pub bg_min: usize,
    pub bg_max: usize,
}

/// Resolved object sample for one screen column
#[derive(Clone, Copy)]
pub(super) struct ObjectPixel {
    pub color: u16,
    pub priority: u8,
    pub alpha: bool,
    pub window: bool,
}

impl ObjectPixel {
    pub fn default() -> Self {
        Self {
            color: COLOR_TRANSPARENT,
            priority: 4,
            alpha: false,
            window: false,
        }
    }
}

/// The display pipeline: registers, memory banks, the incremental renderer
/// and compositor, and the timing event handlers driving them
pub(crate) struct Ppu {
    pub(super) mmio: Mmio,
    pub(super) palette: Palette,
    pub(super) oam: Oam,
    pub(super) vram: Vram,
    /// Two-stage per-scanline latch of the DISPCNT background enable bits
    pub(super) enable_bg: [[bool; 4]; 2],
    pub(super) renderer: Renderer,
    pub(super) composer: Composer,
    pub(super) buffer_bg: [[u16; DISPLAY_WIDTH]; 4],
    pub(super) buffer_obj: [ObjectPixel; DISPLAY_WIDTH],
    pub(super) buffer_win: [[bool; DISPLAY_WIDTH]; 2],
    pub(super) window_scanline_enable: [bool; 2],
    pub(super) output: [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            mmio: Mmio::new(),
            palette: Palette::new(),
            oam: Oam::new(),
            vram: Vram::new(),
            enable_bg: [[false; 4]; 2],
            renderer: Renderer {
                time: 0,
                timestamp: 0,
                bg: [BackgroundState::new(); 4],
            },
            composer: Composer {
                engaged: false,
                time: 0,
                timestamp: 0,
                bg_min: 0,
                bg_max: 3,
            },
            buffer_bg: [[COLOR_TRANSPARENT; DISPLAY_WIDTH]; 4],
            buffer_obj: [ObjectPixel::default(); DISPLAY_WIDTH],
            buffer_win: [[false; DISPLAY_WIDTH]; 2],
            window_scanline_enable: [false; 2],
            output: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    /// Reset to the post-boot hardware state and schedule the first timing
    /// event: both blank flags raised, three scanlines left of vertical blank
    pub fn reset(&mut self, scheduler: &mut Scheduler<Event>) {
        self.mmio.reset();
        self.palette.reset();
        self.oam.reset();
        self.vram.reset();
        self.enable_bg = [[false; 4]; 2];
        self.renderer.time = 0;
        self.renderer.timestamp = 0;
        self.renderer.bg = [BackgroundState::new(); 4];
        self.composer.engaged = false;
        self.composer.time = 0;
        self.composer.timestamp = 0;
        self.buffer_bg = [[COLOR_TRANSPARENT; DISPLAY_WIDTH]; 4];
        self.buffer_obj = [ObjectPixel::default(); DISPLAY_WIDTH];
        self.buffer_win = [[false; DISPLAY_WIDTH]; 2];
        self.window_scanline_enable = [false; 2];
        self.output = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];

        self.mmio.vcount = 225;
        self.mmio.dispstat.vblank_flag = true;
        self.mmio.dispstat.hblank_flag = true;
        scheduler.schedule(HBLANK_PERIOD, VblankHblankComplete.into());
    }

    /// Finished frame, one 0xffrrggbb color per pixel
    pub fn frame(&self) -> &[u32] {
        &self.output
    }

    /// Catch the pixel pipeline up to the current virtual time; bus writes
    /// go through here first so pixels already produced keep the old
    /// register and memory contents
    pub fn sync(&mut self, now: u64) {
        let dispstat = &self.mmio.dispstat;
        if !dispstat.hblank_flag && !dispstat.vblank_flag {
            let cycles = (now - self.renderer.timestamp) as u32;
            self.render(cycles);
        }
        self.renderer.timestamp = now;
        if self.composer.engaged {
            let cycles = (now - self.composer.timestamp) as u32;
            self.compose(cycles);
        }
        self.composer.timestamp = now;
    }

    //
    // Memory bank access
    //

    pub fn read_palette_8(&self, address: u32) -> u8 {
        self.palette.read_8(address)
    }

    pub fn read_palette_16(&self, address: u32) -> u16 {
        self.palette.read_16(address)
    }

    pub fn read_palette_32(&self, address: u32) -> u32 {
        self.palette.read_32(address)
    }

    pub fn write_palette_8(&mut self, address: u32, value: u8, now: u64) {
        self.sync(now);
        self.palette.write_8(address, value);
    }

    pub fn write_palette_16(&mut self, address: u32, value: u16, now: u64) {
        self.sync(now);
        self.palette.write_16(address, value);
    }

    pub fn write_palette_32(&mut self, address: u32, value: u32, now: u64) {
        self.sync(now);
        self.palette.write_32(address, value);
    }

    pub fn read_vram_8(&self, address: u32) -> u8 {
        self.vram.read_8(address)
    }

    pub fn read_vram_16(&self, address: u32) -> u16 {
        self.vram.read_16(address)
    }

    pub fn read_vram_32(&self, address: u32) -> u32 {
        self.vram.read_32(address)
    }

    pub fn write_vram_8(&mut self, address: u32, value: u8, now: u64) {
        self.sync(now);
        let bitmap_mode = self.mmio.dispcnt.is_bitmap_mode();
        self.vram.write_8(address, value, bitmap_mode);
    }

    pub fn write_vram_16(&mut self, address: u32, value: u16, now: u64) {
        self.sync(now);
        self.vram.write_16(address, value);
    }

    pub fn write_vram_32(&mut self, address: u32, value: u32, now: u64) {
        self.sync(now);
        self.vram.write_32(address, value);
    }

    pub fn read_oam_8(&self, address: u32) -> u8 {
        self.oam.read_8(address)
    }

    pub fn read_oam_16(&self, address: u32) -> u16 {
        self.oam.read_16(address)
    }

    pub fn read_oam_32(&self, address: u32) -> u32 {
        self.oam.read_32(address)
    }

    pub fn write_oam_8(&mut self, address: u32, value: u8) {
        self.oam.write_8(address, value);
    }

    pub fn write_oam_16(&mut self, address: u32, value: u16) {
        self.oam.write_16(address, value);
    }

    pub fn write_oam_32(&mut self, address: u32, value: u32) {
        self.oam.write_32(address, value);
    }

    //
    // I/O register access
    //

    pub fn read_io_16(&self, address: u32) -> u16 {
        match address {
            REG_DISPCNT_ADDR => self.mmio.dispcnt.read(),
            REG_DISPSTAT_ADDR => self.mmio.dispstat.read(),
            REG_VCOUNT_ADDR => u16::from(self.mmio.vcount),
            REG_BG0CNT_ADDR => self.mmio.bgcnt[0].read(),
            REG_BG1CNT_ADDR => self.mmio.bgcnt[1].read(),
            REG_BG2CNT_ADDR => self.mmio.bgcnt[2].read(),
            REG_BG3CNT_ADDR => self.mmio.bgcnt[3].read(),
            REG_WININ_ADDR => self.mmio.winin.read(),
            REG_WINOUT_ADDR => self.mmio.winout.read(),
            REG_BLDCNT_ADDR => self.mmio.bldcnt.read(),
            REG_BLDALPHA_ADDR => make_u16!(self.mmio.evb, self.mmio.eva),
            // write-only registers read back zero
            REG_BG0HOFS_ADDR..=REG_BG3Y_H_ADDR
            | REG_WIN0H_ADDR..=REG_WIN1V_ADDR
            | REG_MOSAIC_ADDR
            | REG_BLDY_ADDR => 0,
            _ => {
                io_error_read(address);
                0
            }
        }
    }

    pub fn read_io_8(&self, address: u32) -> u8 {
        let half = self.read_io_16(address & !1);
        (half >> ((address & 1) * 8)) as u8
    }

    pub fn read_io_32(&self, address: u32) -> u32 {
        let addr = address & !3;
        make_u32!(self.read_io_16(addr | 2), self.read_io_16(addr))
    }

    pub fn write_io_16(&mut self, address: u32, value: u16, now: u64) {
        self.sync(now);
        match address {
            REG_DISPCNT_ADDR => self.mmio.dispcnt.write(value),
            REG_DISPSTAT_ADDR => self.mmio.dispstat.write(value),
            REG_VCOUNT_ADDR => (),
            REG_BG0CNT_ADDR => self.mmio.bgcnt[0].write(value),
            REG_BG1CNT_ADDR => self.mmio.bgcnt[1].write(value),
            REG_BG2CNT_ADDR => self.mmio.bgcnt[2].write(value),
            REG_BG3CNT_ADDR => self.mmio.bgcnt[3].write(value),
            REG_BG0HOFS_ADDR => self.mmio.bghofs[0] = value & 0x1ff,
            REG_BG0VOFS_ADDR => self.mmio.bgvofs[0] = value & 0x1ff,
            REG_BG1HOFS_ADDR => self.mmio.bghofs[1] = value & 0x1ff,
            REG_BG1VOFS_ADDR => self.mmio.bgvofs[1] = value & 0x1ff,
            REG_BG2HOFS_ADDR => self.mmio.bghofs[2] = value & 0x1ff,
            REG_BG2VOFS_ADDR => self.mmio.bgvofs[2] = value & 0x1ff,
            REG_BG3HOFS_ADDR => self.mmio.bghofs[3] = value & 0x1ff,
            REG_BG3VOFS_ADDR => self.mmio.bgvofs[3] = value & 0x1ff,
            REG_BG2PA_ADDR => self.mmio.bgpa[0] = value as i16,
            REG_BG2PB_ADDR => self.mmio.bgpb[0] = value as i16,
            REG_BG2PC_ADDR => self.mmio.bgpc[0] = value as i16,
            REG_BG2PD_ADDR => self.mmio.bgpd[0] = value as i16,
            REG_BG2X_L_ADDR => self.mmio.bgx[0].write_low(value),
            REG_BG2X_H_ADDR => self.mmio.bgx[0].write_high(value),
            REG_BG2Y_L_ADDR => self.mmio.bgy[0].write_low(value),
            REG_BG2Y_H_ADDR => self.mmio.bgy[0].write_high(value),
            REG_BG3PA_ADDR => self.mmio.bgpa[1] = value as i16,
            REG_BG3PB_ADDR => self.mmio.bgpb[1] = value as i16,
            REG_BG3PC_ADDR => self.mmio.bgpc[1] = value as i16,
            REG_BG3PD_ADDR => self.mmio.bgpd[1] = value as i16,
            REG_BG3X_L_ADDR => self.mmio.bgx[1].write_low(value),
            REG_BG3X_H_ADDR => self.mmio.bgx[1].write_high(value),
            REG_BG3Y_L_ADDR => self.mmio.bgy[1].write_low(value),
            REG_BG3Y_H_ADDR => self.mmio.bgy[1].write_high(value),
            REG_WIN0H_ADDR => self.mmio.winh[0].write(value),
            REG_WIN1H_ADDR => self.mmio.winh[1].write(value),
            REG_WIN0V_ADDR => self.mmio.winv[0].write(value),
            REG_WIN1V_ADDR => self.mmio.winv[1].write(value),
            REG_WININ_ADDR => self.mmio.winin.write(value),
            REG_WINOUT_ADDR => self.mmio.winout.write(value),
            REG_MOSAIC_ADDR => self.mmio.mosaic.write(value),
            REG_BLDCNT_ADDR => self.mmio.bldcnt.write(value),
            REG_BLDALPHA_ADDR => {
                self.mmio.eva = (value & 0x1f) as u8;
                self.mmio.evb = ((value >> 8) & 0x1f) as u8;
            }
            REG_BLDY_ADDR => self.mmio.evy = (value & 0x1f) as u8,
            _ => io_error_write(address),
        }
    }

    pub fn write_io_8(&mut self, address: u32, value: u8, now: u64) {
        let addr = address & !1;
        let shift = (address & 1) * 8;
        let half = (self.read_io_16(addr) & !(0xff << shift)) | u16::from(value) << shift;
        self.write_io_16(addr, half, now);
    }

    pub fn write_io_32(&mut self, address: u32, value: u32, now: u64) {
        let addr = address & !3;
        self.write_io_16(addr, value as u16, now);
        self.write_io_16(addr | 2, (value >> 16) as u16, now);
    }

    //
    // Timing event handlers
    //

    /// End of the visible draw phase: the line is fully rendered and
    /// composed, horizontal blank begins
    pub fn on_scanline_complete(&mut self, ctx: EventContext<'_>, late: u64) {
        ctx.scheduler
            .schedule(HBLANK_PERIOD - late, HblankComplete.into());
        self.sync(ctx.scheduler.now());
        trace!("hblank: line {}", self.mmio.vcount);

        self.mmio.dispstat.hblank_flag = true;
        if self.mmio.dispstat.hblank_irq_enable {
            ctx.irq.raise(IrqSource::HBlank);
        }
        ctx.dma.request(DmaOccasion::HBlank);
        if self.mmio.vcount >= 2 {
            ctx.dma.request(DmaOccasion::Video);
        }

        let bg_size_y = self.mmio.mosaic.bg.size_y;
        let bg_counter = &mut self.mmio.mosaic.bg.counter_y;
        *bg_counter += 1;
        if *bg_counter == bg_size_y {
            *bg_counter = 0;
        }
        let obj_size_y = self.mmio.mosaic.obj.size_y;
        let obj_counter = &mut self.mmio.mosaic.obj.counter_y;
        *obj_counter += 1;
        if *obj_counter == obj_size_y {
            *obj_counter = 0;
        }

        // Mode 0 has no affine backgrounds, the internal reference registers
        // never advance there
        if self.mmio.dispcnt.mode != 0 {
            for i in 0..2 {
                // The reference registers only advance while the latched
                // enable bit of their background is set
                if !self.enable_bg[0][2 + i] {
                    continue;
                }
                let pb = i32::from(self.mmio.bgpb[i]);
                let pd = i32::from(self.mmio.bgpd[i]);
                if self.mmio.bgcnt[2 + i].mosaic_enable {
                    if self.mmio.mosaic.bg.counter_y == 0 {
                        let rows = i32::from(self.mmio.mosaic.bg.size_y);
                        self.mmio.bgx[i].current =
                            self.mmio.bgx[i].current.wrapping_add(rows.wrapping_mul(pb));
                        self.mmio.bgy[i].current =
                            self.mmio.bgy[i].current.wrapping_add(rows.wrapping_mul(pd));
                    }
                } else {
                    self.mmio.bgx[i].current = self.mmio.bgx[i].current.wrapping_add(pb);
                    self.mmio.bgy[i].current = self.mmio.bgy[i].current.wrapping_add(pd);
                }
            }
        }

        self.latch_enabled_bgs();
    }

    /// End of horizontal blank: step to the next line, entering vertical
    /// blank after the last visible one
    pub fn on_hblank_complete(&mut self, ctx: EventContext<'_>, late: u64) {
        self.mmio.dispstat.hblank_flag = false;
        self.mmio.vcount += 1;
        self.check_vcount_irq(ctx.irq);

        self.render_windows();

        if self.mmio.vcount == VBLANK_START_LINE {
            ctx.scheduler
                .schedule(HDRAW_PERIOD - late, VblankScanlineComplete.into());
            ctx.dma.request(DmaOccasion::VBlank);
            trace!("vblank");
            self.mmio.dispstat.vblank_flag = true;
            if self.mmio.dispstat.vblank_irq_enable {
                ctx.irq.raise(IrqSource::VBlank);
            }
            // Prepare the next frame: vertical mosaic restarts and the
            // affine accumulators reload
            self.mmio.mosaic.bg.counter_y = 0;
            self.mmio.mosaic.obj.counter_y = 0;
            for i in 0..2 {
                self.mmio.bgx[i].current = self.mmio.bgx[i].initial;
                self.mmio.bgy[i].current = self.mmio.bgy[i].initial;
            }
        } else {
            ctx.scheduler
                .schedule(HDRAW_PERIOD - late, ScanlineComplete.into());
            self.begin_scanline(ctx.scheduler, late);
        }
    }

    /// End of the draw-length phase of a vertical blank line
    pub fn on_vblank_scanline_complete(&mut self, ctx: EventContext<'_>, late: u64) {
        ctx.scheduler
            .schedule(HBLANK_PERIOD - late, VblankHblankComplete.into());
        self.mmio.dispstat.hblank_flag = true;
        if self.mmio.dispstat.hblank_irq_enable {
            ctx.irq.raise(IrqSource::HBlank);
        }
        if self.mmio.vcount < 162 {
            ctx.dma.request(DmaOccasion::Video);
        } else if self.mmio.vcount == 162 {
            ctx.dma.stop_video_transfer();
        }
        if self.mmio.vcount >= 225 {
            self.latch_enabled_bgs();
        }
    }

    /// End of the horizontal blank of a vertical blank line; wraps the line
    /// counter and hands the finished frame over at the end of the frame
    pub fn on_vblank_hblank_complete(&mut self, ctx: EventContext<'_>, late: u64) {
        self.mmio.dispstat.hblank_flag = false;

        if self.mmio.vcount == 227 {
            ctx.scheduler
                .schedule(HDRAW_PERIOD - late, ScanlineComplete.into());
            self.mmio.vcount = 0;
            ctx.screen.draw(&self.output);
            trace!("frame complete");
        } else {
            ctx.scheduler
                .schedule(HDRAW_PERIOD - late, VblankScanlineComplete.into());
            self.mmio.vcount += 1;
            // The blank flag already drops on the last line of vertical blank
            if self.mmio.vcount == 227 {
                self.mmio.dispstat.vblank_flag = false;
            }
        }

        self.render_windows();

        if self.mmio.vcount == 0 {
            self.begin_scanline(ctx.scheduler, late);
        }

        self.check_vcount_irq(ctx.irq);
    }

    pub fn on_composer_start(&mut self, ctx: EventContext<'_>) {
        self.begin_composer(ctx.scheduler.now());
    }

    /// Draw phase setup: latch the per-background cursors, clear the line
    /// buffers, resolve this line's objects and schedule the composer
    fn begin_scanline(&mut self, scheduler: &mut Scheduler<Event>, late: u64) {
        self.renderer.time = 0;
        self.renderer.timestamp = scheduler.now();

        for id in 0..4 {
            let engaged = self.enable_bg[0][id];
            self.renderer.bg[id].engaged = engaged;
            if !engaged {
                continue;
            }
            let bg = &mut self.renderer.bg[id];
            bg.grid_x = 0;
            bg.draw_x = -i32::from(self.mmio.bghofs[id] & 7);
            if id >= 2 {
                if self.mmio.dispcnt.mode != 0 {
                    bg.draw_x = 0;
                }
                bg.ref_x = self.mmio.bgx[id & 1].current;
                bg.ref_y = self.mmio.bgy[id & 1].current;
            }
            self.buffer_bg[id] = [COLOR_TRANSPARENT; DISPLAY_WIDTH];
        }

        if self.mmio.dispcnt.enable[ENABLE_OBJ] {
            self.render_objects(self.mmio.vcount);
        }

        scheduler.schedule(COMPOSER_DELAY - late, ComposerStart.into());
    }

    fn latch_enabled_bgs(&mut self) {
        for i in 0..4 {
            self.enable_bg[0][i] = self.enable_bg[1][i];
            self.enable_bg[1][i] = self.mmio.dispcnt.enable[i];
        }
    }

    fn check_vcount_irq(&mut self, irq: &mut Irq) {
        let dispstat = &mut self.mmio.dispstat;
        let flag_new = dispstat.vcount_setting == self.mmio.vcount;
        if dispstat.vcount_irq_enable && !dispstat.vcount_flag && flag_new {
            irq.raise(IrqSource::VCount);
        }
        dispstat.vcount_flag = flag_new;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_latches_background_enables_in_two_stages() {
        let mut ppu = Ppu::new();
        ppu.mmio.dispcnt.write(1 << 8);
        ppu.latch_enabled_bgs();
        assert!(!ppu.enable_bg[0][0]);
        ppu.latch_enabled_bgs();
        assert!(ppu.enable_bg[0][0]);
        ppu.mmio.dispcnt.write(0);
        ppu.latch_enabled_bgs();
        assert!(ppu.enable_bg[0][0]);
        ppu.latch_enabled_bgs();
        assert!(!ppu.enable_bg[0][0]);
    }

    #[test]
    fn it_raises_the_vcount_irq_on_the_rising_edge_only() {
        let mut ppu = Ppu::new();
        let mut irq = Irq::new();
        ppu.mmio.dispstat.vcount_irq_enable = true;
        ppu.mmio.dispstat.vcount_setting = 100;
        ppu.mmio.vcount = 100;
        ppu.check_vcount_irq(&mut irq);
        assert!(irq.is_raised(IrqSource::VCount));
        irq.acknowledge(IrqSource::VCount);
        // still matching, no second edge
        ppu.check_vcount_irq(&mut irq);
        assert!(!irq.is_raised(IrqSource::VCount));
        ppu.mmio.vcount = 101;
        ppu.check_vcount_irq(&mut irq);
        assert!(!ppu.mmio.dispstat.vcount_flag);
    }

    #[test]
    fn it_resets_to_the_post_boot_state() {
        let mut ppu = Ppu::new();
        let mut scheduler = Scheduler::new(Event::from(crate::event::Terminal));
        ppu.reset(&mut scheduler);
        assert_eq!(ppu.mmio.vcount, 225);
        assert!(ppu.mmio.dispstat.vblank_flag);
        assert!(ppu.mmio.dispstat.hblank_flag);
        assert_eq!(scheduler.next_timestamp(), HBLANK_PERIOD);
    }

    #[test]
    fn it_reads_back_write_only_registers_as_zero() {
        let mut ppu = Ppu::new();
        ppu.write_io_16(REG_BG0HOFS_ADDR, 0x1ff, 0);
        ppu.write_io_16(REG_BLDY_ADDR, 0x1f, 0);
        assert_eq!(ppu.read_io_16(REG_BG0HOFS_ADDR), 0);
        assert_eq!(ppu.read_io_16(REG_BLDY_ADDR), 0);
        assert_eq!(ppu.mmio.bghofs[0], 0x1ff);
        assert_eq!(ppu.mmio.evy, 0x1f);
    }

    #[test]
    fn it_merges_byte_writes_into_io_registers() {
        let mut ppu = Ppu::new();
        ppu.write_io_8(REG_DISPCNT_ADDR, 0x44, 0);
        ppu.write_io_8(REG_DISPCNT_ADDR + 1, 0x1f, 0);
        assert_eq!(ppu.read_io_16(REG_DISPCNT_ADDR), 0x1f44);
        assert_eq!(ppu.read_io_8(REG_DISPCNT_ADDR + 1), 0x1f);
    }
}
