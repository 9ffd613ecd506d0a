use enum_dispatch::enum_dispatch;

use crate::dma::Dma;
use crate::irq::Irq;
use crate::ppu::{Ppu, Screen};
use crate::scheduler::Scheduler;

/// Mutable pipeline surroundings handed to a firing event
pub(crate) struct EventContext<'a> {
    pub scheduler: &'a mut Scheduler<Event>,
    pub irq: &'a mut Irq,
    pub dma: &'a mut Dma,
    pub screen: &'a mut dyn Screen,
}

#[enum_dispatch]
pub(crate) trait EventCallback {
    fn fire(&self, ppu: &mut Ppu, ctx: EventContext<'_>, late: u64);
}

/// Display timing events, dispatched without indirection through a
/// fixed tagged union
#[enum_dispatch(EventCallback)]
#[derive(Clone, Copy)]
pub(crate) enum Event {
    ScanlineComplete,
    HblankComplete,
    VblankScanlineComplete,
    VblankHblankComplete,
    ComposerStart,
    Terminal,
}

/// End of the visible draw phase of a scanline
#[derive(Clone, Copy)]
pub(crate) struct ScanlineComplete;

impl EventCallback for ScanlineComplete {
    fn fire(&self, ppu: &mut Ppu, ctx: EventContext<'_>, late: u64) {
        ppu.on_scanline_complete(ctx, late);
    }
}

/// End of the horizontal blank of a visible scanline
#[derive(Clone, Copy)]
pub(crate) struct HblankComplete;

impl EventCallback for HblankComplete {
    fn fire(&self, ppu: &mut Ppu, ctx: EventContext<'_>, late: u64) {
        ppu.on_hblank_complete(ctx, late);
    }
}

/// End of the draw-length phase of a vertical blank scanline
#[derive(Clone, Copy)]
pub(crate) struct VblankScanlineComplete;

impl EventCallback for VblankScanlineComplete {
    fn fire(&self, ppu: &mut Ppu, ctx: EventContext<'_>, late: u64) {
        ppu.on_vblank_scanline_complete(ctx, late);
    }
}

/// End of the horizontal blank of a vertical blank scanline
#[derive(Clone, Copy)]
pub(crate) struct VblankHblankComplete;

impl EventCallback for VblankHblankComplete {
    fn fire(&self, ppu: &mut Ppu, ctx: EventContext<'_>, late: u64) {
        ppu.on_vblank_hblank_complete(ctx, late);
    }
}

/// Kick-off of the per-scanline compositor
#[derive(Clone, Copy)]
pub(crate) struct ComposerStart;

impl EventCallback for ComposerStart {
    fn fire(&self, ppu: &mut Ppu, ctx: EventContext<'_>, _late: u64) {
        ppu.on_composer_start(ctx);
    }
}

/// Sentinel guarding the bottom of the queue
#[derive(Clone, Copy)]
pub(crate) struct Terminal;

impl EventCallback for Terminal {
    fn fire(&self, _ppu: &mut Ppu, _ctx: EventContext<'_>, _late: u64) {
        panic!("scheduler: reached the end of the event queue");
    }
}
