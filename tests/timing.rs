use sable_core::default::NoScreen;
use sable_core::{
    DmaOccasion, FRAME_PERIOD, HBLANK_PERIOD, HDRAW_PERIOD, Screen, System, TOTAL_SCANLINES,
};

const REG_DISPSTAT: u32 = 0x04;
const REG_VCOUNT: u32 = 0x06;

struct FrameCounter {
    frames: usize,
}

impl Screen for FrameCounter {
    fn draw(&mut self, _frame: &[u32]) {
        self.frames += 1;
    }
}

#[test]
fn it_produces_one_frame_per_timing_cycle() {
    let mut emu = System::new(FrameCounter { frames: 0 });
    for _ in 0..TOTAL_SCANLINES {
        emu.advance(HDRAW_PERIOD);
        emu.advance(HBLANK_PERIOD);
    }
    assert_eq!(emu.now(), FRAME_PERIOD);
    assert_eq!(emu.screen().frames, 1);
    // the line counter is back at its reset value
    assert_eq!(emu.read_io_16(REG_VCOUNT), 225);
    emu.advance(FRAME_PERIOD);
    assert_eq!(emu.screen().frames, 2);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 225);
}

#[test]
fn it_advances_in_odd_increments_without_drift() {
    let mut emu = System::new(FrameCounter { frames: 0 });
    let mut remaining = 3 * FRAME_PERIOD;
    let mut step = 1;
    while remaining > 0 {
        let cycles = step.min(remaining);
        emu.advance(cycles);
        remaining -= cycles;
        step = step % 1543 + 7;
    }
    assert_eq!(emu.now(), 3 * FRAME_PERIOD);
    assert_eq!(emu.screen().frames, 3);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 225);
}

#[test]
fn it_tracks_the_blank_flags_across_a_frame() {
    let mut emu = System::new(NoScreen);
    // both flags are raised right after reset
    assert_eq!(emu.read_io_16(REG_DISPSTAT) & 3, 3);
    // middle of the draw phase of line 10
    emu.advance(2690 + 10 * 1232 + 100);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 10);
    assert_eq!(emu.read_io_16(REG_DISPSTAT) & 3, 0);
    // horizontal blank of the same line
    emu.advance(1000);
    assert_eq!(emu.read_io_16(REG_DISPSTAT) & 3, 2);
    // deep in vertical blank
    emu.advance(190 * 1232);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 200);
    assert_eq!(emu.read_io_16(REG_DISPSTAT) & 1, 1);
}

#[test]
fn it_drops_the_vblank_flag_on_the_last_line() {
    let mut emu = System::new(NoScreen);
    // middle of line 227 of the first full frame
    emu.advance(2690 + 227 * 1232 + 100);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 227);
    assert_eq!(emu.read_io_16(REG_DISPSTAT) & 1, 0);
}

#[test]
fn it_raises_blank_and_line_match_interrupts() {
    let mut emu = System::new(NoScreen);
    // enable all three sources, line match at 100
    emu.write_io_16(REG_DISPSTAT, 100 << 8 | 0x38);
    emu.advance(FRAME_PERIOD);
    assert_eq!(emu.irq().pending(), 0b111);
}

#[test]
fn it_requests_transfers_at_blank_and_video_points() {
    let mut emu = System::new(NoScreen);
    // middle of the visible frame, video capture requests are flowing
    emu.advance(2690 + 10 * 1232);
    assert!(emu.dma().is_requested(DmaOccasion::HBlank));
    assert!(emu.dma().is_requested(DmaOccasion::Video));
    assert!(!emu.dma().is_requested(DmaOccasion::VBlank));
    emu.dma().take_pending();
    // just past the end of vertical blank: the video request was revoked on
    // line 162 and the first lines of the new frame do not request it yet
    emu.advance(269990);
    assert!(emu.dma().is_requested(DmaOccasion::HBlank));
    assert!(emu.dma().is_requested(DmaOccasion::VBlank));
    assert!(!emu.dma().is_requested(DmaOccasion::Video));
}

#[test]
fn it_returns_to_the_post_boot_state_on_reset() {
    let mut emu = System::new(NoScreen);
    emu.write_io_16(0x00, 0x0404);
    emu.write_io_16(REG_DISPSTAT, 0x38);
    emu.advance(FRAME_PERIOD + 12345);
    emu.reset();
    assert_eq!(emu.now(), 0);
    assert_eq!(emu.read_io_16(0x00), 0);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 225);
    assert_eq!(emu.read_io_16(REG_DISPSTAT) & 3, 3);
    assert_eq!(emu.irq().pending(), 0);
    // the timing chain restarts cleanly
    emu.advance(FRAME_PERIOD);
    assert_eq!(emu.read_io_16(REG_VCOUNT), 225);
}
