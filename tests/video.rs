use sable_core::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_PERIOD, Screen, System};

const REG_DISPCNT: u32 = 0x00;
const REG_BG0CNT: u32 = 0x08;
const REG_BG0HOFS: u32 = 0x10;

const RED: u16 = 0x001f;
const GREEN: u16 = 0x03e0;
const RED_RGB: u32 = 0xfff80000;
const GREEN_RGB: u32 = 0xff00f800;

struct Capture {
    frames: usize,
    pixels: Vec<u32>,
}

impl Capture {
    fn new() -> Self {
        Self { frames: 0, pixels: Vec::new() }
    }
}

impl Screen for Capture {
    fn draw(&mut self, frame: &[u32]) {
        self.frames += 1;
        self.pixels = frame.to_vec();
    }
}

/// Mode 4 with BG2 enabled and the first scanline set to palette index 1
fn setup_bitmap(emu: &mut System<Capture>) {
    emu.write_io_16(REG_DISPCNT, 0x0404);
    for i in 0..(DISPLAY_WIDTH as u32 / 2) {
        emu.write_vram_16(i << 1, 0x0101);
    }
    emu.write_palette_16(2, RED);
}

#[test]
fn it_renders_a_bitmap_frame() {
    let mut emu = System::new(Capture::new());
    setup_bitmap(&mut emu);
    emu.advance(2 * FRAME_PERIOD);
    let screen = emu.screen();
    assert_eq!(screen.frames, 2);
    assert_eq!(screen.pixels.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT);
    assert!(screen.pixels[..DISPLAY_WIDTH].iter().all(|&c| c == RED_RGB));
    // the other lines sample zeroed image memory, palette index 0
    assert!(screen.pixels[DISPLAY_WIDTH..].iter().all(|&c| c == 0xff000000));
}

#[test]
fn it_applies_palette_writes_mid_scanline() {
    let mut emu = System::new(Capture::new());
    setup_bitmap(&mut emu);
    // 240 cycles into the draw phase of line 0 the renderer has produced
    // exactly 128 pixels (16 out of every 32 cycles)
    emu.advance(2690 + 240);
    emu.write_palette_16(2, GREEN);
    emu.advance(FRAME_PERIOD);
    let row = &emu.screen().pixels[..DISPLAY_WIDTH];
    assert!(row[..128].iter().all(|&c| c == RED_RGB));
    assert!(row[128..].iter().all(|&c| c == GREEN_RGB));
}

#[test]
fn it_applies_scroll_writes_at_fetch_granularity() {
    let mut emu = System::new(Capture::new());
    emu.write_io_16(REG_DISPCNT, 0x0100);
    // map block 8, tiles in block 0, 4bpp
    emu.write_io_16(REG_BG0CNT, 0x0800);
    // first map row alternates tile 0 and tile 1
    for i in 0..32u32 {
        emu.write_vram_16(0x4000 + (i << 1), (i & 1) as u16);
    }
    // tile 0 is color index 1, tile 1 color index 2
    for i in 0..16u32 {
        emu.write_vram_16(i << 1, 0x1111);
        emu.write_vram_16(0x20 + (i << 1), 0x2222);
    }
    emu.write_palette_16(2, RED);
    emu.write_palette_16(4, GREEN);

    let old = |x: usize| if (x / 8) % 2 == 0 { RED_RGB } else { GREEN_RGB };
    let new = |x: usize| if (x / 8) % 2 == 0 { GREEN_RGB } else { RED_RGB };

    // 240 cycles into the draw phase of line 0 the first 8 tile fetches are
    // done; scrolling one full tile right affects the remaining fetches only
    emu.advance(2690 + 240);
    emu.write_io_16(REG_BG0HOFS, 8);
    emu.advance(FRAME_PERIOD);

    let row = &emu.screen().pixels[..DISPLAY_WIDTH];
    for x in 0..64 {
        assert_eq!(row[x], old(x), "pixel {}", x);
    }
    for x in 64..DISPLAY_WIDTH {
        assert_eq!(row[x], new(x), "pixel {}", x);
    }
}

#[test]
fn it_composes_objects_over_the_backdrop() {
    let mut emu = System::new(Capture::new());
    // mode 0, objects only, 1d mapping
    emu.write_io_16(REG_DISPCNT, 0x1040);
    // 8x8 object at (10, 0) using tile 2, color index 3
    for i in 0..16u32 {
        emu.write_vram_16(0x10040 + (i << 1), 0x3333);
    }
    emu.write_palette_16(0x206, RED);
    emu.write_palette_16(0, GREEN);
    emu.write_oam_16(0, 0);
    emu.write_oam_16(2, 10);
    emu.write_oam_16(4, 2);
    emu.advance(2 * FRAME_PERIOD);
    let row = &emu.screen().pixels[..DISPLAY_WIDTH];
    assert!(row[..10].iter().all(|&c| c == GREEN_RGB));
    assert!(row[10..18].iter().all(|&c| c == RED_RGB));
    assert!(row[18..].iter().all(|&c| c == GREEN_RGB));
    // the object only covers its own lines
    let row8 = &emu.screen().pixels[8 * DISPLAY_WIDTH..9 * DISPLAY_WIDTH];
    assert!(row8.iter().all(|&c| c == GREEN_RGB));
}

#[test]
fn it_produces_identical_frames_for_identical_inputs() {
    let run = || {
        let mut emu = System::new(Capture::new());
        setup_bitmap(&mut emu);
        emu.advance(2690 + 240);
        emu.write_palette_16(2, GREEN);
        emu.advance(3 * FRAME_PERIOD);
        (emu.screen().frames, emu.screen().pixels.clone())
    };
    let (frames_a, pixels_a) = run();
    let (frames_b, pixels_b) = run();
    assert_eq!(frames_a, frames_b);
    assert_eq!(pixels_a, pixels_b);
}
