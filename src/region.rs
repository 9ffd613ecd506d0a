//
// Frame configuration
//
pub const DISPLAY_WIDTH: usize = 240;
pub const DISPLAY_HEIGHT: usize = 160;

//
// Display timing (cycles)
//
pub const HDRAW_PERIOD: u64 = 1006;
pub const HBLANK_PERIOD: u64 = 226;
pub const SCANLINE_PERIOD: u64 = HDRAW_PERIOD + HBLANK_PERIOD;
pub const TOTAL_SCANLINES: u64 = 228;
pub const FRAME_PERIOD: u64 = SCANLINE_PERIOD * TOTAL_SCANLINES;
/// First scanline of vertical blank
pub const VBLANK_START_LINE: u8 = 160;
/// Offset into the draw phase at which composition starts; 240 pixels at
/// 4 cycles each then end exactly on the horizontal blank
pub const COMPOSER_DELAY: u64 = 46;
pub const COMPOSER_PERIOD: u32 = 960;

//
// Memory bank sizes
//
pub const PALETTE_SIZE: usize = 0x400;
pub const OAM_SIZE: usize = 0x400;
pub const VRAM_SIZE: usize = 0x18000;

//
// I/O register offsets
//
pub const REG_DISPCNT_ADDR: u32 = 0x00;
pub const REG_DISPSTAT_ADDR: u32 = 0x04;
pub const REG_VCOUNT_ADDR: u32 = 0x06;
pub const REG_BG0CNT_ADDR: u32 = 0x08;
pub const REG_BG1CNT_ADDR: u32 = 0x0a;
pub const REG_BG2CNT_ADDR: u32 = 0x0c;
pub const REG_BG3CNT_ADDR: u32 = 0x0e;
pub const REG_BG0HOFS_ADDR: u32 = 0x10;
pub const REG_BG0VOFS_ADDR: u32 = 0x12;
pub const REG_BG1HOFS_ADDR: u32 = 0x14;
pub const REG_BG1VOFS_ADDR: u32 = 0x16;
pub const REG_BG2HOFS_ADDR: u32 = 0x18;
pub const REG_BG2VOFS_ADDR: u32 = 0x1a;
pub const REG_BG3HOFS_ADDR: u32 = 0x1c;
pub const REG_BG3VOFS_ADDR: u32 = 0x1e;
pub const REG_BG2PA_ADDR: u32 = 0x20;
pub const REG_BG2PB_ADDR: u32 = 0x22;
pub const REG_BG2PC_ADDR: u32 = 0x24;
pub const REG_BG2PD_ADDR: u32 = 0x26;
pub const REG_BG2X_L_ADDR: u32 = 0x28;
pub const REG_BG2X_H_ADDR: u32 = 0x2a;
pub const REG_BG2Y_L_ADDR: u32 = 0x2c;
pub const REG_BG2Y_H_ADDR: u32 = 0x2e;
pub const REG_BG3PA_ADDR: u32 = 0x30;
pub const REG_BG3PB_ADDR: u32 = 0x32;
pub const REG_BG3PC_ADDR: u32 = 0x34;
pub const REG_BG3PD_ADDR: u32 = 0x36;
pub const REG_BG3X_L_ADDR: u32 = 0x38;
pub const REG_BG3X_H_ADDR: u32 = 0x3a;
pub const REG_BG3Y_L_ADDR: u32 = 0x3c;
pub const REG_BG3Y_H_ADDR: u32 = 0x3e;
pub const REG_WIN0H_ADDR: u32 = 0x40;
pub const REG_WIN1H_ADDR: u32 = 0x42;
pub const REG_WIN0V_ADDR: u32 = 0x44;
pub const REG_WIN1V_ADDR: u32 = 0x46;
pub const REG_WININ_ADDR: u32 = 0x48;
pub const REG_WINOUT_ADDR: u32 = 0x4a;
pub const REG_MOSAIC_ADDR: u32 = 0x4c;
pub const REG_BLDCNT_ADDR: u32 = 0x50;
pub const REG_BLDALPHA_ADDR: u32 = 0x52;
pub const REG_BLDY_ADDR: u32 = 0x54;
