//
// Layer indices shared by the compositor and the window/blend masks
//
pub(super) const LAYER_OBJ: usize = 4;
pub(super) const LAYER_SFX: usize = 5;
pub(super) const LAYER_BACKDROP: usize = 5;

//
// DISPCNT enable bit indices
//
pub(super) const ENABLE_OBJ: usize = 4;
pub(super) const ENABLE_WIN0: usize = 5;
pub(super) const ENABLE_WIN1: usize = 6;
pub(super) const ENABLE_OBJWIN: usize = 7;

/// Color special effect selected by BLDCNT
#[derive(Clone, Copy, PartialEq)]
pub(super) enum BlendEffect {
    None,
    Alpha,
    Brighten,
    Darken,
}

/// DISPCNT
pub(super) struct DisplayControl {
    pub mode: u8,
    pub frame: u8,
    pub hblank_oam_access: bool,
    pub oam_mapping_1d: bool,
    pub forced_blank: bool,
    /// BG0-3, OBJ, WIN0, WIN1, OBJWIN
    pub enable: [bool; 8],
}

impl DisplayControl {
    pub fn new() -> Self {
        Self {
            mode: 0,
            frame: 0,
            hblank_oam_access: false,
            oam_mapping_1d: false,
            forced_blank: false,
            enable: [false; 8],
        }
    }

    pub fn read(&self) -> u16 {
        let mut value = u16::from(self.mode)
            | u16::from(self.frame) << 4
            | u16::from(self.hblank_oam_access) << 5
            | u16::from(self.oam_mapping_1d) << 6
            | u16::from(self.forced_blank) << 7;
        for i in 0..8 {
            value |= u16::from(self.enable[i]) << (8 + i);
        }
        value
    }

    pub fn write(&mut self, value: u16) {
        self.mode = (value & 7) as u8;
        self.frame = ((value >> 4) & 1) as u8;
        self.hblank_oam_access = bit!(value, 5);
        self.oam_mapping_1d = bit!(value, 6);
        self.forced_blank = bit!(value, 7);
        for i in 0..8 {
            self.enable[i] = bit!(value, 8 + i);
        }
    }

    #[inline]
    pub fn is_bitmap_mode(&self) -> bool {
        self.mode >= 3
    }
}

/// DISPSTAT; the three status flags are read-only from the bus
pub(super) struct DisplayStatus {
    pub vblank_flag: bool,
    pub hblank_flag: bool,
    pub vcount_flag: bool,
    pub vblank_irq_enable: bool,
    pub hblank_irq_enable: bool,
    pub vcount_irq_enable: bool,
    pub vcount_setting: u8,
}

impl DisplayStatus {
    pub fn new() -> Self {
        Self {
            vblank_flag: false,
            hblank_flag: false,
            vcount_flag: false,
            vblank_irq_enable: false,
            hblank_irq_enable: false,
            vcount_irq_enable: false,
            vcount_setting: 0,
        }
    }

    pub fn read(&self) -> u16 {
        u16::from(self.vblank_flag)
            | u16::from(self.hblank_flag) << 1
            | u16::from(self.vcount_flag) << 2
            | u16::from(self.vblank_irq_enable) << 3
            | u16::from(self.hblank_irq_enable) << 4
            | u16::from(self.vcount_irq_enable) << 5
            | u16::from(self.vcount_setting) << 8
    }

    pub fn write(&mut self, value: u16) {
        self.vblank_irq_enable = bit!(value, 3);
        self.hblank_irq_enable = bit!(value, 4);
        self.vcount_irq_enable = bit!(value, 5);
        self.vcount_setting = (value >> 8) as u8;
    }
}

/// BGxCNT
#[derive(Clone, Copy)]
pub(super) struct BackgroundControl {
    pub priority: u8,
    /// In 16 KiB character blocks
    pub tile_block: u32,
    pub mosaic_enable: bool,
    pub full_palette: bool,
    /// In 2 KiB map blocks
    pub map_block: u32,
    pub wraparound: bool,
    pub size: u8,
}

impl BackgroundControl {
    pub fn new() -> Self {
        Self {
            priority: 0,
            tile_block: 0,
            mosaic_enable: false,
            full_palette: false,
            map_block: 0,
            wraparound: false,
            size: 0,
        }
    }

    pub fn read(&self) -> u16 {
        u16::from(self.priority)
            | (self.tile_block as u16) << 2
            | u16::from(self.mosaic_enable) << 6
            | u16::from(self.full_palette) << 7
            | (self.map_block as u16) << 8
            | u16::from(self.wraparound) << 13
            | u16::from(self.size) << 14
    }

    pub fn write(&mut self, value: u16) {
        self.priority = (value & 3) as u8;
        self.tile_block = u32::from((value >> 2) & 3);
        self.mosaic_enable = bit!(value, 6);
        self.full_palette = bit!(value, 7);
        self.map_block = u32::from((value >> 8) & 0x1f);
        self.wraparound = bit!(value, 13);
        self.size = ((value >> 14) & 3) as u8;
    }
}

/// 28-bit signed fixed-point affine reference register.
///
/// Writes latch both the programmed value and the internal accumulator that
/// the pipeline steps while rendering.
#[derive(Clone, Copy)]
pub(super) struct ReferencePoint {
    pub initial: i32,
    pub current: i32,
}

impl ReferencePoint {
    pub fn new() -> Self {
        Self { initial: 0, current: 0 }
    }

    pub fn write_low(&mut self, value: u16) {
        let raw = ((self.initial as u32) & 0x0fff_0000) | u32::from(value);
        self.set(raw);
    }

    pub fn write_high(&mut self, value: u16) {
        let raw = ((self.initial as u32) & 0xffff) | u32::from(value & 0x0fff) << 16;
        self.set(raw);
    }

    fn set(&mut self, raw: u32) {
        // sign-extend from 28 bits
        self.initial = ((raw << 4) as i32) >> 4;
        self.current = self.initial;
    }
}

/// One half of WIN0H/WIN1H/WIN0V/WIN1V
#[derive(Clone, Copy)]
pub(super) struct WindowRange {
    pub min: u8,
    pub max: u8,
}

impl WindowRange {
    pub fn new() -> Self {
        Self { min: 0, max: 0 }
    }

    pub fn write(&mut self, value: u16) {
        self.max = value as u8;
        self.min = (value >> 8) as u8;
    }

    /// Whether `x` falls inside the range, wrapping when min exceeds max
    #[inline]
    pub fn contains(&self, x: u8) -> bool {
        if self.min <= self.max {
            x >= self.min && x < self.max
        } else {
            x >= self.min || x < self.max
        }
    }
}

/// WININ or WINOUT: two sets of per-layer enables (BG0-3, OBJ, SFX)
pub(super) struct WindowLayerSelect {
    pub enable: [[bool; 6]; 2],
}

impl WindowLayerSelect {
    pub fn new() -> Self {
        Self { enable: [[false; 6]; 2] }
    }

    pub fn read(&self) -> u16 {
        let mut value = 0;
        for half in 0..2 {
            for layer in 0..6 {
                value |= u16::from(self.enable[half][layer]) << (half * 8 + layer);
            }
        }
        value
    }

    pub fn write(&mut self, value: u16) {
        for half in 0..2 {
            for layer in 0..6 {
                self.enable[half][layer] = bit!(value, half * 8 + layer);
            }
        }
    }
}

#[derive(Clone, Copy)]
pub(super) struct MosaicAxis {
    pub size_x: u8,
    pub size_y: u8,
    pub counter_y: u8,
}

impl MosaicAxis {
    pub fn new() -> Self {
        Self { size_x: 1, size_y: 1, counter_y: 0 }
    }
}

/// MOSAIC; sizes are stored one-based
pub(super) struct Mosaic {
    pub bg: MosaicAxis,
    pub obj: MosaicAxis,
}

impl Mosaic {
    pub fn new() -> Self {
        Self { bg: MosaicAxis::new(), obj: MosaicAxis::new() }
    }

    pub fn write(&mut self, value: u16) {
        self.bg.size_x = ((value & 15) + 1) as u8;
        self.bg.size_y = (((value >> 4) & 15) + 1) as u8;
        self.obj.size_x = (((value >> 8) & 15) + 1) as u8;
        self.obj.size_y = (((value >> 12) & 15) + 1) as u8;
    }
}

/// BLDCNT: first/second target enables per layer plus the selected effect
pub(super) struct BlendControl {
    pub targets: [[bool; 6]; 2],
    pub effect: BlendEffect,
}

impl BlendControl {
    pub fn new() -> Self {
        Self {
            targets: [[false; 6]; 2],
            effect: BlendEffect::None,
        }
    }

    pub fn read(&self) -> u16 {
        let mut value = match self.effect {
            BlendEffect::None => 0,
            BlendEffect::Alpha => 1,
            BlendEffect::Brighten => 2,
            BlendEffect::Darken => 3,
        } << 6;
        for layer in 0..6 {
            value |= u16::from(self.targets[0][layer]) << layer;
            value |= u16::from(self.targets[1][layer]) << (8 + layer);
        }
        value
    }

    pub fn write(&mut self, value: u16) {
        self.effect = match (value >> 6) & 3 {
            0 => BlendEffect::None,
            1 => BlendEffect::Alpha,
            2 => BlendEffect::Brighten,
            _ => BlendEffect::Darken,
        };
        for layer in 0..6 {
            self.targets[0][layer] = bit!(value, layer);
            self.targets[1][layer] = bit!(value, 8 + layer);
        }
    }
}

/// The full register file of the display pipeline
pub(super) struct Mmio {
    pub dispcnt: DisplayControl,
    pub dispstat: DisplayStatus,
    pub vcount: u8,
    pub bgcnt: [BackgroundControl; 4],
    pub bghofs: [u16; 4],
    pub bgvofs: [u16; 4],
    pub bgx: [ReferencePoint; 2],
    pub bgy: [ReferencePoint; 2],
    pub bgpa: [i16; 2],
    pub bgpb: [i16; 2],
    pub bgpc: [i16; 2],
    pub bgpd: [i16; 2],
    pub winh: [WindowRange; 2],
    pub winv: [WindowRange; 2],
    pub winin: WindowLayerSelect,
    pub winout: WindowLayerSelect,
    pub mosaic: Mosaic,
    pub bldcnt: BlendControl,
    pub eva: u8,
    pub evb: u8,
    pub evy: u8,
}

impl Mmio {
    pub fn new() -> Self {
        Self {
            dispcnt: DisplayControl::new(),
            dispstat: DisplayStatus::new(),
            vcount: 0,
            bgcnt: [BackgroundControl::new(); 4],
            bghofs: [0; 4],
            bgvofs: [0; 4],
            bgx: [ReferencePoint::new(); 2],
            bgy: [ReferencePoint::new(); 2],
            bgpa: [0x100; 2],
            bgpb: [0; 2],
            bgpc: [0; 2],
            bgpd: [0x100; 2],
            winh: [WindowRange::new(); 2],
            winv: [WindowRange::new(); 2],
            winin: WindowLayerSelect::new(),
            winout: WindowLayerSelect::new(),
            mosaic: Mosaic::new(),
            bldcnt: BlendControl::new(),
            eva: 0,
            evb: 0,
            evy: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_roundtrips_display_control() {
        let mut dispcnt = DisplayControl::new();
        dispcnt.write(0x1f44);
        assert_eq!(dispcnt.mode, 4);
        assert_eq!(dispcnt.frame, 0);
        assert!(dispcnt.oam_mapping_1d);
        assert!(dispcnt.enable[2]);
        assert!(dispcnt.enable[ENABLE_OBJ]);
        assert!(dispcnt.is_bitmap_mode());
        assert_eq!(dispcnt.read(), 0x1f44);
    }

    #[test]
    fn it_keeps_status_flags_read_only() {
        let mut dispstat = DisplayStatus::new();
        dispstat.vblank_flag = true;
        dispstat.hblank_flag = true;
        dispstat.write(0x6427);
        assert!(dispstat.vblank_flag);
        assert!(dispstat.hblank_flag);
        assert!(!dispstat.vcount_flag);
        assert!(!dispstat.vblank_irq_enable);
        assert!(!dispstat.hblank_irq_enable);
        assert!(dispstat.vcount_irq_enable);
        assert_eq!(dispstat.vcount_setting, 100);
        assert_eq!(dispstat.read() & 3, 3);
    }

    #[test]
    fn it_sign_extends_reference_points() {
        let mut point = ReferencePoint::new();
        point.write_low(0x5678);
        point.write_high(0x0812);
        assert_eq!(point.initial, 0xf812_5678u32 as i32);
        assert_eq!(point.current, point.initial);
        point.write_high(0x0012);
        assert_eq!(point.initial, 0x0012_5678);
    }

    #[test]
    fn it_wraps_window_ranges() {
        let mut range = WindowRange::new();
        range.write(0x10a0);
        assert_eq!(range.min, 0x10);
        assert_eq!(range.max, 0xa0);
        assert!(range.contains(0x10));
        assert!(range.contains(0x9f));
        assert!(!range.contains(0xa0));
        range.write(0xf010);
        assert!(range.contains(0xf8));
        assert!(range.contains(0x04));
        assert!(!range.contains(0x80));
    }

    #[test]
    fn it_stores_mosaic_sizes_one_based() {
        let mut mosaic = Mosaic::new();
        assert_eq!(mosaic.bg.size_x, 1);
        mosaic.write(0x3210);
        assert_eq!(mosaic.bg.size_x, 1);
        assert_eq!(mosaic.bg.size_y, 2);
        assert_eq!(mosaic.obj.size_x, 3);
        assert_eq!(mosaic.obj.size_y, 4);
    }
}
