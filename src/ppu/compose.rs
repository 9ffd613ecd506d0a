use crate::region::{COMPOSER_PERIOD, DISPLAY_WIDTH};

use super::ppu::Ppu;
use super::registers::*;
use super::COLOR_TRANSPARENT;

const ALL_LAYERS: [bool; 6] = [true; 6];

impl Ppu {
    /// Latch the composition pass for the starting scanline
    pub(super) fn begin_composer(&mut self, now: u64) {
        self.composer.engaged = true;
        self.composer.time = 0;
        self.composer.timestamp = now;

        let (bg_min, bg_max) = match self.mmio.dispcnt.mode {
            0 => (0, 3),
            1 => (0, 2),
            2 => (2, 3),
            _ => (2, 2),
        };
        self.composer.bg_min = bg_min;
        self.composer.bg_max = bg_max;
    }

    /// Advance the per-scanline compositor by a bounded cycle budget, one
    /// output pixel every four cycles
    pub(super) fn compose(&mut self, mut cycles: u32) {
        // Enabled backgrounds ordered front to back, background index
        // breaking priority ties
        let mut bg_list = [0usize; 4];
        let mut bg_count = 0;
        for priority in (0..4u8).rev() {
            for bg in (self.composer.bg_min..=self.composer.bg_max).rev() {
                if self.enable_bg[0][bg]
                    && self.mmio.dispcnt.enable[bg]
                    && self.mmio.bgcnt[bg].priority == priority
                {
                    bg_list[bg_count] = bg;
                    bg_count += 1;
                }
            }
        }

        let line_base = usize::from(self.mmio.vcount) * DISPLAY_WIDTH;
        let forced_blank = self.mmio.dispcnt.forced_blank;
        let obj_enable = self.mmio.dispcnt.enable[ENABLE_OBJ];
        let window = self.mmio.dispcnt.enable[ENABLE_WIN0]
            || self.mmio.dispcnt.enable[ENABLE_WIN1]
            || self.mmio.dispcnt.enable[ENABLE_OBJWIN];
        let win0_active = self.mmio.dispcnt.enable[ENABLE_WIN0] && self.window_scanline_enable[0];
        let win1_active = self.mmio.dispcnt.enable[ENABLE_WIN1] && self.window_scanline_enable[1];
        let objwin_active = self.mmio.dispcnt.enable[ENABLE_OBJWIN];
        let bg_mosaic_x = usize::from(self.mmio.mosaic.bg.size_x);

        while cycles > 0 {
            cycles -= 1;
            let cycle = self.composer.time & 3;

            if cycle == 0 {
                let x = (self.composer.time >> 2) as usize;

                if forced_blank {
                    self.output[line_base + x] = 0xffff_ffff;
                } else {
                    let win_layer_enable = if window {
                        if win0_active && self.buffer_win[0][x] {
                            &self.mmio.winin.enable[0]
                        } else if win1_active && self.buffer_win[1][x] {
                            &self.mmio.winin.enable[1]
                        } else if objwin_active && self.buffer_obj[x].window {
                            &self.mmio.winout.enable[1]
                        } else {
                            &self.mmio.winout.enable[0]
                        }
                    } else {
                        &ALL_LAYERS
                    };

                    // Find the two topmost contributing layers
                    let mut priority = [4u8; 2];
                    let mut layer = [LAYER_BACKDROP; 2];
                    let mut is_alpha_obj = false;

                    for i in 0..bg_count {
                        let bg = bg_list[i];
                        if !window || win_layer_enable[bg] {
                            let sample_x = if self.mmio.bgcnt[bg].mosaic_enable {
                                x - x % bg_mosaic_x
                            } else {
                                x
                            };
                            if self.buffer_bg[bg][sample_x] != COLOR_TRANSPARENT {
                                layer[1] = layer[0];
                                layer[0] = bg;
                                priority[1] = priority[0];
                                priority[0] = self.mmio.bgcnt[bg].priority;
                            }
                        }
                    }

                    let obj = self.buffer_obj[x];
                    if (!window || win_layer_enable[LAYER_OBJ])
                        && obj_enable
                        && obj.color != COLOR_TRANSPARENT
                    {
                        if obj.priority <= priority[0] {
                            layer[1] = layer[0];
                            layer[0] = LAYER_OBJ;
                            is_alpha_obj = obj.alpha;
                        } else if obj.priority <= priority[1] {
                            layer[1] = LAYER_OBJ;
                        }
                    }

                    let mut pixel = [0u16; 2];
                    for i in 0..2 {
                        pixel[i] = match layer[i] {
                            0..=3 => {
                                let bg = layer[i];
                                let sample_x = if self.mmio.bgcnt[bg].mosaic_enable {
                                    x - x % bg_mosaic_x
                                } else {
                                    x
                                };
                                self.buffer_bg[bg][sample_x]
                            }
                            LAYER_OBJ => obj.color,
                            _ => self.palette.read_16(0),
                        };
                    }

                    // A semi-transparent object on top forces alpha blending
                    // regardless of the selected effect and window
                    if !window || win_layer_enable[LAYER_SFX] || is_alpha_obj {
                        let effect = self.mmio.bldcnt.effect;
                        let have_dst = self.mmio.bldcnt.targets[0][layer[0]];
                        let have_src = self.mmio.bldcnt.targets[1][layer[1]];

                        if is_alpha_obj && have_src {
                            pixel[0] = self.blend(pixel[0], pixel[1], BlendEffect::Alpha);
                        } else if have_dst
                            && effect != BlendEffect::None
                            && (have_src || effect != BlendEffect::Alpha)
                        {
                            pixel[0] = self.blend(pixel[0], pixel[1], effect);
                        }
                    }

                    self.output[line_base + x] = convert_color(pixel[0]);
                }
            }

            self.composer.time += 1;
            if self.composer.time == COMPOSER_PERIOD {
                self.composer.engaged = false;
                break;
            }
        }
    }

    /// Apply a color special effect between the two topmost samples; the
    /// coefficients saturate at 16/16 and each channel clamps at 31
    pub(super) fn blend(&self, target1: u16, target2: u16, effect: BlendEffect) -> u16 {
        let mut r1 = i32::from(target1 & 0x1f);
        let mut g1 = i32::from((target1 >> 5) & 0x1f);
        let mut b1 = i32::from((target1 >> 10) & 0x1f);

        match effect {
            BlendEffect::Alpha => {
                let eva = i32::from(self.mmio.eva.min(16));
                let evb = i32::from(self.mmio.evb.min(16));
                let r2 = i32::from(target2 & 0x1f);
                let g2 = i32::from((target2 >> 5) & 0x1f);
                let b2 = i32::from((target2 >> 10) & 0x1f);
                r1 = ((r1 * eva + r2 * evb) >> 4).min(31);
                g1 = ((g1 * eva + g2 * evb) >> 4).min(31);
                b1 = ((b1 * eva + b2 * evb) >> 4).min(31);
            }
            BlendEffect::Brighten => {
                let evy = i32::from(self.mmio.evy.min(16));
                r1 += ((31 - r1) * evy) >> 4;
                g1 += ((31 - g1) * evy) >> 4;
                b1 += ((31 - b1) * evy) >> 4;
            }
            BlendEffect::Darken => {
                let evy = i32::from(self.mmio.evy.min(16));
                r1 -= (r1 * evy) >> 4;
                g1 -= (g1 * evy) >> 4;
                b1 -= (b1 * evy) >> 4;
            }
            BlendEffect::None => (),
        }

        (r1 | g1 << 5 | b1 << 10) as u16
    }
}

/// 15-bit BGR555 to packed 0xffrrggbb
pub(super) fn convert_color(color: u16) -> u32 {
    let r = u32::from(color & 0x1f);
    let g = u32::from((color >> 5) & 0x1f);
    let b = u32::from((color >> 10) & 0x1f);
    0xff00_0000 | r << 19 | g << 11 | b << 3
}
