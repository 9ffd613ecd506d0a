use crate::region::DISPLAY_WIDTH;

use super::ppu::Ppu;
use super::COLOR_TRANSPARENT;

impl Ppu {
    /// Advance the per-background pixel generators by a bounded cycle budget
    pub(super) fn render(&mut self, cycles: u32) {
        match self.mmio.dispcnt.mode {
            0 => self.render_mode0(cycles),
            1 => self.render_mode1(cycles),
            2 => self.render_mode2(cycles),
            3 => self.render_mode3(cycles),
            4 => self.render_mode4(cycles),
            5 => self.render_mode5(cycles),
            // Invalid modes generate no pixels; the compositor falls through
            // to the backdrop color
            _ => (),
        }
    }

    /// Four text backgrounds, one 8-cycle fetch slot each per 32-cycle turn
    fn render_mode0(&mut self, mut cycles: u32) {
        while cycles > 0 {
            cycles -= 1;
            let id = ((self.renderer.time >> 3) & 3) as usize;
            if self.renderer.bg[id].engaged {
                let cycle = self.renderer.time & 7;
                self.render_text_layer(id, cycle);
            }
            self.renderer.time += 1;
        }
    }

    /// Text BG0/BG1 in their usual slots, affine BG2 interleaved at a
    /// two-cycle map/pixel cadence
    fn render_mode1(&mut self, mut cycles: u32) {
        while cycles > 0 {
            cycles -= 1;
            let id = ((self.renderer.time >> 3) & 3) as usize;
            if id < 2 {
                if self.renderer.bg[id].engaged {
                    let cycle = self.renderer.time & 7;
                    self.render_text_layer(id, cycle);
                }
            } else if self.renderer.bg[2].engaged {
                let cycle = self.renderer.time & 1;
                self.render_affine_layer(2, cycle);
            }
            self.renderer.time += 1;
        }
    }

    /// Affine BG2 and BG3, 16 cycles each per turn
    fn render_mode2(&mut self, mut cycles: u32) {
        while cycles > 0 {
            cycles -= 1;
            let id = (2 + ((self.renderer.time >> 4) & 1)) as usize;
            if self.renderer.bg[id].engaged {
                let cycle = self.renderer.time & 1;
                self.render_affine_layer(id, cycle);
            }
            self.renderer.time += 1;
        }
    }

    fn render_mode3(&mut self, mut cycles: u32) {
        while cycles > 0 {
            cycles -= 1;
            if self.renderer.time & 31 < 16 {
                self.render_bitmap_pixel(3);
            }
            self.renderer.time += 1;
        }
    }

    fn render_mode4(&mut self, mut cycles: u32) {
        while cycles > 0 {
            cycles -= 1;
            if self.renderer.time & 31 < 16 {
                self.render_bitmap_pixel(4);
            }
            self.renderer.time += 1;
        }
    }

    fn render_mode5(&mut self, mut cycles: u32) {
        while cycles > 0 {
            cycles -= 1;
            if self.renderer.time & 31 < 16 {
                self.render_bitmap_pixel(5);
            }
            self.renderer.time += 1;
        }
    }

    /// One fetch slot cycle of a text background: map entry at cycle 0, tile
    /// data at cycles 1 to 4, cursor bookkeeping at cycle 4
    fn render_text_layer(&mut self, id: usize, cycle: u32) {
        if cycle == 0 {
            let enabled = self.mmio.dispcnt.enable[id];
            self.renderer.bg[id].enabled = enabled;
            if !enabled {
                return;
            }

            let bgcnt = &self.mmio.bgcnt[id];
            let tile_base = bgcnt.tile_block << 14;
            let mut map_block = bgcnt.map_block;

            let vcount = u32::from(self.mmio.vcount);
            let vcount = if bgcnt.mosaic_enable {
                vcount.saturating_sub(u32::from(self.mmio.mosaic.bg.counter_y))
            } else {
                vcount
            };
            let line = u32::from(self.mmio.bgvofs[id]) + vcount;

            let grid_x = u32::from(self.mmio.bghofs[id] >> 3) + self.renderer.bg[id].grid_x;
            let grid_y = line >> 3;
            let mut tile_y = line & 7;

            let screen_x = (grid_x >> 5) & 1;
            let screen_y = (grid_y >> 5) & 1;

            match bgcnt.size {
                1 => map_block += screen_x,
                2 => map_block += screen_y,
                3 => map_block += screen_x + (screen_y << 1),
                _ => (),
            }

            let address = (map_block << 11) + ((grid_y & 31) << 6) + ((grid_x & 31) << 1);
            let map_entry = self.vram.read_16(address);
            let number = u32::from(map_entry & 0x3ff);
            let flip_x = bit!(map_entry, 10);
            let flip_y = bit!(map_entry, 11);

            if flip_y {
                tile_y ^= 7;
            }

            let full_palette = bgcnt.full_palette;
            let bg = &mut self.renderer.bg[id];
            bg.palette_bank = map_entry >> 12;
            bg.full_palette = full_palette;
            bg.flip_x = flip_x;
            if full_palette {
                bg.address = tile_base + (number << 6) + (tile_y << 3);
                if flip_x {
                    bg.address += 6;
                }
            } else {
                bg.address = tile_base + (number << 5) + (tile_y << 2);
                if flip_x {
                    bg.address += 2;
                }
            }
        } else if cycle <= 4 {
            // The fetch cursor keeps moving even while the background is
            // turned off mid-line
            if self.renderer.bg[id].full_palette {
                if self.renderer.bg[id].enabled && self.mmio.dispcnt.enable[id] {
                    let mut data = self.vram.read_16(self.renderer.bg[id].address);
                    let flip = i32::from(self.renderer.bg[id].flip_x);
                    let draw_x = self.renderer.bg[id].draw_x;
                    for x in 0..2 {
                        let index = data as u8;
                        let color = if index == 0 {
                            COLOR_TRANSPARENT
                        } else {
                            self.palette.read_16(u32::from(index) << 1)
                        };
                        let final_x = draw_x + (x ^ flip);
                        if (0..DISPLAY_WIDTH as i32).contains(&final_x) {
                            self.buffer_bg[id][final_x as usize] = color;
                        }
                        data >>= 8;
                    }
                }
                let bg = &mut self.renderer.bg[id];
                bg.draw_x += 2;
                if bg.flip_x {
                    bg.address = bg.address.wrapping_sub(2);
                } else {
                    bg.address += 2;
                }
            } else if cycle & 1 == 1 {
                if self.renderer.bg[id].enabled && self.mmio.dispcnt.enable[id] {
                    let mut data = self.vram.read_16(self.renderer.bg[id].address);
                    let flip = i32::from(self.renderer.bg[id].flip_x) * 3;
                    let draw_x = self.renderer.bg[id].draw_x;
                    let bank = u32::from(self.renderer.bg[id].palette_bank);
                    for x in 0..4 {
                        let index = u32::from(data & 15);
                        let color = if index == 0 {
                            COLOR_TRANSPARENT
                        } else {
                            self.palette.read_16(((bank << 4) + index) << 1)
                        };
                        let final_x = draw_x + (x ^ flip);
                        if (0..DISPLAY_WIDTH as i32).contains(&final_x) {
                            self.buffer_bg[id][final_x as usize] = color;
                        }
                        data >>= 4;
                    }
                }
                let bg = &mut self.renderer.bg[id];
                bg.draw_x += 4;
                if bg.flip_x {
                    bg.address = bg.address.wrapping_sub(2);
                } else {
                    bg.address += 2;
                }
            }

            if cycle == 4 {
                let bg = &mut self.renderer.bg[id];
                bg.grid_x += 1;
                // 31 fetches cover 240 pixels at any fine scroll
                if bg.grid_x == 31 {
                    bg.engaged = false;
                }
            }
        }
    }

    /// One cycle of an affine background: map lookup at cycle 0, pixel
    /// output at cycle 1
    fn render_affine_layer(&mut self, id: usize, cycle: u32) {
        if cycle == 0 {
            let mut enabled = self.mmio.dispcnt.enable[id];
            self.renderer.bg[id].enabled = enabled;
            if !enabled {
                return;
            }

            let bgcnt = self.mmio.bgcnt[id];
            let pa = i32::from(self.mmio.bgpa[id & 1]);
            let pc = i32::from(self.mmio.bgpc[id & 1]);
            let bg = &mut self.renderer.bg[id];
            let mut x = bg.ref_x >> 8;
            let mut y = bg.ref_y >> 8;
            bg.ref_x = bg.ref_x.wrapping_add(pa);
            bg.ref_y = bg.ref_y.wrapping_add(pc);

            let size = 128i32 << bgcnt.size;
            let mask = size - 1;
            if bgcnt.wraparound {
                x &= mask;
                y &= mask;
            } else {
                enabled = (x | y) & !mask == 0;
            }

            if enabled {
                let map_base = bgcnt.map_block << 11;
                let tile_base = bgcnt.tile_block << 14;
                let map_address =
                    map_base + ((y as u32 >> 3) << (4 + bgcnt.size)) + (x as u32 >> 3);
                let number = u32::from(self.vram.read_8(map_address));
                self.renderer.bg[id].address =
                    tile_base + (number << 6) + ((y as u32 & 7) << 3) + (x as u32 & 7);
            }
            self.renderer.bg[id].enabled = enabled;
        } else {
            let mut color = COLOR_TRANSPARENT;
            if self.renderer.bg[id].enabled && self.mmio.dispcnt.enable[id] {
                let index = self.vram.read_8(self.renderer.bg[id].address);
                if index != 0 {
                    color = self.palette.read_16(u32::from(index) << 1);
                }
            }
            let draw_x = self.renderer.bg[id].draw_x;
            self.buffer_bg[id][draw_x as usize] = color;
            let bg = &mut self.renderer.bg[id];
            bg.draw_x += 1;
            if bg.draw_x == DISPLAY_WIDTH as i32 {
                bg.engaged = false;
            }
        }
    }

    /// One pixel of a bitmap mode, sampled through the BG2 affine transform
    fn render_bitmap_pixel(&mut self, mode: u8) {
        if !self.renderer.bg[2].engaged || !self.mmio.dispcnt.enable[2] {
            return;
        }

        let pa = i32::from(self.mmio.bgpa[0]);
        let pc = i32::from(self.mmio.bgpc[0]);
        let frame = u32::from(self.mmio.dispcnt.frame) * 0xa000;
        let bg = &mut self.renderer.bg[2];
        let x = bg.ref_x >> 8;
        let y = bg.ref_y >> 8;
        bg.ref_x = bg.ref_x.wrapping_add(pa);
        bg.ref_y = bg.ref_y.wrapping_add(pc);
        let draw_x = bg.draw_x;

        let color = match mode {
            3 => {
                if (0..240).contains(&x) && (0..160).contains(&y) {
                    Some(self.vram.read_16(((y * 240 + x) as u32) << 1))
                } else {
                    None
                }
            }
            4 => {
                if (0..240).contains(&x) && (0..160).contains(&y) {
                    let index = self.vram.read_8(frame + (y * 240 + x) as u32);
                    if index != 0 {
                        Some(self.palette.read_16(u32::from(index) << 1))
                    } else {
                        None
                    }
                } else {
                    None
                }
            }
            _ => {
                if (0..160).contains(&x) && (0..128).contains(&y) {
                    Some(self.vram.read_16(frame + (((y * 160 + x) as u32) << 1)))
                } else {
                    None
                }
            }
        };

        if let Some(color) = color {
            self.buffer_bg[2][draw_x as usize] = color;
        }
        let bg = &mut self.renderer.bg[2];
        bg.draw_x += 1;
        if bg.draw_x == DISPLAY_WIDTH as i32 {
            bg.engaged = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::HDRAW_PERIOD;

    fn ppu_in_draw() -> Ppu {
        let mut ppu = Ppu::new();
        ppu.mmio.vcount = 0;
        ppu
    }

    fn engage(ppu: &mut Ppu, id: usize) {
        ppu.enable_bg[0][id] = true;
        ppu.enable_bg[1][id] = true;
        let bg = &mut ppu.renderer.bg[id];
        bg.engaged = true;
        bg.draw_x = 0;
        bg.grid_x = 0;
        bg.ref_x = 0;
        bg.ref_y = 0;
    }

    #[test]
    fn it_renders_a_mode3_scanline() {
        let mut ppu = ppu_in_draw();
        ppu.mmio.dispcnt.write(0x0403);
        engage(&mut ppu, 2);
        for x in 0..240u32 {
            ppu.vram.write_16(x << 1, 0x1234);
        }
        ppu.render(HDRAW_PERIOD as u32);
        assert!(ppu.buffer_bg[2].iter().all(|&c| c == 0x1234));
        assert!(!ppu.renderer.bg[2].engaged);
    }

    #[test]
    fn it_treats_palette_index_zero_as_transparent_in_mode4() {
        let mut ppu = ppu_in_draw();
        ppu.mmio.dispcnt.write(0x0404);
        engage(&mut ppu, 2);
        ppu.palette.write_16(2, 0x001f);
        // even pixels index 1, odd pixels index 0
        for x in 0..120u32 {
            ppu.vram.write_16(x << 1, 0x0001);
        }
        ppu.render(HDRAW_PERIOD as u32);
        assert_eq!(ppu.buffer_bg[2][0], 0x001f);
        assert_eq!(ppu.buffer_bg[2][1], COLOR_TRANSPARENT);
    }

    #[test]
    fn it_samples_the_back_frame_in_mode4() {
        let mut ppu = ppu_in_draw();
        ppu.mmio.dispcnt.write(0x0414);
        engage(&mut ppu, 2);
        ppu.palette.write_16(4, 0x7c00);
        ppu.vram.write_16(0xa000, 0x0202);
        ppu.render(64);
        assert_eq!(ppu.buffer_bg[2][0], 0x7c00);
    }

    #[test]
    fn it_renders_a_text_background_row() {
        let mut ppu = ppu_in_draw();
        ppu.mmio.dispcnt.write(0x0100);
        engage(&mut ppu, 0);
        // map block 8, tile block 0, 4bpp
        ppu.mmio.bgcnt[0].write(0x0800);
        // tile 1 for the first map entry, tile 0 elsewhere
        ppu.vram.write_16(0x4000, 0x0001);
        // tile 1 filled with color index 2
        for i in 0..16u32 {
            ppu.vram.write_16(0x20 + (i << 1), 0x2222);
        }
        ppu.palette.write_16(4, 0x03e0);
        ppu.render(HDRAW_PERIOD as u32);
        assert!(ppu.buffer_bg[0][..8].iter().all(|&c| c == 0x03e0));
        assert!(ppu.buffer_bg[0][8..16].iter().all(|&c| c == COLOR_TRANSPARENT));
        assert!(!ppu.renderer.bg[0].engaged);
    }

    #[test]
    fn it_clamps_a_non_wrapping_affine_background() {
        let mut ppu = ppu_in_draw();
        ppu.mmio.dispcnt.write(0x0402);
        engage(&mut ppu, 2);
        // 128x128, no wraparound; map and tiles in block 0
        ppu.mmio.bgcnt[2].write(0x0000);
        // tile 1 everywhere on the first map row
        for i in 0..16u32 {
            ppu.vram.write_16(i << 1, 0x0101);
        }
        for i in 0..32u32 {
            ppu.vram.write_16(0x40 + (i << 1), 0x0303);
        }
        ppu.palette.write_16(6, 0x001f);
        // start sampling left of the map
        ppu.renderer.bg[2].ref_x = -16 << 8;
        ppu.render(HDRAW_PERIOD as u32);
        assert!(ppu.buffer_bg[2][..16].iter().all(|&c| c == COLOR_TRANSPARENT));
        assert_eq!(ppu.buffer_bg[2][16], 0x001f);
    }
}
