use crate::region::DISPLAY_WIDTH;

use super::ppu::{ObjectPixel, Ppu};
use super::COLOR_TRANSPARENT;

const MODE_SEMI_TRANSPARENT: u16 = 1;
const MODE_WINDOW: u16 = 2;
const MODE_PROHIBITED: u16 = 3;

/// Object footprint per shape and size setting
const OBJ_SIZE: [[(i32, i32); 4]; 3] = [
    [(8, 8), (16, 16), (32, 32), (64, 64)],
    [(16, 8), (32, 8), (32, 16), (64, 32)],
    [(8, 16), (8, 32), (16, 32), (32, 64)],
];

impl Ppu {
    /// Resolve all 128 object entries into the line's object buffer.
    ///
    /// Entries are walked in attribute order and a column keeps the first
    /// opaque sample it gets; later objects never overwrite it.
    pub(super) fn render_objects(&mut self, line: u8) {
        let bitmap_mode = self.mmio.dispcnt.is_bitmap_mode();
        let mapping_1d = self.mmio.dispcnt.oam_mapping_1d;
        let mosaic_x = i32::from(self.mmio.mosaic.obj.size_x);

        for pixel in self.buffer_obj.iter_mut() {
            *pixel = ObjectPixel::default();
        }

        let line = i32::from(line);

        for index in 0..128u32 {
            let offset = index << 3;
            let attr0 = self.oam.read_16(offset);
            let attr1 = self.oam.read_16(offset + 2);
            let attr2 = self.oam.read_16(offset + 4);

            let affine = bit!(attr0, 8);
            if !affine && bit!(attr0, 9) {
                // hidden
                continue;
            }
            let mode = (attr0 >> 10) & 3;
            if mode == MODE_PROHIBITED {
                continue;
            }
            let shape = ((attr0 >> 14) & 3) as usize;
            if shape == 3 {
                continue;
            }
            let mosaic = bit!(attr0, 12);
            let full_palette = bit!(attr0, 13);
            let size = ((attr1 >> 14) & 3) as usize;
            let (width, height) = OBJ_SIZE[shape][size];

            let double_size = affine && bit!(attr0, 9);
            let (box_w, box_h) = if double_size {
                (width * 2, height * 2)
            } else {
                (width, height)
            };

            let mut y = i32::from(attr0 & 0xff);
            if y + box_h > 256 {
                y -= 256;
            }
            // 9-bit signed horizontal position
            let x = (i32::from(attr1 & 0x1ff) << 23) >> 23;

            if line < y || line >= y + box_h {
                continue;
            }

            let (pa, pb, pc, pd) = if affine {
                let group = u32::from((attr1 >> 9) & 0x1f) * 32;
                (
                    i32::from(self.oam.read_16(group + 6) as i16),
                    i32::from(self.oam.read_16(group + 14) as i16),
                    i32::from(self.oam.read_16(group + 22) as i16),
                    i32::from(self.oam.read_16(group + 30) as i16),
                )
            } else {
                (0x100, 0, 0, 0x100)
            };

            let flip_x = !affine && bit!(attr1, 12);
            let flip_y = !affine && bit!(attr1, 13);

            let tile_number = u32::from(attr2 & 0x3ff);
            let priority = ((attr2 >> 10) & 3) as u8;
            let palette_bank = u32::from(attr2 >> 12);
            let tiles_per_row = width as u32 >> 3;

            let center_x = x + (box_w >> 1);
            let center_y = y + (box_h >> 1);
            let local_y = line - center_y;

            let first_x = x.max(0);
            let last_x = (x + box_w).min(DISPLAY_WIDTH as i32);

            for screen_x in first_x..last_x {
                let sample_x = if mosaic {
                    screen_x - screen_x % mosaic_x
                } else {
                    screen_x
                };
                let local_x = sample_x - center_x;
                let mut tex_x = ((pa * local_x + pb * local_y) >> 8) + (width >> 1);
                let mut tex_y = ((pc * local_x + pd * local_y) >> 8) + (height >> 1);

                if tex_x < 0 || tex_x >= width || tex_y < 0 || tex_y >= height {
                    continue;
                }
                if flip_x {
                    tex_x = width - 1 - tex_x;
                }
                if flip_y {
                    tex_y = height - 1 - tex_y;
                }

                let tile_x = tex_x as u32 >> 3;
                let tile_y = tex_y as u32 >> 3;
                let fine_x = tex_x as u32 & 7;
                let fine_y = tex_y as u32 & 7;

                let color = if full_palette {
                    let number = if mapping_1d {
                        tile_number + (tile_y * tiles_per_row + tile_x) * 2
                    } else {
                        tile_number + tile_y * 32 + tile_x * 2
                    };
                    let address = 0x10000 + ((number & 0x3ff) << 5) + (fine_y << 3) + fine_x;
                    // Bitmap modes reclaim the first half of the object tiles
                    // as image data
                    if bitmap_mode && address < 0x14000 {
                        continue;
                    }
                    let entry = self.vram.read_8(address);
                    if entry == 0 {
                        COLOR_TRANSPARENT
                    } else {
                        self.palette.read_16(0x200 + (u32::from(entry) << 1))
                    }
                } else {
                    let number = if mapping_1d {
                        tile_number + tile_y * tiles_per_row + tile_x
                    } else {
                        tile_number + tile_y * 32 + tile_x
                    };
                    let address = 0x10000 + ((number & 0x3ff) << 5) + (fine_y << 2) + (fine_x >> 1);
                    if bitmap_mode && address < 0x14000 {
                        continue;
                    }
                    let entry = (self.vram.read_8(address) >> ((fine_x & 1) << 2)) & 0xf;
                    if entry == 0 {
                        COLOR_TRANSPARENT
                    } else {
                        self.palette
                            .read_16(0x200 + (palette_bank << 5) + (u32::from(entry) << 1))
                    }
                };

                let pixel = &mut self.buffer_obj[screen_x as usize];
                if mode == MODE_WINDOW {
                    if color != COLOR_TRANSPARENT {
                        pixel.window = true;
                    }
                } else if pixel.color == COLOR_TRANSPARENT && color != COLOR_TRANSPARENT {
                    pixel.color = color;
                    pixel.priority = priority;
                    pixel.alpha = mode == MODE_SEMI_TRANSPARENT;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_entry(ppu: &mut Ppu, index: u32, attr0: u16, attr1: u16, attr2: u16) {
        let offset = index << 3;
        ppu.oam.write_16(offset, attr0);
        ppu.oam.write_16(offset + 2, attr1);
        ppu.oam.write_16(offset + 4, attr2);
    }

    fn fill_tile_4bpp(ppu: &mut Ppu, number: u32, index: u16) {
        let base = 0x10000 + (number << 5);
        let value = index | index << 4 | index << 8 | index << 12;
        for i in 0..16u32 {
            ppu.vram.write_16(base + (i << 1), value);
        }
    }

    #[test]
    fn it_keeps_the_first_opaque_object_pixel() {
        let mut ppu = Ppu::new();
        fill_tile_4bpp(&mut ppu, 1, 1);
        fill_tile_4bpp(&mut ppu, 2, 2);
        ppu.palette.write_16(0x202, 0x001f);
        ppu.palette.write_16(0x204, 0x03e0);
        // two overlapping 8x8 objects at x=10 and x=14
        write_entry(&mut ppu, 0, 0x0000, 10, 1 | 1 << 10);
        write_entry(&mut ppu, 1, 0x0000, 14, 2);
        ppu.render_objects(0);
        assert_eq!(ppu.buffer_obj[9].color, COLOR_TRANSPARENT);
        assert_eq!(ppu.buffer_obj[10].color, 0x001f);
        assert_eq!(ppu.buffer_obj[10].priority, 1);
        // the overlap keeps the first entry even at lower priority
        assert_eq!(ppu.buffer_obj[16].color, 0x001f);
        assert_eq!(ppu.buffer_obj[18].color, 0x03e0);
        assert_eq!(ppu.buffer_obj[18].priority, 0);
        assert_eq!(ppu.buffer_obj[22].color, COLOR_TRANSPARENT);
    }

    #[test]
    fn it_skips_hidden_and_prohibited_objects() {
        let mut ppu = Ppu::new();
        fill_tile_4bpp(&mut ppu, 1, 1);
        ppu.palette.write_16(0x202, 0x001f);
        // hidden flag
        write_entry(&mut ppu, 0, 0x0200, 10, 1);
        // prohibited mode
        write_entry(&mut ppu, 1, 0x0c00, 30, 1);
        ppu.render_objects(0);
        assert!(ppu.buffer_obj.iter().all(|p| p.color == COLOR_TRANSPARENT));
    }

    #[test]
    fn it_sets_the_window_flag_without_a_color() {
        let mut ppu = Ppu::new();
        fill_tile_4bpp(&mut ppu, 1, 1);
        write_entry(&mut ppu, 0, 0x0800, 10, 1);
        ppu.render_objects(0);
        assert!(ppu.buffer_obj[10].window);
        assert_eq!(ppu.buffer_obj[10].color, COLOR_TRANSPARENT);
        assert!(!ppu.buffer_obj[9].window);
    }

    #[test]
    fn it_wraps_the_vertical_position() {
        let mut ppu = Ppu::new();
        fill_tile_4bpp(&mut ppu, 1, 1);
        ppu.palette.write_16(0x202, 0x001f);
        // y=252 on an 8x8 object covers lines 252..255 and wraps to -4..0
        write_entry(&mut ppu, 0, 252, 10, 1);
        ppu.render_objects(3);
        assert_eq!(ppu.buffer_obj[10].color, 0x001f);
        ppu.render_objects(4);
        assert_eq!(ppu.buffer_obj[10].color, COLOR_TRANSPARENT);
    }

    #[test]
    fn it_marks_semi_transparent_objects() {
        let mut ppu = Ppu::new();
        fill_tile_4bpp(&mut ppu, 1, 1);
        ppu.palette.write_16(0x202, 0x001f);
        write_entry(&mut ppu, 0, 0x0400, 10, 1);
        ppu.render_objects(0);
        assert!(ppu.buffer_obj[10].alpha);
    }

    #[test]
    fn it_excludes_low_object_tiles_in_bitmap_modes() {
        let mut ppu = Ppu::new();
        ppu.mmio.dispcnt.write(3);
        fill_tile_4bpp(&mut ppu, 1, 1);
        fill_tile_4bpp(&mut ppu, 512, 1);
        ppu.palette.write_16(0x202, 0x001f);
        write_entry(&mut ppu, 0, 0x0000, 10, 1);
        write_entry(&mut ppu, 1, 0x0000, 30, 512);
        ppu.render_objects(0);
        assert_eq!(ppu.buffer_obj[10].color, COLOR_TRANSPARENT);
        assert_eq!(ppu.buffer_obj[30].color, 0x001f);
    }
}
