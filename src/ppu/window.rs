use crate::region::DISPLAY_WIDTH;

use super::ppu::Ppu;
use super::registers::ENABLE_WIN0;

impl Ppu {
    pub(super) fn render_windows(&mut self) {
        for id in 0..2 {
            if self.mmio.dispcnt.enable[ENABLE_WIN0 + id] {
                self.render_window(id);
            }
        }
    }

    /// Update the vertical activation latch of window `id` and rebuild its
    /// horizontal mask for the current line.
    ///
    /// The vertical bounds work as compare matches on the line counter, so a
    /// window whose top line was skipped stays closed for the frame.
    fn render_window(&mut self, id: usize) {
        let vcount = self.mmio.vcount;
        let winv = self.mmio.winv[id];
        if vcount == winv.min {
            self.window_scanline_enable[id] = true;
        }
        if vcount == winv.max {
            self.window_scanline_enable[id] = false;
        }

        if self.window_scanline_enable[id] {
            let winh = self.mmio.winh[id];
            for x in 0..DISPLAY_WIDTH {
                self.buffer_win[id][x] = winh.contains(x as u8);
            }
        }
    }
}
