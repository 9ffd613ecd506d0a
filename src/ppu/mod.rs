mod background;
mod compose;
mod object;
mod ppu;
mod ram;
mod registers;
mod window;

pub use ppu::Screen;
pub(crate) use ppu::Ppu;

/// Color sentinel marking a pixel without an opaque sample
pub(crate) const COLOR_TRANSPARENT: u16 = 0x8000;
