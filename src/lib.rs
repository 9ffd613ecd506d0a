#![no_std]

#[macro_use]
mod bitops;

mod dma;
mod error;
mod event;
mod irq;
mod ppu;
mod region;
mod scheduler;
mod system;

pub mod default;

pub use dma::{Dma, DmaOccasion};
pub use irq::{Irq, IrqSource};
pub use ppu::Screen;
pub use region::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_PERIOD, HBLANK_PERIOD, HDRAW_PERIOD, SCANLINE_PERIOD,
    TOTAL_SCANLINES,
};
pub use scheduler::{EventHandle, Scheduler, MAX_EVENTS};
pub use system::System;
