use crate::region::{OAM_SIZE, PALETTE_SIZE, VRAM_SIZE};

/// Color palette memory, 16-bit access only: byte writes are widened to a
/// halfword with the byte replicated in both halves
pub(super) struct Palette {
    data: [u8; PALETTE_SIZE],
}

impl Palette {
    pub fn new() -> Self {
        Self { data: [0; PALETTE_SIZE] }
    }

    pub fn reset(&mut self) {
        self.data = [0; PALETTE_SIZE];
    }

    #[inline]
    pub fn read_8(&self, address: u32) -> u8 {
        self.data[address as usize & (PALETTE_SIZE - 1)]
    }

    #[inline]
    pub fn read_16(&self, address: u32) -> u16 {
        let addr = address as usize & (PALETTE_SIZE - 1) & !1;
        make_u16!(self.data[addr + 1], self.data[addr])
    }

    pub fn read_32(&self, address: u32) -> u32 {
        let addr = address & !3;
        make_u32!(self.read_16(addr | 2), self.read_16(addr))
    }

    pub fn write_8(&mut self, address: u32, value: u8) {
        self.write_16(address & !1, u16::from(value) * 0x0101);
    }

    pub fn write_16(&mut self, address: u32, value: u16) {
        let addr = address as usize & (PALETTE_SIZE - 1) & !1;
        self.data[addr] = value as u8;
        self.data[addr + 1] = (value >> 8) as u8;
    }

    pub fn write_32(&mut self, address: u32, value: u32) {
        let addr = address & !3;
        self.write_16(addr, value as u16);
        self.write_16(addr | 2, (value >> 16) as u16);
    }
}

/// Object attribute memory; byte writes are dropped by the hardware
pub(super) struct Oam {
    data: [u8; OAM_SIZE],
}

impl Oam {
    pub fn new() -> Self {
        Self { data: [0; OAM_SIZE] }
    }

    pub fn reset(&mut self) {
        self.data = [0; OAM_SIZE];
    }

    #[inline]
    pub fn read_8(&self, address: u32) -> u8 {
        self.data[address as usize & (OAM_SIZE - 1)]
    }

    #[inline]
    pub fn read_16(&self, address: u32) -> u16 {
        let addr = address as usize & (OAM_SIZE - 1) & !1;
        make_u16!(self.data[addr + 1], self.data[addr])
    }

    pub fn read_32(&self, address: u32) -> u32 {
        let addr = address & !3;
        make_u32!(self.read_16(addr | 2), self.read_16(addr))
    }

    pub fn write_8(&mut self, _address: u32, _value: u8) {}

    pub fn write_16(&mut self, address: u32, value: u16) {
        let addr = address as usize & (OAM_SIZE - 1) & !1;
        self.data[addr] = value as u8;
        self.data[addr + 1] = (value >> 8) as u8;
    }

    pub fn write_32(&mut self, address: u32, value: u32) {
        let addr = address & !3;
        self.write_16(addr, value as u16);
        self.write_16(addr | 2, (value >> 16) as u16);
    }
}

/// Image memory: a 96 KiB bank mirrored over a 128 KiB address space, the
/// upper 32 KiB folding back onto the object tile region
pub(super) struct Vram {
    data: [u8; VRAM_SIZE],
}

impl Vram {
    pub fn new() -> Self {
        Self { data: [0; VRAM_SIZE] }
    }

    pub fn reset(&mut self) {
        self.data = [0; VRAM_SIZE];
    }

    #[inline]
    fn mirror(address: u32) -> usize {
        let mut addr = address as usize & 0x1ffff;
        if addr >= 0x18000 {
            addr &= !0x8000;
        }
        addr
    }

    #[inline]
    pub fn read_8(&self, address: u32) -> u8 {
        self.data[Self::mirror(address)]
    }

    #[inline]
    pub fn read_16(&self, address: u32) -> u16 {
        let addr = Self::mirror(address & !1);
        make_u16!(self.data[addr + 1], self.data[addr])
    }

    pub fn read_32(&self, address: u32) -> u32 {
        let addr = address & !3;
        make_u32!(self.read_16(addr | 2), self.read_16(addr))
    }

    /// Byte writes replicate into the aligned halfword, but only below a
    /// mode-dependent limit; above it they are dropped
    pub fn write_8(&mut self, address: u32, value: u8, bitmap_mode: bool) {
        let addr = Self::mirror(address);
        let limit = if bitmap_mode { 0x14000 } else { 0x10000 };
        if addr < limit {
            self.write_16(addr as u32 & !1, u16::from(value) * 0x0101);
        }
    }

    pub fn write_16(&mut self, address: u32, value: u16) {
        let addr = Self::mirror(address & !1);
        self.data[addr] = value as u8;
        self.data[addr + 1] = (value >> 8) as u8;
    }

    pub fn write_32(&mut self, address: u32, value: u32) {
        let addr = address & !3;
        self.write_16(addr, value as u16);
        self.write_16(addr | 2, (value >> 16) as u16);
    }
}
