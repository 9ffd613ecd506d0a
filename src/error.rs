use log::warn;

macro_rules! io_error {
    ($addr: expr, $read: expr) => {
        warn!("Cannot {} I/O register @ 0x{:02x}",
              if $read { "read" } else { "write" },
              $addr)
    }
}

pub fn io_error_read(address: u32) {
    io_error!(address, true)
}

pub fn io_error_write(address: u32) {
    io_error!(address, false)
}
