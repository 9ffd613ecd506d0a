macro_rules! make_u16 {
    ($h: expr, $l: expr) => {
        (($h as u16) << 8) | $l as u16
    }
}

macro_rules! make_u32 {
    ($h: expr, $l: expr) => {
        (($h as u32) << 16) | $l as u32
    }
}

macro_rules! bit {
    ($n: expr, $bit: expr) => {
        (($n >> $bit) & 1) != 0
    }
}
