use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order applied to every fixed-width read and write within one run.
/// Chosen once from configuration so the output is self-consistent; the
/// default is little-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    pub fn u8_to_bytes(self, v: u8) -> [u8; 1] {
        [v]
    }

    pub fn u32_to_bytes(self, v: u32) -> [u8; 4] {
        let mut buf = [0u8; 4];
        match self {
            Endian::Little => LittleEndian::write_u32(&mut buf, v),
            Endian::Big => BigEndian::write_u32(&mut buf, v),
        }
        buf
    }

    pub fn u64_to_bytes(self, v: u64) -> [u8; 8] {
        let mut buf = [0u8; 8];
        match self {
            Endian::Little => LittleEndian::write_u64(&mut buf, v),
            Endian::Big => BigEndian::write_u64(&mut buf, v),
        }
        buf
    }

    pub fn f32_to_bytes(self, v: f32) -> [u8; 4] {
        let mut buf = [0u8; 4];
        match self {
            Endian::Little => LittleEndian::write_f32(&mut buf, v),
            Endian::Big => BigEndian::write_f32(&mut buf, v),
        }
        buf
    }

    pub fn f64_to_bytes(self, v: f64) -> [u8; 8] {
        let mut buf = [0u8; 8];
        match self {
            Endian::Little => LittleEndian::write_f64(&mut buf, v),
            Endian::Big => BigEndian::write_f64(&mut buf, v),
        }
        buf
    }

    /// Callers hand in exactly the encoded width.
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            Endian::Little => LittleEndian::read_u64(buf),
            Endian::Big => BigEndian::read_u64(buf),
        }
    }

    pub fn read_f32(self, buf: &[u8]) -> f32 {
        match self {
            Endian::Little => LittleEndian::read_f32(buf),
            Endian::Big => BigEndian::read_f32(buf),
        }
    }

    pub fn read_f64(self, buf: &[u8]) -> f64 {
        match self {
            Endian::Little => LittleEndian::read_f64(buf),
            Endian::Big => BigEndian::read_f64(buf),
        }
    }
}
