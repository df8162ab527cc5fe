/// Number of bits needed to represent the input (0 needs zero bits)
#[inline]
pub(crate) const fn bit_width(input: u64) -> u32 {
    (core::mem::size_of::<u64>() as u32) * 8 - input.leading_zeros()
}

/// Yields consecutive bits of a byte slice as little endian primitives.
///
/// The reader keeps an in-flight scratch word: the oldest unread bits of the
/// stream sit in the low-order positions and are consumed from the low end.
/// Whenever a read wants more bits than the scratch holds, the next source
/// byte is ORed in at the current fill position. Wider-than-a-byte reads are
/// therefore byte-sequential: `read_u32` on an unaligned stream produces the
/// same bytes in the same order a sequence of four `read_u8` calls would.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    scratch: u64,
    count: u32,
    total_bits: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader {
            data,
            scratch: 0,
            count: 0,
            total_bits: data.len() * 8,
        }
    }

    /// Exact number of unread bits left in the stream
    #[inline]
    pub fn bits_remaining(&self) -> usize {
        self.count as usize + self.data.len() * 8
    }

    /// Number of bits consumed so far
    #[inline]
    pub fn bit_offset(&self) -> usize {
        self.total_bits - self.bits_remaining()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.data.is_empty()
    }

    #[inline]
    fn refill(&mut self, bits: u32) -> bool {
        while self.count < bits {
            match self.data.split_first() {
                Some((&byte, rest)) => {
                    self.scratch |= u64::from(byte) << self.count;
                    self.count += 8;
                    self.data = rest;
                }
                None => return false,
            }
        }
        true
    }

    /// Reads up to 56 bits into the low end of a `u64`. The cap comes from
    /// the scratch word: at most 7 stale bits plus 7 fresh bytes fit without
    /// overflow, which covers every field in the replay format (wider reads
    /// are composed from 32 bit halves).
    #[inline]
    pub fn read_bits(&mut self, bits: u32) -> Option<u64> {
        debug_assert!(bits <= 56);
        if !self.refill(bits) {
            return None;
        }

        let res = self.scratch & ((1 << bits) - 1);
        self.scratch >>= bits;
        self.count -= bits;
        Some(res)
    }

    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        self.read_bits(1).map(|x| x == 1)
    }

    #[inline]
    pub fn read_u32_bits(&mut self, bits: u32) -> Option<u32> {
        debug_assert!(bits <= 32);
        self.read_bits(bits).map(|x| x as u32)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_bits(8).map(|x| x as u8)
    }

    #[inline]
    pub fn read_i8(&mut self) -> Option<i8> {
        self.read_u8().map(|x| x as i8)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Option<u16> {
        self.read_bits(16).map(|x| x as u16)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Option<u32> {
        self.read_bits(32).map(|x| x as u32)
    }

    #[inline]
    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_u32().map(|x| x as i32)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Option<u64> {
        let low = self.read_u32()?;
        let high = self.read_u32()?;
        Some(u64::from(low) | (u64::from(high) << 32))
    }

    #[inline]
    pub fn read_i64(&mut self) -> Option<i64> {
        self.read_u64().map(|x| x as i64)
    }

    #[inline]
    pub fn read_f32(&mut self) -> Option<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Reads `bytes` bytes off the current (possibly unaligned) bit position
    pub fn read_bytes(&mut self, bytes: usize) -> Option<Vec<u8>> {
        if self.bits_remaining() < bytes * 8 {
            return None;
        }

        let mut res = Vec::with_capacity(bytes);
        for _ in 0..bytes {
            res.push(self.read_u8()?);
        }
        Some(res)
    }

    /// Reads a value of `bits` bits that is known not to exceed `max`.
    ///
    /// The raw value `d` may be extended by `2^bits` when the extension still
    /// fits under `max`: in that case one continuation bit decides whether
    /// the extension applies. When the extension could not fit, the
    /// continuation bit is never part of the stream and is not consumed.
    /// The returned value is always <= `max`.
    #[inline]
    pub fn read_bits_max(&mut self, bits: u32, max: u32) -> Option<u32> {
        let data = self.read_u32_bits(bits)?;
        let up = data + (1 << bits);
        if up <= max {
            self.read_bit().map(|x| if x { up } else { data })
        } else {
            Some(data)
        }
    }

    /// If the next bit is on, decode the next chunk of data.
    ///
    /// - `None`: not enough data was available
    /// - `Some(None)`: bit was off so data not decoded
    /// - `Some(x)`: bit was on and data was decoded
    #[inline]
    pub fn if_get<T, F>(&mut self, mut f: F) -> Option<Option<T>>
    where
        F: FnMut(&mut Self) -> Option<T>,
    {
        self.read_bit()
            .and_then(|bit| if bit { f(self).map(Some) } else { Some(None) })
    }
}

/// Mirror image of `BitReader` used to assemble test streams
#[cfg(test)]
pub(crate) struct BitWriter {
    data: Vec<u8>,
    scratch: u64,
    count: u32,
}

#[cfg(test)]
impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter {
            data: Vec::new(),
            scratch: 0,
            count: 0,
        }
    }

    pub fn push_bits(&mut self, value: u64, bits: u32) {
        debug_assert!(bits <= 56);
        self.scratch |= (value & ((1 << bits) - 1)) << self.count;
        self.count += bits;
        while self.count >= 8 {
            self.data.push(self.scratch as u8);
            self.scratch >>= 8;
            self.count -= 8;
        }
    }

    pub fn push_bit(&mut self, on: bool) {
        self.push_bits(u64::from(on), 1);
    }

    pub fn push_u32(&mut self, value: u32) {
        self.push_bits(u64::from(value), 32);
    }

    pub fn push_i32(&mut self, value: i32) {
        self.push_u32(value as u32);
    }

    pub fn push_f32(&mut self, value: f32) {
        self.push_u32(value.to_bits());
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_bits(u64::from(b), 8);
        }
    }

    /// Encode `value` the way `read_bits_max` decodes it
    pub fn push_bits_max(&mut self, value: u32, bits: u32, max: u32) {
        let low = value & ((1 << bits) - 1);
        self.push_bits(u64::from(low), bits);
        if low + (1 << bits) <= max {
            self.push_bit(value >= (1 << bits));
        }
    }

    /// Pad to a byte boundary and return the assembled bytes
    pub fn finish(mut self) -> Vec<u8> {
        if self.count > 0 {
            self.data.push(self.scratch as u8);
        }
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_order() {
        let mut bits = BitReader::new(&[0x69, 0xc5]);
        assert_eq!(bits.read_bits(5), Some(0b01001));
        assert_eq!(bits.read_bits(8), Some(0x2b));
        assert_eq!(bits.read_bits(3), Some(0b110));
        assert!(bits.is_empty());
    }

    #[test]
    fn test_bit_reads() {
        let mut bits = BitReader::new(&[0b1010_1010, 0b0101_0101]);
        assert_eq!(bits.bits_remaining(), 16);
        assert_eq!(bits.read_bit(), Some(false));
        assert_eq!(bits.bits_remaining(), 15);
        assert_eq!(bits.read_bit(), Some(true));
        assert_eq!(bits.read_bit(), Some(false));
        assert_eq!(bits.read_bit(), Some(true));
        assert_eq!(bits.read_bit(), Some(false));
        assert_eq!(bits.read_bit(), Some(true));
        assert_eq!(bits.read_bit(), Some(false));
        assert_eq!(bits.read_bit(), Some(true));
        assert_eq!(bits.read_u8(), Some(0b0101_0101));
        assert_eq!(bits.read_bit(), None);
    }

    #[test]
    fn test_one_bit_roundtrip() {
        // consuming a stream bit by bit and reassembling little endian
        // reproduces the source bytes in order
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0, 0x01];
        let mut bits = BitReader::new(&data);
        let mut out = Vec::new();
        for _ in 0..data.len() {
            let mut byte = 0u8;
            for pos in 0..8 {
                if bits.read_bit().unwrap() {
                    byte |= 1 << pos;
                }
            }
            out.push(byte);
        }
        assert_eq!(&out[..], &data[..]);
        assert!(bits.is_empty());
    }

    #[test]
    fn test_unaligned_bytes() {
        let mut bits = BitReader::new(&[0b1010_1010, 0b0101_0101]);
        assert_eq!(bits.read_bit(), Some(false));
        assert_eq!(bits.read_bytes(2), None);
        assert_eq!(bits.read_bytes(1), Some(vec![0b1101_0101]));
    }

    #[test]
    fn test_u64_is_byte_sequential() {
        let mut bits = BitReader::new(&[
            0xff, 0xfe, 0xfa, 0xf7, 0xf5, 0xf0, 0xb1, 0xb2, 0x01, 0xff, 0xfe, 0xfa, 0xf7, 0xf5,
            0xf0, 0xb1, 0xb3,
        ]);
        assert_eq!(bits.read_u64(), Some(0xb2b1_f0f5_f7fa_feff));
        assert_eq!(bits.read_u8(), Some(0x01));
        assert_eq!(bits.read_u64(), Some(0xb3b1_f0f5_f7fa_feff));
    }

    #[test]
    fn test_f32_read() {
        let bytes = (0.085f32).to_le_bytes();
        let mut bits = BitReader::new(&bytes);
        assert_eq!(bits.read_f32(), Some(0.085));

        // same value is recoverable across a bit of misalignment
        let mut writer = BitWriter::new();
        writer.push_bit(false);
        writer.push_f32(0.085);
        let data = writer.finish();
        let mut bits = BitReader::new(&data);
        assert_eq!(bits.read_bit(), Some(false));
        assert_eq!(bits.read_f32(), Some(0.085));
    }

    #[test]
    fn test_read_bits_max_over() {
        // raw 13, extension 29 exceeds 20: returned as is, continuation
        // bit left in the stream
        let mut bits = BitReader::new(&[0b1_1101]);
        assert_eq!(bits.read_bits_max(4, 20), Some(13));
        assert_eq!(bits.read_bit(), Some(true));
        assert_eq!(bits.bits_remaining(), 3);
    }

    #[test]
    fn test_read_bits_max_extended() {
        // raw 2, extension 18 fits under 20 and the continuation bit is on
        let mut bits = BitReader::new(&[0b1_0010]);
        assert_eq!(bits.read_bits_max(4, 20), Some(18));
        assert_eq!(bits.bits_remaining(), 3);
    }

    #[test]
    fn test_read_bits_max_declined() {
        let mut bits = BitReader::new(&[0b0_0010]);
        assert_eq!(bits.read_bits_max(4, 20), Some(2));
        assert_eq!(bits.bits_remaining(), 3);
    }

    #[test]
    fn test_read_bits_max_bounded() {
        for byte in 0u8..=255 {
            let data = [byte, byte];
            let mut bits = BitReader::new(&data);
            let v = bits.read_bits_max(4, 20).unwrap();
            assert!(v <= 20);
        }
    }

    #[test]
    fn test_if_get() {
        let mut bits = BitReader::new(&[0xff, 0x04]);
        assert_eq!(bits.if_get(BitReader::read_u8), Some(Some(0x7f)));
        assert_eq!(bits.if_get(BitReader::read_u8), Some(None));
        assert_eq!(bits.if_get(BitReader::read_u8), None);
    }

    #[test]
    fn test_bit_offset() {
        let mut bits = BitReader::new(&[0xff, 0xff, 0xff]);
        assert_eq!(bits.bit_offset(), 0);
        bits.read_bits(5).unwrap();
        assert_eq!(bits.bit_offset(), 5);
        bits.read_u8().unwrap();
        assert_eq!(bits.bit_offset(), 13);
    }

    #[test]
    fn test_writer_reader_agree() {
        let mut writer = BitWriter::new();
        writer.push_bits(0b01001, 5);
        writer.push_bits_max(13, 4, 20);
        writer.push_bit(true);
        writer.push_bits_max(18, 4, 20);
        writer.push_f32(16.2966);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(bits.read_bits(5), Some(0b01001));
        assert_eq!(bits.read_bits_max(4, 20), Some(13));
        assert_eq!(bits.read_bit(), Some(true));
        assert_eq!(bits.read_bits_max(4, 20), Some(18));
        assert_eq!(bits.read_f32(), Some(16.2966));
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 1);
        assert_eq!(bit_width(6), 3);
        assert_eq!(bit_width(1023), 10);
        assert_eq!(bit_width(1024), 11);
    }
}
