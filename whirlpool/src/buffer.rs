use crate::length::{BitLength, LENGTH_SIZE};

/// Size of the Whirlpool message block in bytes.
pub(crate) const BLOCK_SIZE: usize = 64;
const BLOCK_BITS: usize = 8 * BLOCK_SIZE;

pub(crate) type Block = [u8; BLOCK_SIZE];

/// Bit-granular message buffer.
///
/// Holds at most one partially filled byte, `block[pos]`, whose unused
/// trailing bits are always zero. `bits < BLOCK_BITS` holds between calls.
#[derive(Clone)]
pub(crate) struct BitBuffer {
    bit_len: BitLength,
    block: Block,
    bits: usize,
    pos: usize,
}

impl Default for BitBuffer {
    #[inline]
    fn default() -> Self {
        Self {
            bit_len: BitLength::default(),
            block: [0u8; BLOCK_SIZE],
            bits: 0,
            pos: 0,
        }
    }
}

impl BitBuffer {
    /// Appends the first `len` bits of `data`, most significant bit first,
    /// calling `compress` on every block that becomes full.
    ///
    /// `len` must not exceed `8 * data.len()`.
    pub(crate) fn absorb(&mut self, data: &[u8], mut len: u64, mut compress: impl FnMut(&Block)) {
        debug_assert!(len <= 8 * data.len() as u64);
        self.bit_len.add(len);

        // occupied bits in `block[pos]`
        let rem = self.bits & 7;
        let mut src = 0;

        while len > 8 {
            let b = data[src];
            self.block[self.pos] |= b >> rem;
            self.pos += 1;
            self.bits += 8 - rem;
            if self.bits == BLOCK_BITS {
                compress(&self.block);
                self.bits = 0;
                self.pos = 0;
            }
            self.block[self.pos] = spill(b, rem);
            self.bits += rem;
            len -= 8;
            src += 1;
        }

        // 0 <= len <= 8, the remaining bits (if any) are in `data[src]`
        let b = if len > 0 {
            let b = data[src] & (0xFFu8 << (8 - len));
            self.block[self.pos] |= b >> rem;
            b
        } else {
            0
        };
        let len = len as usize;

        if rem + len < 8 {
            self.bits += len;
        } else {
            self.pos += 1;
            self.bits += 8 - rem;
            if self.bits == BLOCK_BITS {
                compress(&self.block);
                self.bits = 0;
                self.pos = 0;
            }
            self.block[self.pos] = spill(b, rem);
            self.bits += len - (8 - rem);
        }
    }

    /// Appends the `1` bit, zero padding and the 256-bit message length,
    /// compressing the final one or two blocks.
    pub(crate) fn finalize(&mut self, mut compress: impl FnMut(&Block)) {
        self.block[self.pos] |= 0x80 >> (self.bits & 7);
        self.pos += 1;

        if self.pos > BLOCK_SIZE - LENGTH_SIZE {
            self.block[self.pos..].iter_mut().for_each(|b| *b = 0);
            compress(&self.block);
            self.pos = 0;
        }
        self.block[self.pos..BLOCK_SIZE - LENGTH_SIZE]
            .iter_mut()
            .for_each(|b| *b = 0);
        self.block[BLOCK_SIZE - LENGTH_SIZE..].copy_from_slice(self.bit_len.as_bytes());
        compress(&self.block);
    }
}

/// Bits of `b` that do not fit next to `rem` occupied bits.
#[inline(always)]
fn spill(b: u8, rem: usize) -> u8 {
    ((b as u16) << (8 - rem)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absorb_all(buf: &mut BitBuffer, data: &[u8], len: u64) -> usize {
        let mut blocks = 0;
        buf.absorb(data, len, |_| blocks += 1);
        blocks
    }

    #[test]
    fn packs_partial_bytes() {
        let mut buf = BitBuffer::default();
        assert_eq!(absorb_all(&mut buf, &[0b1010_0000], 3), 0);
        assert_eq!((buf.bits, buf.pos), (3, 0));
        assert_eq!(buf.block[0], 0b1010_0000);

        // trailing bits past the requested length are dropped
        assert_eq!(absorb_all(&mut buf, &[0b1111_1111, 0xFF], 12), 0);
        assert_eq!((buf.bits, buf.pos), (15, 1));
        assert_eq!(buf.block[..2], [0b1011_1111, 0b1111_1110]);

        assert_eq!(absorb_all(&mut buf, &[0b1000_0000], 1), 0);
        assert_eq!((buf.bits, buf.pos), (16, 2));
        assert_eq!(buf.block[..3], [0b1011_1111, 0b1111_1111, 0]);
    }

    #[test]
    fn compresses_full_blocks() {
        let data = [0xA5u8; 3 * BLOCK_SIZE];

        let mut buf = BitBuffer::default();
        assert_eq!(absorb_all(&mut buf, &data, 8 * data.len() as u64), 3);
        assert_eq!((buf.bits, buf.pos), (0, 0));

        let mut buf = BitBuffer::default();
        assert_eq!(absorb_all(&mut buf, &data, 5), 0);
        assert_eq!(absorb_all(&mut buf, &data, 507), 1);
        assert_eq!((buf.bits, buf.pos), (0, 0));

        let mut buf = BitBuffer::default();
        assert_eq!(absorb_all(&mut buf, &data, 1), 0);
        assert_eq!(absorb_all(&mut buf, &data, 8 * 128), 2);
        assert_eq!((buf.bits, buf.pos), (1, 0));
        assert_eq!(buf.block[0], 0x80);
    }

    #[test]
    fn zero_length_is_noop() {
        let mut buf = BitBuffer::default();
        absorb_all(&mut buf, &[0xFF], 5);
        let before = buf.block;
        assert_eq!(absorb_all(&mut buf, &[], 0), 0);
        assert_eq!((buf.bits, buf.pos), (5, 0));
        assert_eq!(buf.block, before);
        assert_eq!(buf.bit_len.as_bytes()[31], 5);
    }

    #[test]
    fn finalize_needs_extra_block_past_32_bytes() {
        let data = [0u8; BLOCK_SIZE];
        for (len, expected) in [(0, 1), (31, 1), (32, 2), (63, 2)].iter() {
            let mut buf = BitBuffer::default();
            absorb_all(&mut buf, &data, 8 * *len as u64);
            let mut blocks = 0;
            buf.finalize(|_| blocks += 1);
            assert_eq!(blocks, *expected, "len = {}", len);
        }
    }

    #[test]
    fn finalize_writes_marker_and_length() {
        let mut buf = BitBuffer::default();
        absorb_all(&mut buf, &[0xFF], 3);
        let mut last = [0u8; BLOCK_SIZE];
        buf.finalize(|block| last = *block);
        assert_eq!(last[0], 0b1111_0000);
        assert!(last[1..BLOCK_SIZE - 1].iter().all(|&b| b == 0));
        assert_eq!(last[BLOCK_SIZE - 1], 3);
    }
}
