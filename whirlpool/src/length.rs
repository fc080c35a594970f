/// Size of the encoded message length in bytes.
pub(crate) const LENGTH_SIZE: usize = 32;

/// 256-bit big-endian count of the bits absorbed so far.
#[derive(Clone, Default)]
pub(crate) struct BitLength([u8; LENGTH_SIZE]);

impl BitLength {
    /// Adds `bits` to the counter, carrying from the least significant byte.
    #[inline]
    pub(crate) fn add(&mut self, bits: u64) {
        let mut carry = 0u16;
        let mut val = bits;
        for byte in self.0.iter_mut().rev() {
            if carry == 0 && val == 0 {
                break;
            }
            carry += (*byte as u16) + (val & 0xFF) as u16;
            *byte = carry as u8;
            carry >>= 8;
            val >>= 8;
        }
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8; LENGTH_SIZE] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_small_values() {
        let mut len = BitLength::default();
        len.add(0);
        assert_eq!(len.as_bytes(), &[0u8; LENGTH_SIZE]);

        len.add(0x1F8);
        len.add(0x08);
        let mut expected = [0u8; LENGTH_SIZE];
        expected[30] = 0x02;
        assert_eq!(len.as_bytes(), &expected);
    }

    #[test]
    fn carries_past_64_bits() {
        let mut len = BitLength::default();
        len.add(u64::MAX);
        len.add(1);

        let mut expected = [0u8; LENGTH_SIZE];
        expected[LENGTH_SIZE - 9] = 1;
        assert_eq!(len.as_bytes(), &expected);

        len.add(u64::MAX);
        let mut expected = [0xFFu8; LENGTH_SIZE];
        expected[..LENGTH_SIZE - 9].iter_mut().for_each(|b| *b = 0);
        expected[LENGTH_SIZE - 9] = 1;
        assert_eq!(len.as_bytes(), &expected);
    }

    #[test]
    fn carries_through_whole_counter() {
        let mut len = BitLength([0xFF; LENGTH_SIZE]);
        len.0[0] = 0;
        len.add(1);

        let mut expected = [0u8; LENGTH_SIZE];
        expected[0] = 1;
        assert_eq!(len.as_bytes(), &expected);
    }
}
