use core::fmt;

/// The bit count passed to
/// [`WhirlpoolHasher::update_bits`](crate::WhirlpoolHasher::update_bits)
/// exceeds the bits available in the input slice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidBitLength {
    pub(crate) requested: u64,
    pub(crate) available: u64,
}

impl InvalidBitLength {
    /// Number of bits the caller asked to absorb.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Number of bits present in the input slice.
    pub fn available(&self) -> u64 {
        self.available
    }
}

impl fmt::Display for InvalidBitLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot absorb {} bits from an input of {} bits",
            self.requested, self.available
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidBitLength {}
