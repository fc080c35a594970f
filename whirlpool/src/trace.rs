//! Observation hooks for the intermediate values of the compression function.
//!
//! Every hook has an empty default body, so a sink only implements the points
//! it cares about. Sinks only get shared references and cannot influence
//! the digest.
//!
//! ```rust
//! use whirlpool::digest::{FixedOutput, Update};
//! use whirlpool::{Trace, WhirlpoolHasher};
//!
//! #[derive(Default)]
//! struct RoundCounter(usize);
//!
//! impl Trace for RoundCounter {
//!     fn round(&mut self, round: usize, _state: &[u64; 8]) {
//!         if round > 0 {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let mut counter = RoundCounter::default();
//! let mut hasher = WhirlpoolHasher::with_trace(&mut counter);
//! hasher.update(b"abc");
//! hasher.finalize_fixed();
//! // "abc" is padded into a single block of ten rounds
//! assert_eq!(counter.0, 10);
//! ```

/// Receiver of the intermediate values of each compressed block.
pub trait Trace {
    /// Called with the raw 64-byte block before it is compressed.
    fn block(&mut self, _block: &[u8; 64]) {}

    /// Called after the key schedule produced the round key `K^round`.
    ///
    /// Round `0` is the chaining value used as the initial key.
    fn key(&mut self, _round: usize, _key: &[u64; 8]) {}

    /// Called after round `round` updated the cipher state.
    ///
    /// Round `0` is the block XOR-ed with the initial key.
    fn round(&mut self, _round: usize, _state: &[u64; 8]) {}

    /// Called with the new chaining value after the Miyaguchi-Preneel feed-forward.
    fn feed_forward(&mut self, _hash: &[u64; 8]) {}
}

/// Trace sink which discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl Trace for NoTrace {}

impl<T: Trace + ?Sized> Trace for &mut T {
    #[inline]
    fn block(&mut self, block: &[u8; 64]) {
        (**self).block(block)
    }

    #[inline]
    fn key(&mut self, round: usize, key: &[u64; 8]) {
        (**self).key(round, key)
    }

    #[inline]
    fn round(&mut self, round: usize, state: &[u64; 8]) {
        (**self).round(round, state)
    }

    #[inline]
    fn feed_forward(&mut self, hash: &[u64; 8]) {
        (**self).feed_forward(hash)
    }
}

/// Trace sink which writes every hook as a `trace`-level [`log`] record.
///
/// Matrices are printed one row per line as big-endian hex bytes.
#[cfg(feature = "log")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

#[cfg(feature = "log")]
impl Trace for LogTrace {
    fn block(&mut self, block: &[u8; 64]) {
        log::trace!(target: "whirlpool", "block:\n{}", Rows(&words(block)));
    }

    fn key(&mut self, round: usize, key: &[u64; 8]) {
        log::trace!(target: "whirlpool", "K_{}:\n{}", round, Rows(key));
    }

    fn round(&mut self, round: usize, state: &[u64; 8]) {
        log::trace!(target: "whirlpool", "state after round {}:\n{}", round, Rows(state));
    }

    fn feed_forward(&mut self, hash: &[u64; 8]) {
        log::trace!(target: "whirlpool", "hash:\n{}", Rows(hash));
    }
}

#[cfg(feature = "log")]
fn words(block: &[u8; 64]) -> [u64; 8] {
    let mut words = [0u64; 8];
    for (w, chunk) in words.iter_mut().zip(block.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *w = u64::from_be_bytes(buf);
    }
    words
}

#[cfg(feature = "log")]
struct Rows<'a>(&'a [u64; 8]);

#[cfg(feature = "log")]
impl core::fmt::Display for Rows<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str("   ")?;
            for byte in row.to_be_bytes().iter() {
                write!(f, " {:02X}", byte)?;
            }
        }
        Ok(())
    }
}
