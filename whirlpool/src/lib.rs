//! An implementation of the [Whirlpool][1] cryptographic hash algorithm.
//!
//! This is the algorithm recommended by NESSIE (New European Schemes for
//! Signatures, Integrity and Encryption; an European research project) and
//! standardized in ISO/IEC 10118-3.
//!
//! The constants used by Whirlpool were changed twice (2001 and 2003) - this
//! crate only implements the most recent standard. The two older Whirlpool
//! implementations (sometimes called Whirlpool-0 (pre 2001) and Whirlpool-T
//! (pre 2003)) were not used much anyway (both have never been recommended
//! by NESSIE).
//!
//! For details see <http://www.larc.usp.br/~pbarreto/WhirlpoolPage.html>.
//!
//! # Usage
//!
//! ```rust
//! use whirlpool::{Whirlpool, Digest};
//! use hex_literal::hex;
//!
//! // create a hasher object, to use it do not forget to import `Digest` trait
//! let mut hasher = Whirlpool::new();
//! // write input message
//! hasher.update(b"Hello Whirlpool");
//! // read hash digest (it will consume hasher)
//! let result = hasher.finalize();
//!
//! assert_eq!(result[..], hex!("
//!     8eaccdc136903c458ea0b1376be2a5fc9dc5b8ce8892a3b4f43366e2610c206c
//!     a373816495e63db0fff2ff25f75aa7162f332c9f518c3036456502a8414d300a
//! ")[..]);
//! ```
//!
//! Messages do not have to be a whole number of bytes. Bits are taken most
//! significant first, and the unused trailing bits of the last byte are
//! ignored:
//!
//! ```rust
//! use whirlpool::{Whirlpool, Digest};
//! use hex_literal::hex;
//!
//! let mut hasher = Whirlpool::new();
//! // the three-bit message `101`
//! hasher.update_bits(&[0b1011_1111], 3).unwrap();
//!
//! assert_eq!(hasher.finalize()[..], hex!("
//!     8a487be22ba5a570e9938ef356fdaf7af1b67d36ea853a935c4d88e6b0804cb5
//!     b3f5c9b423d770218a91a645b08d616a01bbc711242867fd0849b6f5640ce511
//! ")[..]);
//! ```
//!
//! Also see [RustCrypto/hashes][2] readme.
//!
//! [1]: https://en.wikipedia.org/wiki/Whirlpool_(hash_function)
//! [2]: https://github.com/RustCrypto/hashes

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub use digest::{self, Digest};

mod buffer;
mod compress;
mod consts;
mod error;
mod length;
mod trace;

pub use error::InvalidBitLength;
#[cfg(feature = "log")]
pub use trace::LogTrace;
pub use trace::{NoTrace, Trace};

use buffer::{BitBuffer, Block};
use core::fmt;
use digest::{
    consts::U64, core_api::BlockSizeUser, FixedOutput, FixedOutputReset, HashMarker, Output,
    OutputSizeUser, Reset, Update,
};

/// Whirlpool hasher state with a pluggable [`Trace`] sink.
///
/// Finalizing consumes the hasher (or resets it, with
/// [`FixedOutputReset`]), so a finished state can never absorb more data.
#[derive(Clone)]
pub struct WhirlpoolHasher<T: Trace = NoTrace> {
    buffer: BitBuffer,
    state: [u64; 8],
    trace: T,
}

/// Whirlpool hasher state.
pub type Whirlpool = WhirlpoolHasher<NoTrace>;

impl<T: Trace> WhirlpoolHasher<T> {
    /// Creates a hasher which reports intermediate values to `trace`.
    pub fn with_trace(trace: T) -> Self {
        Self {
            buffer: BitBuffer::default(),
            state: [0u64; 8],
            trace,
        }
    }

    /// Absorbs the first `bit_len` bits of `data`, most significant bit first.
    ///
    /// Bits of `data` past `bit_len` are ignored. Fails without touching
    /// the state if `data` holds fewer than `bit_len` bits.
    pub fn update_bits(&mut self, data: &[u8], bit_len: u64) -> Result<(), InvalidBitLength> {
        let available = (data.len() as u64).saturating_mul(8);
        if bit_len > available {
            return Err(InvalidBitLength {
                requested: bit_len,
                available,
            });
        }
        let used = (bit_len / 8 + u64::from(bit_len % 8 != 0)) as usize;
        self.absorb(&data[..used], bit_len);
        Ok(())
    }

    #[inline]
    fn absorb(&mut self, data: &[u8], bit_len: u64) {
        let Self {
            buffer,
            state,
            trace,
        } = self;
        buffer.absorb(data, bit_len, |block: &Block| {
            compress::compress(&mut *state, block, &mut *trace)
        });
    }

    fn finalize_inner(&mut self, out: &mut Output<Self>) {
        let Self {
            buffer,
            state,
            trace,
        } = self;
        buffer.finalize(|block: &Block| compress::compress(&mut *state, block, &mut *trace));

        for (chunk, v) in out.chunks_exact_mut(8).zip(state.iter()) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
    }
}

impl<T: Trace> HashMarker for WhirlpoolHasher<T> {}

impl<T: Trace> BlockSizeUser for WhirlpoolHasher<T> {
    type BlockSize = U64;
}

impl<T: Trace> OutputSizeUser for WhirlpoolHasher<T> {
    type OutputSize = U64;
}

impl<T: Trace> Update for WhirlpoolHasher<T> {
    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.absorb(data, 8 * data.len() as u64);
    }
}

impl<T: Trace> FixedOutput for WhirlpoolHasher<T> {
    #[inline]
    fn finalize_into(mut self, out: &mut Output<Self>) {
        self.finalize_inner(out);
    }
}

impl<T: Trace> FixedOutputReset for WhirlpoolHasher<T> {
    #[inline]
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        self.finalize_inner(out);
        Reset::reset(self);
    }
}

impl<T: Trace> Reset for WhirlpoolHasher<T> {
    #[inline]
    fn reset(&mut self) {
        self.buffer = BitBuffer::default();
        self.state = [0u64; 8];
    }
}

impl<T: Trace + Default> Default for WhirlpoolHasher<T> {
    #[inline]
    fn default() -> Self {
        Self::with_trace(T::default())
    }
}

impl<T: Trace> fmt::Debug for WhirlpoolHasher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Whirlpool { ... }")
    }
}

#[cfg(feature = "std")]
impl<T: Trace> std::io::Write for WhirlpoolHasher<T> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Update::update(self, buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Computes the Whirlpool digest of `salt || message`.
///
/// ```rust
/// use whirlpool::{hash_with_salt, Whirlpool, Digest};
///
/// let salted = hash_with_salt("abc", Some(&b"pepper"[..]));
/// assert_eq!(salted, Whirlpool::digest(b"pepperabc"));
/// assert_eq!(hash_with_salt("abc", None), Whirlpool::digest(b"abc"));
/// ```
pub fn hash_with_salt(message: impl AsRef<[u8]>, salt: Option<&[u8]>) -> Output<Whirlpool> {
    let mut hasher = Whirlpool::default();
    if let Some(salt) = salt {
        Update::update(&mut hasher, salt);
    }
    Update::update(&mut hasher, message.as_ref());
    hasher.finalize_fixed()
}

/// Applies the Whirlpool compression function to each block in turn.
///
/// `state` is the chaining value; a new message starts from all zeros.
/// No padding or length encoding is performed.
#[cfg(feature = "compress")]
pub fn compress(state: &mut [u64; 8], blocks: &[[u8; 64]]) {
    for block in blocks {
        compress::compress(state, block, &mut NoTrace);
    }
}
