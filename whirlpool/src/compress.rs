use crate::buffer::Block;
use crate::consts::{C, RC};
use crate::trace::Trace;

/// One application of the round function `ρ` without the key addition.
///
/// Output word `i` takes byte `t` (counted from the most significant end)
/// of input word `i - t` through table `C[t]`.
#[inline(always)]
fn rho(src: &[u64; 8]) -> [u64; 8] {
    let mut out = [0u64; 8];
    for (i, o) in out.iter_mut().enumerate() {
        let mut v = 0;
        for (t, table) in C.iter().enumerate() {
            let w = src[(i + 8 - t) % 8];
            v ^= table[((w >> (56 - 8 * t)) & 0xFF) as usize];
        }
        *o = v;
    }
    out
}

/// Compresses `block` into the chaining value `state`.
pub(crate) fn compress<T: Trace + ?Sized>(state: &mut [u64; 8], block: &Block, trace: &mut T) {
    trace.block(block);

    let mut m = [0u64; 8];
    for (v, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *v = u64::from_be_bytes(buf);
    }

    let mut key = *state;
    let mut s = [0u64; 8];
    for ((a, x), k) in s.iter_mut().zip(m.iter()).zip(key.iter()) {
        *a = x ^ k;
    }
    trace.key(0, &key);
    trace.round(0, &s);

    for (r, rc) in RC.iter().enumerate() {
        key = rho(&key);
        key[0] ^= rc;
        trace.key(r + 1, &key);

        s = rho(&s);
        for (a, k) in s.iter_mut().zip(key.iter()) {
            *a ^= k;
        }
        trace.round(r + 1, &s);
    }

    for ((h, a), x) in state.iter_mut().zip(s.iter()).zip(m.iter()) {
        *h ^= a ^ x;
    }
    trace.feed_forward(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NoTrace;

    #[test]
    fn is_pure() {
        let mut block = [0u8; 64];
        block.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);
        let init = [0x0123_4567_89AB_CDEFu64; 8];

        let mut a = init;
        let mut b = init;
        compress(&mut a, &block, &mut NoTrace);
        compress(&mut b, &block, &mut NoTrace);
        assert_eq!(a, b);
        assert_ne!(a, init);

        // a second call depends only on its arguments
        let mut c = init;
        compress(&mut c, &[0u8; 64], &mut NoTrace);
        compress(&mut b, &[0u8; 64], &mut NoTrace);
        let mut d = a;
        compress(&mut d, &[0u8; 64], &mut NoTrace);
        assert_eq!(b, d);
        assert_ne!(c, d);
    }

    #[test]
    fn first_round_key_of_zero_state() {
        // with an all-zero key every lookup hits entry 0
        let mut k = rho(&[0u64; 8]);
        k[0] ^= RC[0];
        let z = C.iter().fold(0, |acc, t| acc ^ t[0]);
        assert_eq!(k[0], z ^ RC[0]);
        assert!(k[1..].iter().all(|&w| w == z));
    }
}
