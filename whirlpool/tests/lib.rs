use digest::dev::fixed_reset_test;
use hex_literal::hex;
use whirlpool::{hash_with_salt, Digest, Trace, Whirlpool, WhirlpoolHasher};

fn check(input: &[u8], output: &[u8]) {
    if let Some(desc) = fixed_reset_test::<Whirlpool>(input, output) {
        panic!(
            "failed on input of {} bytes: {}\n{:02x?}",
            input.len(),
            desc,
            input
        );
    }
}

#[test]
fn iso_vectors() {
    check(
        b"",
        &hex!("
            19fa61d75522a4669b44e39c1d2e1726c530232130d407f89afee0964997f7a7
            3e83be698b288febcf88e3e03c4f0757ea8964e59b63d93708b138cc42a66eb3
        "),
    );
    check(
        b"a",
        &hex!("
            8aca2602792aec6f11a67206531fb7d7f0dff59413145e6973c45001d0087b42
            d11bc645413aeff63a42391a39145a591a92200d560195e53b478584fdae231a
        "),
    );
    check(
        b"abc",
        &hex!("
            4e2448a4c6f486bb16b6562c73b4020bf3043e3a731bce721ae1b303d97e6d4c
            7181eebdb6c57e277d0e34957114cbd6c797fc9d95d8b582d225292076d4eef5
        "),
    );
    check(
        b"message digest",
        &hex!("
            378c84a4126e2dc6e56dcc7458377aac838d00032230f53ce1f5700c0ffb4d3b
            8421557659ef55c106b4b52ac5a4aaa692ed920052838f3362e86dbd37a8903e
        "),
    );
    check(
        b"abcdefghijklmnopqrstuvwxyz",
        &hex!("
            f1d754662636ffe92c82ebb9212a484a8d38631ead4238f5442ee13b8054e41b
            08bf2a9251c30b6a0b8aae86177ab4a6f68f673e7207865d5d9819a3dba4eb3b
        "),
    );
    check(
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        &hex!("
            dc37e008cf9ee69bf11f00ed9aba26901dd7c28cdec066cc6af42e40f82f3a1e
            08eba26629129d8fb7cb57211b9281a65517cc879d7b962142c65f5a7af01467
        "),
    );
    check(
        "1234567890".repeat(8).as_bytes(),
        &hex!("
            466ef18babb0154d25b9d38a6414f5c08784372bccb204d6549c4afadb601429
            4d5bd8df2a6c44e538cd047b2681a51a2c60481e88c5a20b2c2a80cf3a9a083b
        "),
    );
    check(
        b"abcdbcdecdefdefgefghfghighijhijk",
        &hex!("
            2a987ea40f917061f5d6f0a0e4644f488a7a5a52deee656207c562f988e95c69
            16bdc8031bc5be1b7b947639fe050b56939baaa0adff9ae6745b7b181c3be3fd
        "),
    );
}

#[test]
fn iso_million_a() {
    let expected = hex!("
        0c99005beb57eff50a7cf005560ddf5d29057fd86b20bfd62deca0f1ccea4af5
        1fc15490eddc47af32bb2b66c34ff9ad8c6008ad677f77126953b226e4ed8b01
    ");
    let data = vec![b'a'; 1_000_000];
    assert_eq!(Whirlpool::digest(&data)[..], expected[..]);

    let mut hasher = Whirlpool::new();
    for chunk in data.chunks(1000) {
        hasher.update(chunk);
    }
    assert_eq!(hasher.finalize()[..], expected[..]);
}

#[test]
fn zero_bit_strings() {
    let data = [0u8; 128];
    let vectors: &[(u64, [u8; 64])] = &[
        (1, hex!("
            e384d540e0bdfd28c8529177343b31183fb40c20f960b0bcdce0513a382f96a3
            832099ebb6aabdb71b0ea2e30177f698ea703de51f93cf3cfea6d3171b955383
        ")),
        (7, hex!("
            fca3e2f062017253c68abfc45c05ab761e15b7350ac2ae347ffffcc1e0aa09ed
            5aeaaa2d35bb2eb28a8d3710a52e92a62e11ecb4b2698af32ed35a31fd6c81e9
        ")),
        (12, hex!("
            8879112fa4e7949ef2e5d5d1a4a0d47a15b390479733ab07fbaf66d091dc70db
            5df15c8d8a45b9bb5304c9c27bf71713ee6b3c4f171c9d9760e024d59bded93f
        ")),
        (500, hex!("
            1457f285152ab217a84677887b926f50453439aa1ec35601ae8b6c75b42103f3
            9fa32d7fb479857b56743442da94ebd19158f20da5e8975c25dc826118a76541
        ")),
        (511, hex!("
            b9d19de07acc38c241d11d8d6fca817c347875bca73f5f38ce4e0ff1d3f32d82
            69666fcd34bbbac2f24cc63256e6cf9f738a9672a9a8b613c625848cac4bbe84
        ")),
        (512, hex!("
            15cfa7c1df8e0d6753d9a9aed0642867e26bb3cf11df7dac96f60c274e060fda
            941ec41eaff5f7375f3839632516ae9a831d9f2fbe2bd0ff02e9cf16e99ebd03
        ")),
        (513, hex!("
            5f46cec362d7db53ee93768ac59e2891f16999241def2d38e696b9c6c470f0d9
            68c7c997cb6efd66497dbb3ecee0e502c0b915f8d0f47502d85135fd0c9f986d
        ")),
    ];

    for (len, expected) in vectors.iter() {
        let mut hasher = Whirlpool::new();
        hasher.update_bits(&data, *len).unwrap();
        assert_eq!(hasher.finalize()[..], expected[..], "L = {}", len);
    }
}

#[test]
fn partial_byte_input() {
    let expected = hex!("
        8a487be22ba5a570e9938ef356fdaf7af1b67d36ea853a935c4d88e6b0804cb5
        b3f5c9b423d770218a91a645b08d616a01bbc711242867fd0849b6f5640ce511
    ");
    // only the leading `101` is hashed, whatever follows it
    for byte in [0b1010_0000u8, 0b1011_1111, 0b1010_1010].iter() {
        let mut hasher = Whirlpool::new();
        hasher.update_bits(&[*byte, 0xFF], 3).unwrap();
        assert_eq!(hasher.finalize()[..], expected[..]);
    }

    let mut hasher = Whirlpool::new();
    hasher.update_bits(b"abc", 20).unwrap();
    assert_eq!(
        hasher.finalize()[..],
        hex!("
            b424a0f2695513d0532ac95dc92d46d9a3a9d3fbdb4e6efdc3871e6a8a9c1a03
            f9afd868849933b1179c49814d29f6968581f885dbc81012a257cf7c4fac5213
        ")[..]
    );
}

/// Copies `len` bits of `data` starting at bit `start` into fresh bytes.
fn bit_range(data: &[u8], start: usize, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; (len + 7) / 8];
    for i in 0..len {
        let bit = (data[(start + i) / 8] >> (7 - (start + i) % 8)) & 1;
        out[i / 8] |= bit << (7 - i % 8);
    }
    out
}

#[test]
fn bit_chunks_match_byte_input() {
    let msg: Vec<u8> = (0..150u8).map(|i| i.wrapping_mul(37) ^ 0x5A).collect();
    let expected = Whirlpool::digest(&msg);
    let total = 8 * msg.len();

    for piece in 1..=17 {
        let mut hasher = Whirlpool::new();
        let mut pos = 0;
        while pos < total {
            let n = piece.min(total - pos);
            hasher.update_bits(&bit_range(&msg, pos, n), n as u64).unwrap();
            pos += n;
        }
        assert_eq!(hasher.finalize(), expected, "piece = {} bits", piece);
    }
}

#[test]
fn byte_chunks_match_single_update() {
    let data: Vec<u8> = (0..160u32).map(|i| (i * 7 + 3) as u8).collect();

    for len in 0..=data.len() {
        let expected = Whirlpool::digest(&data[..len]);
        for piece in 1..=len.max(1) {
            let mut hasher = Whirlpool::new();
            for chunk in data[..len].chunks(piece) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize(), expected, "len = {}, piece = {}", len, piece);
        }
    }
}

#[test]
fn output_is_always_64_bytes() {
    assert_eq!(<Whirlpool as Digest>::output_size(), 64);
    for len in [0usize, 1, 31, 32, 33, 63, 64, 65, 1000].iter() {
        assert_eq!(Whirlpool::digest(&vec![0x42u8; *len]).len(), 64);
    }
}

#[test]
fn invalid_bit_length_leaves_state_untouched() {
    let mut hasher = Whirlpool::new();
    hasher.update(b"ab");

    let err = hasher.update_bits(&[0xFF], 9).unwrap_err();
    assert_eq!(err.requested(), 9);
    assert_eq!(err.available(), 8);
    assert_eq!(
        err.to_string(),
        "cannot absorb 9 bits from an input of 8 bits"
    );

    hasher.update(b"c");
    assert_eq!(hasher.finalize(), Whirlpool::digest(b"abc"));
}

#[test]
fn finalize_reset_starts_over() {
    let mut hasher = Whirlpool::new();
    hasher.update(b"message digest");
    let first = hasher.finalize_reset();
    hasher.update(b"message digest");
    assert_eq!(hasher.finalize(), first);
}

#[test]
fn salt_is_prepended() {
    assert_eq!(
        hash_with_salt("abc", Some(&b"pepper"[..]))[..],
        hex!("
            16f63b3eed05a6ecdde5257bd76b5c600dda68ef1129ce46e7ae2227fec74622
            15583c343b60c51794380cdfe88378d77f56e5e68c6f839747feb9595be3b76c
        ")[..]
    );

    let salt = [0x11u8; 40];
    let msg = b"abcdbcdecdefdefgefghfghighijhijk";
    let mut joined = salt.to_vec();
    joined.extend_from_slice(msg);
    assert_eq!(hash_with_salt(msg, Some(&salt[..])), Whirlpool::digest(&joined));
    assert_eq!(hash_with_salt(msg, None), Whirlpool::digest(msg));
    assert_eq!(hash_with_salt("", Some(&b""[..])), Whirlpool::digest(b""));
}

#[test]
fn single_bit_flip_changes_half_the_output() {
    let a = Whirlpool::digest(b"abc");
    let b = Whirlpool::digest(b"abb");
    let diff: u32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum();
    assert!(diff > 128 && diff < 384, "{} bits differ", diff);
}

#[test]
fn io_write_matches_update() {
    use std::io::Write;

    let data = "1234567890".repeat(20);
    let mut hasher = Whirlpool::new();
    hasher.write_all(data.as_bytes()).unwrap();
    hasher.flush().unwrap();
    assert_eq!(hasher.finalize(), Whirlpool::digest(data.as_bytes()));
}

#[derive(Default)]
struct Recorder {
    blocks: usize,
    keys: Vec<(usize, [u64; 8])>,
    rounds: Vec<usize>,
    hashes: Vec<[u64; 8]>,
}

impl Trace for Recorder {
    fn block(&mut self, _block: &[u8; 64]) {
        self.blocks += 1;
    }

    fn key(&mut self, round: usize, key: &[u64; 8]) {
        self.keys.push((round, *key));
    }

    fn round(&mut self, round: usize, _state: &[u64; 8]) {
        self.rounds.push(round);
    }

    fn feed_forward(&mut self, hash: &[u64; 8]) {
        self.hashes.push(*hash);
    }
}

fn traced(data: &[u8], rec: &mut Recorder) -> Vec<u8> {
    use digest::{FixedOutput, Update};

    let mut hasher = WhirlpoolHasher::with_trace(rec);
    Update::update(&mut hasher, data);
    FixedOutput::finalize_fixed(hasher).to_vec()
}

#[test]
fn trace_sees_every_round() {
    let mut rec = Recorder::default();
    let out = traced(b"abc", &mut rec);
    assert_eq!(out[..], Whirlpool::digest(b"abc")[..]);

    assert_eq!(rec.blocks, 1);
    assert_eq!(rec.rounds, (0..=10).collect::<Vec<_>>());
    let key_rounds: Vec<usize> = rec.keys.iter().map(|(r, _)| *r).collect();
    assert_eq!(key_rounds, (0..=10).collect::<Vec<_>>());
    assert_eq!(rec.keys[0].1, [0u64; 8]);

    let last: Vec<u8> = rec.hashes[0].iter().flat_map(|w| w.to_be_bytes().to_vec()).collect();
    assert_eq!(last, out);
}

#[test]
fn trace_follows_chaining_value() {
    // 33 bytes leave no room for the length, so padding takes a second block
    let data = [0x61u8; 33];
    let mut rec = Recorder::default();
    let out = traced(&data, &mut rec);
    assert_eq!(out[..], Whirlpool::digest(&data[..])[..]);

    assert_eq!(rec.blocks, 2);
    assert_eq!(rec.rounds.len(), 22);
    assert_eq!(rec.hashes.len(), 2);
    assert_eq!(rec.keys[11], (0, rec.hashes[0]));
}

#[cfg(feature = "log")]
#[test]
fn log_trace_does_not_change_digest() {
    use digest::{FixedOutput, Update};

    let mut hasher = WhirlpoolHasher::with_trace(whirlpool::LogTrace);
    Update::update(&mut hasher, b"abc");
    assert_eq!(
        FixedOutput::finalize_fixed(hasher),
        Whirlpool::digest(b"abc")
    );
}

#[cfg(feature = "compress")]
#[test]
fn raw_compress_of_padded_block() {
    let mut block = [0u8; 64];
    block[..3].copy_from_slice(b"abc");
    block[3] = 0x80;
    block[63] = 24;

    let mut state = [0u64; 8];
    whirlpool::compress(&mut state, &[block]);

    let out: Vec<u8> = state.iter().flat_map(|w| w.to_be_bytes().to_vec()).collect();
    assert_eq!(out[..], Whirlpool::digest(b"abc")[..]);
}
