//! Centered binomial distribution noise sampling (§4.9) from a PRF byte
//! stream. The PRF itself (SHAKE-256 keyed by seed and nonce, §4.9.1) is out
//! of scope for this crate and is modeled as an external collaborator via
//! the `Prf` trait, the one place this crate exercises a capability
//! interface rather than a free function (§9).

use crate::error::CoreError;
use crate::params::N;
use crate::poly::Poly;

pub const ETA2: usize = crate::params::ETA2;
pub const ETA2_BYTES: usize = ETA2 * N / 4;
pub const ETA3_BYTES: usize = 3 * N / 4;

/// A pseudorandom function keyed by a 32-byte seed and a single-byte nonce,
/// producing an arbitrary-length byte stream (§4.9.1).
pub trait Prf {
    fn fill(&self, seed: &[u8; 32], nonce: u8, out: &mut [u8]);

    /// Fills four buffers from four consecutive nonces. The default
    /// implementation calls `fill` four times; an implementation backed by
    /// a SIMD-parallel Keccak (4-way SHAKE) can override this to amortize
    /// that parallelism, which is the entire reason this method exists
    /// separately from `fill` (§4.9.1).
    fn fill_4x(&self, seed: &[u8; 32], nonces: [u8; 4], outs: [&mut [u8]; 4]) {
        let [o0, o1, o2, o3] = outs;
        self.fill(seed, nonces[0], o0);
        self.fill(seed, nonces[1], o1);
        self.fill(seed, nonces[2], o2);
        self.fill(seed, nonces[3], o3);
    }
}

fn load24_le(x: &[u8]) -> u32 {
    x[0] as u32 | (x[1] as u32) << 8 | (x[2] as u32) << 16
}

fn load32_le(x: &[u8]) -> u32 {
    x[0] as u32 | (x[1] as u32) << 8 | (x[2] as u32) << 16 | (x[3] as u32) << 24
}

/// eta=2 centered binomial sampling: each coefficient is the difference of
/// two independent Bin(2, 1/2) variables, derived from 4 bits of randomness
/// (§4.9).
fn cbd2(buf: &[u8; ETA2_BYTES]) -> Poly {
    let mut r: Poly = [0; N];
    for i in 0..N / 8 {
        let t = load32_le(&buf[4 * i..4 * i + 4]);
        let mut d = t & 0x5555_5555;
        d += (t >> 1) & 0x5555_5555;
        for j in 0..8 {
            let a = (d >> (4 * j)) & 0x3;
            let b = (d >> (4 * j + 2)) & 0x3;
            r[8 * i + j] = a as i16 - b as i16;
        }
    }
    r
}

/// eta=3 centered binomial sampling: difference of two Bin(3, 1/2)
/// variables, derived from 6 bits of randomness (§4.9).
fn cbd3(buf: &[u8; ETA3_BYTES]) -> Poly {
    let mut r: Poly = [0; N];
    for i in 0..N / 4 {
        let t = load24_le(&buf[3 * i..3 * i + 3]);
        let mut d = t & 0x0024_9249;
        d += (t >> 1) & 0x0024_9249;
        d += (t >> 2) & 0x0024_9249;
        for j in 0..4 {
            let a = (d >> (6 * j)) & 0x7;
            let b = (d >> (6 * j + 3)) & 0x7;
            r[4 * i + j] = a as i16 - b as i16;
        }
    }
    r
}

/// Samples eta1 noise from an already-expanded PRF byte stream. `eta1` must
/// be 2 or 3 (the only values any ML-KEM parameter set uses, §1 Non-goals);
/// `buf` must be sized `eta1*N/4` bytes.
pub fn poly_cbd_eta1(buf: &[u8], eta1: usize) -> Poly {
    match eta1 {
        2 => {
            let arr: &[u8; ETA2_BYTES] = buf.try_into().expect("eta1=2 buffer must be 128 bytes");
            cbd2(arr)
        }
        3 => {
            let arr: &[u8; ETA3_BYTES] = buf.try_into().expect("eta1=3 buffer must be 192 bytes");
            cbd3(arr)
        }
        other => panic!("unsupported eta1={other}, ML-KEM only defines 2 or 3"),
    }
}

/// Samples eta2 noise (always eta=2 across every ML-KEM parameter set, §1).
pub fn poly_cbd_eta2(buf: &[u8; ETA2_BYTES]) -> Poly {
    cbd2(buf)
}

/// Fallible counterpart to `poly_cbd_eta1` for a boundary fed an externally
/// supplied PRF buffer of unverified length and eta, rather than a value
/// this crate's own batched noise-generation entry points constructed
/// internally (those stay panicking/total, since their buffer length is
/// this crate's own invariant, not external input, §1.1).
pub fn poly_cbd_eta1_checked(buf: &[u8], eta1: usize) -> Result<Poly, CoreError> {
    match eta1 {
        2 => {
            let arr: &[u8; ETA2_BYTES] = buf.try_into().map_err(|_| CoreError::WrongBufferLength {
                expected: ETA2_BYTES,
                actual: buf.len(),
            })?;
            Ok(cbd2(arr))
        }
        3 => {
            let arr: &[u8; ETA3_BYTES] = buf.try_into().map_err(|_| CoreError::WrongBufferLength {
                expected: ETA3_BYTES,
                actual: buf.len(),
            })?;
            Ok(cbd3(arr))
        }
        other => Err(CoreError::UnsupportedEta(other)),
    }
}

/// Draws four independent eta1-noise polynomials at consecutive nonces
/// `base..base+4` in one PRF batch (§4.9).
///
/// Buffers are stack arrays sized to the largest eta1 buffer (`ETA3_BYTES`)
/// and sliced down to the `eta1`-specific length actually used — no heap
/// allocation on this hot path (§1, §3, §5).
pub fn poly_getnoise_eta1_4x(prf: &impl Prf, seed: &[u8; 32], base: u8, eta1: usize) -> [Poly; 4] {
    let len = eta1 * N / 4;
    let mut b0 = [0u8; ETA3_BYTES];
    let mut b1 = [0u8; ETA3_BYTES];
    let mut b2 = [0u8; ETA3_BYTES];
    let mut b3 = [0u8; ETA3_BYTES];
    prf.fill_4x(
        seed,
        [base, base + 1, base + 2, base + 3],
        [&mut b0[..len], &mut b1[..len], &mut b2[..len], &mut b3[..len]],
    );
    [
        poly_cbd_eta1(&b0[..len], eta1),
        poly_cbd_eta1(&b1[..len], eta1),
        poly_cbd_eta1(&b2[..len], eta1),
        poly_cbd_eta1(&b3[..len], eta1),
    ]
}

/// Draws the classic IND-CPA keygen noise batch: two eta1 polynomials
/// followed by two eta2 polynomials, all from one 4-way PRF batch (§4.9).
///
/// The eta1 buffers are stack arrays sized to `ETA3_BYTES` and sliced down
/// to `eta1*N/4`; no heap allocation on this hot path (§1, §3, §5).
pub fn poly_getnoise_eta1122_4x(
    prf: &impl Prf,
    seed: &[u8; 32],
    base: u8,
    eta1: usize,
) -> [Poly; 4] {
    let eta1_len = eta1 * N / 4;
    let mut b0 = [0u8; ETA3_BYTES];
    let mut b1 = [0u8; ETA3_BYTES];
    let mut b2 = [0u8; ETA2_BYTES];
    let mut b3 = [0u8; ETA2_BYTES];
    prf.fill_4x(
        seed,
        [base, base + 1, base + 2, base + 3],
        [&mut b0[..eta1_len], &mut b1[..eta1_len], &mut b2, &mut b3],
    );
    [
        poly_cbd_eta1(&b0[..eta1_len], eta1),
        poly_cbd_eta1(&b1[..eta1_len], eta1),
        poly_cbd_eta2(&b2),
        poly_cbd_eta2(&b3),
    ]
}

/// Draws a single eta2 noise polynomial at one nonce.
pub fn poly_getnoise_eta2(prf: &impl Prf, seed: &[u8; 32], nonce: u8) -> Poly {
    let mut buf = [0u8; ETA2_BYTES];
    prf.fill(seed, nonce, &mut buf);
    poly_cbd_eta2(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingPrf;

    impl Prf for CountingPrf {
        fn fill(&self, seed: &[u8; 32], nonce: u8, out: &mut [u8]) {
            for (i, b) in out.iter_mut().enumerate() {
                *b = seed[i % 32].wrapping_add(nonce).wrapping_add(i as u8);
            }
        }
    }

    #[test]
    fn cbd_eta2_coefficients_are_within_range() {
        let buf = [0xA5u8; ETA2_BYTES];
        let p = cbd2(&buf);
        for &c in p.iter() {
            assert!((-2..=2).contains(&c));
        }
    }

    #[test]
    fn cbd_eta3_coefficients_are_within_range() {
        let buf = [0x3Cu8; ETA3_BYTES];
        let p = cbd3(&buf);
        for &c in p.iter() {
            assert!((-3..=3).contains(&c));
        }
    }

    #[test]
    fn getnoise_eta1_4x_produces_four_distinct_polys_for_distinct_nonces() {
        let prf = CountingPrf;
        let seed = [7u8; 32];
        let polys = poly_getnoise_eta1_4x(&prf, &seed, 0, 3);
        assert_ne!(polys[0], polys[1]);
        assert_ne!(polys[2], polys[3]);
        for p in polys.iter() {
            for &c in p.iter() {
                assert!((-3..=3).contains(&c));
            }
        }
    }

    #[test]
    fn getnoise_eta1122_4x_mixes_eta1_and_eta2_bounds() {
        let prf = CountingPrf;
        let seed = [9u8; 32];
        let polys = poly_getnoise_eta1122_4x(&prf, &seed, 4, 2);
        for &c in polys[0].iter().chain(polys[1].iter()) {
            assert!((-2..=2).contains(&c));
        }
        for &c in polys[2].iter().chain(polys[3].iter()) {
            assert!((-2..=2).contains(&c));
        }
    }

    #[test]
    #[should_panic]
    fn poly_cbd_eta1_rejects_unsupported_eta() {
        let buf = vec![0u8; 32];
        let _ = poly_cbd_eta1(&buf, 5);
    }

    #[test]
    fn poly_cbd_eta1_checked_matches_panicking_variant_on_valid_input() {
        let buf = vec![0x3Cu8; ETA3_BYTES];
        assert_eq!(poly_cbd_eta1_checked(&buf, 3).unwrap(), poly_cbd_eta1(&buf, 3));
    }

    #[test]
    fn poly_cbd_eta1_checked_reports_typed_errors_instead_of_panicking() {
        assert_eq!(
            poly_cbd_eta1_checked(&[0u8; 32], 5).unwrap_err(),
            CoreError::UnsupportedEta(5)
        );
        assert_eq!(
            poly_cbd_eta1_checked(&[0u8; ETA2_BYTES - 1], 2).unwrap_err(),
            CoreError::WrongBufferLength { expected: ETA2_BYTES, actual: ETA2_BYTES - 1 }
        );
    }
}
