//! Montgomery and Barrett modular reduction (§4.1).
//!
//! Every function here is total over its documented domain and branchless:
//! the sign-dependent steps use arithmetic-shift masks instead of
//! conditional branches, per the constant-time discipline in §5.

use crate::params::{Q, QINV};

/// Montgomery reduction. For `|a| < q*2^15`, returns `a * 2^-16 mod q` in (-q, q).
#[inline(always)]
pub fn montgomery_reduce(a: i32) -> i16 {
    debug_assert!((a as i64).unsigned_abs() < (Q as i64) * (1i64 << 15));
    let t = ((a as i16 as i32) * QINV) as i16;
    let r = (a - (t as i32) * (Q as i32)) >> 16;
    r as i16
}

/// `fqmul(a,b) = montgomery_reduce(a*b)`, a representative of `a*b*2^-16 mod q`.
///
/// Precondition: `|a|,|b| <= q*2^15` (trivially satisfied for any i16 inputs).
#[inline(always)]
pub fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce(a as i32 * b as i32)
}

/// Signed Barrett reduction: for any i16 `a`, returns a representative of
/// `a mod q` in `(-q/2, q/2]`.
#[inline(always)]
pub fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = 20159; // ((1<<26) + Q/2) / Q
    let a32 = a as i32;
    let t = ((V * a32 + (1 << 25)) >> 26) * Q as i32;
    (a32 - t) as i16
}

/// Conditional addition of q: for `a` in `(-q, q)`, returns a representative
/// in `[0, q)`. Branchless via an arithmetic-shift mask (§4.1, §5).
#[inline(always)]
pub fn scalar_signed_to_unsigned_q(a: i16) -> u16 {
    debug_assert!(a > -Q && a < Q);
    let mask = (a >> 15) as u16; // 0xFFFF if a<0, 0x0000 otherwise
    (a as u16).wrapping_add((Q as u16) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqmul_matches_exact_modular_product() {
        // fqmul(a,b) == a*b*2^-16 mod q, as a residue (any representative).
        let inv_r = mod_inverse(1 << 16, Q as i32);
        for a in [-3328i16, -1, 0, 1, 17, 3328] {
            for b in [-3328i16, -1, 0, 1, 17, 3328] {
                let got = fqmul(a, b) as i32;
                let want = (a as i64 * b as i64).rem_euclid(Q as i64) as i32 * inv_r % Q as i32;
                assert_eq!(got.rem_euclid(Q as i32), want.rem_euclid(Q as i32), "a={a} b={b}");
            }
        }
    }

    fn mod_inverse(a: i32, m: i32) -> i32 {
        let (mut t, mut new_t) = (0i64, 1i64);
        let (mut r, mut new_r) = (m as i64, a as i64);
        while new_r != 0 {
            let quotient = r / new_r;
            t -= quotient * new_t;
            std::mem::swap(&mut t, &mut new_t);
            r -= quotient * new_r;
            std::mem::swap(&mut r, &mut new_r);
        }
        (((t % m as i64) + m as i64) % m as i64) as i32
    }

    #[test]
    fn barrett_reduce_is_correct_mod_q() {
        for a in -32768i32..32768 {
            let a16 = a as i16;
            let r = barrett_reduce(a16) as i32;
            assert!(r > -(Q as i32) / 2 && r <= Q as i32 / 2);
            assert_eq!(((r % Q as i32) + Q as i32) % Q as i32, ((a16 as i32 % Q as i32) + Q as i32) % Q as i32);
        }
    }

    #[test]
    fn scalar_signed_to_unsigned_q_matches_naive() {
        for a in -(Q - 1)..Q {
            let got = scalar_signed_to_unsigned_q(a);
            let want = if a < 0 { (a + Q) as u16 } else { a as u16 };
            assert_eq!(got, want, "a={a}");
        }
    }
}
