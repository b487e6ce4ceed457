//! Forward number-theoretic transform, a Cooley-Tukey DIT NTT with 7
//! butterfly layers merged 1+2+3 / 4+5 / 6 / 7 (§4.3).
//!
//! Precondition: every coefficient of `r` bounded by q in absolute value.
//! Postcondition: `r` in bitreversed order, every coefficient bounded by
//! `NTT_BOUND = 8q-1` in absolute value.

use crate::params::{NTT_BOUND, Q};
use crate::poly::Poly;
use crate::reduce::fqmul;
use crate::zetas::{LAYER1, LAYER2, LAYER3, LAYER4, LAYER5_EVEN, LAYER5_ODD, LAYER6, LAYER7};

#[inline(always)]
fn butterfly(r: &mut Poly, j: usize, len: usize, zeta: i16) {
    let t = fqmul(zeta, r[j + len]);
    r[j + len] = r[j] - t;
    r[j] += t;
}

/// Layers 1+2+3 merged (len=128,64,32). Input |coeff|<=q, output bounded by
/// 4q-1 (§4.3).
pub fn ntt_layer123(r: &mut Poly) {
    debug_assert!(r.iter().all(|&c| c.unsigned_abs() <= Q as u16));

    // layer 1: len=128, 1 group
    for j in 0..128 {
        butterfly(r, j, 128, LAYER1);
    }

    // layer 2: len=64, 2 groups
    for (g, &zeta) in LAYER2.iter().enumerate() {
        let base = g * 128;
        for j in base..base + 64 {
            butterfly(r, j, 64, zeta);
        }
    }

    // layer 3: len=32, 4 groups
    for (g, &zeta) in LAYER3.iter().enumerate() {
        let base = g * 64;
        for j in base..base + 32 {
            butterfly(r, j, 32, zeta);
        }
    }
}

/// Layers 4+5 merged, processed as 8 independent 32-coefficient sub-trees.
/// Output bounded by 6q-1 (§4.3).
pub fn ntt_layer45(r: &mut Poly) {
    for blk in 0..8 {
        let base = blk * 32;
        let zeta4 = LAYER4[blk];

        // layer 4: len=16, one group spanning this sub-tree
        for j in base..base + 16 {
            butterfly(r, j, 16, zeta4);
        }

        // layer 5: len=8, two groups within this sub-tree
        let zeta5_even = LAYER5_EVEN[blk];
        for j in base..base + 8 {
            butterfly(r, j, 8, zeta5_even);
        }
        let zeta5_odd = LAYER5_ODD[blk];
        for j in base + 16..base + 24 {
            butterfly(r, j, 8, zeta5_odd);
        }
    }
}

/// Layer 6 alone, 32 groups of 8 coefficients. Output bounded by 7q-1 (§4.3).
pub fn ntt_layer6(r: &mut Poly) {
    for (blk, &zeta) in LAYER6.iter().enumerate() {
        let base = blk * 8;
        for j in base..base + 4 {
            butterfly(r, j, 4, zeta);
        }
    }
}

/// Layer 7 alone, 64 groups of 4 coefficients. Output bounded by
/// NTT_BOUND = 8q-1 (§4.3).
pub fn ntt_layer7(r: &mut Poly) {
    for (blk, &zeta) in LAYER7.iter().enumerate() {
        let base = blk * 4;
        for j in base..base + 2 {
            butterfly(r, j, 2, zeta);
        }
    }
}

/// Runs all seven layers in order, bringing `r` from natural order (input
/// bound q) to bitreversed order (output bound NTT_BOUND).
pub fn poly_ntt(r: &mut Poly) {
    ntt_layer123(r);
    ntt_layer45(r);
    ntt_layer6(r);
    ntt_layer7(r);

    debug_assert!(r.iter().all(|&c| (c as i32).unsigned_abs() <= NTT_BOUND as u32));
}
