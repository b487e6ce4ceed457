//! Inverse number-theoretic transform, a Gentleman-Sande DIT inverse NTT
//! processed in reverse layer order 7, 6, 5+4 merged, 3+2+1 merged (§4.4).
//!
//! `MONT_F` (the combined 1/128-scaling and Montgomery-domain-entry
//! constant, `MONT_F = MONT^2/128 mod q`) is folded into the layer-7 pass
//! rather than applied as a separate final loop: correctness mod q is
//! unaffected since the scaling commutes with the remaining linear
//! butterflies. The result carries an extra factor of `R = 2^16 mod q`
//! relative to the un-normalized transform's input — `poly_invntt` returns
//! `p` in Montgomery form, not `p` itself (the same convention the
//! reference implementation names `poly_invntt_tomont` for).

use crate::params::MONT_F;
use crate::poly::Poly;
use crate::reduce::{barrett_reduce, fqmul};
use crate::zetas::{REV_LAYER1, REV_LAYER2, REV_LAYER3, REV_LAYER4, REV_LAYER5_FLAT, REV_LAYER6, REV_LAYER7};

#[inline(always)]
fn butterfly(r: &mut Poly, j: usize, len: usize, zeta: i16) {
    let t = r[j];
    r[j] = barrett_reduce(t + r[j + len]);
    r[j + len] = fqmul(zeta, r[j + len] - t);
}

/// Layer 7 alone (len=2, 64 groups), reverse of `ntt_layer7`. Also where the
/// `MONT_F` normalization is applied, since this pass already touches every
/// coefficient exactly once. Output bounded by q-1 (§4.4).
pub fn invntt_layer7_invert(r: &mut Poly) {
    for (blk, &zeta) in REV_LAYER7.iter().enumerate() {
        let base = blk * 4;
        for j in base..base + 2 {
            butterfly(r, j, 2, zeta);
        }
    }
    for x in r.iter_mut() {
        *x = fqmul(*x, MONT_F);
    }
}

/// Layer 6 alone (len=4, 32 groups), reverse of `ntt_layer6`. Output bounded
/// by 2q-1 (§4.4).
pub fn invntt_layer6(r: &mut Poly) {
    for (blk, &zeta) in REV_LAYER6.iter().enumerate() {
        let base = blk * 8;
        for j in base..base + 4 {
            butterfly(r, j, 4, zeta);
        }
    }
}

/// Layers 5+4 merged, reverse of `ntt_layer45`, 8 independent 32-coefficient
/// sub-trees processed len=8 then len=16. Output bounded by q-1 (§4.4).
pub fn invntt_layer54(r: &mut Poly) {
    for blk in 0..8 {
        let base = blk * 32;

        // layer 5 reversed: len=8, two groups within this sub-tree
        let zeta5_even = REV_LAYER5_FLAT[2 * blk];
        for j in base..base + 8 {
            butterfly(r, j, 8, zeta5_even);
        }
        let zeta5_odd = REV_LAYER5_FLAT[2 * blk + 1];
        for j in base + 16..base + 24 {
            butterfly(r, j, 8, zeta5_odd);
        }

        // layer 4 reversed: len=16, one group spanning this sub-tree
        let zeta4 = REV_LAYER4[blk];
        for j in base..base + 16 {
            butterfly(r, j, 16, zeta4);
        }
    }
}

/// Layers 3+2+1 merged, reverse of `ntt_layer123`. Output bounded by 8q-1
/// (§4.4) — the loosest bound of the inverse transform, carried by the final
/// len=128 pass.
pub fn invntt_layer321(r: &mut Poly) {
    // layer 3 reversed: len=32, 4 groups
    for (g, &zeta) in REV_LAYER3.iter().enumerate() {
        let base = g * 64;
        for j in base..base + 32 {
            butterfly(r, j, 32, zeta);
        }
    }

    // layer 2 reversed: len=64, 2 groups
    for (g, &zeta) in REV_LAYER2.iter().enumerate() {
        let base = g * 128;
        for j in base..base + 64 {
            butterfly(r, j, 64, zeta);
        }
    }

    // layer 1 reversed: len=128, 1 group
    for j in 0..128 {
        butterfly(r, j, 128, REV_LAYER1);
    }
}

/// Runs all seven layers in reverse order, bringing `r` from bitreversed
/// order back to natural order. The `MONT_F` fold doubles as the 1/128
/// un-scaling, but it also leaves the result in Montgomery form (`p*R mod q`,
/// not `p`) — the `R^-1` that cancels it is supplied downstream by whatever
/// consumes the result in Montgomery form (e.g. `basemul`'s own Montgomery
/// reduction), not by this function (§4.4).
pub fn poly_invntt(r: &mut Poly) {
    invntt_layer7_invert(r);
    invntt_layer6(r);
    invntt_layer54(r);
    invntt_layer321(r);
}
