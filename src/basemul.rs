//! Base multiplication in the NTT domain: pointwise multiplication in each
//! quadratic factor `Z_q[X]/(X^2 - zeta)` of the split ring (§4.5).
//!
//! A `Mulcache` precomputes the one `fqmul(b[1], zeta)` product per pair that
//! would otherwise be redone on every call to `poly_basemul_montgomery` when
//! the same operand is multiplied against many others (e.g. a fixed
//! NTT-domain public matrix column).

use crate::params::N;
use crate::poly::Poly;
use crate::reduce::fqmul;
use crate::zetas::LAYER7;

/// One cached product per coefficient pair (`N/2` entries), keyed to a
/// specific polynomial's odd coefficients.
pub type Mulcache = [i16; N / 2];

/// Precomputes `fqmul(b[4i+1], zeta_i)` and `fqmul(b[4i+3], -zeta_i)` for
/// every pair in `b`, for reuse across repeated `poly_basemul_montgomery_cached`
/// calls against `b` (§4.5).
pub fn poly_mulcache_compute(b: &Poly) -> Mulcache {
    let mut cache = [0i16; N / 2];
    for (i, &zeta) in LAYER7.iter().enumerate() {
        cache[2 * i] = fqmul(b[4 * i + 1], zeta);
        cache[2 * i + 1] = fqmul(b[4 * i + 3], -zeta);
    }
    cache
}

/// One pair's basemul, given the pre-scaled `b1_zeta = fqmul(b[1], +-zeta)`.
#[inline(always)]
fn basemul_cached_pair(a: &[i16; 2], b: &[i16; 2], b1_zeta: i16) -> [i16; 2] {
    let r0 = fqmul(a[0], b[0]) + fqmul(a[1], b1_zeta);
    let r1 = fqmul(a[0], b[1]) + fqmul(a[1], b[0]);
    [r0, r1]
}

/// Multiplies `a` by `b` pointwise in the NTT domain, using a mulcache
/// already computed for `b` via `poly_mulcache_compute`.
///
/// Output bounded by 2q-1 per coefficient (two Montgomery products summed,
/// each bounded by q in absolute value), still in Montgomery form (§4.5).
pub fn poly_basemul_montgomery_cached(r: &mut Poly, a: &Poly, b: &Poly, cache: &Mulcache) {
    for i in 0..64 {
        let base = 4 * i;
        let even = basemul_cached_pair(
            &[a[base], a[base + 1]],
            &[b[base], b[base + 1]],
            cache[2 * i],
        );
        r[base] = even[0];
        r[base + 1] = even[1];

        let odd = basemul_cached_pair(
            &[a[base + 2], a[base + 3]],
            &[b[base + 2], b[base + 3]],
            cache[2 * i + 1],
        );
        r[base + 2] = odd[0];
        r[base + 3] = odd[1];
    }
}

/// Uncached pointwise NTT-domain multiplication, equivalent to computing and
/// immediately discarding a mulcache (§4.5).
pub fn poly_basemul_montgomery(r: &mut Poly, a: &Poly, b: &Poly) {
    let cache = poly_mulcache_compute(b);
    poly_basemul_montgomery_cached(r, a, b, &cache);
}
