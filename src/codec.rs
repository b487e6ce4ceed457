//! 12-bit coefficient (de)serialization to/from the canonical 384-byte wire
//! encoding (§4.6).

use crate::error::CoreError;
use crate::params::{N, POLYBYTES, Q};
use crate::poly::Poly;

/// Packs 256 canonical ([0,q)) coefficients into 384 bytes, 12 bits apiece,
/// two coefficients to every three bytes (§4.6).
///
/// Precondition: every coefficient of `a` is in `[0, q)`.
pub fn poly_tobytes(a: &Poly) -> [u8; POLYBYTES] {
    debug_assert!(a.iter().all(|&c| (0..Q).contains(&c)));

    let mut r = [0u8; POLYBYTES];
    for i in 0..N / 2 {
        let t0 = a[2 * i] as u16;
        let t1 = a[2 * i + 1] as u16;
        r[3 * i] = t0 as u8;
        r[3 * i + 1] = ((t0 >> 8) | (t1 << 4)) as u8;
        r[3 * i + 2] = (t1 >> 4) as u8;
    }
    r
}

/// Unpacks 384 bytes into 256 12-bit coefficients. The result is NOT
/// guaranteed canonical mod q — a malicious or malformed encoding may carry
/// 12-bit values in `[q, 4096)` (§3.2, §4.6). Callers that need a canonical
/// polynomial must reduce it themselves.
pub fn poly_frombytes(a: &[u8; POLYBYTES]) -> Poly {
    let mut r: Poly = [0; N];
    for i in 0..N / 2 {
        let b0 = a[3 * i] as u16;
        let b1 = a[3 * i + 1] as u16;
        let b2 = a[3 * i + 2] as u16;
        r[2 * i] = (b0 | (b1 << 8)) as i16 & 0xFFF;
        r[2 * i + 1] = ((b1 >> 4) | (b2 << 4)) as i16 & 0xFFF;
    }
    r
}

/// Fallible entry point for `poly_frombytes` when the 384-byte length isn't
/// already enforced by the type system — e.g. a boundary that receives a
/// caller-supplied byte slice off the wire rather than a fixed-size array.
/// The hot-path `poly_frombytes` above stays total over its array-typed
/// input (§7); this wrapper is the one place a malformed *external* buffer
/// length becomes a typed error instead of a panic (§1.1).
pub fn poly_frombytes_checked(a: &[u8]) -> Result<Poly, CoreError> {
    let arr: &[u8; POLYBYTES] = a.try_into().map_err(|_| CoreError::WrongBufferLength {
        expected: POLYBYTES,
        actual: a.len(),
    })?;
    Ok(poly_frombytes(arr))
}
