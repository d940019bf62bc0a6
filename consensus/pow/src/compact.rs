//! Compact ("bits") encoding of proof-of-work targets
//!
//! A compact value is one exponent byte followed by a three byte
//! mantissa: `target = mantissa * 256^(exponent - 3)`. Bit 23 of the
//! mantissa is a sign bit. Encoding keeps only the three most
//! significant bytes, so it truncates.

use primitive_types::U256;
use retarget_core::errors::{DifficultyError, DifficultyResult};

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Expands a compact target. Negative values and values wider than 256
/// bits are rejected.
pub fn decode_compact(bits: u32) -> DifficultyResult<U256> {
    let size = bits >> 24;
    let word = bits & MANTISSA_MASK;

    let value = if size <= 3 {
        U256::from(word >> (8 * (3 - size)))
    } else {
        if word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)) {
            return Err(DifficultyError::MalformedTarget(bits));
        }
        U256::from(word) << (8 * (size - 3)) as usize
    };

    if bits & SIGN_BIT != 0 && !value.is_zero() {
        return Err(DifficultyError::MalformedTarget(bits));
    }
    Ok(value)
}

/// Packs a target into compact form, dropping everything below its three
/// most significant bytes. Zero packs as `0x01000000`.
pub fn encode_compact(target: U256) -> u32 {
    let mut size = if target.is_zero() { 1 } else { (target.bits() + 7) / 8 };

    let mut compact = if size <= 3 {
        target.low_u32() << (8 * (3 - size))
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };

    // A set sign bit would read back as negative; spend one more byte.
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | ((size as u32) << 24)
}

/// Mask keeping the three mantissa bytes a compact value with the
/// exponent of `declared` can express. Exponents below 3 shift the mask
/// right instead of left.
pub fn precision_mask(declared: u32) -> U256 {
    let accuracy_bytes = (declared >> 24) as i64 - 3;
    let mantissa = U256::from(0x00ff_ffffu32);
    if accuracy_bytes >= 0 {
        let shift = (accuracy_bytes * 8) as usize;
        if shift >= 256 {
            U256::zero()
        } else {
            mantissa << shift
        }
    } else {
        mantissa >> (-accuracy_bytes * 8) as usize
    }
}
