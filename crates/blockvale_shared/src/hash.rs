//! Seeded integer hashing used for every random-looking decision in world
//! generation. All arithmetic is 32-bit and wrapping so results are identical
//! on every platform.

const X_PRIME: i32 = 374_761_393;
const Z_PRIME: i32 = 668_265_263;
const SALT_PRIME: i32 = 374_761;
const MIX_PRIME: i32 = 1_274_126_177;
const U32_RANGE: f64 = 4_294_967_296.0;

/// Maps `(seed, x, z, salt)` to a value in `[0, 1)`.
pub fn coord_hash(seed: u64, x: i32, z: i32, salt: i32) -> f64 {
    let mut h = (seed as u32 as i32)
        ^ x.wrapping_mul(X_PRIME)
        ^ z.wrapping_mul(Z_PRIME)
        ^ salt.wrapping_mul(SALT_PRIME);
    h = (h ^ (h >> 13)).wrapping_mul(MIX_PRIME);
    let h = (h ^ (h >> 16)) as u32;
    f64::from(h) / U32_RANGE
}

/// 32-bit FNV-1a, used to turn free-form seed text into a numeric seed.
pub fn fnv1a_32(text: &str) -> u32 {
    let mut h: u32 = 0x811C_9DC5;
    for unit in text.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(0x0100_0193);
    }
    h
}

/// Seed from user text: integers are used as-is (negative values wrap),
/// anything else is hashed with FNV-1a.
pub fn parse_seed(text: &str) -> u64 {
    let text = text.trim();
    match text.parse::<i64>() {
        Ok(value) => value as u64,
        Err(_) => u64::from(fnv1a_32(text)),
    }
}
