pub const SIDE_SALT: u32 = 0x51DE_0000;
pub const SHUFFLE_SALT: u32 = 0x5AFF_1E00;
pub const JITTER_SALT: u32 = 0x0717_7E00;

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

/// Uniform draw in `[0, 1)` keyed by seed and salt.
pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ splitmix32(salt));
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

pub fn rand_range(seed: u32, salt: u32, min: f32, max: f32) -> f32 {
    min + (max - min) * rand_unit(seed, salt)
}

/// Uniform index in `[0, upper]`.
pub fn rand_index(seed: u32, salt: u32, upper: usize) -> usize {
    let pick = (rand_unit(seed, salt) * (upper as f32 + 1.0)) as usize;
    pick.min(upper)
}

pub fn rand_bool(seed: u32, salt: u32) -> bool {
    rand_unit(seed, salt) < 0.5
}

/// Folds a wide nonce (timestamps, counters) into a puzzle seed.
pub fn seed_from_nonce(nonce: u64) -> u32 {
    let low = nonce as u32;
    let high = (nonce >> 32) as u32;
    splitmix32(low ^ splitmix32(high))
}
