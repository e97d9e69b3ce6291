//! String value generators.

use rand::Rng;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generate a string of `length` random lowercase ASCII letters.
pub fn generate_lowercase_string<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| LOWERCASE[rng.gen_range(0..LOWERCASE.len())] as char)
        .collect()
}

/// Generate `{prefix}-{n}` with `n` drawn uniformly from `[1, pool]`.
pub fn generate_pooled_id<R: Rng>(rng: &mut R, prefix: &str, pool: u32) -> String {
    format!("{prefix}-{}", rng.gen_range(1..=pool))
}
