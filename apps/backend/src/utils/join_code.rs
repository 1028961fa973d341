//! Join codes for game tables.
//!
//! Codes are short strings over Crockford's Base32 alphabet so they can be
//! read aloud and typed without ambiguity.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const JOIN_CODE_LEN: usize = 6;

/// Generate a join code with the thread-local RNG.
pub fn generate_join_code() -> String {
    generate_join_code_with(&mut rand::rng())
}

pub fn generate_join_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..JOIN_CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Uppercase and map look-alike letters onto the alphabet.
pub fn normalize_join_code(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'I' | 'L' => '1',
            'O' => '0',
            other => other,
        })
        .collect()
}
