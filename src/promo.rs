//! Promo codes awarded for beating the computer.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a promo code.
pub const PROMO_CODE_LEN: usize = 5;

/// Generates a random code of uppercase letters and digits.
pub fn generate_promo_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PROMO_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
