//! One-time passcode generation.

use rand::RngExt;

/// Alphabet for generated passcodes. Excludes ambiguous characters
/// (0/O, 1/I/L) since guests type these from an email.
const PASSCODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generate a random passcode of the given length.
pub fn generate_passcode(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..PASSCODE_ALPHABET.len());
            PASSCODE_ALPHABET[idx] as char
        })
        .collect()
}
