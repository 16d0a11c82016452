//! Random token generation.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Symbols a token is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random part of every entry.
pub const TOKEN_LEN: usize = 10;

/// Generate a random alphanumeric token of `len` characters.
///
/// Each character blends a uniform sample with the sub-second clock
/// component `millis` (0..1000). This only decorrelates tokens generated in
/// quick succession; it is not a source of cryptographic randomness.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize, millis: u32) -> String {
    (0..len)
        .map(|_| alphabet_char(rng.r#gen::<f64>(), millis))
        .collect()
}

/// Current sub-second component of the wall clock, in milliseconds.
pub fn subsec_millis() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_millis())
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn alphabet_char(sample: f64, millis: u32) -> char {
    let clock = f64::from(millis % 1000) / 1000.0;
    let blended = (sample + clock) / 2.0;
    // blended is in [0, 1), the min guards float rounding at the top end.
    let idx = ((blended * ALPHABET.len() as f64) as usize).min(ALPHABET.len() - 1);
    char::from(ALPHABET[idx])
}
