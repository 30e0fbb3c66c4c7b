//! OS-backed cryptographically secure randomness.

use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

/// The operating system's secure random source failed.
///
/// Always fatal. There is no fallback to a weaker generator.
#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct RandomError(#[from] rand::Error);

/// Return `N` bytes drawn from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`RandomError`] if the OS source cannot produce entropy.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], RandomError> {
    let mut buf = [0u8; N];
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}
