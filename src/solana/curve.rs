//! Ed25519 curve membership test.
//!
//! Program derived addresses are valid only when they are *not* points on the
//! Ed25519 curve, so no keypair can ever sign for them. The test here is a
//! real point decompression, not a surface check: a 32-byte value is on the
//! curve exactly when its compressed-Edwards form decompresses.

use curve25519_dalek::edwards::CompressedEdwardsY;

/// Returns true when `bytes` is a valid compressed Ed25519 curve point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}
