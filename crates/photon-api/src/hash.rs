// Router password digest
//
// The login endpoint expects `password_type = 4`: a SHA-256 of the user name,
// the base64 of the password's hex SHA-256, and the CSRF token the request is
// sent with. Both stages hash and base64-encode the *hex text*, not raw digest
// bytes; anything else is rejected by the firmware.

use base64::prelude::*;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a UTF-8 string, then base64 of that hex text.
fn hex_sha256_base64(input: &str) -> String {
    let hex_digest = hex::encode(Sha256::digest(input.as_bytes()));
    BASE64_STANDARD.encode(hex_digest.as_bytes())
}

/// Compute the credential digest sent as `Password` in the login request.
pub fn password_hash(user_name: &str, user_password: &str, csrf_token: &str) -> String {
    let password_digest = hex_sha256_base64(user_password);
    hex_sha256_base64(&format!("{user_name}{password_digest}{csrf_token}"))
}
