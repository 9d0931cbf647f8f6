//! Token authentication for Subsonic servers.
//!
//! Subsonic's token scheme: the client picks a random salt per session and
//! sends `t = md5(password + salt)` with `s = salt` on every request.

use crate::types::Credentials;
use md5::{Digest, Md5};
use rand::distributions::Alphanumeric;
use rand::Rng;

const SALT_LEN: usize = 12;

/// Compute the hex token for `password` and `salt`.
pub fn token_for(password: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Random lowercase alphanumeric salt.
fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Build fresh session credentials with a new salt.
pub(crate) fn generate_credentials(username: &str, password: &str, server_url: &str) -> Credentials {
    let salt = generate_salt();
    Credentials {
        username: username.to_string(),
        token: token_for(password, &salt),
        salt,
        server_url: server_url.trim_end_matches('/').to_string(),
    }
}
