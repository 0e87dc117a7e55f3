//! Argon2id password hashing for locally stored accounts.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const MEM_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: String,
    pub hash: String,
}

fn argon2() -> anyhow::Result<Argon2<'static>> {
    let params = Params::new(MEM_KIB, ITERATIONS, PARALLELISM, Some(HASH_LEN))
        .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn derive(password: &str, salt: &[u8]) -> anyhow::Result<[u8; HASH_LEN]> {
    let mut out = [0u8; HASH_LEN];
    argon2()?
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| anyhow::anyhow!("argon2 hashing failed: {e}"))?;
    Ok(out)
}

pub fn hash_password(password: &str) -> anyhow::Result<PasswordHash> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt)?;
    Ok(PasswordHash {
        salt: hex::encode(salt),
        hash: hex::encode(hash),
    })
}

pub fn verify_password(password: &str, stored: &PasswordHash) -> anyhow::Result<bool> {
    let salt = hex::decode(&stored.salt)?;
    let expected = hex::decode(&stored.hash)?;
    let actual = derive(password, &salt)?;
    Ok(actual.as_slice() == expected.as_slice())
}
