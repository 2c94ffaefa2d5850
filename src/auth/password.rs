//! PBKDF2-HMAC-SHA256 password hashes.

use std::fmt;
use std::num::NonZeroU32;

use ring::digest::SHA256_OUTPUT_LEN;
use ring::pbkdf2;
use ring::rand::SecureRandom;

use crate::error_handling::AuthError;

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// A salted password digest. The plain password is not kept.
#[derive(Clone)]
pub struct PasswordHash {
    salt: [u8; SALT_LENGTH],
    digest: [u8; SHA256_OUTPUT_LEN],
    iterations: NonZeroU32,
}

impl PasswordHash {
    /// Hashes `password` with a fresh random salt.
    pub fn new(
        password: &str,
        iterations: u32,
        rng: &dyn SecureRandom,
    ) -> Result<Self, AuthError> {
        let iterations = NonZeroU32::new(iterations).ok_or(AuthError::InvalidIterations)?;

        let mut salt = [0u8; SALT_LENGTH];
        rng.fill(&mut salt).map_err(|_| AuthError::RandomGeneration)?;

        let mut digest = [0u8; SHA256_OUTPUT_LEN];
        pbkdf2::derive(ALGORITHM, iterations, &salt, password.as_bytes(), &mut digest);

        Ok(Self {
            salt,
            digest,
            iterations,
        })
    }

    /// Constant-time comparison of `password` against the stored digest.
    ///
    /// CPU-bound for realistic iteration counts; call from a blocking task.
    pub fn verify(&self, password: &str) -> bool {
        pbkdf2::verify(
            ALGORITHM,
            self.iterations,
            &self.salt,
            password.as_bytes(),
            &self.digest,
        )
        .is_ok()
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}
