/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::encoding;
use crate::error::SigningError;
use ed25519_dalek::{Signer, SigningKey, SECRET_KEY_LENGTH};
use std::fmt;

/// Ed25519 private key used to sign edge cache tokens.
///
/// The key is zeroized when dropped.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Creates a key from a raw 32-byte Ed25519 seed.
    pub fn from_seed(seed: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            inner: SigningKey::from_bytes(&seed),
        }
    }

    /// Loads a key from a URL-safe base64 encoded 32-byte seed, padded or unpadded.
    pub fn from_base64(encoded: &str) -> Result<Self, SigningError> {
        let decoded = encoding::decode_key(encoded)?;
        let seed: &[u8; SECRET_KEY_LENGTH] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| SigningError::invalid_key_length(decoded.len()))?;
        Ok(Self {
            inner: SigningKey::from_bytes(seed),
        })
    }

    /// Returns the unpadded URL-safe base64 encoding of the Ed25519 public key.
    ///
    /// This is the value a CDN keyset is configured with to verify tokens
    /// produced by this key.
    pub fn public_key_base64(&self) -> String {
        encoding::encode(self.inner.verifying_key().as_bytes())
    }

    pub(crate) fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.inner.sign(message).to_bytes()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key_base64())
            .finish_non_exhaustive()
    }
}
