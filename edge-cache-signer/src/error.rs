/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// The category of a [`SigningError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The private key string is not valid URL-safe base64.
    InvalidKeyEncoding,
    /// The decoded private key is not a 32-byte Ed25519 seed.
    InvalidKeyLength,
    /// A required input was missing, empty, or out of range.
    InvalidInput,
}

/// Error type for edge cache signing operations
///
/// Every failure is permanent: signing is local and deterministic, so retrying
/// with the same inputs fails the same way.
#[derive(Debug)]
pub struct SigningError {
    kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    message: Option<Cow<'static, str>>,
}

impl SigningError {
    pub(crate) fn new(
        kind: ErrorKind,
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            source,
            message,
        }
    }

    pub(crate) fn invalid_key_encoding(
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::new(ErrorKind::InvalidKeyEncoding, Some(source.into()), None)
    }

    pub(crate) fn invalid_key_length(len: usize) -> Self {
        Self::new(
            ErrorKind::InvalidKeyLength,
            None,
            Some(format!("expected a 32-byte Ed25519 seed, got {len} bytes").into()),
        )
    }

    pub(crate) fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, None, Some(message.into()))
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidKeyEncoding => write!(f, "private key is not valid base64url")?,
            ErrorKind::InvalidKeyLength => write!(f, "invalid private key length")?,
            ErrorKind::InvalidInput => write!(f, "invalid input")?,
        }
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl StdError for SigningError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<ErrorKind> for SigningError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, None, None)
    }
}
