/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::encoding;
use crate::error::SigningError;
use crate::key::PrivateKey;
use crate::policy::{Resource, TokenKind};
use aws_smithy_types::DateTime;
use std::fmt;

/// Request to sign an edge cache token.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    pub(crate) resource: Resource,
    pub(crate) key_name: String,
    pub(crate) private_key: PrivateKey,
    pub(crate) expiration: DateTime,
}

impl SigningRequest {
    /// Creates a new builder for constructing a signing request.
    pub fn builder() -> SigningRequestBuilder {
        SigningRequestBuilder::default()
    }
}

/// Builder for [`SigningRequest`].
#[derive(Default, Debug)]
pub struct SigningRequestBuilder {
    resource: Option<Resource>,
    key_name: Option<String>,
    private_key: Option<PrivateKey>,
    expiration: Option<DateTime>,
}

impl SigningRequestBuilder {
    /// Sets the resource to sign and the wire form of the token.
    pub fn resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Sets the name of the key, as registered in the CDN keyset.
    pub fn key_name(mut self, name: impl Into<String>) -> Self {
        self.key_name = Some(name.into());
        self
    }

    /// Sets the private key for signing.
    pub fn private_key(mut self, key: PrivateKey) -> Self {
        self.private_key = Some(key);
        self
    }

    /// Sets the absolute expiration time.
    ///
    /// A time in the past is allowed and yields a token that is already expired.
    pub fn expires_at(mut self, time: impl Into<DateTime>) -> Self {
        self.expiration = Some(time.into());
        self
    }

    /// Builds the signing request.
    pub fn build(self) -> Result<SigningRequest, SigningError> {
        let resource = self
            .resource
            .ok_or_else(|| SigningError::invalid_input("resource is required"))?
            .normalize()?;

        let key_name = self
            .key_name
            .ok_or_else(|| SigningError::invalid_input("key_name is required"))?;
        if key_name.is_empty() {
            return Err(SigningError::invalid_input("key_name must not be empty"));
        }

        let private_key = self
            .private_key
            .ok_or_else(|| SigningError::invalid_input("private_key is required"))?;

        let expiration = self
            .expiration
            .ok_or_else(|| SigningError::invalid_input("expiration is required"))?;
        if expiration.secs() < 0 {
            return Err(SigningError::invalid_input(
                "expiration must not be before the Unix epoch",
            ));
        }

        Ok(SigningRequest {
            resource,
            key_name,
            private_key,
            expiration,
        })
    }
}

/// A signed edge cache token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    kind: TokenKind,
    policy: String,
    signature: String,
    token: String,
}

impl SignedToken {
    /// Returns the complete token as a string.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the wire form of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the exact policy string that was signed.
    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// Returns the signature as unpadded URL-safe base64.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Consumes the token and returns the string.
    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl AsRef<str> for SignedToken {
    fn as_ref(&self) -> &str {
        &self.token
    }
}

impl From<SignedToken> for String {
    fn from(token: SignedToken) -> Self {
        token.token
    }
}

impl SigningRequest {
    pub(crate) fn sign(&self) -> SignedToken {
        let kind = self.resource.kind();
        let expires = self.expiration.secs();
        tracing::trace!(%kind, key_name = %self.key_name, expires, "signing edge cache token");

        let policy = self.resource.policy(expires, &self.key_name);
        tracing::debug!(%kind, policy = %policy, "built policy");

        let signature = encoding::encode(self.private_key.sign(policy.as_bytes()));
        let token = self.resource.token(&policy, &signature);

        SignedToken {
            kind,
            policy,
            signature,
            token,
        }
    }
}
