/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_cfg))]
/* End of automatically managed default lints */
//! Ed25519 signed tokens for edge cache CDNs.
//!
//! A token binds a resource, an expiration time and a key name into a policy
//! string, signs it with Ed25519, and lays the result out as a signed URL, a
//! signed URL prefix, a signed path component or a cookie value. The CDN
//! verifies the token with the public key registered under the key name.
//!
//! ```no_run
//! use aws_smithy_types::DateTime;
//! use edge_cache_signer::{sign, PrivateKey, Resource, SigningRequest};
//!
//! # fn main() -> Result<(), edge_cache_signer::error::SigningError> {
//! let request = SigningRequest::builder()
//!     .resource(Resource::url("https://media.example.com/image.jpg"))
//!     .key_name("first-keyset")
//!     .private_key(PrivateKey::from_base64("base64url-encoded-seed")?)
//!     .expires_at(DateTime::from_secs(1800022861))
//!     .build()?;
//! println!("{}", sign(request)?);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod encoding;
/// Error types for edge cache signing operations.
pub mod error;
mod key;
mod policy;
mod sign;

use aws_smithy_types::DateTime;
use error::SigningError;

pub use key::PrivateKey;
pub use policy::{Resource, TokenKind};
pub use sign::{SignedToken, SigningRequest, SigningRequestBuilder};

/// Signs a request into a token.
pub fn sign(request: SigningRequest) -> Result<SignedToken, SigningError> {
    Ok(request.sign())
}

/// Signs `url_prefix` as a path component and appends `filename`.
///
/// Produces `{url_prefix}edge-cache-token=Expires=..&KeyName=..&Signature=../{filename}`.
/// `url_prefix` is used verbatim.
pub fn sign_path_component(
    url_prefix: &str,
    filename: &str,
    key_name: &str,
    base64_key: &str,
    expires_at: DateTime,
) -> Result<String, SigningError> {
    sign_with(
        Resource::path_component(url_prefix, filename),
        key_name,
        base64_key,
        expires_at,
    )
}

/// Signs a single URL.
///
/// Produces `{url}?Expires=..&KeyName=..&Signature=..`, joining with `&`
/// instead when `url` already has query parameters.
pub fn sign_url(
    url: &str,
    key_name: &str,
    base64_key: &str,
    expires_at: DateTime,
) -> Result<String, SigningError> {
    sign_with(Resource::url(url), key_name, base64_key, expires_at)
}

/// Signs every URL under `url_prefix` and attaches the token to `url`.
pub fn sign_url_prefix(
    url: &str,
    url_prefix: &str,
    key_name: &str,
    base64_key: &str,
    expires_at: DateTime,
) -> Result<String, SigningError> {
    sign_with(
        Resource::url_prefix(url, url_prefix),
        key_name,
        base64_key,
        expires_at,
    )
}

/// Produces an `Edge-Cache-Cookie=..` value for every URL under `url_prefix`.
pub fn sign_cookie(
    url_prefix: &str,
    key_name: &str,
    base64_key: &str,
    expires_at: DateTime,
) -> Result<String, SigningError> {
    sign_with(Resource::cookie(url_prefix), key_name, base64_key, expires_at)
}

fn sign_with(
    resource: Resource,
    key_name: &str,
    base64_key: &str,
    expires_at: DateTime,
) -> Result<String, SigningError> {
    let request = SigningRequest::builder()
        .resource(resource)
        .key_name(key_name)
        .private_key(PrivateKey::from_base64(base64_key)?)
        .expires_at(expires_at)
        .build()?;
    sign(request).map(SignedToken::into_string)
}
