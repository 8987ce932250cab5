/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::{Context, Result};
use aws_smithy_types::DateTime;
use clap::{Parser, Subcommand};
use edge_cache_signer::{PrivateKey, Resource, SigningRequest};
use std::time::{Duration, SystemTime};

#[derive(Parser, Debug)]
#[command(name = "edge-cache-sign", author, version, about)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Sign a URL prefix and append a file name as a path segment
    PathComponent(PathComponentArgs),
    /// Sign a single URL
    Url(UrlArgs),
    /// Sign every URL under a prefix and attach the token to a URL
    UrlPrefix(UrlPrefixArgs),
    /// Produce an Edge-Cache-Cookie value for every URL under a prefix
    Cookie(CookieArgs),
    /// Print the public key to register in the CDN keyset
    PublicKey(KeyArgs),
}

#[derive(clap::Args, Debug)]
pub(crate) struct KeyArgs {
    /// Base64url encoded 32-byte Ed25519 seed, padded or unpadded
    #[arg(long, env = "EDGE_CACHE_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,
}

impl KeyArgs {
    pub(crate) fn private_key(&self) -> Result<PrivateKey> {
        PrivateKey::from_base64(&self.private_key).context("failed to load private key")
    }
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub(crate) struct ExpirationArgs {
    /// Expiration as seconds since the Unix epoch
    #[arg(long)]
    expires_at: Option<i64>,
    /// Expiration as seconds from now
    #[arg(long)]
    expires_in: Option<u64>,
}

impl ExpirationArgs {
    fn resolve(&self, now: SystemTime) -> Result<DateTime> {
        match (self.expires_at, self.expires_in) {
            (Some(secs), _) => Ok(DateTime::from_secs(secs)),
            (None, Some(secs)) => now
                .checked_add(Duration::from_secs(secs))
                .map(DateTime::from)
                .context("--expires-in is out of range"),
            (None, None) => anyhow::bail!("one of --expires-at or --expires-in is required"),
        }
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct SigningArgs {
    /// Name of the key in the CDN keyset
    #[arg(long, env = "EDGE_CACHE_KEY_NAME")]
    key_name: String,
    #[command(flatten)]
    key: KeyArgs,
    #[command(flatten)]
    expiration: ExpirationArgs,
}

impl SigningArgs {
    pub(crate) fn request(&self, resource: Resource) -> Result<SigningRequest> {
        let expires_at = self.expiration.resolve(SystemTime::now())?;
        tracing::debug!(key_name = %self.key_name, expires = expires_at.secs(), "resolved signing arguments");
        SigningRequest::builder()
            .resource(resource)
            .key_name(&self.key_name)
            .private_key(self.key.private_key()?)
            .expires_at(expires_at)
            .build()
            .context("invalid signing request")
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct PathComponentArgs {
    /// Prefix placed directly before `edge-cache-token=`, used verbatim
    #[arg(long)]
    pub(crate) url_prefix: String,
    /// File name appended after the token
    #[arg(long)]
    pub(crate) filename: String,
    #[command(flatten)]
    pub(crate) signing: SigningArgs,
}

#[derive(clap::Args, Debug)]
pub(crate) struct UrlArgs {
    /// URL to sign
    #[arg(long)]
    pub(crate) url: String,
    #[command(flatten)]
    pub(crate) signing: SigningArgs,
}

#[derive(clap::Args, Debug)]
pub(crate) struct UrlPrefixArgs {
    /// URL the token is attached to
    #[arg(long)]
    pub(crate) url: String,
    /// Prefix shared by every authorized URL
    #[arg(long)]
    pub(crate) url_prefix: String,
    #[command(flatten)]
    pub(crate) signing: SigningArgs,
}

#[derive(clap::Args, Debug)]
pub(crate) struct CookieArgs {
    /// Prefix shared by every authorized URL
    #[arg(long)]
    pub(crate) url_prefix: String,
    #[command(flatten)]
    pub(crate) signing: SigningArgs,
}
