/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;

use args::{Args, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = run(Args::parse())?;
    println!("{output}");
    Ok(())
}

fn run(args: Args) -> Result<String> {
    match args.command {
        Command::PublicKey(key) => {
            let private_key = key.private_key()?;
            Ok(private_key.public_key_base64())
        }
        Command::PathComponent(cmd) => {
            let request = cmd.signing.request(edge_cache_signer::Resource::path_component(
                cmd.url_prefix,
                cmd.filename,
            ))?;
            sign(request)
        }
        Command::Url(cmd) => {
            let request = cmd
                .signing
                .request(edge_cache_signer::Resource::url(cmd.url))?;
            sign(request)
        }
        Command::UrlPrefix(cmd) => {
            let request = cmd.signing.request(edge_cache_signer::Resource::url_prefix(
                cmd.url,
                cmd.url_prefix,
            ))?;
            sign(request)
        }
        Command::Cookie(cmd) => {
            let request = cmd
                .signing
                .request(edge_cache_signer::Resource::cookie(cmd.url_prefix))?;
            sign(request)
        }
    }
}

fn sign(request: edge_cache_signer::SigningRequest) -> Result<String> {
    let token = edge_cache_signer::sign(request).context("failed to sign token")?;
    tracing::info!(kind = %token.kind(), "signed token");
    Ok(token.into_string())
}
