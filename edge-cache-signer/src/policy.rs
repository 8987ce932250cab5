/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::encoding;
use crate::error::SigningError;
use std::fmt;

const PATH_TOKEN_PARAM: &str = "edge-cache-token=";
const COOKIE_NAME: &str = "Edge-Cache-Cookie";

/// The wire form of a signed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TokenKind {
    /// Token embedded as a path segment in front of a file name.
    PathComponent,
    /// Query string token authorizing exactly one URL.
    Url,
    /// Query string token authorizing every URL under a prefix.
    UrlPrefix,
    /// Cookie value authorizing every URL under a prefix.
    Cookie,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::PathComponent => "path-component",
            TokenKind::Url => "url",
            TokenKind::UrlPrefix => "url-prefix",
            TokenKind::Cookie => "cookie",
        })
    }
}

/// The resource a token grants access to.
///
/// Each variant defines both the policy string that gets signed and the
/// layout of the final token around that policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// `{url_prefix}edge-cache-token=...&Signature=.../{filename}`
    ///
    /// `url_prefix` is concatenated as-is, so it must already end with the
    /// delimiter the CDN route expects.
    PathComponent {
        /// Prefix placed directly in front of `edge-cache-token=`.
        url_prefix: String,
        /// File name appended after the token.
        filename: String,
    },
    /// `{url}?Expires=...&KeyName=...&Signature=...`
    Url {
        /// The exact URL to authorize.
        url: String,
    },
    /// `{url}?URLPrefix=...&Expires=...&KeyName=...&Signature=...`
    UrlPrefix {
        /// The URL the token is attached to.
        url: String,
        /// The prefix every authorized URL shares.
        url_prefix: String,
    },
    /// `Edge-Cache-Cookie=URLPrefix=...:Expires=...:KeyName=...:Signature=...`
    Cookie {
        /// The prefix every authorized URL shares.
        url_prefix: String,
    },
}

impl Resource {
    /// A path-component token for `filename` under `url_prefix`.
    pub fn path_component(url_prefix: impl Into<String>, filename: impl Into<String>) -> Self {
        Resource::PathComponent {
            url_prefix: url_prefix.into(),
            filename: filename.into(),
        }
    }

    /// A query string token for a single `url`.
    pub fn url(url: impl Into<String>) -> Self {
        Resource::Url { url: url.into() }
    }

    /// A query string token attached to `url` that authorizes `url_prefix`.
    pub fn url_prefix(url: impl Into<String>, url_prefix: impl Into<String>) -> Self {
        Resource::UrlPrefix {
            url: url.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// A cookie value authorizing `url_prefix`.
    pub fn cookie(url_prefix: impl Into<String>) -> Self {
        Resource::Cookie {
            url_prefix: url_prefix.into(),
        }
    }

    /// Returns the wire form this resource is signed into.
    pub fn kind(&self) -> TokenKind {
        match self {
            Resource::PathComponent { .. } => TokenKind::PathComponent,
            Resource::Url { .. } => TokenKind::Url,
            Resource::UrlPrefix { .. } => TokenKind::UrlPrefix,
            Resource::Cookie { .. } => TokenKind::Cookie,
        }
    }

    /// Trims the fields that are trimmed on the wire and rejects empty ones.
    ///
    /// The path-component prefix and file name are kept byte for byte.
    pub(crate) fn normalize(self) -> Result<Self, SigningError> {
        Ok(match self {
            Resource::PathComponent {
                url_prefix,
                filename,
            } => {
                require_non_empty("url_prefix", &url_prefix)?;
                require_non_empty("filename", &filename)?;
                Resource::PathComponent {
                    url_prefix,
                    filename,
                }
            }
            Resource::Url { url } => Resource::Url {
                url: trimmed("url", &url)?,
            },
            Resource::UrlPrefix { url, url_prefix } => Resource::UrlPrefix {
                url: trimmed("url", &url)?,
                url_prefix: trimmed("url_prefix", &url_prefix)?,
            },
            Resource::Cookie { url_prefix } => Resource::Cookie {
                url_prefix: trimmed("url_prefix", &url_prefix)?,
            },
        })
    }

    /// Builds the canonical policy string. Its UTF-8 bytes are what get signed.
    pub(crate) fn policy(&self, expires: i64, key_name: &str) -> String {
        match self {
            Resource::PathComponent { url_prefix, .. } => {
                format!("{url_prefix}{PATH_TOKEN_PARAM}Expires={expires}&KeyName={key_name}")
            }
            Resource::Url { url } => {
                let separator = query_separator(url);
                format!("{url}{separator}Expires={expires}&KeyName={key_name}")
            }
            Resource::UrlPrefix { url_prefix, .. } => {
                let prefix = encoding::encode(url_prefix);
                format!("URLPrefix={prefix}&Expires={expires}&KeyName={key_name}")
            }
            Resource::Cookie { url_prefix } => {
                let prefix = encoding::encode(url_prefix);
                format!("URLPrefix={prefix}:Expires={expires}:KeyName={key_name}")
            }
        }
    }

    /// Lays out the final token around a policy and its encoded signature.
    pub(crate) fn token(&self, policy: &str, signature: &str) -> String {
        match self {
            Resource::PathComponent { filename, .. } => {
                format!("{policy}&Signature={signature}/{filename}")
            }
            Resource::Url { .. } => format!("{policy}&Signature={signature}"),
            Resource::UrlPrefix { url, .. } => {
                let separator = query_separator(url);
                format!("{url}{separator}{policy}&Signature={signature}")
            }
            Resource::Cookie { .. } => {
                format!("{COOKIE_NAME}={policy}:Signature={signature}")
            }
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), SigningError> {
    if value.trim().is_empty() {
        return Err(SigningError::invalid_input(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn trimmed(field: &'static str, value: &str) -> Result<String, SigningError> {
    require_non_empty(field, value)?;
    Ok(value.trim().to_string())
}

/// `&` if `url` already carries at least one query parameter, `?` otherwise.
///
/// Blank parameters such as `?a=` or `?a` count; a bare `?` or `?&` does not.
/// The query ends at the first `#`.
pub(crate) fn query_separator(url: &str) -> char {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let has_params = without_fragment
        .split_once('?')
        .map(|(_, query)| form_urlencoded::parse(query.as_bytes()).next().is_some())
        .unwrap_or(false);
    if has_params {
        '&'
    } else {
        '?'
    }
}
