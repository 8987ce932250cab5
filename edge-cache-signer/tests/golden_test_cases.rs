/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::DateTime;
use edge_cache_signer::{
    sign, sign_cookie, sign_path_component, sign_url, sign_url_prefix, PrivateKey, Resource,
    SigningRequest,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestCase {
    id: String,
    documentation: String,
    kind: Kind,
    private_key: String,
    key_name: String,
    expires: i64,
    url: Option<String>,
    url_prefix: Option<String>,
    filename: Option<String>,
    expected: TestExpected,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Kind {
    PathComponent,
    Url,
    UrlPrefix,
    Cookie,
}

#[derive(Debug, Deserialize)]
struct TestExpected {
    policy: String,
    token: String,
}

impl TestCase {
    fn field(&self, value: &Option<String>, name: &str) -> String {
        value
            .clone()
            .unwrap_or_else(|| panic!("test {} is missing {name}", self.id))
    }

    fn resource(&self) -> Resource {
        match self.kind {
            Kind::PathComponent => Resource::path_component(
                self.field(&self.url_prefix, "urlPrefix"),
                self.field(&self.filename, "filename"),
            ),
            Kind::Url => Resource::url(self.field(&self.url, "url")),
            Kind::UrlPrefix => Resource::url_prefix(
                self.field(&self.url, "url"),
                self.field(&self.url_prefix, "urlPrefix"),
            ),
            Kind::Cookie => Resource::cookie(self.field(&self.url_prefix, "urlPrefix")),
        }
    }

    fn sign_with_free_function(&self) -> String {
        let expires = DateTime::from_secs(self.expires);
        let result = match self.kind {
            Kind::PathComponent => sign_path_component(
                &self.field(&self.url_prefix, "urlPrefix"),
                &self.field(&self.filename, "filename"),
                &self.key_name,
                &self.private_key,
                expires,
            ),
            Kind::Url => sign_url(
                &self.field(&self.url, "url"),
                &self.key_name,
                &self.private_key,
                expires,
            ),
            Kind::UrlPrefix => sign_url_prefix(
                &self.field(&self.url, "url"),
                &self.field(&self.url_prefix, "urlPrefix"),
                &self.key_name,
                &self.private_key,
                expires,
            ),
            Kind::Cookie => sign_cookie(
                &self.field(&self.url_prefix, "urlPrefix"),
                &self.key_name,
                &self.private_key,
                expires,
            ),
        };
        result.unwrap_or_else(|e| panic!("failed to sign test {}: {e}", self.id))
    }
}

fn load_test_cases() -> Vec<TestCase> {
    let json = include_str!("test-cases.json");
    serde_json::from_str(json).expect("Failed to parse test cases")
}

#[test]
fn test_golden_tokens() {
    let test_cases = load_test_cases();
    assert!(!test_cases.is_empty());

    for test_case in test_cases {
        println!(
            "\nRunning test: {} - {}",
            test_case.id, test_case.documentation
        );

        let private_key = PrivateKey::from_base64(&test_case.private_key)
            .unwrap_or_else(|_| panic!("Failed to parse private key for test {}", test_case.id));

        let request = SigningRequest::builder()
            .resource(test_case.resource())
            .key_name(&test_case.key_name)
            .private_key(private_key)
            .expires_at(DateTime::from_secs(test_case.expires))
            .build()
            .unwrap_or_else(|e| panic!("Failed to build request for test {}: {e}", test_case.id));

        let token = sign(request)
            .unwrap_or_else(|e| panic!("Failed to sign test {}: {e}", test_case.id));

        assert_eq!(
            token.policy(),
            test_case.expected.policy,
            "Test {} policy mismatch",
            test_case.id
        );
        assert_eq!(
            token.as_str(),
            test_case.expected.token,
            "Test {} token mismatch",
            test_case.id
        );
        assert_eq!(
            test_case.sign_with_free_function(),
            test_case.expected.token,
            "Test {} free function mismatch",
            test_case.id
        );
    }
}
