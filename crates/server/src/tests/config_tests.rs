use super::{load_settings_from, ConfigError};

use std::collections::HashMap;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn loads_required_values_from_environment() {
    let settings = load_settings_from(
        None,
        env_of(&[
            ("SHOPIFY_DOMAIN", "demo.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_123"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.shopify_domain, "demo.myshopify.com");
    assert_eq!(settings.shopify_access_token, "shpat_123");
    assert_eq!(settings.shopify_api_version, "2024-07");
    assert_eq!(settings.server_bind, "127.0.0.1:3000");
}

#[test]
fn missing_domain_fails_fast() {
    let err = load_settings_from(None, env_of(&[("SHOPIFY_ACCESS_TOKEN", "shpat_123")]))
        .expect_err("should fail");
    assert!(matches!(err, ConfigError::Missing("SHOPIFY_DOMAIN")));
    assert!(err.to_string().contains("SHOPIFY_DOMAIN"));
}

#[test]
fn blank_token_counts_as_missing() {
    let err = load_settings_from(
        None,
        env_of(&[
            ("SHOPIFY_DOMAIN", "demo.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "   "),
        ]),
    )
    .expect_err("should fail");
    assert!(matches!(err, ConfigError::Missing("SHOPIFY_ACCESS_TOKEN")));
}

#[test]
fn environment_overrides_settings_file() {
    let file = r#"
bind_addr = "0.0.0.0:8080"
shopify_domain = "file.myshopify.com"
shopify_access_token = "shpat_file"
shopify_api_version = "2024-04"
"#;
    let settings = load_settings_from(
        Some(file),
        env_of(&[
            ("SHOPIFY_DOMAIN", "env.myshopify.com"),
            ("APP__BIND_ADDR", "127.0.0.1:9999"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.shopify_domain, "env.myshopify.com");
    assert_eq!(settings.shopify_access_token, "shpat_file");
    assert_eq!(settings.shopify_api_version, "2024-04");
    assert_eq!(settings.server_bind, "127.0.0.1:9999");
}

#[test]
fn prefixed_variable_wins_over_plain_one() {
    let settings = load_settings_from(
        None,
        env_of(&[
            ("SHOPIFY_DOMAIN", "plain.myshopify.com"),
            ("APP__SHOPIFY_DOMAIN", "prefixed.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_123"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.shopify_domain, "prefixed.myshopify.com");
}

#[test]
fn malformed_settings_file_is_rejected() {
    let err = load_settings_from(Some("bind_addr = "), env_of(&[])).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn debug_output_redacts_the_token() {
    let settings = load_settings_from(
        None,
        env_of(&[
            ("SHOPIFY_DOMAIN", "demo.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_secret"),
        ]),
    )
    .expect("settings");
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("shpat_secret"));
    assert!(rendered.contains("demo.myshopify.com"));
}
