//! Property-based tests for override precedence and resolution stability

use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use std::collections::HashMap;
use std::sync::Arc;
use tsdbctl::config::{ConfigResolver, RawOverrides, TsdbConfig};
use tsdbctl::performance::ReporterRegistry;

fn value() -> impl Strategy<Value = String> {
    "[a-z0-9.:-]{1,16}"
}

fn maybe_value() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(value())
}

/// Base configs whose fields may or may not be populated.
fn base_config() -> impl Strategy<Value = TsdbConfig> {
    (
        maybe_value(),
        maybe_value(),
        maybe_value(),
        maybe_value(),
        maybe_value(),
        maybe_value(),
        proptest::option::of(prop_oneof![Just("debug"), Just("info"), Just("warn"), Just("error")]),
    )
        .prop_map(
            |(endpoint, container, table_path, username, password, access_key, log_level)| {
                TsdbConfig {
                    web_api_endpoint: endpoint.unwrap_or_default(),
                    container: container.unwrap_or_default(),
                    table_path: table_path.unwrap_or_default(),
                    username: username.unwrap_or_default(),
                    password: password.unwrap_or_default(),
                    access_key: access_key.unwrap_or_default(),
                    log_level: log_level.map(str::to_string).unwrap_or_default(),
                    ..Default::default()
                }
            },
        )
}

fn environment() -> impl Strategy<Value = HashMap<String, String>> {
    (maybe_value(), maybe_value()).prop_map(|(endpoint, access_key)| {
        let mut env = HashMap::new();
        if let Some(endpoint) = endpoint {
            env.insert("V3IO_API".to_string(), endpoint);
        }
        if let Some(access_key) = access_key {
            env.insert("V3IO_ACCESS_KEY".to_string(), access_key);
        }
        env
    })
}

/// An explicit endpoint override always wins
#[test]
fn test_endpoint_override_wins_property() {
    let mut runner = TestRunner::default();

    runner
        .run(
            &(value(), base_config(), environment()),
            |(endpoint, base, env)| {
                let registry = ReporterRegistry::new();
                let resolver = ConfigResolver::with_parts(env, &registry);
                let overrides = RawOverrides::new().with_endpoint(endpoint.clone());

                let resolved = resolver.resolve(&overrides, base).unwrap();
                prop_assert_eq!(resolved.config.web_api_endpoint, endpoint);
                Ok(())
            },
        )
        .unwrap();
}

/// Without override or base value, the environment endpoint is used
#[test]
fn test_environment_endpoint_fallback_property() {
    let mut runner = TestRunner::default();

    runner
        .run(&(value(), base_config()), |(env_endpoint, base)| {
            let registry = ReporterRegistry::new();
            let mut env = HashMap::new();
            env.insert("V3IO_API".to_string(), env_endpoint.clone());
            let resolver = ConfigResolver::with_parts(env, &registry);
            let base = TsdbConfig {
                web_api_endpoint: String::new(),
                ..base
            };

            let resolved = resolver.resolve(&RawOverrides::new(), base).unwrap();
            prop_assert_eq!(resolved.config.web_api_endpoint, env_endpoint);
            Ok(())
        })
        .unwrap();
}

/// Username/password overrides keep the environment access key out
#[test]
fn test_user_password_never_leaks_env_key_property() {
    let mut runner = TestRunner::default();

    runner
        .run(
            &(value(), value(), value(), base_config()),
            |(username, password, env_key, base)| {
                let registry = ReporterRegistry::new();
                let mut env = HashMap::new();
                env.insert("V3IO_API".to_string(), "host-from-env:123".to_string());
                env.insert("V3IO_ACCESS_KEY".to_string(), env_key.clone());
                let resolver = ConfigResolver::with_parts(env, &registry);
                let overrides = RawOverrides::new().with_user_password(username, password);

                let base_key = base.access_key.clone();
                let resolved = resolver.resolve(&overrides, base).unwrap();
                prop_assert_eq!(resolved.config.access_key, base_key);
                Ok(())
            },
        )
        .unwrap();
}

/// An explicit access key always appears in the result
#[test]
fn test_access_key_override_always_applies_property() {
    let mut runner = TestRunner::default();

    runner
        .run(
            &(value(), any::<bool>(), base_config(), environment()),
            |(access_key, with_user_password, base, env)| {
                let registry = ReporterRegistry::new();
                let resolver = ConfigResolver::with_parts(env, &registry);
                let mut overrides = RawOverrides::new()
                    .with_endpoint("localhost:8081")
                    .with_access_key(access_key.clone());
                if with_user_password {
                    overrides = overrides.with_user_password("Vel@Odar", "p455w0rd");
                }

                let resolved = resolver.resolve(&overrides, base).unwrap();
                prop_assert_eq!(resolved.config.access_key, access_key);
                Ok(())
            },
        )
        .unwrap();
}

/// Log level defaults to "info" and is otherwise untouched
#[test]
fn test_log_level_property() {
    let mut runner = TestRunner::default();

    runner
        .run(&(base_config(), environment()), |(base, env)| {
            let registry = ReporterRegistry::new();
            let resolver = ConfigResolver::with_parts(env, &registry);
            let overrides = RawOverrides::new().with_endpoint("localhost:8081");

            let original = base.log_level.clone();
            let resolved = resolver.resolve(&overrides, base).unwrap();
            if original.is_empty() {
                prop_assert_eq!(resolved.config.log_level, "info");
            } else {
                prop_assert_eq!(resolved.config.log_level, original);
            }
            Ok(())
        })
        .unwrap();
}

/// Resolving twice gives equal configs and the same reporter
#[test]
fn test_resolution_idempotence_property() {
    let mut runner = TestRunner::default();

    runner
        .run(
            &(maybe_value(), maybe_value(), base_config(), environment()),
            |(container, access_key, base, env)| {
                let registry = ReporterRegistry::new();
                let resolver = ConfigResolver::with_parts(env, &registry);
                let mut overrides = RawOverrides::new().with_endpoint("localhost:8081");
                if let Some(container) = container {
                    overrides = overrides.with_container(container);
                }
                if let Some(access_key) = access_key {
                    overrides = overrides.with_access_key(access_key);
                }

                let first = resolver.resolve(&overrides, base.clone()).unwrap();
                let second = resolver.resolve(&overrides, base).unwrap();
                prop_assert_eq!(&first.config, &second.config);
                prop_assert!(Arc::ptr_eq(&first.reporter, &second.reporter));
                Ok(())
            },
        )
        .unwrap();
}
