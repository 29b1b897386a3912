//! Integration tests for configuration resolution against the process environment

use std::sync::Arc;

use tempfile::TempDir;
use tsdbctl::config::{ConfigLoader, ConfigResolver, RawOverrides, TsdbConfig};
use tsdbctl::error::ConfigError;
use tsdbctl::performance::default_reporter_instance;

use crate::integration::test_utils::with_env;

const TENANT_ENV: &[(&str, &str)] = &[
    ("V3IO_API", "host-from-env:123"),
    ("V3IO_ACCESS_KEY", "key-from-env"),
];

#[test]
fn test_populate_config_with_tenant() {
    with_env(&[], || {
        let overrides = RawOverrides::new().with_endpoint("localhost:80123");
        let mut config = TsdbConfig {
            username: "Vel@Odar".to_string(),
            password: "p455w0rd".to_string(),
            container: "123".to_string(),
            table_path: "/x/y/z".to_string(),
            ..Default::default()
        };

        let reporter = ConfigResolver::new()
            .populate(&overrides, &mut config)
            .unwrap();

        let expected = TsdbConfig {
            web_api_endpoint: "localhost:80123".to_string(),
            container: "123".to_string(),
            table_path: "/x/y/z".to_string(),
            username: "Vel@Odar".to_string(),
            password: "p455w0rd".to_string(),
            log_level: "info".to_string(),
            ..Default::default()
        };
        assert_eq!(config, expected);
        assert!(Arc::ptr_eq(&reporter, &default_reporter_instance().unwrap()));
    });
}

#[test]
fn test_container_config() {
    with_env(TENANT_ENV, || {
        let overrides = RawOverrides::new()
            .with_endpoint("localhost:80123")
            .with_container("test")
            .with_access_key("acce55-key");
        let base = TsdbConfig {
            username: "Vel@Odar".to_string(),
            password: "p455w0rd".to_string(),
            table_path: "/x/y/z".to_string(),
            ..Default::default()
        };

        let resolved = ConfigResolver::new().resolve(&overrides, base).unwrap();

        let expected = TsdbConfig {
            web_api_endpoint: "localhost:80123".to_string(),
            container: "test".to_string(),
            table_path: "/x/y/z".to_string(),
            username: "Vel@Odar".to_string(),
            password: "p455w0rd".to_string(),
            access_key: "acce55-key".to_string(),
            log_level: "info".to_string(),
            ..Default::default()
        };
        assert_eq!(resolved.config, expected);
    });
}

#[test]
fn test_config_from_env_vars_and_password() {
    with_env(TENANT_ENV, || {
        let overrides = RawOverrides::new()
            .with_container("test")
            .with_user_password("Vel@Odar", "p455w0rd");
        let base = ConfigLoader::load_from_struct(&TsdbConfig {
            table_path: "/x/y/z".to_string(),
            ..Default::default()
        })
        .unwrap();

        let mut expected = base.clone();
        let resolved = ConfigResolver::new().resolve(&overrides, base).unwrap();
        expected.web_api_endpoint = "host-from-env:123".to_string();
        expected.container = "test".to_string();
        expected.table_path = "/x/y/z".to_string();
        expected.username = "Vel@Odar".to_string();
        expected.password = "p455w0rd".to_string();
        expected.log_level = "info".to_string();

        assert_eq!(resolved.config, expected);
        assert!(resolved.config.access_key.is_empty());
    });
}

#[test]
fn test_config_from_env_vars() {
    with_env(TENANT_ENV, || {
        let overrides = RawOverrides::new().with_container("test");
        let base = ConfigLoader::load_from_struct(&TsdbConfig {
            table_path: "/x/y/z".to_string(),
            ..Default::default()
        })
        .unwrap();

        let mut expected = base.clone();
        let resolved = ConfigResolver::new().resolve(&overrides, base).unwrap();
        expected.web_api_endpoint = "host-from-env:123".to_string();
        expected.access_key = "key-from-env".to_string();
        expected.container = "test".to_string();
        expected.log_level = "info".to_string();

        assert_eq!(resolved.config, expected);
    });
}

#[test]
fn test_endpoint_from_env_with_explicit_access_key() {
    with_env(TENANT_ENV, || {
        let overrides = RawOverrides::new()
            .with_container("test")
            .with_access_key("acce55-key");

        let resolved = ConfigResolver::new()
            .resolve(&overrides, TsdbConfig::default())
            .unwrap();

        let expected = TsdbConfig {
            web_api_endpoint: "host-from-env:123".to_string(),
            container: "test".to_string(),
            access_key: "acce55-key".to_string(),
            log_level: "info".to_string(),
            ..Default::default()
        };
        assert_eq!(resolved.config, expected);
    });
}

#[test]
fn test_no_endpoint_anywhere() {
    with_env(&[("V3IO_ACCESS_KEY", "key-from-env")], || {
        let err = ConfigResolver::new()
            .resolve(&RawOverrides::new(), TsdbConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEndpoint));
    });
}

#[test]
fn test_loaded_file_then_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("v3io-tsdb-config.yaml");
    std::fs::write(
        &config_file,
        r#"
web_api_endpoint: "from-file:8081"
container: bigdata
table_path: metrics
log_level: warn
"#,
    )
    .unwrap();

    with_env(TENANT_ENV, || {
        let base = ConfigLoader::load_from_file(&config_file).unwrap();
        let overrides = RawOverrides::new().with_table_path("metrics/cpu");

        let resolved = ConfigResolver::new().resolve(&overrides, base).unwrap();
        assert_eq!(resolved.config.web_api_endpoint, "from-file:8081");
        assert_eq!(resolved.config.container, "bigdata");
        assert_eq!(resolved.config.table_path, "metrics/cpu");
        assert_eq!(resolved.config.access_key, "key-from-env");
        assert_eq!(resolved.config.log_level, "warn");
    });
}

#[test]
fn test_config_file_named_by_environment() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("tenant.yaml");
    std::fs::write(&config_file, "container: from-env-file\n").unwrap();

    with_env(
        &[
            ("V3IO_API", "host-from-env:123"),
            ("V3IO_TSDB_CONFIG", config_file.to_str().unwrap()),
        ],
        || {
            let base = ConfigLoader::load(None).unwrap();
            assert_eq!(base.container, "from-env-file");
            assert_eq!(base.web_api_endpoint, "host-from-env:123");
        },
    );
}
