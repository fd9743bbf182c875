//! No-mock fields configuration loading tests.
//!
//! Covers:
//! - Field files written to real temp directories and loaded into a registry
//! - Resolution order (CLI > env path > env config dir)
//! - Replace vs merge application
//! - Masking with a registry populated from a file

use dm_config::resolve::{ENV_CONFIG_DIR, ENV_FIELDS_PATH, FIELDS_FILENAME};
use dm_config::{
    load_registry, resolve_config, ConfigSource, FieldConfig, LoadMode, ValidationError,
};
use dm_mask::{mask, FieldTypeRegistry, SensitiveInfoRegistry, SensitiveType};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CUSTOMER_FIELDS: &str = r#"{
    "schema_version": "1.0.0",
    "description": "customer profile records",
    "fields": {
        "name": "CHINESE_NAME",
        "idCard": "id_card",
        "mobile": "MOBILE_PHONE",
        "email": "Email",
        "bankCard": "BANK_CARD"
    }
}"#;

const PAYMENT_FIELDS: &str = r#"{
    "mode": "merge",
    "fields": {
        "cnaps": "CNAPS_CODE",
        "expiryDate": "BANK_CARD_DATE",
        "bankCard": "ALL"
    }
}"#;

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

fn write_fields(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("create config dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("write fields file");
    path
}

#[test]
fn test_from_file_nonexistent() {
    let err = FieldConfig::from_file(Path::new("/nonexistent/fields.json")).unwrap_err();
    assert!(matches!(err, ValidationError::IoError(_)));
    assert_eq!(err.code(), 60);
}

#[test]
fn test_from_file_parses_fixture() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_fields(tmp.path(), "fields.json", CUSTOMER_FIELDS);

    let config = FieldConfig::from_file(&path).expect("load fields");
    assert_eq!(config.mode, LoadMode::Replace);
    assert_eq!(config.fields.len(), 5);

    let resolved = config.resolve_types().expect("resolve types");
    assert_eq!(resolved["idCard"], SensitiveType::IdCard);
    assert_eq!(resolved["email"], SensitiveType::Email);
}

#[test]
fn test_load_registry_from_cli_path_and_mask() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_FIELDS_PATH, ENV_CONFIG_DIR]);
        env::remove_var(ENV_FIELDS_PATH);
        env::remove_var(ENV_CONFIG_DIR);

        let tmp = TempDir::new().expect("tempdir");
        let path = write_fields(tmp.path(), "customer.json", CUSTOMER_FIELDS);

        let registry = SensitiveInfoRegistry::new();
        let snapshot = load_registry(Some(&path), &registry).expect("load registry");

        assert_eq!(snapshot.fields_source, ConfigSource::CliArgument.to_string());
        assert_eq!(snapshot.field_count, 5);
        assert_eq!(snapshot.type_counts["MOBILE_PHONE"], 1);
        assert_eq!(registry.len(), 5);

        let masked = mask(
            r#"{"name":"张三","mobile":"13800138000","bankCard":"6225880123456789","note":"vip"}"#,
            &registry,
        );
        assert_eq!(
            masked,
            r#"{"name":"张*","mobile":"138******8000","bankCard":"62******6789","note":"vip"}"#
        );
    });
}

#[test]
fn test_merge_file_layers_over_existing_registry() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_FIELDS_PATH, ENV_CONFIG_DIR]);
        env::remove_var(ENV_FIELDS_PATH);
        env::remove_var(ENV_CONFIG_DIR);

        let tmp = TempDir::new().expect("tempdir");
        let customer = write_fields(tmp.path(), "customer.json", CUSTOMER_FIELDS);
        let payment = write_fields(tmp.path(), "payment.json", PAYMENT_FIELDS);

        let registry = SensitiveInfoRegistry::new();
        load_registry(Some(&customer), &registry).expect("load customer fields");
        let snapshot = load_registry(Some(&payment), &registry).expect("load payment fields");

        assert_eq!(snapshot.mode, LoadMode::Merge);
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.get("name"), Some(SensitiveType::ChineseName));
        assert_eq!(registry.get("bankCard"), Some(SensitiveType::All));
        assert_eq!(registry.get("expiryDate"), Some(SensitiveType::BankCardDate));

        // Replacing with the customer file again drops the payment-only fields.
        load_registry(Some(&customer), &registry).expect("reload customer fields");
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("cnaps"), None);
        assert_eq!(registry.get("bankCard"), Some(SensitiveType::BankCard));
    });
}

#[test]
fn test_resolve_config_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_FIELDS_PATH, ENV_CONFIG_DIR]);

        let tmp = TempDir::new().expect("tempdir");
        let cli = write_fields(&tmp.path().join("cli"), "fields.json", CUSTOMER_FIELDS);
        let env_path = write_fields(&tmp.path().join("env"), "fields.json", PAYMENT_FIELDS);
        env::set_var(ENV_FIELDS_PATH, &env_path);
        env::remove_var(ENV_CONFIG_DIR);

        let paths = resolve_config(Some(&cli));
        assert_eq!(paths.fields.as_deref(), Some(cli.as_path()));
        assert_eq!(paths.fields_source, ConfigSource::CliArgument);

        let paths = resolve_config(None);
        assert_eq!(paths.fields.as_deref(), Some(env_path.as_path()));
        assert_eq!(paths.fields_source, ConfigSource::Environment);
    });
}

#[test]
fn test_resolve_config_dir_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_FIELDS_PATH, ENV_CONFIG_DIR]);

        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().join("conf");
        let expected = write_fields(&dir, FIELDS_FILENAME, CUSTOMER_FIELDS);
        env::remove_var(ENV_FIELDS_PATH);
        env::set_var(ENV_CONFIG_DIR, &dir);

        // A CLI path that does not exist falls through to the environment.
        let paths = resolve_config(Some(&tmp.path().join("missing.json")));
        assert_eq!(paths.fields.as_deref(), Some(expected.as_path()));
        assert_eq!(paths.fields_source, ConfigSource::Environment);
    });
}

#[test]
fn test_invalid_file_leaves_registry_untouched() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_FIELDS_PATH, ENV_CONFIG_DIR]);
        env::remove_var(ENV_FIELDS_PATH);
        env::remove_var(ENV_CONFIG_DIR);

        let tmp = TempDir::new().expect("tempdir");
        let bad_type = write_fields(
            tmp.path(),
            "bad_type.json",
            r#"{"fields":{"name":"CHINESE_NAME","ssn":"SOCIAL_SECURITY"}}"#,
        );
        let bad_version = write_fields(
            tmp.path(),
            "bad_version.json",
            r#"{"schema_version":"9.9.9","fields":{"name":"ALL"}}"#,
        );
        let bad_json = write_fields(tmp.path(), "bad_json.json", "{ fields: ");

        let registry = SensitiveInfoRegistry::from_fields([("legacy", SensitiveType::All)]);

        let err = load_registry(Some(&bad_type), &registry).expect_err("unknown type");
        assert!(matches!(err, ValidationError::InvalidValue { .. }));

        let err = load_registry(Some(&bad_version), &registry).expect_err("bad version");
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));

        let err = load_registry(Some(&bad_json), &registry).expect_err("bad json");
        assert!(matches!(err, ValidationError::ParseError(_)));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("legacy"), Some(SensitiveType::All));
    });
}
