//! Integration tests for layered configuration loading

use crate::integration::test_utils::with_isolated_env;
use sitegen::config::{ConfigLoader, ProviderType, SitegenConfig, ValidationError};
use sitegen::error::ApiError;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_load_from_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("sitegen.toml");
    write(
        &config_file,
        r#"
[provider]
provider_type = "ollama"
model = "llama3.1"

[generation]
max_custom_pages = 2

[generation.foundation]
temperature = 0.6
max_tokens = 2800
timeout_secs = 60

[pricing]
prompt_cents_per_million = 15.0
completion_cents_per_million = 60.0
"#,
    );

    let config = with_isolated_env(&temp_dir, &[], || {
        ConfigLoader::load_from_file(&config_file).unwrap()
    });

    assert_eq!(config.provider.provider_type, ProviderType::Ollama);
    assert_eq!(config.provider.model, "llama3.1");
    assert_eq!(config.generation.max_custom_pages, 2);
    assert_eq!(config.generation.foundation.max_tokens, 2800);
    assert_eq!(config.generation.foundation_retry_max_tokens, 4000);
    assert_eq!(config.generation.faq.max_tokens, 2500);
    assert_eq!(config.pricing.prompt_cents_per_million, 15.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let err = with_isolated_env(&temp_dir, &[], || {
        ConfigLoader::load_from_file(&missing).unwrap_err()
    });

    assert!(matches!(err, ApiError::ConfigError(ref msg) if msg.contains("not found")));
}

#[test]
fn test_workspace_defaults_without_files() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();

    let config = with_isolated_env(&temp_dir, &[], || ConfigLoader::load(&workspace).unwrap());

    assert_eq!(config.provider.provider_type, ProviderType::OpenRouter);
    assert_eq!(config.generation.max_custom_pages, 3);
    assert_eq!(config.storage.store_path, Path::new(".sitegen/store"));
    assert!(config.pricing.is_free());
}

#[test]
fn test_layers_apply_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    write(
        &temp_dir.path().join("xdg-config/sitegen/config.toml"),
        r#"
[provider]
model = "global-model"
api_key = "global-key"

[generation]
call_retries = 4
"#,
    );
    write(
        &workspace.join("config/config.toml"),
        r#"
[provider]
model = "workspace-model"

[generation]
max_custom_pages = 1
"#,
    );
    write(
        &workspace.join("config/development.toml"),
        r#"
[generation]
max_custom_pages = 2
"#,
    );

    let config = with_isolated_env(&temp_dir, &[], || ConfigLoader::load(&workspace).unwrap());

    assert_eq!(config.provider.model, "workspace-model");
    assert_eq!(config.provider.api_key.as_deref(), Some("global-key"));
    assert_eq!(config.generation.call_retries, 4);
    assert_eq!(config.generation.max_custom_pages, 2);
}

#[test]
fn test_environment_name_selects_workspace_file() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    write(
        &workspace.join("config/development.toml"),
        "[storage]\nstore_path = \"dev-store\"\n",
    );
    write(
        &workspace.join("config/production.toml"),
        "[storage]\nstore_path = \"/var/lib/sitegen\"\n",
    );

    let config = with_isolated_env(&temp_dir, &[("SITEGEN_ENV", "production")], || {
        ConfigLoader::load(&workspace).unwrap()
    });

    assert_eq!(config.storage.store_path, Path::new("/var/lib/sitegen"));
}

#[test]
fn test_environment_variables_override_files() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    write(
        &workspace.join("config/config.toml"),
        "[provider]\nmodel = \"workspace-model\"\n",
    );

    let config = with_isolated_env(
        &temp_dir,
        &[
            ("SITEGEN__PROVIDER__MODEL", "env-model"),
            ("SITEGEN__GENERATION__MAX_CUSTOM_PAGES", "5"),
        ],
        || ConfigLoader::load(&workspace).unwrap(),
    );

    assert_eq!(config.provider.model, "env-model");
    assert_eq!(config.generation.max_custom_pages, 5);
}

#[test]
fn test_validation_collects_every_problem() {
    let mut config = SitegenConfig::default();
    config.provider.model = "  ".to_string();
    config.generation.foundation.temperature = 1.5;
    config.pricing.completion_cents_per_million = -1.0;
    config.logging.level = "loud".to_string();

    let errors = config.clone().validate().unwrap_err();

    assert_eq!(errors.len(), 4);
    assert!(matches!(errors[0], ValidationError::Provider(_)));
    assert!(matches!(errors[1], ValidationError::Generation(_)));
    assert!(matches!(errors[2], ValidationError::Pricing(_)));
    assert!(matches!(errors[3], ValidationError::Logging(_)));

    let err = config.validated().unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    write(&config_file, "[provider\nmodel = ");

    let err = with_isolated_env(&temp_dir, &[], || {
        ConfigLoader::load_from_file(&config_file).unwrap_err()
    });

    assert!(matches!(err, ApiError::ConfigError(_)));
}
