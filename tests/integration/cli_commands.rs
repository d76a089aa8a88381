//! CLI route tests: commands executed through `RunContext` with a scripted provider.

use crate::integration::test_utils::ScriptedProvider;
use sitegen::cli::{Commands, ConfigCommands, RunContext};
use sitegen::config::SitegenConfig;
use sitegen::error::ApiError;
use sitegen::generation::prompts::{FAQ_SYSTEM_PROMPT, FOUNDATION_SYSTEM_PROMPT};
use sitegen::provider::ModelProviderClient;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn context(workspace: &Path, provider: ScriptedProvider) -> RunContext {
    let mut config = SitegenConfig::default();
    config.generation.call_retries = 0;
    config.generation.retry_backoff_ms = 0;
    let client: Arc<dyn ModelProviderClient> = Arc::new(provider);
    RunContext::with_config(workspace.to_path_buf(), config).with_provider_client(client)
}

fn generate(site_id: Option<&str>, scraped: Option<&Path>, format: &str) -> Commands {
    Commands::Generate {
        name: "Green Thumb Gardens".to_string(),
        prompt: "Garden center with native plants".to_string(),
        industry: Some("Retail nursery".to_string()),
        location: Some("Portland, OR".to_string()),
        email: None,
        phone: None,
        scraped: scraped.map(Path::to_path_buf),
        site_id: site_id.map(str::to_string),
        no_store: false,
        events: false,
        format: format.to_string(),
    }
}

#[test]
fn generate_stores_under_slugified_name() {
    let workspace = TempDir::new().unwrap();
    let ctx = context(workspace.path(), ScriptedProvider::all_valid());

    let output = ctx.execute(&generate(None, None, "text")).unwrap();

    assert!(output.contains("Site Generated"));
    assert!(output.contains("green-thumb-gardens"));
    assert!(output.contains("All sections generated."));

    let shown = ctx
        .execute(&Commands::Show {
            site_id: "green-thumb-gardens".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(value["site_id"], "green-thumb-gardens");
    assert_eq!(value["data"]["site_name"], "Green Thumb Gardens");
    assert!(ctx.store_path().starts_with(workspace.path()));
}

#[test]
fn generate_json_reports_usage_and_events() {
    let workspace = TempDir::new().unwrap();
    let ctx = context(workspace.path(), ScriptedProvider::all_valid());
    let mut command = generate(Some("gtg"), None, "json");
    if let Commands::Generate {
        no_store, events, ..
    } = &mut command
    {
        *no_store = true;
        *events = true;
    }

    let output = ctx.execute(&command).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value["site_id"].is_null());
    assert_eq!(value["result"]["total_calls"], 8);
    assert_eq!(value["events"][0]["type"], "generation_started");
    let listed = ctx
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .unwrap();
    let listed: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(listed["total"], 0);
}

#[test]
fn generate_reads_scraped_context_file() {
    let workspace = TempDir::new().unwrap();
    let scraped_path = workspace.path().join("scraped.json");
    std::fs::write(
        &scraped_path,
        r#"{"content": {"faq": [{"question": "Do you deliver?", "answer": "Yes."}]}}"#,
    )
    .unwrap();
    let provider = ScriptedProvider::all_valid().fail(FAQ_SYSTEM_PROMPT, "down");
    let ctx = context(workspace.path(), provider);

    let output = ctx
        .execute(&generate(Some("gtg"), Some(&scraped_path), "text"))
        .unwrap();

    assert!(output.contains("faq"));
    assert!(output.contains("Needs review"));
    assert!(output.contains("faq-fallback-used"));
}

#[test]
fn generate_rejects_malformed_scraped_context() {
    let workspace = TempDir::new().unwrap();
    let scraped_path = workspace.path().join("scraped.json");
    std::fs::write(&scraped_path, "{not json").unwrap();
    let ctx = context(workspace.path(), ScriptedProvider::all_valid());

    let err = ctx
        .execute(&generate(None, Some(&scraped_path), "text"))
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn generate_failure_surfaces_and_stores_nothing() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new().reply(FOUNDATION_SYSTEM_PROMPT, "nope");
    let ctx = context(workspace.path(), provider);

    let err = ctx.execute(&generate(None, None, "text")).unwrap_err();

    assert!(matches!(err, ApiError::SiteGenerationFailed(_)));
    let listed = ctx
        .execute(&Commands::List {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(listed.contains("No stored sites."));
}

#[test]
fn list_show_and_delete_stored_site() {
    let workspace = TempDir::new().unwrap();
    let ctx = context(workspace.path(), ScriptedProvider::all_valid());
    ctx.execute(&generate(Some("first"), None, "text")).unwrap();

    let listed = ctx
        .execute(&Commands::List {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(listed.contains("first"));
    assert!(listed.contains("Total: 1 site(s)"));

    let shown = ctx
        .execute(&Commands::Show {
            site_id: "first".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(shown.contains("Green Thumb Gardens"));
    assert!(shown.contains("about"));

    let deleted = ctx
        .execute(&Commands::Delete {
            site_id: "first".to_string(),
        })
        .unwrap();
    assert!(deleted.contains("Deleted site 'first'"));

    let err = ctx
        .execute(&Commands::Show {
            site_id: "first".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));
}

#[test]
fn config_commands_report_validity() {
    let workspace = TempDir::new().unwrap();
    let mut config = SitegenConfig::default();
    config.provider.api_key = Some("sk-secret".to_string());
    let ctx = RunContext::with_config(workspace.path().to_path_buf(), config.clone());

    let shown = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Show {
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(!shown.contains("sk-secret"));
    assert!(shown.contains("********"));

    let valid = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Validate,
        })
        .unwrap();
    assert!(valid.contains("Configuration is valid."));

    config.generation.max_custom_pages = 3;
    config.generation.foundation_retry_max_tokens = 100;
    let invalid = RunContext::with_config(workspace.path().to_path_buf(), config);
    let err = invalid
        .execute(&Commands::Config {
            command: ConfigCommands::Validate,
        })
        .unwrap_err();
    assert!(err.to_string().contains("1 problem"));
}
