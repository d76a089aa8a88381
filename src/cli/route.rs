//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_config_text, format_config_validation_text, format_generation_result_json,
    format_generation_result_text, format_site_json, format_site_list_json,
    format_site_list_text, format_site_text,
};
use crate::config::{ConfigLoader, SitegenConfig};
use crate::error::{ApiError, StorageError};
use crate::generation::SiteGenerator;
use crate::provider::{LlmCaller, ModelProviderClient};
use crate::site::{BusinessInfo, ScrapedWebsiteContext};
use crate::store::{default_site_id, SiteContentStore, SledSiteContentStore};
use crate::telemetry::{MemoryProgressSink, ProgressEvent, TracingProgressSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: workspace, loaded config, and an optional provider
/// override. Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: SitegenConfig,
    provider_override: Option<Arc<dyn ModelProviderClient>>,
}

/// Arguments for one `generate` invocation.
struct GenerateArgs<'a> {
    info: BusinessInfo,
    scraped: Option<&'a Path>,
    site_id: Option<&'a str>,
    no_store: bool,
    events: bool,
    format: &'a str,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: SitegenConfig) -> Self {
        Self {
            workspace_root,
            config,
            provider_override: None,
        }
    }

    /// Use `client` for generation instead of building one from the provider config.
    pub fn with_provider_client(mut self, client: Arc<dyn ModelProviderClient>) -> Self {
        self.provider_override = Some(client);
        self
    }

    pub fn config(&self) -> &SitegenConfig {
        &self.config
    }

    pub fn store_path(&self) -> PathBuf {
        self.config
            .storage
            .resolve_store_path(&self.workspace_root)
    }

    fn open_store(&self) -> Result<SledSiteContentStore, ApiError> {
        let path = self.store_path();
        std::fs::create_dir_all(&path).map_err(|e| ApiError::StorageError(StorageError::IoError(e)))?;
        Ok(SledSiteContentStore::new(path)?)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                name,
                prompt,
                industry,
                location,
                email,
                phone,
                scraped,
                site_id,
                no_store,
                events,
                format,
            } => {
                let mut info = BusinessInfo::new(name.clone(), prompt.clone())
                    .with_contact(email.clone(), phone.clone());
                info.industry = industry.clone();
                info.location = location.clone();
                self.handle_generate(GenerateArgs {
                    info,
                    scraped: scraped.as_deref(),
                    site_id: site_id.as_deref(),
                    no_store: *no_store,
                    events: *events,
                    format,
                })
            }
            Commands::Show { site_id, format } => {
                let store = self.open_store()?;
                let site = store
                    .get(site_id)?
                    .ok_or_else(|| StorageError::SiteNotFound(site_id.clone()))?;
                Ok(if format == "json" {
                    format_site_json(&site)
                } else {
                    format_site_text(&site)
                })
            }
            Commands::List { format } => {
                let sites = self.open_store()?.list()?;
                Ok(if format == "json" {
                    format_site_list_json(&sites)
                } else {
                    format_site_list_text(&sites)
                })
            }
            Commands::Delete { site_id } => {
                self.open_store()?.delete(site_id)?;
                info!(site_id = %site_id, "Site deleted");
                Ok(format!("Deleted site '{}'.", site_id))
            }
            Commands::Config { command } => match command {
                ConfigCommands::Show { format } => Ok(format_config_text(&self.config, format)),
                ConfigCommands::Validate => {
                    let result = self.config.validate();
                    let text = format_config_validation_text(&result);
                    match result {
                        Ok(()) => Ok(text),
                        Err(_) => Err(ApiError::ConfigError(text)),
                    }
                }
            },
        }
    }

    fn build_generator(&self) -> Result<SiteGenerator, ApiError> {
        match &self.provider_override {
            Some(client) => {
                self.config
                    .generation
                    .validate()
                    .map_err(ApiError::ConfigError)?;
                Ok(SiteGenerator::new(
                    LlmCaller::new(Arc::clone(client)),
                    self.config.generation.clone(),
                )
                .with_pricing(self.config.pricing))
            }
            None => SiteGenerator::from_config(&self.config),
        }
    }

    fn handle_generate(&self, args: GenerateArgs<'_>) -> Result<String, ApiError> {
        let scraped = match args.scraped {
            Some(path) => Some(load_scraped_context(path)?),
            None => None,
        };

        let memory_sink = Arc::new(MemoryProgressSink::new());
        let generator = if args.events {
            self.build_generator()?.with_progress(memory_sink.clone())
        } else {
            self.build_generator()?.with_progress(Arc::new(TracingProgressSink))
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to start async runtime: {}", e)))?;
        let result =
            runtime.block_on(generator.generate_site_content(&args.info, scraped.as_ref()))?;

        let stored_id = if args.no_store {
            None
        } else {
            let site_id = args
                .site_id
                .map(str::to_string)
                .unwrap_or_else(|| default_site_id(&result.data));
            let stored = self.open_store()?.put(&site_id, &result.data)?;
            info!(site_id = %stored.site_id, "Generated site stored");
            Some(stored.site_id)
        };

        let events: Vec<ProgressEvent> = memory_sink.events();
        Ok(if args.format == "json" {
            format_generation_result_json(&result, stored_id.as_deref(), &events)
        } else {
            format_generation_result_text(&result, stored_id.as_deref(), &events)
        })
    }
}

fn load_scraped_context(path: &Path) -> Result<ScrapedWebsiteContext, ApiError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ApiError::InvalidInput(format!(
            "Failed to read scraped context {}: {}",
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ApiError::InvalidInput(format!(
            "Invalid scraped context {}: {}",
            path.display(),
            e
        ))
    })
}
