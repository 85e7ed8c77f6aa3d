//! Organize command implementation.

use crate::cli::{OrganizeArgs, Provider};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use librarian_classifier::{Classifier, ClassifierConfig};
use librarian_domain::traits::LlmProvider;
use librarian_llm::{ollama, openai, OllamaProvider, OpenAiProvider};
use librarian_pipeline::{
    BatchRunner, DescriptorBuilder, FileRelocator, PdfTextExtractor, PipelineConfig,
};
use librarian_store::JsonTrackingLog;
use std::fs;
use std::time::Duration;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Language model settings after merging flags, environment, and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLlm {
    /// Backend
    pub provider: Provider,
    /// Model name
    pub model: String,
    /// Base URL override
    pub endpoint: Option<String>,
    /// API key (OpenAI only)
    pub api_key: Option<String>,
    /// Classification timeout in seconds
    pub timeout_secs: u64,
}

/// Merge LLM settings; flags and environment win over the config file.
pub fn resolve_llm(args: &OrganizeArgs, config: &Config) -> ResolvedLlm {
    let provider = args.provider.unwrap_or(config.llm.provider);
    let model = args
        .model
        .clone()
        .or_else(|| config.llm.model.clone())
        .unwrap_or_else(|| match provider {
            Provider::Openai => DEFAULT_OPENAI_MODEL.to_string(),
            Provider::Ollama => DEFAULT_OLLAMA_MODEL.to_string(),
        });

    ResolvedLlm {
        provider,
        model,
        endpoint: args.endpoint.clone().or_else(|| config.llm.endpoint.clone()),
        api_key: args.api_key.clone().filter(|k| !k.trim().is_empty()),
        timeout_secs: args
            .timeout_secs
            .or(config.llm.timeout_secs)
            .unwrap_or(ClassifierConfig::default().classification_timeout_secs),
    }
}

/// Merge pipeline settings; flags win over the config file.
pub fn resolve_pipeline(args: &OrganizeArgs, config: &Config) -> PipelineConfig {
    let mut pipeline = config.pipeline.clone();
    if let Some(batch_size) = args.batch_size {
        pipeline.batch_size = batch_size;
    }
    if let Some(max_pages) = args.max_pages {
        pipeline.max_pages = max_pages;
    }
    pipeline.recursive |= args.recursive;
    pipeline.dry_run |= args.dry_run;
    pipeline
}

/// Execute the organize command.
pub async fn execute_organize(
    args: OrganizeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let llm = resolve_llm(&args, config);
    let pipeline = resolve_pipeline(&args, config);
    pipeline.validate().map_err(CliError::Config)?;

    let classifier_config = ClassifierConfig {
        classification_timeout_secs: llm.timeout_secs,
        ..Default::default()
    };

    match llm.provider {
        Provider::Openai => {
            let api_key = llm.api_key.clone().ok_or_else(|| {
                CliError::Config("OPENAI_API_KEY is not set (or pass --api-key)".to_string())
            })?;
            // A single request never outlives the classification timeout
            let request_timeout = Duration::from_secs(openai::DEFAULT_TIMEOUT_SECS.min(llm.timeout_secs));
            let provider = OpenAiProvider::with_base_url(
                llm.endpoint.as_deref().unwrap_or(openai::DEFAULT_BASE_URL),
                api_key,
                llm.model.clone(),
                request_timeout,
            )?;
            run(provider, &llm, classifier_config, pipeline, &args, formatter).await
        }
        Provider::Ollama => {
            let request_timeout = Duration::from_secs(llm.timeout_secs);
            let provider = OllamaProvider::with_timeout(
                llm.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT),
                llm.model.clone(),
                request_timeout,
            )?;
            run(provider, &llm, classifier_config, pipeline, &args, formatter).await
        }
    }
}

async fn run<L>(
    provider: L,
    llm: &ResolvedLlm,
    classifier_config: ClassifierConfig,
    pipeline: PipelineConfig,
    args: &OrganizeArgs,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    if !pipeline.dry_run {
        fs::create_dir_all(&args.output_dir).map_err(|e| {
            CliError::Config(format!(
                "Cannot create output directory {}: {}",
                args.output_dir.display(),
                e
            ))
        })?;
    }

    // A dry run must not create, reset or lock the tracking log
    let (store, _lock) = if pipeline.dry_run {
        (JsonTrackingLog::open_read_only(&args.tracking_file), None)
    } else {
        let store = JsonTrackingLog::open(&args.tracking_file)?;
        let lock = store.lock()?;
        (store, Some(lock))
    };

    println!(
        "{}",
        formatter.info(&format!(
            "Classifying with {:?} model {}",
            llm.provider, llm.model
        ))
    );

    let dry_run = pipeline.dry_run;
    let classifier = Classifier::new(provider, classifier_config).with_model_name(llm.model.clone());
    let builder = DescriptorBuilder::new(classifier, PdfTextExtractor::new(), pipeline.max_pages);
    let relocator = FileRelocator::new(args.output_dir.clone());
    let mut runner = BatchRunner::new(builder, store, relocator, pipeline);

    let metrics = runner.run(&args.pdf_dir).await?;
    println!("{}", formatter.run_summary(&metrics, dry_run));

    Ok(())
}
