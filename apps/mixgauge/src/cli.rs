//! # CLI
//!
//! Command-line interface: the same pipeline as the web form, plus server
//! startup and artifact checks.
//!
//! Each subcommand is a `cmd_*` function so tests can drive it without
//! spawning the binary.

use crate::api::{AppState, create_router};
use crate::config::{DEFAULT_HOST, DEFAULT_MODEL_PATH, DEFAULT_PORT, DEFAULT_RATE_LIMIT, ServerConfig};
use crate::error::AppError;
use clap::{Args, Parser, Subcommand};
use mixgauge_core::model::ModelInfo;
use mixgauge_core::{
    Assessment, FeatureRecord, MixField, MixForm, ModelArtifact, ModelSlot, Outcome, derive,
    validate,
};
use std::path::{Path, PathBuf};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "mixgauge", version, about = "Concrete compressive strength predictor")]
pub struct Cli {
    /// Path to the JSON model artifact.
    #[arg(long, global = true, env = "MIXGAUGE_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the prediction form and JSON API over HTTP.
    Serve(ServeArgs),
    /// Predict the strength of one mix.
    Predict {
        #[command(flatten)]
        mix: MixArgs,
        /// Print the assessment as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the derived model features and warnings without predicting.
    Features {
        #[command(flatten)]
        mix: MixArgs,
        #[arg(long)]
        json: bool,
    },
    /// List the input fields with their bounds and defaults.
    Fields {
        #[arg(long)]
        json: bool,
    },
    /// Load and validate the model artifact.
    CheckModel {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "MIXGAUGE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "MIXGAUGE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Require `Authorization: Bearer <KEY>` on /api routes.
    #[arg(long, env = "MIXGAUGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Prediction requests admitted per second.
    #[arg(long, env = "MIXGAUGE_RATE_LIMIT", default_value_t = DEFAULT_RATE_LIMIT)]
    pub rate_limit: u32,
}

/// The eight mix fields; omitted fields take their defaults.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct MixArgs {
    /// Cement (kg/m³)
    #[arg(long)]
    pub cement: Option<f64>,
    /// Blast furnace slag (kg/m³)
    #[arg(long)]
    pub blast_furnace_slag: Option<f64>,
    /// Fly ash (kg/m³)
    #[arg(long)]
    pub fly_ash: Option<f64>,
    /// Water (kg/m³)
    #[arg(long)]
    pub water: Option<f64>,
    /// Superplasticizer (kg/m³)
    #[arg(long)]
    pub superplasticizer: Option<f64>,
    /// Coarse aggregate (kg/m³)
    #[arg(long)]
    pub coarse_aggregate: Option<f64>,
    /// Fine aggregate (kg/m³)
    #[arg(long)]
    pub fine_aggregate: Option<f64>,
    /// Age (days)
    #[arg(long)]
    pub age: Option<f64>,
}

impl From<MixArgs> for MixForm {
    fn from(args: MixArgs) -> Self {
        MixForm {
            cement: args.cement,
            blast_furnace_slag: args.blast_furnace_slag,
            fly_ash: args.fly_ash,
            water: args.water,
            superplasticizer: args.superplasticizer,
            coarse_aggregate: args.coarse_aggregate,
            fine_aggregate: args.fine_aggregate,
            age: args.age,
        }
    }
}

impl ServeArgs {
    pub fn into_config(self, model_path: PathBuf) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            model_path,
            api_key: self.api_key,
            rate_limit: self.rate_limit,
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Serve(args) => cmd_serve(args.into_config(cli.model)).await,
        Commands::Predict { mix, json } => cmd_predict(&cli.model, &mix.into(), json).map(|_| ()),
        Commands::Features { mix, json } => cmd_features(&mix.into(), json).map(|_| ()),
        Commands::Fields { json } => cmd_fields(json),
        Commands::CheckModel { json } => cmd_check_model(&cli.model, json).map(|_| ()),
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Load the model once and serve until Ctrl-C.
pub async fn cmd_serve(config: ServerConfig) -> Result<(), AppError> {
    let rate_limit = config.rate_limit_per_second()?;
    let model = load_slot(&config.model_path);

    if config.effective_api_key().is_some() {
        tracing::info!("API key authentication enabled for /api routes");
    }

    let state = AppState::new(model, config.effective_api_key(), rate_limit);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!("MixGauge listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    tracing::info!("MixGauge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

/// Load the artifact into a slot, logging the outcome.
pub fn load_slot(path: &Path) -> ModelSlot {
    let slot = ModelSlot::load(path);
    match &slot {
        ModelSlot::Ready(model) => tracing::info!(
            name = model.name(),
            kind = ?model.kind(),
            trees = model.tree_count(),
            "model loaded from {}",
            path.display()
        ),
        ModelSlot::Unavailable(err) => {
            tracing::warn!("prediction disabled: {}", err);
        }
    }
    slot
}

/// Run one prediction and print the result.
///
/// A missing or broken model is reported in the output, not as an error.
pub fn cmd_predict(model_path: &Path, form: &MixForm, json: bool) -> Result<Assessment, AppError> {
    let slot = load_slot(model_path);
    let assessment = Assessment::from_form(form, &slot);

    if let Outcome::Failed(err) = &assessment.outcome {
        tracing::warn!(kind = err.kind(), "prediction failed: {}", err);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        if let Some(err) = slot.load_error() {
            println!("Model unavailable: {}", err);
        }
        print!("{}", assessment.to_text());
    }
    Ok(assessment)
}

/// Print the derived features and warnings of a mix.
pub fn cmd_features(form: &MixForm, json: bool) -> Result<FeatureRecord, AppError> {
    let input = form.collect();
    let features = derive(&input);
    let warnings = validate(&input);

    if json {
        let output = serde_json::json!({
            "input": input,
            "adjustments": form.adjustments(),
            "features": features,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for adjustment in form.adjustments() {
            println!("note: {}", adjustment);
        }
        for warning in &warnings {
            let tag = if warning.is_blocking() { "error" } else { "warning" };
            println!("{}: {}", tag, warning);
        }
        for (name, value) in features.iter() {
            println!("{:<18} {:>12.4}", name, value);
        }
    }
    Ok(features)
}

/// Print the field table.
pub fn cmd_fields(json: bool) -> Result<(), AppError> {
    let specs: Vec<_> = MixField::ALL.into_iter().map(MixField::spec).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&specs)?);
    } else {
        println!(
            "{:<20} {:<24} {:>8} {:>8} {:>8} {:>6}",
            "KEY", "LABEL", "MIN", "MAX", "DEFAULT", "STEP"
        );
        for spec in specs {
            println!(
                "{:<20} {:<24} {:>8} {:>8} {:>8} {:>6}",
                spec.key,
                spec.display_label(),
                spec.min,
                spec.max,
                spec.default,
                spec.step
            );
        }
    }
    Ok(())
}

/// Load the artifact and report what was found. Fails if it does not load.
pub fn cmd_check_model(model_path: &Path, json: bool) -> Result<ModelInfo, AppError> {
    let model = ModelArtifact::load(model_path)?;
    let info = model.info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Model:  {}", info.name);
        println!("Kind:   {:?}", info.kind);
        println!("Trees:  {}", info.trees);
        println!("Source: {}", model_path.display());
        if let Some(digest) = &info.digest {
            println!("BLAKE3: {}", digest);
        }
    }
    Ok(info)
}
