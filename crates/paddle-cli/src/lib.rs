//! # paddle-webhook
//!
//! Offline tooling around Paddle webhook notifications.
//!
//! - `verify` checks a `paddle-signature` header against a saved body
//! - `decode` prints the typed event a body decodes to, optionally verifying it first
//! - `sign` produces a header for a body, for exercising receivers locally
//!
//! Settings are layered: an optional TOML file, then `PADDLE_` environment
//! variables, then command-line flags.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use paddle_sdk::events::{EventDecoder, UnknownEventPolicy, WebhookEvent};
use paddle_sdk::webhook::{
    compute_signature, SignatureVerifier, WebhookConfig, WebhookEvents, WebhookSecret,
    WEBHOOK_SECRET_ENV,
};
use paddle_sdk::WebhookError;
use serde::Deserialize;
use tracing::{debug, info};

// ============================================================================
// CLI Structure
// ============================================================================

/// Verify, decode and sign Paddle webhook notifications
#[derive(Debug, Parser)]
#[command(name = "paddle-webhook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify, decode and sign Paddle webhook notifications")]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "PADDLE_CLI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Notification secret key
    #[arg(long, env = "PADDLE_WEBHOOK_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Reject signatures older than this many seconds
    #[arg(long, global = true)]
    pub tolerance_secs: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a signature header against a body
    Verify {
        /// Value of the paddle-signature header
        #[arg(short, long)]
        signature: String,

        /// File holding the raw body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,
    },

    /// Decode a body into a typed event
    Decode {
        /// File holding the raw body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,

        /// Verify this signature header before decoding
        #[arg(short, long)]
        signature: Option<String>,

        /// Pass unrecognized event types through instead of failing
        #[arg(long)]
        permissive: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a signature header for a body
    Sign {
        /// Unix timestamp to sign with; defaults to now
        #[arg(short, long)]
        timestamp: Option<i64>,

        /// File holding the raw body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// The event re-serialized as JSON
    Json,
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Signature failures get their own code so scripts can tell a forged
    /// body apart from an undecodable one.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 1,
            Self::Webhook(e) if e.is_authentication_failure() => 2,
            Self::Webhook(WebhookError::Configuration { .. }) => 1,
            Self::Webhook(_) => 3,
            Self::InvalidArgument { .. } => 4,
            Self::Io(_) => 5,
            Self::Output(_) => 6,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidFormat(#[from] config::ConfigError),

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Settings read from the configuration file and environment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Notification secret key
    pub webhook_secret: Option<String>,

    /// Signature age limit in seconds
    pub tolerance_secs: Option<u64>,

    /// Pass unrecognized event types through when decoding
    pub permissive: bool,

    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings after flags have been applied over the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub secret: Option<String>,
    pub tolerance: Option<Duration>,
    pub permissive: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl ResolvedSettings {
    /// Merge command-line flags over `config`. Flags win when given.
    pub fn resolve(cli: &Cli, config: CliConfig) -> Self {
        let permissive = match &cli.command {
            Commands::Decode { permissive, .. } => *permissive || config.permissive,
            _ => config.permissive,
        };

        Self {
            secret: cli.secret.clone().or(config.webhook_secret),
            tolerance: cli
                .tolerance_secs
                .or(config.tolerance_secs)
                .map(Duration::from_secs),
            permissive,
            log_level: cli.log_level.clone().unwrap_or(config.logging.level),
            log_format: if cli.json_logs {
                LogFormat::Json
            } else {
                config.logging.format
            },
        }
    }

    /// Webhook configuration for verifying and decoding.
    ///
    /// # Errors
    ///
    /// Fails if no secret was configured or the secret is empty.
    pub fn webhook_config(&self) -> Result<WebhookConfig, CliError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| ConfigError::MissingRequired {
                key: WEBHOOK_SECRET_ENV.to_string(),
            })?;

        let mut config = WebhookConfig::new(WebhookSecret::new(secret)?)
            .with_unknown_event_policy(self.unknown_event_policy());
        if let Some(tolerance) = self.tolerance {
            config = config.with_timestamp_tolerance(tolerance);
        }
        Ok(config)
    }

    fn unknown_event_policy(&self) -> UnknownEventPolicy {
        if self.permissive {
            UnknownEventPolicy::PassThrough
        } else {
            UnknownEventPolicy::Reject
        }
    }
}

/// Load configuration from an optional TOML file and `PADDLE_` environment
/// variables.
///
/// Nested keys use a double underscore, e.g. `PADDLE_LOGGING__LEVEL=debug`.
pub fn load_configuration(config_path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    load_configuration_from(config_path, None)
}

/// As [`load_configuration`], reading variables from `env` instead of the
/// process environment when given.
pub fn load_configuration_from(
    config_path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<CliConfig, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        builder = builder.add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(true),
        );
    }

    let config = builder
        .add_source(
            config::Environment::with_prefix("PADDLE")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_deref())?;
    let settings = ResolvedSettings::resolve(&cli, config);

    initialize_logging(&settings)?;

    let mut stdout = std::io::stdout().lock();
    execute(cli.command, &settings, &mut stdout).await
}

/// Run a parsed command, writing its output to `out`.
pub async fn execute<W: Write>(
    command: Commands,
    settings: &ResolvedSettings,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Commands::Verify { signature, body } => {
            execute_verify_command(signature, &body, settings, out).await
        }
        Commands::Decode {
            body,
            signature,
            format,
            ..
        } => execute_decode_command(&body, signature, format, settings, out).await,
        Commands::Sign { timestamp, body } => {
            execute_sign_command(timestamp, &body, settings, out).await
        }
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// Initialize logging on stderr so command output stays clean on stdout.
fn initialize_logging(settings: &ResolvedSettings) -> Result<(), CliError> {
    let filter = tracing_subscriber::EnvFilter::try_new(&settings.log_level).map_err(|e| {
        CliError::InvalidArgument {
            arg: "--log-level".to_string(),
            message: e.to_string(),
        }
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    // A subscriber may already be installed when embedded; keep it.
    if let Err(e) = result {
        debug!(error = %e, "Logging already initialized");
    }
    Ok(())
}

/// Read the whole body from a file, or from stdin for `-`.
async fn read_body(path: &Path) -> Result<Vec<u8>, CliError> {
    let bytes = if path == Path::new("-") {
        WebhookEvents::buffer(tokio::io::stdin()).await?
    } else {
        let file = tokio::fs::File::open(path).await?;
        WebhookEvents::buffer(file).await?
    };
    Ok(bytes.to_vec())
}

async fn execute_verify_command<W: Write>(
    signature: String,
    body_path: &Path,
    settings: &ResolvedSettings,
    out: &mut W,
) -> Result<(), CliError> {
    let config = settings.webhook_config()?;
    let body = read_body(body_path).await?;

    info!(body = %body_path.display(), bytes = body.len(), "Verifying webhook signature");

    SignatureVerifier::from_config(signature, &config).verify(&body)?;

    writeln!(out, "Signature valid")?;
    Ok(())
}

async fn execute_decode_command<W: Write>(
    body_path: &Path,
    signature: Option<String>,
    format: OutputFormat,
    settings: &ResolvedSettings,
    out: &mut W,
) -> Result<(), CliError> {
    let body = read_body(body_path).await?;

    let event = match signature {
        Some(signature) => {
            let config = settings.webhook_config()?;
            WebhookEvents::from_config(signature, &config).construct_event(&body)?
        }
        None => {
            debug!("No signature given; decoding without verification");
            EventDecoder::new(settings.unknown_event_policy()).decode(&body)?
        }
    };

    info!(
        event_id = %event.event_id(),
        event_type = %event.event_type_str(),
        "Decoded webhook event"
    );

    match format {
        OutputFormat::Text => write!(out, "{}", render_summary(&event))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&event)?)?,
    }
    Ok(())
}

async fn execute_sign_command<W: Write>(
    timestamp: Option<i64>,
    body_path: &Path,
    settings: &ResolvedSettings,
    out: &mut W,
) -> Result<(), CliError> {
    let secret = settings
        .secret
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingRequired {
            key: WEBHOOK_SECRET_ENV.to_string(),
        })?;
    let body = read_body(body_path).await?;

    let ts = timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp())
        .to_string();
    let digest = compute_signature(secret, &ts, &body)?;

    writeln!(out, "ts={};h1={}", ts, digest)?;
    Ok(())
}

/// One field per line summary of a decoded event.
pub fn render_summary(event: &WebhookEvent) -> String {
    let entity = match (event.customer(), event.subscription()) {
        (Some(customer), _) => format!("customer {} <{}>", customer.id, customer.email),
        (_, Some(subscription)) => format!(
            "subscription {} ({:?}, customer {})",
            subscription.id, subscription.status, subscription.customer_id
        ),
        _ => "unrecognized".to_string(),
    };

    format!(
        "event_type:      {}\n\
         event_id:        {}\n\
         notification_id: {}\n\
         occurred_at:     {}\n\
         entity:          {}\n",
        event.event_type_str(),
        event.event_id(),
        event.notification_id(),
        event.occurred_at().to_rfc3339(),
        entity
    )
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
