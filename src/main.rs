use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use ttsbro_core::{AppConfig, OutputFormat, Voice};

#[derive(Parser)]
#[command(name = "ttsbro", about = "Text-to-speech workflow node")]
struct Cli {
    /// Path to the configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize a batch of items (or a single --text) into audio attachments
    Synthesize(SynthesizeArgs),
    /// List the supported voices
    Voices,
    /// List available engines and attachment sinks
    Plugins,
}

#[derive(Args)]
struct SynthesizeArgs {
    /// JSON array of items; "-" reads from stdin
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    items: Option<PathBuf>,

    /// Synthesize a single item with this text
    #[arg(short, long)]
    text: Option<String>,

    /// Default speaker id for items that do not set one
    #[arg(long)]
    voice: Option<u8>,

    /// Default speed multiplier (0.5 to 2.0)
    #[arg(long)]
    speed: Option<f32>,

    /// Default output format: wav or raw
    #[arg(long)]
    format: Option<String>,

    /// Write output items here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit error items instead of aborting on the first failure
    #[arg(long)]
    continue_on_fail: bool,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {:?}", path)),
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

/// Items stay as raw JSON values here; each one is checked on its own when
/// the node runs.
fn read_items(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read items from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read items from {:?}", path))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid items JSON in {:?}", path))
}

fn engine_options(config: &AppConfig) -> Result<toml::Value> {
    let name = config.engine.name.as_str();
    if name == "kokoro" {
        let Some(ref kokoro) = config.engine.kokoro else {
            bail!("engine 'kokoro' selected but no [engine.kokoro] section configured");
        };
        return toml::Value::try_from(kokoro).context("failed to serialize kokoro config");
    }
    Ok(config
        .engine
        .extra
        .get(name)
        .cloned()
        .unwrap_or_else(|| toml::Value::Table(Default::default())))
}

async fn synthesize(mut config: AppConfig, args: SynthesizeArgs) -> Result<()> {
    if let Some(voice) = args.voice {
        config.defaults.voice = voice;
    }
    if let Some(speed) = args.speed {
        config.defaults.speed = speed;
    }
    if let Some(ref format) = args.format {
        config.defaults.format = format.parse::<OutputFormat>()?;
    }
    let continue_on_fail = args.continue_on_fail || config.general.continue_on_fail;

    let items = match (args.text, args.items) {
        (Some(text), _) => vec![serde_json::json!({ "text": text })],
        (None, Some(path)) => read_items(&path)?,
        (None, None) => bail!("either --items or --text is required"),
    };

    // Engine and sink are built once; a failure here aborts before any item runs.
    let registry = ttsbro_engine::EngineRegistry::new();
    let service = ttsbro_engine::SynthesisService::start(
        &config.engine.name,
        engine_options(&config)?,
        &registry,
    )
    .await
    .with_context(|| format!("failed to start TTS engine '{}'", config.engine.name))?;

    let sinks = ttsbro_sink::SinkRegistry::new();
    let sink = sinks
        .open(&config.sink.plugin, config.sink.extra.clone())
        .await
        .with_context(|| format!("failed to open attachment sink '{}'", config.sink.plugin))?;

    tracing::info!(
        items = items.len(),
        engine = %service.engine_name(),
        sink = %sink.name(),
        continue_on_fail,
        "processing batch"
    );

    let node = ttsbro_node::TtsNode::new(
        &service,
        sink.as_ref(),
        ttsbro_node::NodeOptions {
            defaults: config.defaults.clone(),
            continue_on_fail,
        },
    );
    let result = node.execute_json(&items).await;

    if let Err(e) = sink.shutdown().await {
        tracing::warn!("sink shutdown failed: {e}");
    }
    if let Err(e) = service.shutdown().await {
        tracing::warn!("engine shutdown failed: {e}");
    }

    let output = result.context("batch aborted")?;
    let json = serde_json::to_string_pretty(&output).context("failed to serialize output")?;
    match args.output {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("failed to write output to {:?}", path))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write output")?;
        }
    }
    Ok(())
}

fn print_voices() {
    for voice in Voice::ALL {
        println!("{:>2}  {}", voice.id(), voice.display_name());
    }
}

fn print_plugins() {
    let engines = ttsbro_engine::EngineRegistry::new();
    let sinks = ttsbro_sink::SinkRegistry::new();
    println!("engines: {}", engines.list_engines().join(", "));
    println!("sinks:   {}", sinks.list_sinks().join(", "));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_tracing(&config.general.log_level)?;
    tracing::debug!("ttsbro starting");

    match cli.command {
        Command::Synthesize(args) => synthesize(config, args).await,
        Command::Voices => {
            print_voices();
            Ok(())
        }
        Command::Plugins => {
            print_plugins();
            Ok(())
        }
    }
}
