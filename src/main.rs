use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::json;

use kawaii_assets::{
  AssetResolver, EnqueueRegistry, EnqueueRequest, HookEvent, ResolverConfig,
};

#[derive(Parser)]
#[command(
  name = "kawaii-assets",
  about = "Resolve theme asset entries to dev server or hashed build URLs",
  version
)]
struct Cli {
  /// Theme directory used to discover kawaii-assets.json and relative manifest paths
  #[arg(long, global = true, default_value = ".")]
  root: PathBuf,

  /// Build manifest path (overrides configuration)
  #[arg(long, global = true)]
  manifest: Option<PathBuf>,

  /// Production asset base URL (overrides configuration)
  #[arg(long, global = true)]
  base_url: Option<String>,

  /// Development server origin (overrides configuration)
  #[arg(long, global = true)]
  dev_server: Option<String>,

  /// Allow development mode when no manifest exists
  #[arg(long, global = true, env = "WP_DEBUG")]
  debug: bool,

  /// Log resolver diagnostics at info level
  #[arg(long, short, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve one entry to its script and stylesheet URLs
  Resolve {
    /// Logical entry, e.g. src/js/main.js
    entry: String,
  },

  /// Print the active delivery mode
  Mode,

  /// Print the loaded manifest (null when absent)
  Entries,

  /// Print the enqueue plan for a hook event
  Plan {
    /// front-end, admin, block-editor or block-assets
    event: HookEvent,

    /// Admin screen hook, only valid with `admin`. Without it the whole admin bundle is
    /// planned; with it the plan is empty for screens outside the allowlist
    #[arg(long)]
    screen: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose {
    tracing::Level::INFO
  } else {
    tracing::Level::WARN
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
    )
    .with_writer(std::io::stderr)
    .init();

  let config = load_config(&cli)?;
  let resolver = AssetResolver::from_config(&config);
  tracing::info!(
    mode = %resolver.mode(),
    manifest = %config.manifest_path.display(),
    "asset resolver ready"
  );

  let output = match &cli.command {
    Commands::Resolve { entry } => json!({
      "entry": entry,
      "mode": resolver.mode(),
      "asset": resolver.resolve(entry),
    }),
    Commands::Mode => {
      println!("{}", resolver.mode());
      return Ok(());
    }
    Commands::Entries => json!(resolver.manifest()),
    Commands::Plan { event, screen } => {
      let registry = EnqueueRegistry::kawaii_defaults().with_version(config.version.clone());
      let plan = plan_requests(&registry, &resolver, *event, screen.as_deref())?;
      json!({ "event": event, "mode": resolver.mode(), "enqueue": plan })
    }
  };

  println!(
    "{}",
    serde_json::to_string_pretty(&output).context("failed to render output")?
  );
  Ok(())
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
  let mut config = ResolverConfig::discover(&cli.root);
  if let Some(manifest) = &cli.manifest {
    config.manifest_path = config_relative(&cli.root, manifest);
  }
  if let Some(base_url) = &cli.base_url {
    config.base_url = base_url.clone();
  }
  if let Some(dev_server) = &cli.dev_server {
    config.dev_server_url = dev_server.clone();
  }
  config.debug |= cli.debug;
  config
    .validate()
    .with_context(|| format!("invalid resolver configuration in {}", cli.root.display()))?;
  Ok(config)
}

fn plan_requests(
  registry: &EnqueueRegistry,
  resolver: &AssetResolver,
  event: HookEvent,
  screen: Option<&str>,
) -> Result<Vec<EnqueueRequest>> {
  match (event, screen) {
    (HookEvent::Admin, Some(screen)) => Ok(registry.plan_admin(screen, resolver)),
    (_, Some(_)) => bail!("--screen only applies to the admin event, not {event}"),
    (_, None) => Ok(registry.plan(event, resolver)),
  }
}

fn config_relative(root: &std::path::Path, path: &std::path::Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  }
}
