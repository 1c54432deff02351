use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use launchdarkly_provider::config::{ACCESS_TOKEN_ENV, BASE_URL_ENV};
use launchdarkly_provider::launchdarkly::describe_api_error;
use launchdarkly_provider::resource::project::RESOURCE_TYPE;
use launchdarkly_provider::resource::{
    get_all_resource_types, get_schema, ResourceData, ResourceError,
};
use launchdarkly_provider::{Config, Provider};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Version injected at compile time via LDPROVIDER_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("LDPROVIDER_VERSION") {
    Some(v) => v,
    None => "dev",
};

/// Drive the LaunchDarkly project resource lifecycle
#[derive(Parser, Debug)]
#[command(name = "ldprovider", version = VERSION, about, long_about = None)]
struct Args {
    /// LaunchDarkly API access token
    #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true, global = true)]
    token: Option<String>,

    /// LaunchDarkly API base URL
    #[arg(long, env = BASE_URL_ENV, global = true)]
    base_url: Option<String>,

    /// Resource state file
    #[arg(long, default_value = "ldprovider-state.json", global = true)]
    state: PathBuf,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a project and record it in the state file
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: String,
    },
    /// Refresh the recorded project from LaunchDarkly
    Read,
    /// Rename the recorded project
    Update {
        #[arg(long)]
        name: String,
    },
    /// Delete the recorded project
    Delete,
    /// Adopt an existing project into the state file
    Import {
        #[arg(long)]
        key: String,
    },
    /// Print the schema of every resource type
    Schema,
    /// Persist the access token and base URL to the config file
    Configure,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = level.as_filter()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Logging disabled, cannot open {}: {}", log_path.display(), err);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("ldprovider {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("launchdarkly-provider").join("provider.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".launchdarkly-provider").join("provider.log");
    }
    PathBuf::from("provider.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        eprintln!("Error: {}", describe_error(&err));
        std::process::exit(1);
    }
}

/// User-facing message for a failed command
fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ResourceError>() {
        Some(ResourceError::Api(api_err)) => {
            tracing::error!("{}", api_err);
            describe_api_error(api_err)
        }
        _ => format!("{:#}", err),
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load();

    match args.command {
        Command::Schema => {
            let schemas: BTreeMap<_, _> = get_all_resource_types()
                .into_iter()
                .filter_map(|name| get_schema(name).map(|schema| (name, schema)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            return Ok(());
        }
        Command::Configure => {
            let mut updated = config.clone();
            if args.token.is_some() {
                updated.access_token = args.token;
            }
            if args.base_url.is_some() {
                updated.base_url = args.base_url;
            }
            updated.save()?;
            println!("Configuration saved");
            return Ok(());
        }
        _ => {}
    }

    let provider_config = config.provider_config(args.token, args.base_url)?;
    let provider = Provider::configure(&provider_config)?;

    match args.command {
        Command::Create { name, key } => {
            let mut data = ResourceData::new();
            data.set("name", name);
            data.set("key", key);
            provider.create(RESOURCE_TYPE, &mut data).await?;
            save_and_print(&data, &args.state)?;
        }
        Command::Read => {
            let mut data = ResourceData::load(&args.state)?;
            provider.read(RESOURCE_TYPE, &mut data).await?;
            if data.exists() {
                save_and_print(&data, &args.state)?;
            } else {
                remove_state(&args.state)?;
                println!("Project no longer exists; removed from state");
            }
        }
        Command::Update { name } => {
            let mut data = ResourceData::load(&args.state)?;
            data.set("name", name);
            provider.update(RESOURCE_TYPE, &mut data).await?;
            save_and_print(&data, &args.state)?;
        }
        Command::Delete => {
            let mut data = ResourceData::load(&args.state)?;
            provider.delete(RESOURCE_TYPE, &mut data).await?;
            remove_state(&args.state)?;
            println!("Project deleted");
        }
        Command::Import { key } => {
            let data = provider.import(RESOURCE_TYPE, &key).await?;
            save_and_print(&data, &args.state)?;
        }
        Command::Schema | Command::Configure => unreachable!("handled before provider setup"),
    }

    Ok(())
}

fn save_and_print(data: &ResourceData, path: &Path) -> Result<()> {
    data.save(path)?;
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn remove_state(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
