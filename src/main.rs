use anyhow::{Context, Result};
use barid_inbox::render::{self, DEFAULT_WIDTH};
use barid_inbox::{Config, InboxController, SessionAddress};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "barid-inbox", version, about = "Disposable email inbox for the terminal")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Domain to use instead of the configured default.
    #[arg(long, global = true, conflicts_with = "address")]
    domain: Option<String>,
    /// Use this full address instead of generating one.
    #[arg(long, global = true)]
    address: Option<String>,
    /// Messages to request per sync.
    #[arg(long, global = true)]
    limit: Option<u32>,
    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List available domains.
    Domains,
    /// Print a freshly generated address.
    New,
    /// Sync and print the inbox of the active address.
    Inbox,
    /// Print one message.
    Read(ReadCmd),
    /// Copy the active address to the clipboard.
    Copy,
}

#[derive(Args, Debug)]
struct ReadCmd {
    /// Message id, as shown by `inbox`.
    id: String,
    /// Print HTML bodies without converting them to text.
    #[arg(long)]
    raw: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &GlobalArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(domain) = &args.domain {
        config.default_domain = domain.clone();
    }
    if let Some(limit) = args.limit {
        config.page_limit = limit;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = Some(timeout);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli.global)?;

    let session = cli
        .global
        .address
        .as_deref()
        .map(SessionAddress::parse)
        .transpose()?;
    let controller = InboxController::from_config(&config, session)?;

    match cli.command.unwrap_or(CliCommand::Inbox) {
        CliCommand::Domains => {
            let catalog = controller.load_catalog().await;
            print!("{}", render::render_catalog(&catalog));
        }
        CliCommand::New => println!("{}", controller.address()),
        CliCommand::Inbox => {
            controller.load_domains().await;
            let snapshot = controller.snapshot();
            println!("Address: {}", snapshot.address());
            println!();
            print!("{}", render::render_inbox(&snapshot.inbox));
        }
        CliCommand::Read(cmd) => {
            let detail = controller.open_message(&cmd.id).await;
            print!("{}", render::render_detail(&detail, DEFAULT_WIDTH, cmd.raw));
        }
        CliCommand::Copy => {
            let (revert, result) = controller.copy_address().await;
            println!("[{}] {}", controller.copy_label(), controller.address());
            if let Err(err) = result {
                eprintln!("{err}");
            }
            revert.await.context("copy feedback task failed")?;
            println!("[{}]", controller.copy_label());
        }
    }

    Ok(())
}
