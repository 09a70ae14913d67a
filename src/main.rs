use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::net::TcpListener;

use spotproxy::{
    config::{self, Config},
    error, info,
    server::{self, AppState},
    success, warning,
};

const DEFAULT_LOG_FILTER: &str = "spotproxy=info,tower_http=info";

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the proxy server
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Port to listen on (overrides PORT)
    #[clap(long)]
    pub port: Option<u16>,

    /// Open the login page in the default browser once listening
    #[clap(long)]
    pub open_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!(
            "Invalid configuration: {}\nSee {} for an example.",
            e,
            config::env_file_path().with_extension("example").display()
        ),
    };
    if let Some(port) = opt.port {
        config.port = port;
    }

    let listener = match TcpListener::bind(config.server_addr()).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", config.server_addr(), e),
    };

    let login_url = format!("http://localhost:{}/login", config.port);
    success!("Listening on {}", config.server_addr());
    info!("Authorize with Spotify at {}", login_url);

    if opt.open_browser && webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    if let Err(e) = server::serve(listener, AppState::new(config)).await {
        error!("Server stopped: {}", e);
    }
}
