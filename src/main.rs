use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fileview::client::{FileClient, FileDescriptor, PreviewOutcome, PreviewRequest};
use fileview::render::TerminalRenderer;
use fileview::{server, Config, FileInfo};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Browse and preview files on a fileview server, or run one.
#[derive(Parser, Debug)]
#[command(name = "fileview", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve a directory over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Directory to list and serve
        #[arg(long)]
        root: Option<String>,
        /// Directory of static assets
        #[arg(long)]
        public: Option<PathBuf>,
    },
    /// List a remote directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Preview a remote text file
    Preview {
        /// URL or server-relative path of the text file
        locator: String,
        #[arg(long)]
        max_chars: Option<usize>,
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            root,
            public,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(root) = root {
                config.server.root = root;
            }
            if let Some(public) = public {
                config.server.public_dir = public;
            }
            server::run(&config.server).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Ls { path, base_url } => {
            if let Some(base_url) = base_url {
                config.client.base_url = base_url;
            }
            let client = FileClient::from_config(&config.client)
                .context("Failed to build HTTP client")?;
            let files = client
                .fetch_directory_contents(&path)
                .await
                .with_context(|| format!("Failed to list {path}"))?;
            for entry in &files {
                println!("{}", format_entry(entry));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Preview {
            locator,
            max_chars,
            base_url,
        } => {
            if let Some(base_url) = base_url {
                config.client.base_url = base_url;
            }
            let client = FileClient::from_config(&config.client)
                .context("Failed to build HTTP client")?;
            let request = PreviewRequest::new(locator)
                .target(config.client.display_target.clone())
                .max_chars(max_chars.unwrap_or(config.client.preview_max_chars));

            let mut renderer =
                TerminalRenderer::new(config.client.display_target.clone(), std::io::stdout());
            match client.load_text_preview(&request, &mut renderer).await {
                PreviewOutcome::Failed { .. } => Ok(ExitCode::FAILURE),
                _ => Ok(ExitCode::SUCCESS),
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "fileview=debug,tower_http=debug"
    } else {
        "fileview=info,tower_http=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// One line per entry; anything that is not a regular listing entry is shown raw.
fn format_entry(entry: &FileDescriptor) -> String {
    match serde_json::from_value::<FileInfo>(entry.clone()) {
        Ok(info) if info.is_dir() => format!("{:>10}  {}/", "-", info.name),
        Ok(info) => format!("{:>10}  {}", info.size.unwrap_or(0), info.name),
        Err(_) => entry.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ls_defaults_to_root() {
        let cli = Cli::try_parse_from(["fileview", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::Ls { ref path, .. } if path == "/"));
    }

    #[test]
    fn preview_accepts_limit_and_global_flags() {
        let cli =
            Cli::try_parse_from(["fileview", "preview", "/f.txt", "--max-chars", "10", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Preview { max_chars: Some(10), .. }
        ));
    }

    #[test]
    fn formats_listing_entries() {
        let dir = json!({"name": "docs", "type": "directory", "extension": null, "size": null,
            "modifiedAt": "", "createdAt": ""});
        let file = json!({"name": "a.txt", "type": "file", "extension": "txt", "size": 42,
            "modifiedAt": "", "createdAt": ""});
        assert_eq!(format_entry(&dir), "         -  docs/");
        assert_eq!(format_entry(&file), "        42  a.txt");
        assert_eq!(format_entry(&json!({"name": "x"})), r#"{"name":"x"}"#);
    }
}
