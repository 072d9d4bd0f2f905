//! CLI entry point for spacewalk-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spacewalk-rs")]
#[command(version = "0.1.0")]
#[command(about = "A fast static blog generator backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files from the CMS content
    #[command(alias = "g")]
    Generate {
        /// Preview ref token for rendering draft content
        #[arg(long)]
        preview_ref: Option<String>,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Seconds between content refreshes from the CMS (0 disables)
        #[arg(long, default_value = "1800")]
        refresh: u64,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, path)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacewalk_rs=debug,info"
    } else {
        "spacewalk_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            spacewalk_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::Generate { preview_ref } => {
            let app = spacewalk_rs::Spacewalk::new(&base_dir)?;
            if preview_ref.is_some() {
                tracing::info!("Generating static files in preview mode...");
            } else {
                tracing::info!("Generating static files...");
            }
            app.generate(preview_ref.as_deref()).await?;
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            open,
            refresh,
        } => {
            let app = spacewalk_rs::Spacewalk::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            app.generate(None).await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            spacewalk_rs::server::start(&app, &ip, port, refresh, open).await?;
        }

        Commands::Clean => {
            let app = spacewalk_rs::Spacewalk::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let app = spacewalk_rs::Spacewalk::new(&base_dir)?;
            spacewalk_rs::commands::list::run(&app, &r#type).await?;
        }

        Commands::Version => {
            println!("spacewalk-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
