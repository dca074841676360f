mod fetch;
mod notify;
mod page;
mod parser;
mod record;
mod settings;
mod upload;

use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "limdberator", about = "Extract title and person records from IMDb pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a record and print it as JSON
    Extract(Source),
    /// Extract a record and post it to the collection endpoint
    Upload(Source),
    /// Show which kind of page a URL path is
    Classify {
        /// URL path, e.g. /title/tt0111161/
        path: String,
    },
}

#[derive(Args)]
struct Source {
    /// Page URL to fetch, or a saved HTML file
    source: String,
    /// URL path of a saved file (e.g. /name/nm0000151/)
    #[arg(short, long)]
    path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { path } => {
            match page::classify(&path) {
                Some(page::PageKind::Title { id, fullcredits: true }) => {
                    println!("title {} (full credits)", id)
                }
                Some(page::PageKind::Title { id, .. }) => println!("title {}", id),
                Some(page::PageKind::Person { id }) => println!("person {}", id),
                None => println!("unrecognized"),
            }
            Ok(())
        }
        Commands::Extract(src) => {
            let settings = settings::Settings::load()?;
            let client = fetch::http_client(&settings)?;
            let page = fetch::load_page(&client, &src.source, src.path.as_deref()).await?;
            match parser::scrape(&page) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => println!("No record"),
            }
            Ok(())
        }
        Commands::Upload(src) => {
            let settings = settings::Settings::load()?;
            let client = fetch::http_client(&settings)?;
            let page = fetch::load_page(&client, &src.source, src.path.as_deref()).await?;
            let Some(record) = parser::scrape(&page) else {
                println!("No record");
                return Ok(());
            };

            let uploader = upload::Uploader::new(client, settings.endpoint_url()?);
            let status = uploader.send(&record).await;
            notify::notify(&settings.label, &status);
            info!(
                id = record.id(),
                ok = status.is_success(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "done"
            );
            Ok(())
        }
    }
}
