use std::io::{self, Write};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use clap::Parser;
use crossterm::tty::IsTty;
use td_client::config::DEFAULT_BASE_URL;
use td_client::{ApiConfig, HttpCatalogClient};
use td_core::{CatalogApi, RecordId, Result, DEFAULT_MIN_SCORE};
use td_proxy::ProxyState;
use td_view::CatalogView;
use tracing::{info, Level};

mod logging;
mod render;
mod shell;

use render::Renderer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and filter the tagged-article catalog", long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    backend_url: String,
    /// Path prefix added to every request, e.g. /api when talking to `td proxy`
    #[arg(long, global = true)]
    prefix: Option<String>,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List all tags
    Tags,
    /// Fetch the articles of a tag
    Articles {
        #[arg(long)]
        tag: String,
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE, value_parser = clap::value_parser!(u32).range(0..=100))]
        min_score: u32,
        /// Restrict to a scoring model; repeatable
        #[arg(long = "model")]
        models: Vec<String>,
        /// Restrict to a source; repeatable
        #[arg(long = "source")]
        sources: Vec<String>,
        /// Narrow the result locally by title or source
        #[arg(long)]
        query: Option<String>,
    },
    /// Show the per-model tag weights of one article
    Article {
        id: String,
    },
    /// Interactive browser
    Browse,
    /// Development proxy forwarding /api/* to the backend with the prefix stripped
    Proxy {
        #[arg(long, env = "FRONTEND_PORT", default_value_t = 3000)]
        port: u16,
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
    },
}

fn api_config(cli: &Cli) -> Result<ApiConfig> {
    let config = ApiConfig::new(&cli.backend_url)?;
    Ok(match cli.prefix.as_deref() {
        Some(prefix) => config.with_prefix(prefix),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (&cli.command, cli.verbose) {
        (_, true) => Level::DEBUG,
        // Log lines would tear up the interactive screen
        (Commands::Browse, false) => Level::WARN,
        _ => Level::INFO,
    };
    logging::init_logging(level);

    let renderer = Renderer::new(!cli.no_color && io::stdout().is_tty());
    let config = api_config(&cli)?;

    match cli.command {
        Commands::Tags => {
            let client = HttpCatalogClient::new(config);
            let tags = client.list_tags().await?;
            renderer.tags(&mut io::stdout().lock(), &tags)?;
        }
        Commands::Articles { tag, min_score, models, sources, query } => {
            let view = CatalogView::new(Arc::new(HttpCatalogClient::new(config)));
            view.select_tag(tag).await;
            view.set_min_score(min_score).await;
            view.set_models(models).await;
            view.set_sources(sources).await;
            view.apply_filters().await?;
            if let Some(query) = query {
                view.set_search_query(query).await;
                view.filter_now().await;
            }

            let state = view.snapshot().await;
            let mut out = io::stdout().lock();
            renderer.article_list(&mut out, &state)?;
            if !state.articles.is_empty() {
                writeln!(out, "{}", state.status_line())?;
            }
        }
        Commands::Article { id } => {
            let client = HttpCatalogClient::new(config);
            let tags = client.article_tags(&RecordId::from(id.as_str())).await?;
            renderer.article_tags(&mut io::stdout().lock(), &tags)?;
        }
        Commands::Browse => {
            info!("Using backend {}", config.endpoint("/").as_str());
            let view = CatalogView::new(Arc::new(HttpCatalogClient::new(config)));
            shell::run_browse(view, renderer).await?;
        }
        Commands::Proxy { port, host } => {
            let state = ProxyState::new(&cli.backend_url)?;
            td_proxy::serve(SocketAddr::new(host, port), state).await?;
        }
    }

    Ok(())
}
