use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use showcase_core::{
    render::results_count_text, CategoryFilter, Config, FileStore, GitHubSource, HtmlSurface,
    KeyValueStore, Pipeline, ThemePreference, ThemeSwitcher, ThemeTarget, ViewController,
    ViewState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "showcase")]
#[command(version, about = "Browse a GitHub portfolio from the terminal", long_about = None)]
struct Cli {
    /// Config file (defaults to <config_dir>/showcase/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive terminal browser (default)
    Browse,
    /// Print the filtered, sorted repositories
    List {
        /// all, mcp or tool
        #[arg(long, default_value = "all")]
        filter: CategoryFilter,
        #[arg(long, default_value = "")]
        search: String,
        /// Emit JSON records instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the results count and card grid as an HTML fragment
    Render {
        #[arg(long, default_value = "all")]
        filter: CategoryFilter,
        #[arg(long, default_value = "")]
        search: String,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(clap::Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
    Set { theme: ThemePreference },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let browsing = matches!(cli.command, None | Some(Commands::Browse));
    init_logging(cli.debug, browsing)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => browse(&config).await,
        Commands::List {
            filter,
            search,
            json,
        } => list(&config, filter, search, json).await,
        Commands::Render {
            filter,
            search,
            out,
        } => render(&config, filter, search, out).await,
        Commands::Theme { action } => theme(&config, action.unwrap_or(ThemeAction::Show)),
    }
}

/// Stderr for one-shot commands; a log file while the alternate screen is up
fn init_logging(debug: bool, to_file: bool) -> anyhow::Result<()> {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("showcase=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "showcase=info".into())
    };

    if to_file {
        let dir = dirs::data_dir()
            .context("no data directory on this platform")?
            .join("showcase");
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("showcase.log"))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn build_pipeline(config: &Config) -> anyhow::Result<Pipeline> {
    let client = config.client()?;
    let endpoint = config.endpoint(&client);
    let source = GitHubSource::new(client, endpoint);
    tracing::debug!("Fetching from {}", source.endpoint());
    Ok(Pipeline::new(Box::new(source), config.denylist()))
}

fn theme_store(config: &Config) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let store = match &config.theme.store_path {
        Some(path) => FileStore::new(path),
        None => FileStore::default_location()?,
    };
    Ok(Box::new(store))
}

async fn browse(config: &Config) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let controller = ViewController::new(config.listing.sort, config.listing.debounce());
    let switcher = ThemeSwitcher::new(
        theme_store(config)?,
        config.theme.storage_key.clone(),
        config.theme.fallback,
    );

    let app = showcase_tui::App::new(controller, switcher, config.reveal.options());
    showcase_tui::run_tui(app, pipeline).await
}

async fn list(
    config: &Config,
    filter: CategoryFilter,
    search: String,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = build_pipeline(config)?.load().await?;
    let state = ViewState { filter, search };
    let view = catalog.view(&state, config.listing.sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", results_count_text(view.len(), catalog.len()));
    for repo in view {
        let category = showcase_core::classify(repo);
        let language = repo.language.as_deref().unwrap_or("-");
        println!(
            "{:<32} {:<5} {:<12} ★ {}",
            repo.name,
            category.as_str(),
            language,
            repo.stars
        );
        if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", description);
        }
    }
    Ok(())
}

async fn render(
    config: &Config,
    filter: CategoryFilter,
    search: String,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let catalog = build_pipeline(config)?.load().await?;

    let mut controller = ViewController::new(config.listing.sort, config.listing.debounce());
    let mut surface = HtmlSurface::default();
    controller.begin_load(&mut surface);
    controller.finish_load(Ok(catalog), &mut surface);
    controller.select_filter(filter, &mut surface);

    if !search.is_empty() {
        let now = Instant::now();
        controller.search_input(search, now);
        controller.tick(now + config.listing.debounce(), &mut surface);
    }

    let html = surface.to_html();
    match out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {} cards to {}", controller.cards().len(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Stand-in for the page root when no page is showing
#[derive(Default)]
struct Flag {
    light: bool,
}

impl ThemeTarget for Flag {
    fn set_light(&mut self, light: bool) {
        self.light = light;
    }

    fn is_light(&self) -> bool {
        self.light
    }
}

fn theme(config: &Config, action: ThemeAction) -> anyhow::Result<()> {
    let mut switcher = ThemeSwitcher::new(
        theme_store(config)?,
        config.theme.storage_key.clone(),
        config.theme.fallback,
    );
    let mut flag = Flag::default();

    let current = match action {
        ThemeAction::Show => switcher.read().unwrap_or(config.theme.fallback),
        ThemeAction::Toggle => {
            switcher.init(&mut flag);
            switcher.toggle(&mut flag)
        }
        ThemeAction::Set { theme } => {
            switcher.apply(theme, &mut flag);
            theme
        }
    };

    println!("{}", current);
    Ok(())
}
