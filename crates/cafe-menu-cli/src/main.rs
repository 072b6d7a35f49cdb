mod app;
mod event;
mod logging;
mod settings;
mod theme;
mod ui;
mod view;

#[cfg(test)]
mod test_support;

use app::App;
use cafe_menu_client::{Category, HttpMenuClient, MenuApi, MenuEntry, MenuId};
use clap::{Parser, Subcommand};
use ratatui::DefaultTerminal;
use settings::Settings;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cafe-menu")]
#[command(about = "Terminal menu manager for the cafe menu API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the menu API
    #[arg(long, global = true, env = "CAFE_MENU_API_URL")]
    base_url: Option<String>,

    /// Settings file (defaults to config/settings.* when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (Terminal User Interface) - Default
    Tui {
        /// Category shown first
        #[arg(long)]
        category: Option<Category>,
    },
    /// Print the menu of a category
    List { category: Category },
    /// Add a menu to a category
    Add { category: Category, name: String },
    /// Rename a menu by id
    Rename {
        category: Category,
        id: String,
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
        settings.validate()?;
    }
    logging::init_logger(&settings.logging)?;

    let client = HttpMenuClient::new(&settings.api.base_url)?;
    info!(base_url = client.base_url(), "Menu API client ready");

    match cli.command.unwrap_or(Commands::Tui { category: None }) {
        Commands::Tui { category } => {
            let category = category.unwrap_or(settings.ui.initial_category);
            start_tui(Arc::new(client), category, settings.ui.tick_rate_ms).await?
        }
        Commands::List { category } => handle_list(&client, category).await?,
        Commands::Add { category, name } => handle_add(&client, category, &name).await?,
        Commands::Rename { category, id, name } => {
            handle_rename(&client, category, &MenuId::new(id), &name).await?
        }
    }

    Ok(())
}

async fn handle_list(api: &dyn MenuApi, category: Category) -> anyhow::Result<()> {
    let entries = api.list_by_category(category).await?;
    print_entries(category, &entries);
    Ok(())
}

async fn handle_add(api: &dyn MenuApi, category: Category, name: &str) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!(app::EMPTY_NAME_MESSAGE);
    }

    // List even when the create failed
    let created = api.create_menu(category, name).await;
    if let Err(err) = &created {
        error!(%category, %name, error = %err, "Failed to create menu");
    }

    handle_list(api, category).await?;
    created?;
    println!("Added \"{}\" to {}", name, category);
    Ok(())
}

async fn handle_rename(
    api: &dyn MenuApi,
    category: Category,
    id: &MenuId,
    name: &str,
) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!(app::EMPTY_NAME_MESSAGE);
    }

    let entry = api.update_menu(category, name, id).await?;
    println!("Renamed {} to \"{}\"", entry.id, entry.name);
    Ok(())
}

fn print_entries(category: Category, entries: &[MenuEntry]) {
    println!("{} Menu Management", category.label());
    for entry in entries {
        let marker = if entry.sold_out { " [SOLD OUT]" } else { "" };
        println!("  {:>6}  {}{}", entry.id, entry.name, marker);
    }
    println!("Total: {}", entries.len());
}

async fn start_tui(
    api: Arc<dyn MenuApi>,
    category: Category,
    tick_rate_ms: u64,
) -> anyhow::Result<()> {
    // Initialize terminal (ratatui::init handles raw mode + alternate screen)
    let terminal = ratatui::init();

    let result = run_app(terminal, api, category, tick_rate_ms).await;

    // Restore terminal (always, even on error)
    ratatui::restore();

    result
}

async fn run_app(
    mut terminal: DefaultTerminal,
    api: Arc<dyn MenuApi>,
    category: Category,
    tick_rate_ms: u64,
) -> anyhow::Result<()> {
    let mut app = App::new(api, category);
    app.init().await?;

    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Each handler awaits its request before the next draw
        if let Some(evt) = event::poll_event(tick_rate_ms)? {
            event::handle_event(&mut app, evt).await?;
        }
    }

    info!("Menu manager closed");
    Ok(())
}
