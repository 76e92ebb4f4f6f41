use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf};
use tokio::sync::mpsc;

/// Rick and Morty character catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp dir (rmcat-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Restore a view from a shared link or query, e.g. "?search=rick&status=dead"
    #[arg(long)]
    view: Option<String>,

    /// Path to the favorites database
    #[arg(long)]
    favorites: Option<PathBuf>,
}

mod handlers;
mod ui;

use rmcat::api::{CatalogClient, CharacterId};
use rmcat::config::{self, Config};
use rmcat::favorites::FavoritesStore;
use rmcat::logic;
use rmcat::messages::{CatalogMsg, Command, FavoritesMsg, Msg};
use rmcat::model::{self, ActiveView, QueryState};
use rmcat::services;
use rmcat::storage::{FavoritesStorage, MemoryStorage, SqliteStorage};
use rmcat::utils;

pub struct App {
    pub model: model::Model,

    favorites: FavoritesStore<Box<dyn FavoritesStorage>>,
    cmd_tx: mpsc::UnboundedSender<Command>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
}

impl App {
    fn new(config: &Config, initial_query: QueryState, favorites_path: PathBuf) -> Result<Self> {
        let client = CatalogClient::new(&config.base_url, config.request_timeout())?;
        let (cmd_tx, msg_rx) = services::spawn_command_runner(client);

        let storage: Box<dyn FavoritesStorage> = match SqliteStorage::open(&favorites_path) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                tracing::warn!(
                    "favorites database {} unavailable, keeping favorites in memory: {}",
                    favorites_path.display(),
                    e
                );
                Box::new(MemoryStorage::new())
            }
        };
        let favorites = FavoritesStore::load(storage);

        let model = model::Model::new(
            initial_query,
            config.search_debounce(),
            config.vim_mode,
            config.scroll_threshold,
        );

        let mut app = App {
            model,
            favorites,
            cmd_tx,
            msg_rx,
        };

        app.dispatch(Msg::Catalog(CatalogMsg::Mount));
        let ids = app.favorites.current().ids().to_vec();
        app.dispatch(Msg::Favorites(FavoritesMsg::FavoritesChanged(ids)));

        Ok(app)
    }

    /// Feed a message to the model and hand the resulting commands to the runner
    pub fn dispatch(&mut self, msg: Msg) {
        for command in self.model.update(msg) {
            if self.cmd_tx.send(command).is_err() {
                tracing::error!("command runner stopped, dropping command");
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.model.visible_characters().len();
        let selection = match self.model.ui.selection() {
            None if len > 0 => Some(0),
            current => logic::navigation::clamp_selection(current, len),
        };
        self.model.ui.set_selection(selection);
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Toggle the selected character in or out of the favorites
    pub fn toggle_selected_favorite(&mut self) {
        if let Some(character) = self.model.selected_character() {
            self.toggle_favorite(character.id, &character.name);
        }
    }

    pub fn toggle_favorite(&mut self, id: CharacterId, name: &str) {
        let set = self.favorites.toggle(id);
        let message = if set.contains(id) {
            format!("Added {} to favorites", name)
        } else {
            format!("Removed {} from favorites", name)
        };
        self.dispatch(Msg::Favorites(FavoritesMsg::FavoritesChanged(
            set.ids().to_vec(),
        )));
        self.model.ui.show_toast(message);
    }

    /// Shareable path for the characters view
    pub fn share_path(&self) -> String {
        logic::url_state::share_path(self.model.catalog.query())
    }

    pub fn switch_view(&mut self) {
        self.model.ui.search_mode = false;
        self.model.ui.active_view = match self.model.ui.active_view {
            ActiveView::Characters => ActiveView::Favorites,
            ActiveView::Favorites => ActiveView::Characters,
        };
        self.clamp_selection();
    }

    /// Cancel everything pending before exit
    fn teardown(&mut self) {
        self.dispatch(Msg::Catalog(CatalogMsg::Teardown));
        self.dispatch(Msg::Favorites(FavoritesMsg::Teardown));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    utils::init_logging(args.debug)?;
    tracing::debug!("Debug mode enabled");

    // Determine config file path
    let config_path = config::get_config_path(args.config.as_deref())?;
    tracing::debug!("Loading config from: {:?}", config_path);
    let mut config = Config::load(config_path.as_deref())?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }

    let initial_query = args
        .view
        .as_deref()
        .map(logic::url_state::parse_query_string)
        .unwrap_or_default();

    let favorites_path = args
        .favorites
        .or_else(|| config.favorites_db.clone())
        .unwrap_or_else(SqliteStorage::default_path);

    // Initialize app
    let mut app = App::new(&config, initial_query, favorites_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if result.is_ok() {
        println!("{}", app.share_path());
    }

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        // Auto-dismiss toast after 1.5 seconds
        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            app.teardown();
            break;
        }

        // Process fetch results and timer firings (non-blocking)
        while let Ok(msg) = app.msg_rx.try_recv() {
            app.dispatch(msg);
        }

        // Short poll so async results are drawn promptly
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handlers::keyboard::handle_key(app, key)?;
            }
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}
