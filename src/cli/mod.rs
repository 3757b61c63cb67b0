use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_cart::{
    config::CartConfig,
    events::{CartEvent, CartObserver, NotifyError},
    manager::{CartManager, Hydration},
    storage::FileStore,
};
use tracing::{debug, info, warn};

use crate::observability::LoggingConfig;

mod add;
mod cart;
mod menu;

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Food delivery storefront cart", long_about = None)]
pub(crate) struct Cli {
    /// Directory the cart snapshot is stored in
    #[arg(long, env = "CART_DATA_DIR", default_value = ".storefront", global = true)]
    data_dir: PathBuf,

    /// YAML cart configuration file
    #[arg(short, long, env = "CART_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List restaurants, or one restaurant's menu
    Menu(menu::MenuArgs),
    /// Add a menu item to the cart
    Add(add::AddArgs),
    /// Set the quantity of a cart line (zero or less removes it)
    Update(cart::UpdateArgs),
    /// Remove a cart line
    Remove(cart::RemoveArgs),
    /// Empty the cart
    Clear,
    /// Show the cart and its totals
    Show,
    /// Show the order summary (payment is not available in the demo)
    Checkout,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Menu(ref args) => menu::run(args),
            Commands::Add(ref args) => add::run(&mut self.open_cart()?, args),
            Commands::Update(ref args) => {
                cart::update(&mut self.open_cart()?, args);
                Ok(())
            }
            Commands::Remove(ref args) => {
                cart::remove(&mut self.open_cart()?, args);
                Ok(())
            }
            Commands::Clear => {
                self.open_cart()?.clear_cart();
                Ok(())
            }
            Commands::Show => cart::show(&self.open_cart()?),
            Commands::Checkout => cart::checkout(&self.open_cart()?),
        }
    }

    fn open_cart(&self) -> Result<CartManager<FileStore, Toasts>, String> {
        let config = match &self.config {
            Some(path) => CartConfig::from_yaml_file(path)
                .map_err(|error| format!("failed to load {}: {error}", path.display()))?,
            None => CartConfig::default(),
        };

        let store = FileStore::new(&self.data_dir);
        debug!(root = %store.root().display(), key = %config.storage_key, "opening cart");

        let cart = CartManager::with_config(store, Toasts, &config);

        match cart.hydration() {
            Hydration::Restored { lines } => info!(lines, "restored cart"),
            Hydration::Corrupt => warn!("stored cart was unreadable, starting empty"),
            Hydration::Unavailable => warn!("cart storage unavailable, starting empty"),
            Hydration::Fresh => {}
        }

        Ok(cart)
    }
}

/// Prints toast-worthy cart events, the CLI's notification surface.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Toasts;

impl CartObserver for Toasts {
    #[expect(clippy::print_stdout, reason = "toasts go to the terminal")]
    fn on_event(&mut self, event: &CartEvent) -> Result<(), NotifyError> {
        if let Some(notice) = event.notice() {
            println!("[{notice}] {}", event.message());
        }

        Ok(())
    }
}
