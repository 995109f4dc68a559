mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cardbox-cli", about = "Cardbox flash cards CLI and TUI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List categories with their decks
    List,

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage decks
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Manage cards
    #[command(subcommand)]
    Card(CardCommand),

    /// Show the cards of a deck
    Show {
        /// Category name (case-insensitive prefix match)
        category: String,
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Print a deck as a study session
    Study {
        /// Category name
        category: String,
        /// Deck name
        deck: String,
        /// Shuffle the cards first
        #[arg(long)]
        shuffle: bool,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Create a category
    Add {
        name: String,
        /// Display color, e.g. "#6366f1"
        #[arg(long)]
        color: Option<String>,
        /// Display icon, e.g. "📚"
        #[arg(long)]
        icon: Option<String>,
    },

    /// Edit a category (unset options keep their value)
    Edit {
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a category with all its decks and cards
    Rm {
        category: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DeckCommand {
    /// Create a deck in a category
    Add {
        category: String,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a deck (unset options keep their value)
    Edit {
        category: String,
        deck: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a deck with all its cards
    Rm {
        category: String,
        deck: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CardCommand {
    /// Add a card to a deck
    Add {
        category: String,
        deck: String,
        front: String,
        back: String,
        /// Attach an image file
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Edit a card, addressed by id or 1-based position
    Edit {
        category: String,
        deck: String,
        card: String,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        /// Replace the image
        #[arg(long, conflicts_with = "remove_image")]
        image: Option<PathBuf>,
        /// Remove the image
        #[arg(long)]
        remove_image: bool,
    },

    /// Delete a card, addressed by id or 1-based position
    Rm {
        category: String,
        deck: String,
        card: String,
        #[arg(long, short)]
        yes: bool,
    },
}

/// Check if stdin is a terminal (not piped)
pub fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(data_dir)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::List) => {
            let app = app::App::new(data_dir)?;
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Category(subcmd)) => {
            let mut app = app::App::new(data_dir)?;
            commands::category::run(&mut app, subcmd, &cli.format)?;
        }
        Some(Command::Deck(subcmd)) => {
            let mut app = app::App::new(data_dir)?;
            commands::deck::run(&mut app, subcmd, &cli.format)?;
        }
        Some(Command::Card(subcmd)) => {
            let mut app = app::App::new(data_dir)?;
            commands::card::run(&mut app, subcmd, &cli.format, use_color)?;
        }
        Some(Command::Show { category, deck }) => {
            let app = app::App::new(data_dir)?;
            commands::show::run(&app, &category, &deck, &cli.format, use_color)?;
        }
        Some(Command::Study { category, deck, shuffle }) => {
            let mut app = app::App::new(data_dir)?;
            commands::study::run(&mut app, &category, &deck, shuffle, &cli.format, use_color)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(data_dir)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
