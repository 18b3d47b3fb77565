//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for recipebox using the
//! `clap` crate. Each subcommand stands in for one gesture of the recipe
//! list view.
//!
//! # Commands
//!
//! - **list**: search, filter, sort and page through recipes (default)
//! - **featured**: most recently updated recipes
//! - **show / create / edit / delete**: single-recipe operations
//! - **move**: drag a recipe to another slot on the visible page
//! - **share**: build a `mailto:` link for selected recipes
//! - **config**: read and change settings
//! - **completions**: print a shell completion script
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use recipebox::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["recipebox", "list", "--search", "soup", "--page", "2"]);
//! assert!(matches!(cli.command, Some(Commands::List { .. })));
//! ```

use crate::query::{DifficultyFilter, QueryState, SortKey, TagFilter};
use crate::recipe::Difficulty;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for recipe listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Coloured cards, one per line
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

/// Search, filter, sort and page selection shared by `list` and `move`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Start from a shared address or query string (`search=soup&page=2`)
    #[arg(long = "address", value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Match title, description or ingredients (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Only recipes of this difficulty (easy, medium, hard or all)
    #[arg(short = 'd', long = "difficulty", value_name = "LEVEL")]
    pub difficulty: Option<DifficultyFilter>,

    /// Only recipes carrying this tag (or all)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tag: Option<TagFilter>,

    /// newest, oldest, title, difficulty or manual
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Page number, starting at 1
    #[arg(short = 'p', long = "page", value_name = "N")]
    pub page: Option<usize>,
}

impl QueryArgs {
    /// Seed address for the session; flags are layered on top afterwards
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or_default()
    }

    /// Apply the explicit flags to a seeded query
    ///
    /// Filter flags go through the regular setters, so a filter that
    /// differs from the seeded one resets the page unless `--page` is given.
    pub fn apply(&self, query: &mut QueryState) {
        if let Some(search) = &self.search {
            query.set_search(search.clone());
        }
        if let Some(difficulty) = self.difficulty {
            query.set_difficulty(difficulty);
        }
        if let Some(tag) = &self.tag {
            query.set_tag(tag.clone());
        }
        if let Some(sort) = self.sort {
            query.set_sort(sort);
        }
        if let Some(page) = self.page {
            query.set_page(page);
        }
    }
}

/// Fields of a new recipe
#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Recipe title (prompted for when missing)
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Short description (prompted for when missing)
    #[arg(long = "description")]
    pub description: Option<String>,

    /// Ingredient, repeat for more
    #[arg(short = 'i', long = "ingredient", value_name = "TEXT")]
    pub ingredients: Vec<String>,

    /// Instruction step, repeat for more
    #[arg(long = "step", value_name = "TEXT")]
    pub steps: Vec<String>,

    /// easy, medium or hard
    #[arg(short = 'd', long = "difficulty", default_value = "easy")]
    pub difficulty: Difficulty,

    /// Tag from the recipe vocabulary, repeat for more
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

/// Fields to change on an existing recipe
#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    #[arg(long = "title")]
    pub title: Option<String>,

    #[arg(long = "description")]
    pub description: Option<String>,

    #[arg(short = 'd', long = "difficulty")]
    pub difficulty: Option<Difficulty>,

    /// Replace the tags; repeat for more, give `--tag` alone to clear
    #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 0..)]
    pub tags: Option<Vec<String>>,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., `api_url=http://localhost:3001`)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., `featured_limit`)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Show every setting
    #[command(visible_alias = "ls")]
    List,

    /// Print the path of the configuration file
    Path,

    /// Re-run the interactive setup
    Setup,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Browse, reorder and share recipes from a recipe service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Recipe service address (overrides config)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List recipes (default)
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print the shareable address of the view after the list
        #[arg(long = "print-address")]
        print_address: bool,
    },

    /// Show the most recently updated recipes
    Featured {
        /// How many recipes (overrides config)
        #[arg(short = 'n', long = "limit")]
        limit: Option<usize>,
    },

    /// Show one recipe in full
    Show {
        /// Recipe id
        id: String,
    },

    /// Create a recipe
    #[command(visible_alias = "new")]
    Create {
        #[command(flatten)]
        fields: CreateArgs,
    },

    /// Edit a recipe
    Edit {
        /// Recipe id
        id: String,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete a recipe
    #[command(visible_alias = "rm")]
    Delete {
        /// Recipe id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Move a recipe to another slot on the visible page (sort defaults to manual)
    #[command(visible_alias = "mv")]
    Move {
        /// Slot of the recipe to move, as printed by `list --sort manual`
        from: usize,

        /// Slot to drop it on
        to: usize,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Build a share-by-email link for the given recipes
    Share {
        /// Recipe ids to include
        #[arg(required = true)]
        ids: Vec<String>,

        /// Email subject (overrides config)
        #[arg(long = "subject")]
        subject: Option<String>,

        /// Open the link in the default mail client
        #[arg(long = "open", conflicts_with = "copy")]
        open: bool,

        /// Copy the link to the clipboard
        #[arg(long = "copy", conflicts_with = "open")]
        copy: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            query: QueryArgs::default(),
            format: OutputFormat::Text,
            print_address: false,
        })
    }

    /// Log filter directive implied by `--verbose`
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
