use clap::{Args, Parser, Subcommand};
use kanban_domain::Priority;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Edit a single kanban board from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the board file (or set KANBAN_FILE, or `default_file` in config.toml)
    #[arg(long, short, global = true, value_name = "FILE", env = "KANBAN_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new board file
    Init(InitArgs),
    /// Print the whole board
    Show,
    /// Verify that every column and card reference resolves
    Check,
    /// Column operations
    Column(ColumnCommand),
    /// Card operations
    Card(CardCommand),
    /// Replay a JSON array of actions against the board
    Apply {
        #[arg(value_name = "ACTIONS")]
        actions: PathBuf,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct InitArgs {
    /// Board title (defaults to `board_title` from config)
    #[arg(long)]
    pub title: Option<String>,
    /// Seed for the generated sample cards, for reproducible boards
    #[arg(long, conflicts_with = "empty")]
    pub seed: Option<u64>,
    /// Create the default columns without sample cards
    #[arg(long)]
    pub empty: bool,
    /// Overwrite an existing board file
    #[arg(long)]
    pub force: bool,
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Append a column
    Add {
        #[arg(long)]
        title: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List columns in board order
    List,
    /// Change a column's title
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a column together with its cards
    Delete {
        #[arg(long)]
        id: String,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card to the end of a column
    Add(CardAddArgs),
    /// List cards, optionally filtered
    List(CardListArgs),
    /// Get a specific card
    Get {
        #[arg(long)]
        id: String,
    },
    /// Update a card
    Update(CardUpdateArgs),
    /// Delete a card
    Delete {
        #[arg(long)]
        id: String,
        /// Column the card is expected in (looked up when omitted)
        #[arg(long)]
        column: Option<String>,
    },
    /// Move a card to another column
    Move {
        #[arg(long)]
        id: String,
        /// Target column
        #[arg(long)]
        to: String,
        /// Position in the target column (appends when omitted)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Reorder a card inside its column
    Reorder {
        #[arg(long)]
        column: String,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
}

#[derive(Args)]
pub struct CardAddArgs {
    #[arg(long)]
    pub column: String,
    #[arg(long)]
    pub title: String,
    /// Explicit id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub assignee: Option<String>,
    /// Label id, repeatable or comma separated
    #[arg(long = "label", value_delimiter = ',')]
    pub labels: Vec<String>,
}

#[derive(Args)]
pub struct CardListArgs {
    /// Only cards in this column
    #[arg(long)]
    pub column: Option<String>,
    /// Cards carrying any of these label ids
    #[arg(long = "label", value_delimiter = ',')]
    pub labels: Vec<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Case-insensitive text in title, description or assignee
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long, conflicts_with = "clear_assignee")]
    pub assignee: Option<String>,
    #[arg(long)]
    pub clear_assignee: bool,
    /// Replace the card's labels with these label ids
    #[arg(long = "label", value_delimiter = ',', conflicts_with = "clear_labels")]
    pub labels: Vec<String>,
    #[arg(long)]
    pub clear_labels: bool,
}
