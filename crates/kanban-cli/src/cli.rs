use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A kanban board kept in a JSON document store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to kanban data file (or set KANBAN_FILE env var)
    #[arg(long, short, value_name = "FILE", env = "KANBAN_FILE", global = true)]
    pub file: Option<String>,

    /// Board owner (or set KANBAN_OWNER env var)
    #[arg(long, value_name = "OWNER", env = "KANBAN_OWNER", global = true)]
    pub owner: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Print the owner's columns and tasks in order
    Show,
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Create a new column at the end of the board
    Create {
        #[arg(long)]
        title: String,
    },
    /// Rename a column
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a column and every task in it
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Reorder columns (not persisted by the store)
    Reorder {
        /// Every column id, comma separated, in the new order
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task at the end of a column
    Create {
        #[arg(long)]
        column_id: String,
        #[arg(long)]
        content: String,
    },
    /// Replace a task's content
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Move a task to a column
    Move {
        #[arg(long)]
        id: String,
        #[arg(long)]
        column_id: String,
        /// Index in the target column; defaults to the end
        #[arg(long)]
        position: Option<usize>,
    },
    /// Reorder the tasks of one column (not persisted by the store)
    Reorder {
        #[arg(long)]
        column_id: String,
        /// Every task id of the column, comma separated, in the new order
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },
}
