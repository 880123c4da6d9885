use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pm", about = concat!("pmlite v", env!("CARGO_PKG_VERSION"), " - OKRs, backlog and notes in one folder"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,

    /// Log more (-v info, -vv debug). PMLITE_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a .pmlite/ workspace in the current directory
    Init(InitArgs),
    /// Sign in
    Login,
    /// Sign out
    Logout,
    /// Show whether you are signed in
    Whoami,
    /// Show what a path resolves to
    Route(RouteArgs),
    /// Show counts and recent activity
    Dashboard,
    /// Objectives and key results
    #[command(subcommand)]
    Okr(OkrCmd),
    /// Kanban backlog
    #[command(subcommand)]
    Backlog(BacklogCmd),
    /// Meeting notes
    #[command(subcommand)]
    Notes(NotesCmd),
    /// Show or clear the activity log
    Activity(ActivityCmd),
    /// List feedback, or submit a new entry
    Feedback(FeedbackArgs),
    /// Show or change workspace configuration
    #[command(subcommand)]
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Workspace and session args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Rewrite config.toml even if .pmlite/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct RouteArgs {
    /// Path such as /app/okr
    pub path: String,
}

// ---------------------------------------------------------------------------
// Objective args
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum OkrCmd {
    /// List objectives with their key results
    List(OkrListArgs),
    /// Add an objective
    Add(OkrAddArgs),
    /// Change an objective's title or key results
    Edit(OkrEditArgs),
    /// Flip a key result between done and open
    Toggle(OkrToggleArgs),
    /// Delete an objective
    Delete(DeleteArgs),
    /// Show or set the page heading
    Title(OkrTitleArgs),
}

#[derive(Args)]
pub struct OkrListArgs {
    /// Order by due label
    #[arg(long)]
    pub by_due: bool,
}

#[derive(Args)]
pub struct OkrAddArgs {
    /// Objective title
    pub title: String,
    /// Key result (repeatable)
    #[arg(long = "kr", value_name = "TEXT")]
    pub key_results: Vec<String>,
    /// Owner (default from config)
    #[arg(long)]
    pub owner: Option<String>,
    /// Due label (default from config)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct OkrEditArgs {
    /// Objective ID
    pub id: i64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// Replace key results (repeatable)
    #[arg(long = "kr", value_name = "TEXT")]
    pub key_results: Vec<String>,
}

#[derive(Args)]
pub struct OkrToggleArgs {
    /// Objective ID
    pub id: i64,
    /// Key result position, starting at 1
    pub index: usize,
}

#[derive(Args)]
pub struct OkrTitleArgs {
    /// New heading (omit to show the current one)
    pub heading: Option<String>,
}

// ---------------------------------------------------------------------------
// Backlog args
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum BacklogCmd {
    /// Show the board
    List,
    /// Add a task
    Add(TaskAddArgs),
    /// Change a task
    Edit(TaskEditArgs),
    /// Move a task to a column (todo, in-progress, done)
    Move(TaskMoveArgs),
    /// Move a task one column left
    Left(IdArg),
    /// Move a task one column right
    Right(IdArg),
    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task title
    pub title: String,
    /// high, medium or low
    #[arg(long)]
    pub priority: Option<String>,
    /// todo, in-progress or done
    #[arg(long)]
    pub status: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct TaskEditArgs {
    /// Task ID
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct TaskMoveArgs {
    /// Task ID
    pub id: i64,
    /// Target column
    pub status: String,
}

#[derive(Args)]
pub struct IdArg {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Notes args
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum NotesCmd {
    /// List notes, optionally filtered
    List(NotesListArgs),
    /// Add a note
    Add(NoteAddArgs),
    /// Change a note
    Edit(NoteEditArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Show the most used tags
    Tags,
}

#[derive(Args)]
pub struct NotesListArgs {
    /// Only notes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
    /// Only notes on this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct NoteAddArgs {
    pub title: String,
    pub content: String,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
    /// Meeting date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct NoteEditArgs {
    /// Note ID
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// Comma-separated tags (replaces the current ones)
    #[arg(long)]
    pub tags: Option<String>,
    /// Append a tag unless the note already has it (repeatable)
    #[arg(long = "add-tag", value_name = "TAG")]
    pub add_tags: Vec<String>,
    #[arg(long)]
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared / misc args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ActivityCmd {
    #[command(subcommand)]
    pub action: Option<ActivityAction>,
    /// Maximum number of entries to show
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Remove every activity entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct FeedbackArgs {
    /// Feedback text (if omitted, lists submitted feedback)
    pub message: Option<String>,
    /// suggestion, positive or bug
    #[arg(long = "type", default_value = "suggestion")]
    pub kind: String,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the effective configuration
    Show,
    /// Set a value, e.g. `pm config set dashboard.recent_activity 5`
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Dotted key
    pub key: String,
    pub value: String,
}
