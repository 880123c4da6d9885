mod init;
pub use init::cmd_init;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use futures::executor::block_on;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::auth::{self, Session};
use crate::io::config_io;
use crate::io::lock::WriteLock;
use crate::io::store::KeyValueStore;
use crate::io::workspace::{self, WORKSPACE_DIR, Workspace};
use crate::model::feedback::FeedbackKind;
use crate::model::objective::{KeyResult, Objective, ObjectiveDraft};
use crate::model::note::{Note, NoteDraft};
use crate::model::record::{Record, RecordId};
use crate::model::task::{Priority, Task, TaskDraft, TaskStatus};
use crate::ops::backlog::{self, MoveOutcome, Shift};
use crate::ops::confirm::{Confirm, Preset};
use crate::ops::notes::{self, NoteFilter};
use crate::ops::view::{CollectionView, CommitOutcome, ViewError};
use crate::ops::{activity, dashboard, feedback, okr, routes};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Per-invocation settings shared by every handler
struct Context {
    json: bool,
    /// Where workspace discovery starts (cwd, or the -C directory)
    start: PathBuf,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let start = resolve_start(cli.project_dir.as_deref())?;
    let ctx = Context {
        json: cli.json,
        start,
    };

    match cli.command {
        // Init is handled in main.rs before workspace discovery
        Commands::Init(args) => cmd_init(args, cli.project_dir.as_deref()),

        // Session
        Commands::Login => cmd_login(&ctx),
        Commands::Logout => cmd_logout(&ctx),
        Commands::Whoami => cmd_whoami(&ctx),
        Commands::Route(args) => cmd_route(&ctx, args),

        // Views
        Commands::Dashboard => cmd_dashboard(&ctx),
        Commands::Okr(cmd) => match cmd {
            OkrCmd::List(args) => cmd_okr_list(&ctx, args),
            OkrCmd::Add(args) => cmd_okr_add(&ctx, args),
            OkrCmd::Edit(args) => cmd_okr_edit(&ctx, args),
            OkrCmd::Toggle(args) => cmd_okr_toggle(&ctx, args),
            OkrCmd::Delete(args) => cmd_delete::<Objective>(&ctx, args),
            OkrCmd::Title(args) => cmd_okr_title(&ctx, args),
        },
        Commands::Backlog(cmd) => match cmd {
            BacklogCmd::List => cmd_backlog_list(&ctx),
            BacklogCmd::Add(args) => cmd_backlog_add(&ctx, args),
            BacklogCmd::Edit(args) => cmd_backlog_edit(&ctx, args),
            BacklogCmd::Move(args) => cmd_backlog_move(&ctx, args),
            BacklogCmd::Left(arg) => cmd_backlog_shift(&ctx, arg.id, Shift::Left),
            BacklogCmd::Right(arg) => cmd_backlog_shift(&ctx, arg.id, Shift::Right),
            BacklogCmd::Delete(args) => cmd_delete::<Task>(&ctx, args),
        },
        Commands::Notes(cmd) => match cmd {
            NotesCmd::List(args) => cmd_notes_list(&ctx, args),
            NotesCmd::Add(args) => cmd_notes_add(&ctx, args),
            NotesCmd::Edit(args) => cmd_notes_edit(&ctx, args),
            NotesCmd::Delete(args) => cmd_delete::<Note>(&ctx, args),
            NotesCmd::Tags => cmd_notes_tags(&ctx),
        },
        Commands::Activity(args) => match args.action {
            Some(ActivityAction::Clear { yes }) => cmd_activity_clear(&ctx, yes),
            None => cmd_activity_list(&ctx, args.limit),
        },

        // Not behind the sign-in guard
        Commands::Feedback(args) => match args.message {
            Some(message) => cmd_feedback_submit(&ctx, &message, &args.kind),
            None => cmd_feedback_list(&ctx),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCmd::Show => cmd_config_show(&ctx),
            ConfigCmd::Set(args) => cmd_config_set(&ctx, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_start(project_dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match project_dir {
        Some(dir) => Ok(std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

fn load_workspace(ctx: &Context) -> Result<Workspace, workspace::WorkspaceError> {
    let root = workspace::discover_workspace(&ctx.start)?;
    workspace::open_workspace(&root)
}

/// Open the workspace with the write lock held. The store is read after the
/// lock is taken so no other process can write in between.
fn load_workspace_locked(ctx: &Context) -> Result<(Workspace, WriteLock), Box<dyn std::error::Error>> {
    let root = workspace::discover_workspace(&ctx.start)?;
    let lock = WriteLock::acquire_default(&root.join(WORKSPACE_DIR))?;
    let ws = workspace::open_workspace(&root)?;
    Ok((ws, lock))
}

/// Guard for the view commands
fn require_session(ws: &Workspace) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::load(&ws.store);
    if !session.is_authenticated() {
        return Err("not signed in (run `pm login` first)".into());
    }
    Ok(session)
}

fn print_mutation(ctx: &Context, id: Option<RecordId>, message: String) -> CmdResult {
    if ctx.json {
        let out = MutationJson {
            ok: true,
            id,
            message,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

fn report_commit(ctx: &Context, noun: &str, outcome: CommitOutcome, required: &str) -> CmdResult {
    match outcome {
        CommitOutcome::Created(id) => print_mutation(ctx, Some(id), format!("created {} {}", noun, id)),
        CommitOutcome::Updated(id) => print_mutation(ctx, Some(id), format!("updated {} {}", noun, id)),
        CommitOutcome::Rejected => Err(format!("{} required, nothing was saved", required).into()),
        CommitOutcome::NothingToCommit => Ok(()),
    }
}

/// Reads a y/N answer from the terminal. Anything but `y`/`yes` declines,
/// including a closed stdin.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Run a confirmable operation with `--yes` answering for the user.
fn with_confirm<T>(yes: bool, op: impl AsyncOp<T>) -> T {
    if yes {
        block_on(op.run(&Preset(true)))
    } else {
        block_on(op.run(&TerminalConfirm))
    }
}

/// An operation that needs a confirmation collaborator, generic over which
/// one answers.
trait AsyncOp<T> {
    async fn run<C: Confirm>(self, confirm: &C) -> T;
}

struct DeleteRecord<'a, R: Record> {
    view: &'a mut CollectionView<R>,
    id: RecordId,
    store: &'a mut dyn KeyValueStore,
}

impl<R: Record> AsyncOp<Result<bool, ViewError>> for DeleteRecord<'_, R> {
    async fn run<C: Confirm>(self, confirm: &C) -> Result<bool, ViewError> {
        self.view.delete(self.id, self.store, confirm).await
    }
}

struct ClearActivity<'a> {
    store: &'a mut dyn KeyValueStore,
}

impl AsyncOp<Result<bool, crate::io::store::StoreError>> for ClearActivity<'_> {
    async fn run<C: Confirm>(self, confirm: &C) -> Result<bool, crate::io::store::StoreError> {
        activity::clear(self.store, confirm).await
    }
}

/// Cosmetic pause. With `show_messages`, the rotating sign-in messages are
/// written to stderr as they change.
fn simulate_delay(delay_ms: u64, show_messages: bool) {
    if delay_ms == 0 {
        return;
    }
    let start = Instant::now();
    let mut shown: Option<&str> = None;
    loop {
        let elapsed = start.elapsed().as_millis() as u64;
        if elapsed >= delay_ms {
            break;
        }
        if show_messages {
            let message = auth::loading_message(elapsed);
            if shown != Some(message) {
                eprintln!("{}", message);
                shown = Some(message);
            }
        }
        thread::sleep(Duration::from_millis((delay_ms - elapsed).min(25)));
    }
}

/// Feedback submission pauses a little longer than sign-in (600ms at the
/// default 500ms setting).
fn feedback_delay_ms(simulated_delay_ms: u64) -> u64 {
    simulated_delay_ms + simulated_delay_ms / 5
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse_priority(s)
        .ok_or_else(|| format!("unknown priority '{}' (expected: high, medium, low)", s))
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse_status(s)
        .ok_or_else(|| format!("unknown status '{}' (expected: todo, in-progress, done)", s))
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

fn cmd_login(ctx: &Context) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    let mut session = Session::load(&ws.store);
    if !session.is_authenticated() {
        simulate_delay(ws.config.ui.simulated_delay_ms, !ctx.json);
        session.login(&mut ws.store)?;
    }
    if ctx.json {
        let out = SessionJson {
            authenticated: session.is_authenticated(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("signed in");
    }
    Ok(())
}

fn cmd_logout(ctx: &Context) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    let mut session = Session::load(&ws.store);
    session.logout(&mut ws.store)?;
    if ctx.json {
        let out = SessionJson {
            authenticated: false,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("signed out");
    }
    Ok(())
}

fn cmd_whoami(ctx: &Context) -> CmdResult {
    let ws = load_workspace(ctx)?;
    let session = Session::load(&ws.store);
    if ctx.json {
        let out = SessionJson {
            authenticated: session.is_authenticated(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if session.is_authenticated() {
        println!("signed in");
    } else {
        println!("signed out");
    }
    Ok(())
}

fn cmd_route(ctx: &Context, args: RouteArgs) -> CmdResult {
    let ws = load_workspace(ctx)?;
    let session = Session::load(&ws.store);
    let resolution = routes::resolve(&args.path, &session);
    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolution_to_json(&args.path, resolution))?
        );
    } else {
        println!("{}", format_resolution(&args.path, resolution));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dashboard / activity handlers
// ---------------------------------------------------------------------------

fn cmd_dashboard(ctx: &Context) -> CmdResult {
    let ws = load_workspace(ctx)?;
    require_session(&ws)?;
    let summary = dashboard::summarize(&ws.store, ws.config.dashboard.recent_activity);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in format_dashboard(&summary) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_activity_list(ctx: &Context, limit: Option<usize>) -> CmdResult {
    let ws = load_workspace(ctx)?;
    require_session(&ws)?;
    let entries = match limit {
        Some(n) => activity::recent(&ws.store, n),
        None => activity::entries(&ws.store),
    };
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("no activity");
    } else {
        for entry in &entries {
            println!("{}", format_activity_entry(entry));
        }
    }
    Ok(())
}

fn cmd_activity_clear(ctx: &Context, yes: bool) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let cleared = with_confirm(
        yes,
        ClearActivity {
            store: &mut ws.store,
        },
    )?;
    let message = if cleared { "activity log cleared" } else { "cancelled" };
    print_mutation(ctx, None, message.to_string())
}

// ---------------------------------------------------------------------------
// Shared record handlers
// ---------------------------------------------------------------------------

fn cmd_delete<R: Record>(ctx: &Context, args: DeleteArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<R>::mount(&mut ws.store)?;
    let deleted = with_confirm(
        args.yes,
        DeleteRecord {
            view: &mut view,
            id: args.id,
            store: &mut ws.store,
        },
    )?;
    if deleted {
        print_mutation(ctx, Some(args.id), format!("deleted {} {}", R::NOUN, args.id))
    } else {
        print_mutation(ctx, None, "cancelled".to_string())
    }
}

// ---------------------------------------------------------------------------
// Objective handlers
// ---------------------------------------------------------------------------

fn cmd_okr_list(ctx: &Context, args: OkrListArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let view = CollectionView::<Objective>::mount(&mut ws.store)?;
    let heading = okr::heading(&ws.store);
    let objectives: Vec<&Objective> = if args.by_due || ws.config.objectives.sort_by_due {
        okr::sorted_by_due(view.records())
    } else {
        view.records().iter().collect()
    };

    if ctx.json {
        let out = OkrListJson {
            heading,
            objectives: objectives.iter().map(|o| objective_to_json(o)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", heading);
        for objective in objectives {
            println!();
            for line in format_objective(objective) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_okr_add(ctx: &Context, args: OkrAddArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let defaults = &ws.config.objectives;
    let draft = ObjectiveDraft {
        title: args.title,
        owner: args.owner.unwrap_or_else(|| defaults.default_owner.clone()),
        due: args.due.unwrap_or_else(|| defaults.default_due.clone()),
        key_results: args.key_results.into_iter().map(KeyResult::new).collect(),
    };
    let mut view = CollectionView::<Objective>::mount(&mut ws.store)?;
    view.begin_create_with(draft);
    let outcome = view.commit(&mut ws.store)?;
    report_commit(ctx, "objective", outcome, "a title is")
}

fn cmd_okr_edit(ctx: &Context, args: OkrEditArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Objective>::mount(&mut ws.store)?;
    view.begin_edit(args.id)?;
    if let Some(draft) = view.draft_mut() {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if !args.key_results.is_empty() {
            // a key result keeps its done flag when its text is unchanged
            let previous = std::mem::take(&mut draft.key_results);
            draft.key_results = args
                .key_results
                .into_iter()
                .map(|text| {
                    let done = previous.iter().any(|kr| kr.done && kr.text == text);
                    KeyResult { text, done }
                })
                .collect();
        }
    }
    let outcome = view.commit(&mut ws.store)?;
    report_commit(ctx, "objective", outcome, "a title is")
}

fn cmd_okr_toggle(ctx: &Context, args: OkrToggleArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Objective>::mount(&mut ws.store)?;
    // 1-based on the command line
    let out_of_range = ViewError::KeyResultOutOfRange {
        id: args.id,
        index: args.index,
    };
    let index = args.index.checked_sub(1).ok_or(out_of_range)?;
    let done = okr::toggle_key_result(&mut view, args.id, index, &mut ws.store).map_err(|e| match e {
        ViewError::KeyResultOutOfRange { id, .. } => ViewError::KeyResultOutOfRange {
            id,
            index: args.index,
        },
        other => other,
    })?;
    let state = if done { "done" } else { "open" };
    print_mutation(
        ctx,
        Some(args.id),
        format!("key result {} of objective {} is now {}", args.index, args.id, state),
    )
}

fn cmd_okr_title(ctx: &Context, args: OkrTitleArgs) -> CmdResult {
    match args.heading {
        None => {
            let ws = load_workspace(ctx)?;
            require_session(&ws)?;
            let heading = okr::heading(&ws.store);
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&heading)?);
            } else {
                println!("{}", heading);
            }
            Ok(())
        }
        Some(heading) => {
            let (mut ws, _lock) = load_workspace_locked(ctx)?;
            require_session(&ws)?;
            okr::set_heading(&mut ws.store, &heading)?;
            print_mutation(ctx, None, format!("heading set to \"{}\"", heading))
        }
    }
}

// ---------------------------------------------------------------------------
// Backlog handlers
// ---------------------------------------------------------------------------

fn cmd_backlog_list(ctx: &Context) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let view = CollectionView::<Task>::mount(&mut ws.store)?;
    let columns = backlog::columns(view.records());

    if ctx.json {
        let out: Vec<ColumnJson> = columns
            .iter()
            .map(|(status, tasks)| column_to_json(*status, tasks))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let mut first = true;
        for (status, tasks) in &columns {
            if !first {
                println!();
            }
            first = false;
            for line in format_column(*status, tasks) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_backlog_add(ctx: &Context, args: TaskAddArgs) -> CmdResult {
    let mut draft = TaskDraft {
        title: args.title,
        ..TaskDraft::default()
    };
    if let Some(p) = args.priority.as_deref() {
        draft.priority = parse_priority(p)?;
    }
    if let Some(s) = args.status.as_deref() {
        draft.status = parse_status(s)?;
    }
    if let Some(due) = args.due {
        draft.due = due;
    }

    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Task>::mount(&mut ws.store)?;
    view.begin_create_with(draft);
    let outcome = view.commit(&mut ws.store)?;
    report_commit(ctx, "task", outcome, "a title is")
}

fn cmd_backlog_edit(ctx: &Context, args: TaskEditArgs) -> CmdResult {
    let priority = args.priority.as_deref().map(parse_priority).transpose()?;
    let status = args.status.as_deref().map(parse_status).transpose()?;

    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Task>::mount(&mut ws.store)?;
    view.begin_edit(args.id)?;
    if let Some(draft) = view.draft_mut() {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(p) = priority {
            draft.priority = p;
        }
        if let Some(s) = status {
            draft.status = s;
        }
        if let Some(due) = args.due {
            draft.due = due;
        }
    }
    let outcome = view.commit(&mut ws.store)?;
    report_commit(ctx, "task", outcome, "a title is")
}

fn report_move(ctx: &Context, id: RecordId, outcome: MoveOutcome) -> CmdResult {
    let message = match outcome {
        MoveOutcome::Moved { from, to } => format!("moved task {} from {} to {}", id, from, to),
        MoveOutcome::Unchanged => format!("task {} not moved", id),
    };
    print_mutation(ctx, Some(id), message)
}

fn cmd_backlog_move(ctx: &Context, args: TaskMoveArgs) -> CmdResult {
    let to = parse_status(&args.status)?;
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Task>::mount(&mut ws.store)?;
    let outcome = backlog::move_task(&mut view, args.id, to, &mut ws.store)?;
    report_move(ctx, args.id, outcome)
}

fn cmd_backlog_shift(ctx: &Context, id: RecordId, shift: Shift) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Task>::mount(&mut ws.store)?;
    let outcome = backlog::shift_task(&mut view, id, shift, &mut ws.store)?;
    report_move(ctx, id, outcome)
}

// ---------------------------------------------------------------------------
// Notes handlers
// ---------------------------------------------------------------------------

fn cmd_notes_list(ctx: &Context, args: NotesListArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let view = CollectionView::<Note>::mount(&mut ws.store)?;
    let filter = NoteFilter::new(args.tag.as_deref(), args.date.as_deref());
    let shown = notes::filter_notes(view.records(), &filter);

    if ctx.json {
        let out: Vec<NoteJson> = shown.iter().map(|n| note_to_json(n)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if shown.is_empty() {
        if filter.is_empty() {
            println!("no notes");
        } else {
            println!("no notes match");
        }
    } else {
        let mut first = true;
        for note in shown {
            if !first {
                println!();
            }
            first = false;
            for line in format_note(note) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_notes_add(ctx: &Context, args: NoteAddArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Note>::mount(&mut ws.store)?;
    view.begin_create_with(NoteDraft {
        title: args.title,
        content: args.content,
        tags: args.tags.unwrap_or_default(),
        date: args.date.unwrap_or_default(),
    });
    let outcome = view.commit(&mut ws.store)?;
    report_commit(ctx, "note", outcome, "a title and content are")
}

fn cmd_notes_edit(ctx: &Context, args: NoteEditArgs) -> CmdResult {
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    require_session(&ws)?;
    let mut view = CollectionView::<Note>::mount(&mut ws.store)?;
    view.begin_edit(args.id)?;
    if let Some(draft) = view.draft_mut() {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(content) = args.content {
            draft.content = content;
        }
        if let Some(tags) = args.tags {
            draft.tags = tags;
        }
        for tag in &args.add_tags {
            draft.tags = notes::apply_suggestion(&draft.tags, tag.trim());
        }
        if let Some(date) = args.date {
            draft.date = date;
        }
    }
    let outcome = view.commit(&mut ws.store)?;
    report_commit(ctx, "note", outcome, "a title and content are")
}

fn cmd_notes_tags(ctx: &Context) -> CmdResult {
    let ws = load_workspace(ctx)?;
    require_session(&ws)?;
    let view = CollectionView::<Note>::load(&ws.store);
    let tags = notes::tag_suggestions(view.records(), ws.config.notes.tag_suggestions);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        for tag in &tags {
            println!("#{}", tag);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Feedback handlers
// ---------------------------------------------------------------------------

fn cmd_feedback_list(ctx: &Context) -> CmdResult {
    let ws = load_workspace(ctx)?;
    let entries = feedback::list(&ws.store);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}", format_feedback(entry));
        }
    }
    Ok(())
}

fn cmd_feedback_submit(ctx: &Context, message: &str, kind: &str) -> CmdResult {
    let kind = FeedbackKind::parse_kind(kind)
        .ok_or_else(|| format!("unknown feedback type '{}' (expected: suggestion, positive, bug)", kind))?;
    if message.trim().is_empty() {
        return Err(feedback::FeedbackError::Blank.into());
    }
    let (mut ws, _lock) = load_workspace_locked(ctx)?;
    simulate_delay(feedback_delay_ms(ws.config.ui.simulated_delay_ms), false);
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let entry = feedback::submit(&mut ws.store, message, kind, &today)?;
    print_mutation(ctx, Some(entry.id), feedback::SUBMITTED_MESSAGE.to_string())
}

// ---------------------------------------------------------------------------
// Config handlers
// ---------------------------------------------------------------------------

fn cmd_config_show(ctx: &Context) -> CmdResult {
    let ws = load_workspace(ctx)?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ws.config)?);
    } else {
        print!("{}", toml::to_string_pretty(&ws.config)?);
    }
    Ok(())
}

fn cmd_config_set(ctx: &Context, args: ConfigSetArgs) -> CmdResult {
    let (ws, _lock) = load_workspace_locked(ctx)?;
    let (_config, mut doc) = config_io::read_config(&ws.dir)?;
    config_io::set_value(&mut doc, &args.key, &args.value)?;
    // reject edits that leave the file unparsable
    config_io::to_config(&doc)?;
    config_io::write_config(&ws.dir, &doc)?;
    print_mutation(ctx, None, format!("set {} = {}", args.key, args.value))
}
