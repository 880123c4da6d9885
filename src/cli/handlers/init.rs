use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::workspace::{self, WORKSPACE_DIR};

/// Create the workspace in the current directory, or in `project_dir` when
/// given. Handled before discovery since there is nothing to discover yet.
pub fn cmd_init(args: InitArgs, project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match project_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };

    // Check for an enclosing workspace and warn
    if let Some(parent) = root.parent()
        && let Ok(parent_root) = workspace::discover_workspace(parent)
    {
        eprintln!(
            "Note: enclosing workspace found at {}/",
            parent_root.join(WORKSPACE_DIR).display()
        );
        eprintln!("Creating new workspace in ./{}/", WORKSPACE_DIR);
    }

    let dir = workspace::init_workspace(&root, args.force)?;
    println!("Initialized pmlite workspace in {}", dir.display());
    println!("Run `pm login` to get started.");
    Ok(())
}
