use log::debug;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::{Arg, Call, Symbol};

use super::accept_no_value;

/// Rebuild the org-roam database cache; `force` rebuilds from scratch.
///
/// The procedure answers `nil` on success, which is accepted here.
pub fn sync_database(bridge: &Bridge, force: bool) -> Result<()> {
    let mode = if force {
        Arg::Symbol(Symbol::from_static("force"))
    } else {
        Arg::Nil
    };
    let reply = accept_no_value(bridge.evaluate(&Call::new("org-roam-db-sync").arg(mode)))?;
    debug!("database sync replied {reply:?}");
    Ok(())
}

/// Set a task's TODO state through org so state-change hooks run.
pub fn change_task_state(bridge: &Bridge, file: &str, heading: &str, state: &str) -> Result<String> {
    let call = Call::new("my/org-roam-change-task-state")
        .str(file)
        .str(heading)
        .str(state);
    bridge.evaluate_text(&call)
}
