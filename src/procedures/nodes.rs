use serde_json::Value;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::Call;

/// A person: how you know them, open follow-ups, free notes.
pub fn create_person(
    bridge: &Bridge,
    name: &str,
    context: Option<&str>,
    follow_ups: Option<&[String]>,
    notes: Option<&str>,
) -> Result<Value> {
    let call = Call::new("my/api-create-person")
        .str(name)
        .opt_str(context)
        .opt_list(follow_ups)
        .opt_str(notes);
    bridge.evaluate(&call)
}

/// A project; `status` is one of active, waiting, blocked, someday or done.
pub fn create_project(
    bridge: &Bridge,
    title: &str,
    status: Option<&str>,
    next_action: Option<&str>,
    notes: Option<&str>,
) -> Result<Value> {
    let call = Call::new("my/api-create-project")
        .str(title)
        .opt_str(status)
        .opt_str(next_action)
        .opt_str(notes);
    bridge.evaluate(&call)
}

pub fn create_idea(
    bridge: &Bridge,
    title: &str,
    one_liner: &str,
    elaboration: Option<&str>,
) -> Result<Value> {
    let call = Call::new("my/api-create-idea")
        .str(title)
        .str(one_liner)
        .opt_str(elaboration);
    bridge.evaluate(&call)
}

/// An admin task; `due_date` is `YYYY-MM-DD`.
pub fn create_admin(
    bridge: &Bridge,
    title: &str,
    due_date: Option<&str>,
    notes: Option<&str>,
) -> Result<Value> {
    let call = Call::new("my/api-create-admin")
        .str(title)
        .opt_str(due_date)
        .opt_str(notes);
    bridge.evaluate(&call)
}
