use serde_json::Value;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::Call;

pub const DEFAULT_STALE_DAYS: i64 = 5;
pub const DEFAULT_INBOX_DAYS: i64 = 7;

/// Active projects with their next actions, most recently touched first.
pub fn get_active_projects(bridge: &Bridge) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-get-active-projects"))
}

/// People with unchecked follow-ups.
pub fn get_pending_followups(bridge: &Bridge) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-get-pending-followups"))
}

/// Projects untouched for at least `days` days.
pub fn get_stale_projects(bridge: &Bridge, days: i64) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-get-stale-projects").int(days))
}

/// Inbox entries from the past `days` days, grouped by day.
pub fn get_weekly_inbox(bridge: &Bridge, days: i64) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-get-weekly-inbox").int(days))
}

/// Active projects, follow-ups and stale projects in one round trip.
pub fn get_digest_data(bridge: &Bridge) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-get-digest-data"))
}

/// Follow-ups linking `[[Name]]` where no person node exists yet.
pub fn get_dangling_followups(bridge: &Bridge) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-get-dangling-followups"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::{Scripted, bridge};
    use serde_json::json;

    #[test]
    fn no_argument_procedures() {
        let script = Scripted::default()
            .reply(r#"{"projects": []}"#)
            .reply("{}")
            .reply("{}")
            .reply("{}");
        let b = bridge(&script);
        assert_eq!(get_active_projects(&b).unwrap(), json!({"projects": []}));
        get_pending_followups(&b).unwrap();
        get_digest_data(&b).unwrap();
        get_dangling_followups(&b).unwrap();
        assert_eq!(
            (0..4).map(|n| script.expression(n)).collect::<Vec<_>>(),
            vec![
                "(my/api-get-active-projects)",
                "(my/api-get-pending-followups)",
                "(my/api-get-digest-data)",
                "(my/api-get-dangling-followups)",
            ]
        );
    }

    #[test]
    fn day_windows() {
        let script = Scripted::default().reply("{}").reply("{}");
        let b = bridge(&script);
        get_stale_projects(&b, DEFAULT_STALE_DAYS).unwrap();
        get_weekly_inbox(&b, DEFAULT_INBOX_DAYS).unwrap();
        assert_eq!(script.expression(0), "(my/api-get-stale-projects 5)");
        assert_eq!(script.expression(1), "(my/api-get-weekly-inbox 7)");
    }
}
