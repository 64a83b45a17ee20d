//! Project schedule (Gantt) commands.

use std::io::Write;

use anyhow::Result;
use fabdesk_registry::{Registry, ScheduleEvent};
use serde_json::Value;
use tracing::info;

use crate::output::{self, Format};

const COLUMNS: &[&str] = &["id", "name", "start", "end", "progress"];

pub fn show(out: &mut dyn Write, reg: &Registry, project: Option<u64>, format: Format) -> Result<()> {
    let bars = serde_json::to_value(reg.gantt(project))?;
    match (format, bars) {
        (Format::Table, Value::Array(rows)) => output::table(out, COLUMNS, &rows),
        (_, bars) => output::emit(out, format, &bars),
    }
}

/// Decode an event posted by the chart, e.g.
/// `{"event":"progress_changed","id":3,"progress":60}`.
pub fn parse_event(text: &str) -> Result<ScheduleEvent> {
    serde_json::from_str(text).map_err(|e| anyhow::anyhow!("Invalid schedule event: {}", e))
}

pub fn apply(out: &mut dyn Write, reg: &mut Registry, event: &ScheduleEvent, format: Format) -> Result<()> {
    let task = reg.apply_schedule_event(event)?;
    info!("schedule task {} {:?}", task.id, event);
    match event {
        ScheduleEvent::Deleted { id } => writeln!(out, "schedule task {} deleted.", id)?,
        _ => output::emit(out, format, &serde_json::to_value(&task)?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabdesk_registry::Seed;

    #[test]
    fn show_project_bars() {
        let reg = Registry::in_memory(Seed::demo()).unwrap();
        let mut buf = Vec::new();
        show(&mut buf, &reg, Some(1), Format::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("ID"));
    }

    #[test]
    fn json_event_round() {
        let mut reg = Registry::in_memory(Seed::demo()).unwrap();
        let ev = parse_event(r#"{"event":"progress_changed","id":3,"progress":60}"#).unwrap();
        let mut buf = Vec::new();
        apply(&mut buf, &mut reg, &ev, Format::Json).unwrap();
        let task: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(task["progress"], 60);

        assert!(parse_event(r#"{"event":"renamed","id":3}"#).is_err());
    }
}
