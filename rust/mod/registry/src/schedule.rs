//! Gantt schedule bridge.
//!
//! The chart widget gets plain task bars and reports user edits back as
//! [`ScheduleEvent`]s. Each event is applied as an ordinary commit (edit or
//! delete) on the schedule task store, so it is validated and persisted
//! like any form submit.

use chrono::NaiveDate;
use fabdesk_core::ServiceError;
use fabdesk_store::EditSession;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ScheduleTask;
use crate::service::Registry;

/// A bar as the chart sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttTask {
    pub id: u64,
    pub name: String,
    pub start: String,
    pub end: String,
    pub progress: u8,
}

impl From<&ScheduleTask> for GanttTask {
    fn from(t: &ScheduleTask) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            start: t.start.clone(),
            end: t.end.clone(),
            progress: t.progress,
        }
    }
}

/// Callbacks emitted by the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScheduleEvent {
    DateChanged { id: u64, start: NaiveDate, end: NaiveDate },
    ProgressChanged { id: u64, progress: u8 },
    Deleted { id: u64 },
}

impl ScheduleEvent {
    pub fn task_id(&self) -> u64 {
        match self {
            ScheduleEvent::DateChanged { id, .. }
            | ScheduleEvent::ProgressChanged { id, .. }
            | ScheduleEvent::Deleted { id } => *id,
        }
    }
}

fn date_text(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

impl Registry {
    /// Task bars of one project, or of all projects, in store order.
    pub fn gantt(&self, project_id: Option<u64>) -> Vec<GanttTask> {
        self.list::<ScheduleTask>()
            .iter()
            .filter(|t| project_id.is_none_or(|p| t.project_id == p))
            .map(GanttTask::from)
            .collect()
    }

    /// Apply a chart callback. Returns the updated task, or the removed one
    /// for `Deleted`.
    pub fn apply_schedule_event(&mut self, event: &ScheduleEvent) -> Result<ScheduleTask, ServiceError> {
        debug!("schedule event {:?}", event);
        if let ScheduleEvent::Deleted { id } = event {
            return self.delete::<ScheduleTask>(*id);
        }

        let mut session = EditSession::new();
        session.open_edit(self.get::<ScheduleTask>(event.task_id())?)?;
        match event {
            ScheduleEvent::DateChanged { start, end, .. } => {
                session.stage("start", date_text(start))?;
                session.stage("end", date_text(end))?;
            }
            ScheduleEvent::ProgressChanged { progress, .. } => {
                session.stage("progress", *progress)?;
            }
            ScheduleEvent::Deleted { .. } => {}
        }
        self.commit(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    fn demo() -> Registry {
        Registry::in_memory(Seed::demo()).unwrap()
    }

    #[test]
    fn gantt_filters_by_project() {
        let reg = demo();
        assert_eq!(reg.gantt(Some(1)).len(), 4);
        assert!(reg.gantt(Some(9)).is_empty());
        assert_eq!(reg.gantt(None)[0].name, "前期准备");
    }

    #[test]
    fn date_change_is_a_commit() {
        let mut reg = demo();
        let before = reg.get::<ScheduleTask>(2).unwrap().clone();
        let t = reg
            .apply_schedule_event(&ScheduleEvent::DateChanged {
                id: 2,
                start: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
            })
            .unwrap();
        assert_eq!(t.start, "2024-03-12");
        assert_eq!(t.end, "2024-04-20");
        assert_eq!(t.progress, before.progress);
        assert_ne!(t.updated_at, before.updated_at);
    }

    #[test]
    fn progress_is_bounded() {
        let mut reg = demo();
        let t = reg
            .apply_schedule_event(&ScheduleEvent::ProgressChanged { id: 3, progress: 60 })
            .unwrap();
        assert_eq!(t.progress, 60);

        let err = reg
            .apply_schedule_event(&ScheduleEvent::ProgressChanged { id: 3, progress: 150 })
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(reg.get::<ScheduleTask>(3).unwrap().progress, 60);
    }

    #[test]
    fn delete_and_unknown_task() {
        let mut reg = demo();
        let removed = reg.apply_schedule_event(&ScheduleEvent::Deleted { id: 4 }).unwrap();
        assert_eq!(removed.name, "验收交付");
        assert_eq!(reg.gantt(Some(1)).len(), 3);
        let err = reg
            .apply_schedule_event(&ScheduleEvent::ProgressChanged { id: 4, progress: 1 })
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn events_decode_from_json() {
        let ev: ScheduleEvent = serde_json::from_str(
            r#"{"event":"date_changed","id":1,"start":"2024-03-02","end":"2024-03-16"}"#,
        )
        .unwrap();
        assert_eq!(ev.task_id(), 1);
        assert!(matches!(ev, ScheduleEvent::DateChanged { .. }));
    }
}
