//! fabdesk registry: the back-office records of a curtain-wall and
//! window fabrication firm.
//!
//! [`Registry`] owns one [`fabdesk_store::EntityStore`] per record type and
//! enforces what spans stores: foreign keys on commit, restrict-on-delete,
//! and search across a record's referenced parents.

pub mod model;
pub mod report;
pub mod schedule;
pub mod seed;
pub mod service;

pub use schedule::{GanttTask, ScheduleEvent};
pub use seed::Seed;
pub use service::{Kind, Managed, Registry};
