//! The registry pattern shared by every fabdesk entity.
//!
//! A record type implements [`Entity`] to declare its storage key, form
//! fields, search fields and foreign keys. The framework supplies the rest:
//! an in-memory [`EntityStore`] with an optional durable [`Mirror`], the
//! [`Query`] view, the [`EditSession`] form state, and [`commit`]/[`delete`]
//! as the only mutation paths.
//!
//! ```ignore
//! let mut store = EntityStore::open(Mirror::<Customer>::new(kv), seed)?;
//! let mut form = EditSession::new();
//! form.open_create();
//! form.stage("name", "Acme")?;
//! let created = commit(&mut store, &mut form, &NoReferences)?;
//! ```

pub mod commit;
pub mod entity;
pub mod field;
pub mod mirror;
pub mod query;
pub mod refs;
pub mod sequence;
pub mod session;
pub mod sheet;
mod stamp;
pub mod store;

#[cfg(test)]
mod testkit;

pub use commit::{commit, delete};
pub use entity::{Entity, Reference};
pub use field::{Field, FieldKind};
pub use mirror::{Mirror, Snapshot};
pub use query::{Filter, Query};
pub use refs::{IdIndex, NoReferences, ReferenceCheck};
pub use sequence::IdSequence;
pub use session::{EditSession, SessionState};
pub use sheet::{ImportReport, RejectedRow, Sheet, SheetError};
pub use store::EntityStore;
