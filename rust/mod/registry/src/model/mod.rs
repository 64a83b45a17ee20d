//! Registry record types. One file per business area.

/// A closed set of string values stored as their lowercase wire names.
///
/// Generates the enum, its serde names, `ALL` (for form validation) and
/// `as_str`.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// The `id` / stamp accessors every record type implements the same way.
macro_rules! record_accessors {
    () => {
        fn id(&self) -> u64 {
            self.id
        }

        fn created_at(&self) -> &str {
            &self.created_at
        }

        fn updated_at(&self) -> &str {
            &self.updated_at
        }
    };
}

mod cost;
mod customer;
mod employee;
mod logistics;
mod material;
mod processing;
mod project;
mod shipment;
mod supplier;
mod transaction;

pub use cost::*;
pub use customer::*;
pub use employee::*;
pub use logistics::*;
pub use material::*;
pub use processing::*;
pub use project::*;
pub use shipment::*;
pub use supplier::*;
pub use transaction::*;

string_enum! {
    /// Lifecycle of customers, suppliers and employees.
    ActiveStatus {
        Active => "active",
        Inactive => "inactive",
    }
}
