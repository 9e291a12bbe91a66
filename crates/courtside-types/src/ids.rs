//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Careers carry a strongly-typed ID so an external store or renderer can
//! correlate records across runs. IDs built from caller-supplied random
//! bytes (UUID v4 layout) are reproducible under a seeded generator;
//! [`new`](CareerId::new) uses UUID v7 (time-ordered).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an identifier from caller-supplied random bytes, so a
            /// seeded generator yields the same ID on every run.
            pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
                Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for one simulated career.
    CareerId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = CareerId::new();
        let b = CareerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn random_bytes_give_a_stable_v4_id() {
        let bytes = [7_u8; 16];
        let a = CareerId::from_random_bytes(bytes);
        assert_eq!(a, CareerId::from_random_bytes(bytes));
        assert_eq!(a.into_inner().get_version_num(), 4);
        assert_ne!(a, CareerId::from_random_bytes([8_u8; 16]));
    }

    #[test]
    fn id_round_trips_through_uuid() {
        let id = CareerId::new();
        let raw: Uuid = id.into();
        assert_eq!(CareerId::from(raw), id);
        assert_eq!(id.to_string(), raw.to_string());
    }
}
