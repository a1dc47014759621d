//! Type-safe ID wrappers for scheduler entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtypes with common functionality.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID.
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4()))
            }

            /// Creates an ID from an existing string (for fixtures and input files).
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Returns the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(WorkCenterId, "wc");
define_id!(WorkOrderId, "wo");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_order_id_prefix() {
        let id = WorkOrderId::new();
        assert!(id.as_str().starts_with("wo-"));
    }

    #[test]
    fn test_work_center_id_prefix() {
        let id = WorkCenterId::new();
        assert!(id.as_str().starts_with("wc-"));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(WorkOrderId::new(), WorkOrderId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = WorkCenterId::from_string("W1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"W1\"");

        let parsed: WorkCenterId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_display() {
        let id = WorkOrderId::from("wo-42");
        assert_eq!(id.to_string(), "wo-42");
    }
}
