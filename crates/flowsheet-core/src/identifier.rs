//! Typed identifiers for shapes and flows.
//!
//! Every identifier in the emitted document is derived from a row id of the
//! source sheet by prefixing it: shape rows become `Shape_<row id>` and
//! connector rows become `Flow_<row id>`. Keeping the two kinds in distinct
//! types stops a flow id from being looked up in a shape table.
//!
//! Identifiers own their string. A conversion builds a fresh set per call,
//! so nothing is shared between conversions.

use std::{borrow::Borrow, fmt};

macro_rules! prefixed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Prefix prepended to the raw row id.
            pub const PREFIX: &'static str = $prefix;

            /// Creates the identifier for the given raw row id.
            pub fn from_row_id(row_id: &str) -> Self {
                Self(format!("{}{}", Self::PREFIX, row_id))
            }

            /// Returns the full identifier, prefix included.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the raw row id this identifier was derived from.
            pub fn row_id(&self) -> &str {
                self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

prefixed_id!(
    /// Identifier of a shape, `Shape_<row id>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowsheet_core::identifier::ShapeId;
    ///
    /// let id = ShapeId::from_row_id("7");
    /// assert_eq!(id, "Shape_7");
    /// assert_eq!(id.row_id(), "7");
    /// ```
    ShapeId,
    "Shape_"
);

prefixed_id!(
    /// Identifier of a sequence flow, `Flow_<row id>`.
    FlowId,
    "Flow_"
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_shape_id_prefix() {
        let id = ShapeId::from_row_id("12");
        assert_eq!(id.as_str(), "Shape_12");
        assert_eq!(id.to_string(), "Shape_12");
        assert_eq!(id.row_id(), "12");
    }

    #[test]
    fn test_flow_id_prefix() {
        let id = FlowId::from_row_id("4");
        assert_eq!(id, "Flow_4");
        assert_eq!(id.row_id(), "4");
    }

    #[test]
    fn test_empty_row_id() {
        let id = ShapeId::from_row_id("");
        assert_eq!(id, "Shape_");
        assert_eq!(id.row_id(), "");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut ids = HashSet::new();
        ids.insert(ShapeId::from_row_id("1"));

        assert!(ids.contains("Shape_1"));
        assert!(!ids.contains("Shape_2"));
    }

    #[test]
    fn test_hash_and_eq() {
        let a = FlowId::from_row_id("9");
        let b = FlowId::from_row_id("9");
        let c = FlowId::from_row_id("10");

        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }
}
