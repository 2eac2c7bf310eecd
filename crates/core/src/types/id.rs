//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Identifier reserved for a product that has not been persisted yet.
///
/// Never stored in any cache and never sent to the server as a real id.
pub const NEW_PRODUCT_ID: &str = "new";

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use vitrine_core::define_id;
/// define_id!(ReviewId);
/// define_id!(VendorId);
///
/// let review_id = ReviewId::new("5f2b");
/// let vendor_id = VendorId::new("5f2b");
///
/// // These are different types, so this won't compile:
/// // let _: ReviewId = vendor_id;
/// # let _ = (review_id, vendor_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(UserId);

impl ProductId {
    /// The placeholder id used by product forms for unsaved products.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(NEW_PRODUCT_ID.to_owned())
    }

    /// Returns `true` if this is the unsaved-product placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == NEW_PRODUCT_ID
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_new() {
        let id = ProductId::placeholder();
        assert_eq!(id.as_str(), "new");
        assert!(id.is_placeholder());
        assert!(ProductId::from("new").is_placeholder());
    }

    #[test]
    fn test_real_id_is_not_placeholder() {
        assert!(!ProductId::new("0b2c6a1e").is_placeholder());
        assert!(!ProductId::new("New").is_placeholder());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProductId::new("abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
        let back: ProductId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(back, id);
    }
}
