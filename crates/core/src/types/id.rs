//! Newtype IDs for type-safe record references.
//!
//! Records have no server-assigned identity; ids are generated when a record
//! is created and stored as plain strings in the persisted collections. The
//! `define_id!` macro wraps those strings so a `ProductId` can never be used
//! where a `PostId` is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` for fresh random ids, `as_str()` for borrowing
/// - `From<&str>`, `From<String>` and `Display`
///
/// # Example
///
/// ```rust
/// # use sitedeck_core::define_id;
/// define_id!(PostId);
/// define_id!(PageId);
///
/// let post_id = PostId::from("welcome");
/// let page_id = PageId::generate();
///
/// assert_eq!(post_id.as_str(), "welcome");
/// assert!(!page_id.as_str().is_empty());
/// // These are different types, so this won't compile:
/// // let _: PostId = page_id;
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
            Default,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4().simple().to_string())
            }

            /// Borrow the underlying string.
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

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(PostId);
define_id!(ProductId);
define_id!(SaleId);
define_id!(PageId);
define_id!(SectionId);
define_id!(CardId);
define_id!(TestimonialId);
define_id!(TeamMemberId);
define_id!(ProfileId);
define_id!(UserId);
define_id!(WidgetId);
