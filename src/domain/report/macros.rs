//! Macros for report sections made only of free-text fields.
//!
//! - **`text_section!`** - declares the struct, its serde attributes and a
//!   `Default` that fills every field with `"Not specified"`.
//!
//! # Usage
//!
//! ```ignore
//! text_section! {
//!     /// Trial design summary.
//!     pub struct TrialDesign {
//!         study_design,
//!         primary_endpoint,
//!     }
//! }
//! ```
//!
//! Field attributes (docs, `#[serde(rename = "...")]`) are passed through.

/// Declares a camelCase report section whose fields are all lenient text.
#[macro_export]
macro_rules! text_section {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(deserialize_with = "crate::domain::report::lenient::text")]
                pub $field: String,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $crate::domain::foundation::NOT_SPECIFIED.to_string(), )+
                }
            }
        }
    };
}
