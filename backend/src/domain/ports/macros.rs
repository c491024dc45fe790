//! Helper macro for declaring port error enums.
//!
//! Each variant is either a unit variant or carries a single `String` field;
//! the macro derives `thiserror::Error` and adds a snake_case constructor per
//! variant, so `Query { message }` gains `Error::query(impl Into<String>)`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident $field:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $field:ident } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $field: String } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $($field)?);
            )*
        }
    };
}

pub(crate) use define_port_error;
