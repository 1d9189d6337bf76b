//! Helper macro for declaring port error enums.
//!
//! Each variant gets a snake_case constructor. Struct-variant fields accept
//! `impl Into<FieldType>`, so `UserPersistenceError::query("boom")` works
//! without an explicit `to_owned()`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum StorePortError {
            Unavailable => "store unavailable",
            Rejected { reason: String } => "store rejected write: {reason}",
            Limited { reason: String, retries: u32 } => "store limited: {reason} after {retries}",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StorePortError::unavailable(), StorePortError::Unavailable);
        assert_eq!(StorePortError::unavailable().to_string(), "store unavailable");
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = StorePortError::rejected("duplicate");
        assert_eq!(err.to_string(), "store rejected write: duplicate");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = StorePortError::limited("busy", 3_u32);
        assert_eq!(err.to_string(), "store limited: busy after 3");
    }
}
