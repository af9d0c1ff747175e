//! `define_port_error!` generates a port error enum together with one
//! snake_case constructor per variant, so adapters write
//! `DriverRepositoryError::duplicate_username(name)` instead of building the
//! struct variant by hand. `String` fields accept anything `Into<String>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
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
    define_port_error! {
        pub enum LedgerError {
            Offline => "ledger offline",
            Rejected { reason: String } => "rejected: {reason}",
            Full { capacity: u32 } => "full at {capacity} rows",
            Stale { table: String, version: u64 } => "{table} is stale at version {version}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerError::offline(), LedgerError::Offline);
        assert_eq!(LedgerError::offline().to_string(), "ledger offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerError::rejected("duplicate plate");
        assert_eq!(err.to_string(), "rejected: duplicate plate");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        assert_eq!(LedgerError::full(9_u32).to_string(), "full at 9 rows");
        assert_eq!(
            LedgerError::stale("cars", 3_u64),
            LedgerError::Stale {
                table: "cars".to_owned(),
                version: 3,
            }
        );
    }
}
