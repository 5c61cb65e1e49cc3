//! Helper macro shared by the driven-port error enums.

/// Generates a `thiserror` enum plus snake_case constructor helpers whose
/// parameters accept `impl Into<T>`, so call sites can pass `&str` where the
/// variant stores a `String`.
macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_accum $variant () () $( $field : $ty, )*);
    };

    (@ctor_accum $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_accum $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_accum
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
        pub enum SamplePortError {
            Offline => "backend offline",
            Refused { reason: String } => "refused: {reason}",
            Throttled { status: u16, reason: String } => "throttled ({status}): {reason}",
        }
    }

    #[test]
    fn unit_variants_get_a_constructor() {
        assert_eq!(SamplePortError::offline().to_string(), "backend offline");
    }

    #[test]
    fn string_fields_accept_str_slices() {
        let err = SamplePortError::refused("no capacity");
        assert_eq!(err.to_string(), "refused: no capacity");
    }

    #[test]
    fn mixed_fields_keep_their_order() {
        let err = SamplePortError::throttled(429_u16, "slow down");
        assert_eq!(err.to_string(), "throttled (429): slow down");
    }
}
