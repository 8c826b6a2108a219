//! Macros for declaring field moduli.

/// Creates a ZST representing the Montgomery parameters for a given field modulus.
///
/// Accepts the following parameters:
///
/// - name of the ZST representing the field modulus
/// - hex serialization of the modulus (big endian)
/// - `ct-bigint` unsigned integer type (e.g. U256)
/// - byte order to use when encoding/decoding field elements
/// - a multiplicative generator which is also a quadratic non-residue
/// - documentation string for the field modulus type
///
/// ```
/// use primefield::{ByteOrder, bigint::U256};
///
/// primefield::monty_field_params!(
///     name: FieldParams,
///     modulus: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
///     uint: U256,
///     byte_order: ByteOrder::BigEndian,
///     multiplicative_generator: 6,
///     doc: "P-256 field modulus"
/// );
/// ```
#[macro_export]
macro_rules! monty_field_params {
    (
        name: $name:ident,
        modulus: $modulus_hex:expr,
        uint: $uint:ty,
        byte_order: $byte_order:expr,
        multiplicative_generator: $multiplicative_generator:expr,
        doc: $doc:expr
    ) => {
        $crate::monty_field_params_with_root_of_unity! {
            name: $name,
            modulus: $modulus_hex,
            uint: $uint,
            byte_order: $byte_order,
            multiplicative_generator: $multiplicative_generator,
            root_of_unity: None,
            doc: $doc
        }
    };
}

/// Same as [`monty_field_params!`], but with a precomputed `ROOT_OF_UNITY` constant.
#[macro_export]
macro_rules! monty_field_params_with_root_of_unity {
    (
        name: $name:ident,
        modulus: $modulus_hex:expr,
        uint: $uint:ty,
        byte_order: $byte_order:expr,
        multiplicative_generator: $multiplicative_generator:expr,
        root_of_unity: $root_of_unity:expr,
        doc: $doc:expr
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name;

        impl $crate::MontyFieldParams<{ <$uint>::LIMBS }> for $name {
            const PARAMS: $crate::bigint::MontyParams<{ <$uint>::LIMBS }> =
                $crate::bigint::MontyParams::new_vartime(<$uint>::from_be_hex($modulus_hex));
            const BYTE_ORDER: $crate::ByteOrder = $byte_order;
            const MODULUS_HEX: &'static str = $modulus_hex;
            const MULTIPLICATIVE_GENERATOR: u64 = $multiplicative_generator;
            const T: $uint = $crate::compute_t(
                <Self as $crate::MontyFieldParams<{ <$uint>::LIMBS }>>::PARAMS.modulus(),
            );
            const ROOT_OF_UNITY: Option<$uint> = $root_of_unity;
        }
    };
}
