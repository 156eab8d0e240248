//! Declarative helpers for borsh-encoded sled tables and the databases grouping them.

use borsh::{BorshDeserialize, BorshSerialize};
use typed_sled::codec::CodecError;

#[doc(hidden)]
pub fn encode_borsh<T: BorshSerialize>(
    schema: &'static str,
    value: &T,
) -> Result<Vec<u8>, CodecError> {
    borsh::to_vec(value).map_err(|err| CodecError::SerializationFailed {
        schema,
        source: err.into(),
    })
}

#[doc(hidden)]
pub fn decode_borsh<T: BorshDeserialize>(
    schema: &'static str,
    data: &[u8],
) -> Result<T, CodecError> {
    borsh::from_slice(data).map_err(|err| CodecError::DeserializationFailed {
        schema,
        source: err.into(),
    })
}

/// Defines a table schema whose keys and values are both borsh encoded. The tree is named
/// after the schema type.
#[macro_export]
macro_rules! define_borsh_table {
    ($(#[$docs:meta])+ ($table_name:ident) $key:ty => $value:ty) => {
        $(#[$docs])+
        #[derive(Clone, Copy, Debug, Default)]
        pub(crate) struct $table_name;

        impl $table_name {
            pub(crate) const fn tree_name() -> &'static str {
                ::core::stringify!($table_name)
            }
        }

        impl ::typed_sled::Schema for $table_name {
            const TREE_NAME: ::typed_sled::schema::TreeName =
                ::typed_sled::schema::TreeName($table_name::tree_name());
            type Key = $key;
            type Value = $value;
        }

        impl ::typed_sled::codec::KeyCodec<$table_name> for $key {
            fn encode_key(
                &self,
            ) -> ::std::result::Result<::std::vec::Vec<u8>, ::typed_sled::codec::CodecError> {
                $crate::macros::encode_borsh($table_name::tree_name(), self)
            }

            fn decode_key(
                data: &[u8],
            ) -> ::std::result::Result<Self, ::typed_sled::codec::CodecError> {
                $crate::macros::decode_borsh($table_name::tree_name(), data)
            }
        }

        impl ::typed_sled::codec::ValueCodec<$table_name> for $value {
            fn encode_value(
                &self,
            ) -> ::std::result::Result<::std::vec::Vec<u8>, ::typed_sled::codec::CodecError> {
                $crate::macros::encode_borsh($table_name::tree_name(), self)
            }

            fn decode_value(
                data: &[u8],
            ) -> ::std::result::Result<Self, ::typed_sled::codec::CodecError> {
                $crate::macros::decode_borsh($table_name::tree_name(), data)
            }
        }
    };
}

/// Declares a database struct with one typed tree per field, opened from a shared [`SledDb`].
///
/// [`SledDb`]: typed_sled::SledDb
#[macro_export]
macro_rules! define_sled_database {
    (
        $(#[$meta:meta])*
        pub struct $db_name:ident {
            $($field:ident: $schema:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $db_name {
            $($field: ::typed_sled::SledTree<$schema>,)*
        }

        impl $db_name {
            pub fn new(
                db: ::std::sync::Arc<::typed_sled::SledDb>,
            ) -> ::rewards_db_types::DbResult<Self> {
                Ok(Self {
                    $($field: db.get_tree()?,)*
                })
            }

            /// Names of the trees backing this database.
            pub const TREE_NAMES: &'static [&'static str] = &[$(<$schema>::tree_name()),*];
        }
    };
}

/// Generates a `setup_db` helper backed by a temporary sled instance.
#[cfg(test)]
macro_rules! sled_db_test_setup {
    ($db_type:ty) => {
        fn setup_db() -> $db_type {
            let db = sled::Config::new().temporary(true).open().unwrap();
            let sled_db = $crate::init::init_sled_db(db).unwrap();
            <$db_type>::new(sled_db).unwrap()
        }
    };
}

#[cfg(test)]
pub(crate) use sled_db_test_setup;
