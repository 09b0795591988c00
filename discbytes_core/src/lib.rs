//! Byte values for the discovery layer.
//!
//! - `bytes_value`: the read capability [`BytesView`], owned [`BytesValue`] and borrowed [`BytesSlice`]
//! - `mutable_bytes`: the write capability [`MutableBytesView`] and its owned/borrowed types
//! - `bytes32`: 32-byte hashes and keys, [`Bytes32`] and [`MutableBytes32`]
//! - `bytes_values`: codec helpers (hex, minimal encodings, big integers, zero trimming)
//! - `bincode_types`: bincode and serde representations of the byte types

/// Display, Debug, structural equality and hashing over the visible bytes.
macro_rules! structural_view_impls {
    ($name:literal, [$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::bytes_value::BytesView::to_hex_string(self))
            }
        }

        impl<$($generics)*> std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    "{}({})",
                    $name,
                    $crate::bytes_value::BytesView::to_hex_string(self)
                )
            }
        }

        impl<$($generics)* Other: $crate::bytes_value::BytesView + ?Sized> PartialEq<Other>
            for $ty
        {
            fn eq(&self, other: &Other) -> bool {
                $crate::bytes_value::BytesView::as_slice(self) == other.as_slice()
            }
        }

        impl<$($generics)*> Eq for $ty {}

        impl<$($generics)*> std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash($crate::bytes_value::BytesView::as_slice(self), state);
            }
        }
    };
}

pub mod bincode_types;
pub mod bytes32;
pub mod bytes_value;
pub mod bytes_values;
pub mod error;
pub mod mutable_bytes;

pub use bytes_value::{BytesSlice, BytesValue, BytesView};
pub use bytes32::{Bytes32, MutableBytes32};
pub use error::{CoreError, CoreErrorKind};
pub use mutable_bytes::{MutableBytesSlice, MutableBytesValue, MutableBytesView};
