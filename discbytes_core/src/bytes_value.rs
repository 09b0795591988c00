//! Read-only byte views.
//!
//! [`BytesView`] is the read capability every byte type of this crate implements.
//! [`BytesValue`] owns immutable, reference counted storage; cloning it or
//! converting it to [`bytes::Bytes`] never copies. [`BytesSlice`] is a borrowed
//! window into bytes owned by somebody else and cannot outlive them.
//!
//! Equality and hashing are structural: two views are equal when their visible
//! bytes are, whatever storage backs them.
use crate::bytes_values;
use crate::error::{CoreError, check_index, check_range};
use crate::mutable_bytes::{MutableBytesValue, MutableBytesView};
use bytes::Bytes;

pub trait BytesView {
    /// The visible bytes, borrowed from the backing storage without a copy.
    fn as_slice(&self) -> &[u8];

    fn size(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn get(&self, index: usize) -> Result<u8, CoreError> {
        check_index(index, self.size())?;
        Ok(self.as_slice()[index])
    }

    /// A window of `len` bytes starting at `from`, sharing this view's storage.
    fn slice(&self, from: usize, len: usize) -> Result<BytesSlice<'_>, CoreError> {
        check_range(from, len, self.size())?;
        Ok(BytesSlice::wrap(&self.as_slice()[from..from + len]))
    }

    fn slice_from(&self, from: usize) -> Result<BytesSlice<'_>, CoreError> {
        let size = self.size();
        check_range(from, 0, size)?;
        self.slice(from, size - from)
    }

    fn copy_to(&self, destination: &mut dyn MutableBytesView) -> Result<(), CoreError> {
        self.copy_to_offset(destination, 0)
    }

    /// Writes these bytes into `destination` starting at `destination_offset`.
    fn copy_to_offset(
        &self,
        destination: &mut dyn MutableBytesView,
        destination_offset: usize,
    ) -> Result<(), CoreError> {
        destination.write_slice(destination_offset, self.as_slice())
    }

    /// An independently owned copy of these bytes.
    fn copy(&self) -> BytesValue {
        BytesValue::of(self.as_slice())
    }

    fn mutable_copy(&self) -> MutableBytesValue {
        MutableBytesValue::of(self.as_slice())
    }

    fn common_prefix_length(&self, other: &dyn BytesView) -> usize {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .take_while(|(left, right)| left == right)
            .count()
    }

    fn common_prefix(&self, other: &dyn BytesView) -> BytesSlice<'_> {
        let len = self.common_prefix_length(other);
        BytesSlice::wrap(&self.as_slice()[..len])
    }

    fn is_zero(&self) -> bool {
        self.as_slice().iter().all(|byte| *byte == 0)
    }

    fn extract_array(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.as_slice()))
    }

    /// Feeds the visible bytes into `digest`.
    fn update_digest(&self, digest: &mut dyn digest::Update) {
        digest.update(self.as_slice());
    }
}

impl<T: BytesView + ?Sized> BytesView for &T {
    fn as_slice(&self) -> &[u8] {
        (**self).as_slice()
    }
}

impl<T: BytesView + ?Sized> BytesView for &mut T {
    fn as_slice(&self) -> &[u8] {
        (**self).as_slice()
    }
}

impl BytesView for [u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> BytesView for [u8; N] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

/// An owned, immutable byte value.
#[derive(Clone, Default)]
pub struct BytesValue(Bytes);

structural_view_impls!("BytesValue", [] BytesValue);

impl BytesValue {
    pub const EMPTY: BytesValue = BytesValue(Bytes::new());

    /// Takes ownership of `bytes` without copying them.
    pub fn wrap(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }

    pub fn of(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }

    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }

    /// Parses `0x`-prefixed (or bare) hex with an even number of digits.
    pub fn from_hex_string(value: &str) -> Result<Self, CoreError> {
        bytes_values::from_hex_string(value, None, false)
    }

    /// Like [`BytesValue::from_hex_string`], but an odd number of digits gets
    /// an implicit leading zero.
    pub fn from_hex_string_lenient(value: &str) -> Result<Self, CoreError> {
        bytes_values::from_hex_string(value, None, true)
    }

    /// Lenient parse, left-padded with zero bytes to exactly `dest_size` bytes.
    pub fn from_hex_string_lenient_with_size(
        value: &str,
        dest_size: usize,
    ) -> Result<Self, CoreError> {
        bytes_values::from_hex_string(value, Some(dest_size), true)
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl BytesView for BytesValue {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for BytesValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for BytesValue {
    fn from(value: Vec<u8>) -> Self {
        Self::wrap(value)
    }
}

impl From<Bytes> for BytesValue {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl From<BytesValue> for Bytes {
    fn from(value: BytesValue) -> Self {
        value.0
    }
}

impl From<BytesSlice<'_>> for BytesValue {
    fn from(value: BytesSlice<'_>) -> Self {
        Self::of(value.0)
    }
}

/// A borrowed, read-only window over bytes owned elsewhere.
#[derive(Clone, Copy, Default)]
pub struct BytesSlice<'a>(&'a [u8]);

structural_view_impls!("BytesSlice", ['a,] BytesSlice<'a>);

impl<'a> BytesSlice<'a> {
    pub const EMPTY: BytesSlice<'static> = BytesSlice(&[]);

    pub const fn wrap(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    /// The underlying bytes with the lifetime of the storage rather than of this
    /// handle.
    pub const fn into_slice(self) -> &'a [u8] {
        self.0
    }
}

impl BytesView for BytesSlice<'_> {
    fn as_slice(&self) -> &[u8] {
        self.0
    }
}

impl AsRef<[u8]> for BytesSlice<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0
    }
}

impl<'a> From<&'a [u8]> for BytesSlice<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self(value)
    }
}
