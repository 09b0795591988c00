//! Exactly 32 bytes: hashes, node ids and keys.
//!
//! [`Bytes32`] is a plain immutable array. [`MutableBytes32`] either owns its
//! 32 bytes ([`MutableBytes32::create`]) or wraps another mutable view of size
//! 32 ([`MutableBytes32::wrap`]) and forwards every operation to it, so writes
//! through the wrapper are writes to the wrapped view.
use crate::bytes_value::{BytesSlice, BytesValue, BytesView};
use crate::bytes_values::from_raw_hex_string;
use crate::error::{CoreError, CoreErrorKind};
use crate::mutable_bytes::{MutableBytesSlice, MutableBytesView};

pub const SIZE: usize = 32;

fn invalid_length(actual: usize) -> CoreError {
    CoreError::new(
        CoreErrorKind::InvalidLength,
        format!("Expected {SIZE} bytes but got {actual}").as_str(),
    )
}

#[derive(Clone, Copy, Default)]
pub struct Bytes32([u8; SIZE]);

structural_view_impls!("Bytes32", [] Bytes32);

impl Bytes32 {
    pub const SIZE: usize = SIZE;
    pub const ZERO: Bytes32 = Bytes32([0; SIZE]);

    pub const fn new(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    pub fn wrap(bytes: &[u8]) -> Result<Self, CoreError> {
        let array = <[u8; SIZE]>::try_from(bytes).map_err(|_| invalid_length(bytes.len()))?;
        Ok(Self(array))
    }

    pub fn wrap_view(view: &dyn BytesView) -> Result<Self, CoreError> {
        Self::wrap(view.as_slice())
    }

    /// Right-aligns `view` in 32 bytes, filling the left with zeros.
    pub fn left_pad(view: &dyn BytesView) -> Result<Self, CoreError> {
        let bytes = view.as_slice();
        if bytes.len() > SIZE {
            return Err(invalid_length(bytes.len()));
        }
        let mut array = [0; SIZE];
        array[SIZE - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(array))
    }

    /// Parses at most 64 hex digits (even count), left-padding with zeros.
    pub fn from_hex_string(value: &str) -> Result<Self, CoreError> {
        Self::wrap(&from_raw_hex_string(value, Some(SIZE), false)?)
    }

    pub fn from_hex_string_lenient(value: &str) -> Result<Self, CoreError> {
        Self::wrap(&from_raw_hex_string(value, Some(SIZE), true)?)
    }

    /// Parses exactly 64 hex digits.
    pub fn from_hex_string_strict(value: &str) -> Result<Self, CoreError> {
        Self::wrap(&from_raw_hex_string(value, None, false)?)
    }

    pub const fn to_array(&self) -> [u8; SIZE] {
        self.0
    }

    pub fn copy(&self) -> Bytes32 {
        *self
    }

    pub fn mutable_copy(&self) -> MutableBytes32 {
        MutableBytes32::from_array(self.0)
    }
}

impl BytesView for Bytes32 {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }

    fn size(&self) -> usize {
        SIZE
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIZE]> for Bytes32 {
    fn from(value: [u8; SIZE]) -> Self {
        Self(value)
    }
}

impl From<Bytes32> for BytesValue {
    fn from(value: Bytes32) -> Self {
        BytesValue::of(&value.0)
    }
}

impl TryFrom<&[u8]> for Bytes32 {
    type Error = CoreError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::wrap(value)
    }
}

/// A writable 32-byte view, owning its storage or delegating to a wrapped view.
pub struct MutableBytes32<V = [u8; SIZE]> {
    inner: V,
}

structural_view_impls!("MutableBytes32", [V: MutableBytesView,] MutableBytes32<V>);

impl MutableBytes32 {
    /// Allocates 32 zeroed bytes.
    pub fn create() -> Self {
        Self::from_array([0; SIZE])
    }

    pub fn from_array(bytes: [u8; SIZE]) -> Self {
        Self { inner: bytes }
    }
}

impl<V: MutableBytesView> MutableBytes32<V> {
    /// Wraps `value` without copying it. Pass `&mut view` to keep ownership of
    /// the view and observe the writes once the wrapper is dropped.
    pub fn wrap(value: V) -> Result<Self, CoreError> {
        if value.size() != SIZE {
            return Err(invalid_length(value.size()));
        }
        Ok(Self { inner: value })
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    pub fn copy(&self) -> Bytes32 {
        let mut array = [0; SIZE];
        array.copy_from_slice(self.inner.as_slice());
        Bytes32(array)
    }

    pub fn mutable_copy(&self) -> MutableBytes32 {
        MutableBytes32::from_array(self.copy().0)
    }
}

impl<V: MutableBytesView> BytesView for MutableBytes32<V> {
    fn as_slice(&self) -> &[u8] {
        self.inner.as_slice()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn get(&self, index: usize) -> Result<u8, CoreError> {
        self.inner.get(index)
    }

    fn slice(&self, from: usize, len: usize) -> Result<BytesSlice<'_>, CoreError> {
        self.inner.slice(from, len)
    }

    fn slice_from(&self, from: usize) -> Result<BytesSlice<'_>, CoreError> {
        self.inner.slice_from(from)
    }

    fn copy_to_offset(
        &self,
        destination: &mut dyn MutableBytesView,
        destination_offset: usize,
    ) -> Result<(), CoreError> {
        self.inner.copy_to_offset(destination, destination_offset)
    }

    fn common_prefix_length(&self, other: &dyn BytesView) -> usize {
        self.inner.common_prefix_length(other)
    }

    fn common_prefix(&self, other: &dyn BytesView) -> BytesSlice<'_> {
        self.inner.common_prefix(other)
    }

    fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    fn to_hex_string(&self) -> String {
        self.inner.to_hex_string()
    }

    fn update_digest(&self, digest: &mut dyn digest::Update) {
        self.inner.update_digest(digest)
    }
}

impl<V: MutableBytesView> MutableBytesView for MutableBytes32<V> {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self.inner.as_mut_slice()
    }

    fn set(&mut self, index: usize, value: u8) -> Result<(), CoreError> {
        self.inner.set(index, value)
    }

    fn mutable_slice(
        &mut self,
        from: usize,
        len: usize,
    ) -> Result<MutableBytesSlice<'_>, CoreError> {
        self.inner.mutable_slice(from, len)
    }

    fn mutable_slice_from(&mut self, from: usize) -> Result<MutableBytesSlice<'_>, CoreError> {
        self.inner.mutable_slice_from(from)
    }

    fn write_slice(&mut self, offset: usize, source: &[u8]) -> Result<(), CoreError> {
        self.inner.write_slice(offset, source)
    }
}

impl<V: MutableBytesView + Clone> Clone for MutableBytes32<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Default for MutableBytes32 {
    fn default() -> Self {
        Self::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutable_bytes::MutableBytesValue;
    use sha2::{Digest, Sha256};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn sequence() -> [u8; SIZE] {
        let mut array = [0; SIZE];
        for (index, byte) in array.iter_mut().enumerate() {
            *byte = index as u8;
        }
        array
    }

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn wrap_requires_32_bytes() {
        assert_eq!(
            Bytes32::wrap(&[0; 31]).unwrap_err().kind(),
            CoreErrorKind::InvalidLength
        );
        assert_eq!(
            Bytes32::wrap(&[0; 33]).unwrap_err().kind(),
            CoreErrorKind::InvalidLength
        );
        let bytes = sequence();
        let value = Bytes32::wrap(&bytes).unwrap();
        assert_eq!(value.extract_array(), bytes.to_vec());
        assert_eq!(value, Bytes32::wrap(&bytes.to_vec()).unwrap());
    }

    #[test]
    fn slicing_stays_within_32_bytes() {
        let value = Bytes32::new(sequence());
        assert_eq!(value.slice(30, 2).unwrap().as_slice(), &[30, 31]);
        assert!(value.slice_from(32).unwrap().is_empty());
        assert_eq!(
            value.slice(31, 2).unwrap_err().kind(),
            CoreErrorKind::IndexOutOfRange
        );
        assert!(value.slice_from(33).is_err());
    }

    #[test]
    fn left_pad_and_hex() {
        let padded = Bytes32::left_pad(&BytesValue::of(&[1, 2])).unwrap();
        assert_eq!(padded.get(30).unwrap(), 1);
        assert_eq!(padded.get(31).unwrap(), 2);
        assert!(padded.slice(0, 30).unwrap().is_zero());
        assert!(Bytes32::left_pad(&[0u8; 33]).is_err());

        assert_eq!(Bytes32::from_hex_string("0x0102").unwrap(), padded);
        assert_eq!(Bytes32::from_hex_string_lenient("0x102").unwrap(), padded);
        assert_eq!(
            Bytes32::from_hex_string_strict("0x0102").unwrap_err().kind(),
            CoreErrorKind::InvalidLength
        );
        let full = Bytes32::new(sequence());
        assert_eq!(Bytes32::from_hex_string_strict(&full.to_string()).unwrap(), full);
        assert_eq!(
            Bytes32::from_hex_string(&format!("{full}00")).unwrap_err().kind(),
            CoreErrorKind::ValueTooLarge
        );
    }

    #[test]
    fn create_is_owned_and_zeroed() {
        let mut first = MutableBytes32::create();
        let second = MutableBytes32::create();
        assert!(first.is_zero());
        first.set(0, 1).unwrap();
        assert!(second.is_zero());
        assert_eq!(first.size(), SIZE);
        assert!(first.set(SIZE, 1).is_err());
    }

    #[test]
    fn wrap_rejects_wrong_size_views() {
        let mut short = MutableBytesValue::create(31);
        assert_eq!(
            MutableBytes32::wrap(&mut short).unwrap_err().kind(),
            CoreErrorKind::InvalidLength
        );
        assert!(MutableBytes32::wrap(MutableBytesValue::create(64)).is_err());
    }

    #[test]
    fn wrapper_writes_are_visible_in_wrapped_view() {
        let mut backing = MutableBytesValue::create(SIZE);
        backing.set(5, 0x55).unwrap();
        {
            let mut wrapper = MutableBytes32::wrap(&mut backing).unwrap();
            assert_eq!(wrapper.get(5).unwrap(), 0x55);
            wrapper.set(0, 0xaa).unwrap();
            wrapper.mutable_slice(30, 2).unwrap().fill(0xff);
        }
        assert_eq!(backing.get(0).unwrap(), 0xaa);
        assert_eq!(backing.get(30).unwrap(), 0xff);
        assert_eq!(backing.get(31).unwrap(), 0xff);
    }

    #[test]
    fn wrapper_over_parent_slice_writes_into_parent() {
        let mut parent = MutableBytesValue::create(40);
        {
            let slice = parent.mutable_slice(8, SIZE).unwrap();
            let mut wrapper = MutableBytes32::wrap(slice).unwrap();
            wrapper.set(0, 7).unwrap();
        }
        assert_eq!(parent.get(8).unwrap(), 7);
    }

    #[test]
    fn wrapped_and_owned_behave_identically() {
        let bytes = sequence();
        let mut backing = MutableBytesValue::of(&bytes);
        let owned = MutableBytes32::from_array(bytes);
        let wrapper = MutableBytes32::wrap(&mut backing).unwrap();

        assert_eq!(wrapper, owned);
        assert_eq!(wrapper.to_string(), owned.to_string());
        assert_eq!(hash_of(&wrapper), hash_of(&owned));
        assert_eq!(hash_of(&wrapper), hash_of(&BytesValue::of(&bytes)));
        assert_eq!(wrapper.slice(3, 4).unwrap(), owned.slice(3, 4).unwrap());
        assert_eq!(wrapper.copy(), owned.copy());
        assert_eq!(wrapper.common_prefix_length(&owned), SIZE);

        let mut destination = MutableBytes32::create();
        wrapper.copy_to(&mut destination).unwrap();
        assert_eq!(destination, owned);
    }

    #[test]
    fn wrapper_feeds_digest_like_owned_storage() {
        let bytes = sequence();
        let mut backing = MutableBytesValue::of(&bytes);
        let wrapper = MutableBytes32::wrap(&mut backing).unwrap();

        let mut from_wrapper = Sha256::new();
        wrapper.update_digest(&mut from_wrapper);
        let mut from_bytes32 = Sha256::new();
        Bytes32::new(bytes).update_digest(&mut from_bytes32);

        let expected = Sha256::digest(bytes);
        assert_eq!(from_wrapper.finalize(), expected);
        assert_eq!(from_bytes32.finalize(), expected);
    }

    #[test]
    fn copies_detach_from_wrapped_view() {
        let mut backing = MutableBytesValue::create(SIZE);
        let mut wrapper = MutableBytes32::wrap(&mut backing).unwrap();
        let snapshot = wrapper.copy();
        let mut detached = wrapper.mutable_copy();
        wrapper.set(1, 1).unwrap();
        detached.set(2, 2).unwrap();
        assert!(snapshot.is_zero());
        assert_eq!(wrapper.get(2).unwrap(), 0);
        assert_eq!(detached.get(1).unwrap(), 0);
        drop(wrapper);
        assert_eq!(backing.get(1).unwrap(), 1);
    }
}
