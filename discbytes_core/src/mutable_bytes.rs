//! Writable byte views.
//!
//! A [`MutableBytesSlice`] obtained through [`MutableBytesView::mutable_slice`]
//! aliases its parent: writes through the slice land in the parent's storage.
//! The slice holds a mutable borrow of the parent, so the parent cannot be read
//! or written through another handle until the slice is dropped.
use crate::bytes_value::{BytesValue, BytesView};
use crate::error::{CoreError, check_index, check_range};

pub trait MutableBytesView: BytesView {
    fn as_mut_slice(&mut self) -> &mut [u8];

    fn set(&mut self, index: usize, value: u8) -> Result<(), CoreError> {
        check_index(index, self.size())?;
        self.as_mut_slice()[index] = value;
        Ok(())
    }

    /// A writable window of `len` bytes starting at `from`, aliasing this view.
    fn mutable_slice(
        &mut self,
        from: usize,
        len: usize,
    ) -> Result<MutableBytesSlice<'_>, CoreError> {
        check_range(from, len, self.size())?;
        Ok(MutableBytesSlice::wrap(
            &mut self.as_mut_slice()[from..from + len],
        ))
    }

    fn mutable_slice_from(&mut self, from: usize) -> Result<MutableBytesSlice<'_>, CoreError> {
        let size = self.size();
        check_range(from, 0, size)?;
        self.mutable_slice(from, size - from)
    }

    /// Copies `source` into this view starting at `offset`.
    fn write_slice(&mut self, offset: usize, source: &[u8]) -> Result<(), CoreError> {
        check_range(offset, source.len(), self.size())?;
        self.as_mut_slice()[offset..offset + source.len()].copy_from_slice(source);
        Ok(())
    }

    fn set_from(&mut self, offset: usize, source: &dyn BytesView) -> Result<(), CoreError> {
        self.write_slice(offset, source.as_slice())
    }

    fn fill(&mut self, value: u8) {
        self.as_mut_slice().fill(value);
    }

    fn clear(&mut self) {
        self.fill(0);
    }
}

impl<T: MutableBytesView + ?Sized> MutableBytesView for &mut T {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        (**self).as_mut_slice()
    }
}

impl MutableBytesView for [u8] {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> MutableBytesView for [u8; N] {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

/// An owned, writable byte value of fixed size.
#[derive(Clone, Default)]
pub struct MutableBytesValue(Vec<u8>);

structural_view_impls!("MutableBytesValue", [] MutableBytesValue);

impl MutableBytesValue {
    /// Allocates `size` zeroed bytes.
    pub fn create(size: usize) -> Self {
        Self(vec![0; size])
    }

    pub fn wrap(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn of(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Turns this value into an immutable one without copying.
    pub fn freeze(self) -> BytesValue {
        BytesValue::wrap(self.0)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl BytesView for MutableBytesValue {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl MutableBytesView for MutableBytesValue {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl From<MutableBytesValue> for BytesValue {
    fn from(value: MutableBytesValue) -> Self {
        value.freeze()
    }
}

/// A writable window borrowed from a parent view.
pub struct MutableBytesSlice<'a>(&'a mut [u8]);

structural_view_impls!("MutableBytesSlice", ['a,] MutableBytesSlice<'a>);

impl<'a> MutableBytesSlice<'a> {
    pub fn wrap(bytes: &'a mut [u8]) -> Self {
        Self(bytes)
    }

    pub fn into_slice(self) -> &'a mut [u8] {
        self.0
    }
}

impl BytesView for MutableBytesSlice<'_> {
    fn as_slice(&self) -> &[u8] {
        &*self.0
    }
}

impl MutableBytesView for MutableBytesSlice<'_> {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut *self.0
    }
}

impl<'a> From<&'a mut [u8]> for MutableBytesSlice<'a> {
    fn from(value: &'a mut [u8]) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreErrorKind;

    #[test]
    fn create_is_zeroed() {
        let value = MutableBytesValue::create(4);
        assert_eq!(value.size(), 4);
        assert!(value.is_zero());
    }

    #[test]
    fn set_is_bounds_checked() {
        let mut value = MutableBytesValue::create(2);
        value.set(1, 0xff).unwrap();
        assert_eq!(value.get(1).unwrap(), 0xff);
        assert_eq!(
            value.set(2, 1).unwrap_err().kind(),
            CoreErrorKind::IndexOutOfRange
        );
    }

    #[test]
    fn mutable_slice_writes_through_to_parent() {
        let mut parent = MutableBytesValue::create(6);
        {
            let mut slice = parent.mutable_slice(2, 3).unwrap();
            slice.set(0, 0xaa).unwrap();
            slice.set(2, 0xbb).unwrap();
            assert!(slice.set(3, 0xcc).is_err());

            let mut nested = slice.mutable_slice_from(1).unwrap();
            nested.set(0, 0x11).unwrap();
        }
        assert_eq!(parent.as_slice(), &[0, 0, 0xaa, 0x11, 0xbb, 0]);
        assert_eq!(parent.get(2).unwrap(), 0xaa);
    }

    #[test]
    fn mutable_slice_bounds() {
        let mut parent = MutableBytesValue::create(3);
        assert!(parent.mutable_slice(1, 3).is_err());
        assert!(parent.mutable_slice_from(4).is_err());
        assert!(parent.mutable_slice_from(3).unwrap().is_empty());
    }

    #[test]
    fn copies_never_alias() {
        let mut original = MutableBytesValue::of(&[1, 2, 3]);
        let mut copy = original.mutable_copy();
        copy.set(0, 9).unwrap();
        assert_eq!(original.get(0).unwrap(), 1);

        let frozen = original.copy();
        original.set(1, 7).unwrap();
        assert_eq!(frozen.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn bulk_writes() {
        let mut value = MutableBytesValue::create(5);
        value.set_from(1, &BytesValue::of(&[1, 2, 3])).unwrap();
        assert_eq!(value.as_slice(), &[0, 1, 2, 3, 0]);

        let error = value.set_from(3, &BytesValue::of(&[4, 5, 6])).unwrap_err();
        assert_eq!(error.kind(), CoreErrorKind::IndexOutOfRange);
        assert_eq!(value.as_slice(), &[0, 1, 2, 3, 0]);

        value.fill(0x7f);
        assert_eq!(value.as_slice(), &[0x7f; 5]);
        value.clear();
        assert!(value.is_zero());
    }

    #[test]
    fn freeze_keeps_storage() {
        let mut value = MutableBytesValue::create(3);
        value.set(0, 1).unwrap();
        let pointer = value.as_slice().as_ptr();
        let frozen = value.freeze();
        assert_eq!(frozen.as_slice().as_ptr(), pointer);
        assert_eq!(frozen, [1u8, 0, 0]);
    }

    #[test]
    fn slices_over_raw_storage() {
        let mut raw = [0u8; 4];
        {
            let mut view = MutableBytesSlice::wrap(&mut raw[..]);
            view.write_slice(2, &[5, 6]).unwrap();
        }
        assert_eq!(raw, [0, 0, 5, 6]);
        assert_eq!(MutableBytesSlice::from(&mut raw[..]).to_string(), "0x00000506");
    }
}
