//! The fixed-length container facade.

use std::{fmt, marker::PhantomData};

use crate::{
    elem::{ElemMut, ElemRef},
    error::OutOfBounds,
    iter::{Iter, IterMut},
    record::{Field, Record},
    store::{ColumnStore, PackedStore, Storage},
};

/// A fixed-length container of records over a chosen storage layout.
///
/// The length is set at construction and never changes; the only bulk
/// mutation is [`fill`](Self::fill). Element access, facades, and iteration
/// are identical to [`RecordVec`](crate::vec::RecordVec).
pub struct RecordArray<R: Record, S: Storage<R> = ColumnStore<R>> {
    store: S,
    _marker: PhantomData<fn() -> R>,
}

/// Fixed-length array-of-structures container.
pub type AosArray<R> = RecordArray<R, PackedStore<R>>;

/// Fixed-length structure-of-arrays container.
pub type SoaArray<R> = RecordArray<R, ColumnStore<R>>;

impl<R: Record, S: Storage<R>> RecordArray<R, S> {
    /// Construct an array of `len` default records.
    pub fn new(len: usize) -> Self
    where
        R: Default,
    {
        Self::filled(len, R::default())
    }

    /// Construct an array of `len` copies of `value`.
    pub fn filled(len: usize, value: R) -> Self {
        let mut store = S::with_capacity(len);
        store.resize_with(len, value);
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Number of records in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the array has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Set every record to `value`.
    pub fn fill(&mut self, value: R) {
        let len = self.store.len();
        self.store.replicate(value, 0, len);
    }

    /// Get a facade for the record at `index`.
    ///
    /// # Panics
    /// Panics in debug builds if `index >= len()`; use [`at`](Self::at) when
    /// the index is untrusted.
    #[inline]
    pub fn elem(&self, index: usize) -> ElemRef<'_, R, S> {
        ElemRef::new(&self.store, index)
    }

    /// Get an exclusive facade for the record at `index`.
    ///
    /// # Panics
    /// As [`elem`](Self::elem).
    #[inline]
    pub fn elem_mut(&mut self, index: usize) -> ElemMut<'_, R, S> {
        ElemMut::new(&mut self.store, index)
    }

    /// Get a facade for the record at `index`, checking bounds.
    pub fn at(&self, index: usize) -> Result<ElemRef<'_, R, S>, OutOfBounds> {
        if index < self.len() {
            Ok(ElemRef::new(&self.store, index))
        } else {
            Err(OutOfBounds {
                index,
                len: self.len(),
            })
        }
    }

    /// Get an exclusive facade for the record at `index`, checking bounds.
    pub fn at_mut(&mut self, index: usize) -> Result<ElemMut<'_, R, S>, OutOfBounds> {
        if index < self.len() {
            Ok(ElemMut::new(&mut self.store, index))
        } else {
            Err(OutOfBounds {
                index,
                len: self.len(),
            })
        }
    }

    /// Get a facade for the first record.
    pub fn front(&self) -> Option<ElemRef<'_, R, S>> {
        if self.is_empty() {
            None
        } else {
            Some(self.elem(0))
        }
    }

    /// Get a facade for the last record.
    pub fn back(&self) -> Option<ElemRef<'_, R, S>> {
        if self.is_empty() {
            None
        } else {
            Some(self.elem(self.len() - 1))
        }
    }

    /// Iterate over shared facades.
    #[inline]
    pub fn iter(&self) -> Iter<'_, R, S> {
        Iter::new(&self.store)
    }

    /// Iterate over exclusive facades.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, R, S> {
        IterMut::new(&mut self.store)
    }

    /// Get the backing store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<R: Record> RecordArray<R, ColumnStore<R>> {
    /// Get one field's column as a typed slice.
    #[inline]
    pub fn field_slice<F: 'static>(&self, field: Field<R, F>) -> &[F] {
        self.store.field_slice(field)
    }

    /// Get one field's column as a mutable typed slice.
    #[inline]
    pub fn field_slice_mut<F: 'static>(&mut self, field: Field<R, F>) -> &mut [F] {
        self.store.field_slice_mut(field)
    }
}

impl<R: Record> RecordArray<R, PackedStore<R>> {
    /// Get the packed records as a slice.
    #[inline]
    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    /// Get the packed records as a mutable slice.
    #[inline]
    pub fn records_mut(&mut self) -> &mut [R] {
        self.store.records_mut()
    }
}

impl<R: Record, S: Storage<R> + Clone> Clone for RecordArray<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Record, S: Storage<R>> fmt::Debug for RecordArray<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordArray")
            .field("len", &self.len())
            .finish()
    }
}

impl<'a, R: Record, S: Storage<R>> IntoIterator for &'a RecordArray<R, S> {
    type Item = ElemRef<'a, R, S>;
    type IntoIter = Iter<'a, R, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, R: Record, S: Storage<R>> IntoIterator for &'a mut RecordArray<R, S> {
    type Item = ElemMut<'a, R, S>;
    type IntoIter = IterMut<'a, R, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
