//! The structure-of-arrays storage engine.
//!
//! [`ColumnStore`] keeps one contiguous buffer per record field, resized in
//! lock-step, with whole-record access performed by gathering from and
//! scattering to the columns through the schema's field offsets.

use std::{alloc::Layout, marker::PhantomData, ptr, ptr::NonNull, slice};

use crate::{
    record::{Field, FieldId, Record, Schema},
    store::{
        Storage,
        mem::{ColumnMemory, GrowthStrategy},
    },
};

/// Structure-of-arrays storage: one type-erased column per field.
///
/// # Invariants
/// - `columns.len() == schema.field_count()`, ordered by field ordinal
/// - every column's capacity is at least `len` at all times observable by
///   callers; length is a single shared counter, so columns can never
///   disagree about it
/// - column `i` holds elements of field `i`'s layout, and slots `[0, len)`
///   are initialized
pub struct ColumnStore<R: Record> {
    /// One buffer per field, indexed by field ordinal.
    columns: Vec<ColumnMemory>,

    /// Shared logical length of every column.
    len: usize,

    /// The record type's interned schema.
    schema: &'static Schema,

    _marker: PhantomData<R>,
}

impl<R: Record> ColumnStore<R> {
    /// Get the schema backing this store.
    #[inline]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Get the column for `field` as a typed slice over `[0, len)`.
    pub fn field_slice<F: 'static>(&self, field: Field<R, F>) -> &[F] {
        let descriptor = self.schema.field(field.id());
        debug_assert_eq!(descriptor.size(), size_of::<F>(), "field key size mismatch");
        if self.len == 0 {
            return &[];
        }
        // SAFETY: the Field key guarantees the column's element type is F
        // (derive invariant), and slots [0, len) are initialized.
        unsafe {
            slice::from_raw_parts(
                self.columns[field.id().index()].as_ptr() as *const F,
                self.len,
            )
        }
    }

    /// Get the column for `field` as a mutable typed slice over `[0, len)`.
    pub fn field_slice_mut<F: 'static>(&mut self, field: Field<R, F>) -> &mut [F] {
        let descriptor = self.schema.field(field.id());
        debug_assert_eq!(descriptor.size(), size_of::<F>(), "field key size mismatch");
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: as field_slice, plus exclusive access through &mut self.
        unsafe {
            slice::from_raw_parts_mut(
                self.columns[field.id().index()].as_ptr() as *mut F,
                self.len,
            )
        }
    }

    /// Grow every column's capacity to at least `min_capacity`, using the
    /// given growth behavior. Capacity changes commit per column but the
    /// shared length only moves after every column has room, so a partially
    /// applied resize is never observable (allocation failure aborts).
    fn ensure_all(&mut self, min_capacity: usize, exact: bool) {
        for column in &mut self.columns {
            if exact {
                column.ensure_exact(min_capacity);
            } else {
                column.ensure(min_capacity);
            }
        }
    }

    /// Verify that every column can hold the current length.
    #[cfg(debug_assertions)]
    fn verify_invariants(&self) {
        for (ordinal, column) in self.columns.iter().enumerate() {
            assert!(
                column.capacity() >= self.len,
                "column {} capacity {} below len {}",
                ordinal,
                column.capacity(),
                self.len
            );
        }
    }
}

impl<R: Record> Storage<R> for ColumnStore<R> {
    fn new() -> Self {
        let schema = Schema::of::<R>();
        Self {
            columns: schema
                .fields()
                .iter()
                .map(|field| {
                    ColumnMemory::new(
                        Layout::from_size_align(field.size(), field.align())
                            .expect("invalid field layout"),
                        GrowthStrategy::Multiply(2),
                    )
                })
                .collect(),
            len: 0,
            schema,
            _marker: PhantomData,
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        let mut store = Self::new();
        store.ensure_all(capacity, true);
        store
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.capacity())
            .min()
            .unwrap_or(0)
    }

    fn reserve(&mut self, additional: usize) {
        self.ensure_all(self.len + additional, false);
    }

    fn shrink_to_fit(&mut self) {
        for column in &mut self.columns {
            column.shrink_to(self.len);
        }
    }

    fn truncate(&mut self, new_len: usize) {
        if new_len < self.len {
            self.len = new_len;
        }
    }

    fn resize_with(&mut self, new_len: usize, value: R) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        // All columns get room first; only then does the shared length move.
        self.ensure_all(new_len, false);
        let start = self.len;
        self.len = new_len;
        self.replicate(value, start, new_len);

        #[cfg(debug_assertions)]
        self.verify_invariants();
    }

    fn push(&mut self, value: R) {
        let index = self.len;
        self.ensure_all(index + 1, false);
        self.len = index + 1;
        self.write(index, value);
    }

    fn replicate(&mut self, value: R, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.len, "replicate range invalid");
        let value_ptr = &raw const value as *const u8;
        for field in self.schema.fields() {
            let column = &self.columns[field.id().index()];
            // SAFETY: the source is one field inside `value`; destinations
            // are in-capacity column slots of the same field layout.
            unsafe {
                let src = value_ptr.add(field.offset());
                for index in start..end {
                    ptr::copy_nonoverlapping(src, column.ptr_at(index).as_ptr(), field.size());
                }
            }
        }
    }

    fn read(&self, index: usize) -> R {
        debug_assert!(index < self.len, "index out of bounds");
        let mut out = std::mem::MaybeUninit::<R>::uninit();
        let out_ptr = out.as_mut_ptr() as *mut u8;
        for field in self.schema.fields() {
            let column = &self.columns[field.id().index()];
            // SAFETY: column slot `index` is initialized; the destination is
            // the field's slot inside the packed record.
            unsafe {
                ptr::copy_nonoverlapping(
                    column.ptr_at(index).as_ptr(),
                    out_ptr.add(field.offset()),
                    field.size(),
                );
            }
        }
        // SAFETY: field sizes sum to size_of::<R>() (schema invariant), so
        // every byte of `out` has been written.
        unsafe { out.assume_init() }
    }

    fn write(&mut self, index: usize, value: R) {
        debug_assert!(index < self.len, "index out of bounds");
        let value_ptr = &raw const value as *const u8;
        for field in self.schema.fields() {
            let column = &self.columns[field.id().index()];
            // SAFETY: inverse of `read`; same bounds and layout reasoning.
            unsafe {
                ptr::copy_nonoverlapping(
                    value_ptr.add(field.offset()),
                    column.ptr_at(index).as_ptr(),
                    field.size(),
                );
            }
        }
    }

    fn field_ptr(&self, id: FieldId, index: usize) -> NonNull<u8> {
        debug_assert!(index < self.len, "index out of bounds");
        self.columns[id.index()].ptr_at(index)
    }

    fn update<T>(&mut self, index: usize, f: impl FnOnce(&mut R) -> T) -> T {
        debug_assert!(index < self.len, "index out of bounds");
        // No contiguous record exists in column storage, so gather a local
        // copy, run the closure against it, and scatter it back. The guard's
        // Drop performs the write-back, which keeps mutations even when the
        // closure unwinds.
        let value = self.read(index);
        let mut guard = WriteBack {
            store: self,
            index,
            value,
        };
        f(&mut guard.value)
    }

    fn inspect<T>(&self, index: usize, f: impl FnOnce(&R) -> T) -> T {
        f(&self.read(index))
    }
}

impl<R: Record> Clone for ColumnStore<R> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        for index in 0..self.len {
            out.push(self.read(index));
        }
        out
    }
}

/// Scatters a locally mutated record copy back into the columns when
/// dropped. Dropping on unwind is the point: a record method that fails
/// midway must not silently discard the field mutations it already made.
struct WriteBack<'a, R: Record> {
    store: &'a mut ColumnStore<R>,
    index: usize,
    value: R,
}

impl<R: Record> Drop for WriteBack<'_, R> {
    fn drop(&mut self) {
        self.store.write(self.index, self.value);
    }
}
