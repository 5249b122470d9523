use std::any::type_name;

use crate::record::{FieldId, Record};

/// The layout of one field within a record: its ordinal identity, source
/// name, byte offset inside the packed record, and element size/alignment.
///
/// Descriptors are generated once per record type by `#[derive(Record)]`.
/// Offsets come from `core::mem::offset_of!`, so they are correct even if
/// the compiler reorders fields under the default representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    id: FieldId,
    name: &'static str,
    offset: usize,
    size: usize,
    align: usize,
}

impl FieldDescriptor {
    /// Construct a field descriptor. Called from derive-generated code.
    #[inline]
    pub const fn new(
        id: FieldId,
        name: &'static str,
        offset: usize,
        size: usize,
        align: usize,
    ) -> Self {
        Self {
            id,
            name,
            offset,
            size,
            align,
        }
    }

    /// Get the ordinal identity of this field.
    #[inline]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Get the field's name as declared in the record type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the field's byte offset inside the packed record.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the field's size in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Get the field's alignment in bytes.
    #[inline]
    pub const fn align(&self) -> usize {
        self.align
    }
}

/// The derived, ordered description of a record type's fields.
///
/// A schema is built once per record type, interned by the registry, and
/// read-only afterwards. Both storage engines consume it: the packed store
/// for per-field offsets inside an element, the column store for per-field
/// element layouts and gather/scatter offsets.
///
/// # Invariants
/// - descriptors are ordered by field declaration, `fields[i].id().index() == i`
/// - `fields.iter().map(size).sum() == record_size` (no interior padding;
///   violations are rejected at compile time by the derive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    fields: &'static [FieldDescriptor],
    record_size: usize,
    record_align: usize,
    type_name: &'static str,
}

impl Schema {
    /// Get the interned schema for record type `R`, deriving it on first use.
    #[inline]
    pub fn of<R: Record>() -> &'static Schema {
        crate::record::registry::global().get::<R>()
    }

    /// Build the schema for record type `R` from its derived descriptors.
    pub(crate) fn derive<R: Record>() -> Self {
        let fields = R::fields();
        debug_assert!(!fields.is_empty(), "record must have at least one field");
        debug_assert_eq!(
            fields.iter().map(|f| f.size()).sum::<usize>(),
            size_of::<R>(),
            "field sizes do not cover {}",
            type_name::<R>()
        );
        Self {
            fields,
            record_size: size_of::<R>(),
            record_align: align_of::<R>(),
            type_name: type_name::<R>(),
        }
    }

    /// Get the descriptor for a field by its ordinal identity.
    #[inline]
    pub fn field(&self, id: FieldId) -> &FieldDescriptor {
        &self.fields[id.index()]
    }

    /// Get all field descriptors in declaration order.
    #[inline]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Get the number of fields in the record.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get the size in bytes of one packed record.
    #[inline]
    pub const fn record_size(&self) -> usize {
        self.record_size
    }

    /// Get the alignment in bytes of the record type.
    #[inline]
    pub const fn record_align(&self) -> usize {
        self.record_align
    }

    /// Get the record type's name, for diagnostics.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}
