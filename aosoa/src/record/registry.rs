use std::{any::TypeId, sync::OnceLock};

use dashmap::DashMap;
use log::debug;

use crate::record::{Record, Schema};

/// The process-wide schema registry. Schemas are immutable after derivation,
/// so every record type is interned exactly once and handed out as a
/// `&'static` reference from then on.
///
/// The registry uses lock-free reads for TypeId lookups via `DashMap`; the
/// write path only runs the first time a record type is seen.
pub(crate) struct SchemaRegistry {
    /// Map from TypeId to the interned schema. Lock-free reads via sharded
    /// concurrent hashmap.
    schemas: DashMap<TypeId, &'static Schema>,
}

impl SchemaRegistry {
    fn new() -> Self {
        Self {
            schemas: DashMap::new(),
        }
    }

    /// Get the schema for record type `R`, deriving and interning it on the
    /// first call for that type. Idempotent and thread-safe.
    pub(crate) fn get<R: Record>(&self) -> &'static Schema {
        let type_id = TypeId::of::<R>();

        // Fast path: already interned (lock-free read)
        if let Some(schema) = self.schemas.get(&type_id) {
            return *schema;
        }

        // Slow path: derive once. The entry API avoids a race where two
        // threads both miss the fast path and derive twice.
        *self.schemas.entry(type_id).or_insert_with(|| {
            let schema: &'static Schema = Box::leak(Box::new(Schema::derive::<R>()));
            debug!(
                "derived record schema for {} ({} fields, {} bytes)",
                schema.type_name(),
                schema.field_count(),
                schema.record_size()
            );
            schema
        })
    }
}

/// Get the global schema registry, creating it on first use.
pub(crate) fn global() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SchemaRegistry::new)
}

#[cfg(test)]
mod tests {
    use aosoa_macros::Record;

    use super::*;

    #[test]
    fn registry_interns_one_schema_per_type() {
        // Given
        #[derive(Record, Clone, Copy)]
        struct Point {
            x: f32,
            y: f32,
        }

        // When
        let first = Schema::of::<Point>();
        let second = Schema::of::<Point>();

        // Then - the same interned schema, not a re-derivation
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn registry_distinguishes_record_types() {
        // Given
        #[derive(Record, Clone, Copy)]
        struct A {
            v: u32,
        }

        #[derive(Record, Clone, Copy)]
        struct B {
            v: u64,
        }

        // When
        let a = Schema::of::<A>();
        let b = Schema::of::<B>();

        // Then
        assert!(!std::ptr::eq(a, b));
        assert_eq!(a.record_size(), 4);
        assert_eq!(b.record_size(), 8);
    }
}
