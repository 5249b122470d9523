//! Layout-transformation containers: array-of-structures and
//! structure-of-arrays storage behind one element-access interface.
//!
//! Client code is written once against element facades and typed field keys;
//! which physical layout backs the container is a type-alias choice:
//!
//! ```ignore
//! use aosoa::Record;
//!
//! #[derive(Record, Clone, Copy, Default)]
//! struct Particle {
//!     x: f32,
//!     y: f32,
//!     ttl: u32,
//! }
//!
//! // Cache-friendly layout for columnar sweeps; swap the alias to
//! // aosoa::AosVec to go back to packed records, no other edits.
//! type Particles = aosoa::SoaVec<Particle>;
//!
//! let mut particles = Particles::with_len(1024);
//! particles.elem_mut(7).set(Particle::TTL, 60);
//! for ttl in particles.field_slice_mut(Particle::TTL) {
//!     *ttl = ttl.saturating_sub(1);
//! }
//! ```
//!
//! The crate is layered bottom-up:
//! - [`record`]: the `#[derive(Record)]` schema provider — field
//!   descriptors, typed field keys, interned per-type schemas
//! - [`store`]: the two storage engines ([`PackedStore`], [`ColumnStore`])
//!   behind the [`Storage`] trait
//! - [`elem`] and [`iter`]: layout-oblivious facades and cursors
//! - [`vec`] and [`array`]: the growable and fixed-length container facades
//!
//! Containers are single-threaded by contract: share one across threads
//! behind external synchronization or not at all.

// Allow derive-generated ::aosoa::... paths to resolve inside this crate.
extern crate self as aosoa;

pub mod array;
pub mod elem;
pub mod error;
pub mod iter;
pub mod record;
pub mod store;
pub mod vec;

pub use array::{AosArray, RecordArray, SoaArray};
pub use elem::{ElemMut, ElemRef};
pub use error::OutOfBounds;
pub use iter::{Iter, IterMut};
pub use record::{Field, FieldDescriptor, FieldId, Record, Schema};
pub use store::{ColumnStore, PackedStore, Storage};
pub use vec::{AosVec, RecordVec, SoaVec};

/// The derive backing the schema provider; see [`record::Record`].
pub use aosoa_macros::Record;
