//! End-to-end behavior of both storage layouts through the public API:
//! identical element semantics, layout-specific physical placement.

use aosoa::{AosArray, AosVec, OutOfBounds, Record, RecordVec, SoaArray, SoaVec, Storage};

#[derive(Record, Clone, Copy, Debug, Default, PartialEq)]
struct Sample {
    val: i32,
    key: i32,
    dum: i32,
}

impl Sample {
    fn swap_val_key(&mut self) {
        std::mem::swap(&mut self.val, &mut self.key);
    }
}

#[test]
fn field_writes_and_reads_match_across_layouts() {
    // Given - the original scenario: length 10, keyed writes at 3 and 4
    fn scenario<S: Storage<Sample>>(mut vec: RecordVec<Sample, S>) {
        vec.resize_with(10, Sample::default());
        vec.elem_mut(3).set(Sample::KEY, 10);
        vec.elem_mut(3).set(Sample::VAL, 3);
        vec.elem_mut(4).set(Sample::KEY, 9);
        vec.elem_mut(4).set(Sample::VAL, 6);

        // Then
        assert_eq!(*vec.elem(3).get(Sample::KEY), 10);
        assert_eq!(*vec.elem(3).get(Sample::VAL), 3);
        assert_eq!(*vec.elem(4).get(Sample::KEY), 9);
        assert_eq!(*vec.elem(4).get(Sample::VAL), 6);
        assert_eq!(
            vec.elem(3).aggregate(),
            Sample {
                val: 3,
                key: 10,
                dum: 0
            }
        );
        assert_eq!(vec.iter().count(), 10);
    }

    scenario(AosVec::new());
    scenario(SoaVec::new());
}

#[test]
fn whole_record_roundtrip() {
    // Given
    let mut aos = AosVec::<Sample>::with_len(5);
    let mut soa = SoaVec::<Sample>::with_len(5);
    let value = Sample {
        val: -7,
        key: 99,
        dum: 3,
    };

    // When
    aos.elem_mut(2).assign(value);
    soa.elem_mut(2).assign(value);

    // Then
    assert_eq!(aos.elem(2).aggregate(), value);
    assert_eq!(soa.elem(2).aggregate(), value);
}

#[test]
fn layout_distance_invariants() {
    // Given
    let aos = AosVec::<Sample>::with_len(16);
    let soa = SoaVec::<Sample>::with_len(16);

    // When - byte distance between the same field at index 0 and index 10
    let aos_delta = aos.store().field_ptr(Sample::KEY.id(), 10).as_ptr() as usize
        - aos.store().field_ptr(Sample::KEY.id(), 0).as_ptr() as usize;
    let soa_delta = soa.store().field_ptr(Sample::KEY.id(), 10).as_ptr() as usize
        - soa.store().field_ptr(Sample::KEY.id(), 0).as_ptr() as usize;

    // Then - packed records stride by the record size, columns by the field
    assert_eq!(aos_delta, 10 * size_of::<Sample>());
    assert_eq!(soa_delta, 10 * size_of::<i32>());
}

#[test]
fn resize_preserves_prior_values() {
    fn scenario<S: Storage<Sample>>(mut vec: RecordVec<Sample, S>) {
        // Given
        vec.resize_with(10, Sample::default());
        for i in 0..10 {
            vec.elem_mut(i).set(Sample::VAL, i as i32);
        }

        // When
        let fill = Sample {
            val: -1,
            key: -1,
            dum: -1,
        };
        vec.resize_with(20, fill);

        // Then
        for i in 0..10 {
            assert_eq!(*vec.elem(i).get(Sample::VAL), i as i32);
        }
        for i in 10..20 {
            assert_eq!(vec.elem(i).aggregate(), fill);
        }
    }

    scenario(AosVec::new());
    scenario(SoaVec::new());
}

#[test]
fn fill_and_assign_idempotence() {
    // Given
    let value = Sample {
        val: 4,
        key: 5,
        dum: 6,
    };

    let mut array = SoaArray::<Sample>::new(7);
    let mut vec = AosVec::<Sample>::new();

    // When
    array.fill(value);
    vec.assign(7, value);

    // Then
    for elem in array.iter() {
        assert_eq!(elem.aggregate(), value);
    }
    for elem in vec.iter() {
        assert_eq!(elem.aggregate(), value);
    }
}

#[test]
fn mutating_method_writeback_parity() {
    // Given
    let seed = Sample {
        val: 3,
        key: 10,
        dum: 0,
    };
    let mut aos = AosVec::<Sample>::filled(4, seed);
    let mut soa = SoaVec::<Sample>::filled(4, seed);

    // When - the same mutating method through both layouts
    aos.elem_mut(1).update(Sample::swap_val_key);
    soa.elem_mut(1).update(Sample::swap_val_key);

    // Then - scattered columns end up exactly like the packed record
    assert_eq!(aos.elem(1).aggregate(), soa.elem(1).aggregate());
    assert_eq!(
        soa.elem(1).aggregate(),
        Sample {
            val: 10,
            key: 3,
            dum: 0
        }
    );
    // Untouched neighbors keep the seed value
    assert_eq!(soa.elem(0).aggregate(), seed);
}

#[test]
fn writeback_survives_panicking_method() {
    // Given
    let mut soa = SoaVec::<Sample>::with_len(1);

    // When - the method mutates a field, then fails
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        soa.elem_mut(0).update(|record| {
            record.key = 77;
            panic!("late failure");
        })
    }));

    // Then - the mutation is not dropped on the failing path
    assert!(result.is_err());
    assert_eq!(*soa.elem(0).get(Sample::KEY), 77);
}

#[test]
fn iterator_distance() {
    // Given
    let vec = SoaVec::<Sample>::with_len(12);

    // Then - end - begin == N
    assert_eq!(vec.iter().len(), 12);

    // When - advance by k
    let mut iter = vec.iter();
    iter.nth(4);

    // Then - distance to end is N - k
    assert_eq!(iter.len(), 7);

    // And reverse traversal visits len-1 .. 0
    let reversed: Vec<usize> = vec.iter().rev().map(|e| e.index()).collect();
    assert_eq!(reversed, (0..12).rev().collect::<Vec<usize>>());
}

#[test]
fn bounds_checking_on_at() {
    fn scenario<S: Storage<Sample>>(vec: RecordVec<Sample, S>) {
        assert!(vec.at(vec.len() - 1).is_ok());
        assert_eq!(
            vec.at(vec.len()).unwrap_err(),
            OutOfBounds {
                index: 10,
                len: 10
            }
        );
        assert!(vec.at(vec.len() + 100).is_err());
    }

    scenario(AosVec::filled(10, Sample::default()));
    scenario(SoaVec::filled(10, Sample::default()));
}

#[test]
fn fixed_array_has_no_growth_but_same_access() {
    // Given
    let mut aos = AosArray::<Sample>::new(5);
    let mut soa = SoaArray::<Sample>::new(5);

    // When
    aos.elem_mut(4).set(Sample::DUM, 1);
    soa.elem_mut(4).set(Sample::DUM, 1);

    // Then
    assert_eq!(aos.len(), 5);
    assert_eq!(soa.len(), 5);
    assert_eq!(aos.back().unwrap().aggregate(), soa.back().unwrap().aggregate());
}

#[test]
fn soa_columns_are_directly_sweepable() {
    // Given
    let mut soa = SoaVec::<Sample>::with_len(6);
    for (i, mut elem) in soa.iter_mut().enumerate() {
        elem.set(Sample::VAL, i as i32);
    }

    // When - a columnar sweep over one field
    let doubled: Vec<i32> = soa.field_slice(Sample::VAL).iter().map(|v| v * 2).collect();

    // Then
    assert_eq!(doubled, vec![0, 2, 4, 6, 8, 10]);
}
