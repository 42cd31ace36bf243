//! Tests for the HugeArray contract across backends
//!
//! These tests verify:
//! - MemoryArray and MappedHugeArray agree on resize semantics
//! - copy_from between any two backends
//! - Generic code written against the trait

use hugearray::storage::{AnonymousMap, MappedFile};
use hugearray::{ArrayConfig, HugeArray, HugeArrayError, MappedHugeArray, MemoryArray};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn small_config() -> ArrayConfig {
    ArrayConfig::builder().segment_capacity(256).build()
}

/// Fill with a recognizable pattern through the trait only
fn fill<A: HugeArray<u64>>(array: &mut A) {
    for index in 0..array.len() {
        array.set(index, index * index + 7).unwrap();
    }
}

fn collect<A: HugeArray<u64>>(array: &mut A) -> Vec<u64> {
    (0..array.len()).map(|index| array.get(index).unwrap()).collect()
}

/// Grow, shrink and regrow, returning the contents after each step
fn resize_script<A: HugeArray<u64>>(array: &mut A) -> Vec<Vec<u64>> {
    let mut snapshots = Vec::new();
    fill(array);
    array.resize(1500).unwrap();
    snapshots.push(collect(array));
    array.resize(300).unwrap();
    snapshots.push(collect(array));
    array.resize(0).unwrap();
    array.resize(50).unwrap();
    snapshots.push(collect(array));
    snapshots
}

// =============================================================================
// Backend Agreement Tests
// =============================================================================

#[test]
fn test_backends_agree_on_resize() {
    let mut memory = MemoryArray::<u64>::new(1000).unwrap();
    let mut mapped = MappedHugeArray::<u64, AnonymousMap>::anonymous(1000, &small_config()).unwrap();

    let expected = resize_script(&mut memory);
    let actual = resize_script(&mut mapped);

    assert_eq!(actual, expected);
    assert_eq!(expected[2], vec![0u64; 50]);
    assert_eq!(&expected[0][1000..], &vec![0u64; 500][..]);
}

#[test]
fn test_memory_array_bounds() {
    let mut array = MemoryArray::<u64>::new(3).unwrap();
    assert!(matches!(
        array.get(3),
        Err(HugeArrayError::IndexOutOfRange { index: 3, len: 3 })
    ));
}

// =============================================================================
// copy_from Tests
// =============================================================================

#[test]
fn test_copy_memory_into_mapped() {
    let mut source = MemoryArray::from_vec((0..2000u64).map(|v| v * 31).collect());
    let mut dest = MappedHugeArray::<u64, AnonymousMap>::anonymous(2000, &small_config()).unwrap();

    dest.copy_from(&mut source).unwrap();

    assert_eq!(collect(&mut dest), source.as_slice());
}

#[test]
fn test_copy_mapped_into_memory() {
    let mut source = MappedHugeArray::<u64, AnonymousMap>::anonymous(1234, &small_config()).unwrap();
    fill(&mut source);
    let mut dest = MemoryArray::<u64>::new(1234).unwrap();

    dest.copy_from(&mut source).unwrap();

    assert_eq!(dest.as_slice(), collect(&mut source).as_slice());
}

#[test]
fn test_copy_between_file_and_anonymous() {
    let temp_dir = TempDir::new().unwrap();
    let config = small_config();
    let mut source =
        MappedHugeArray::<u64, MappedFile>::create(&temp_dir.path().join("source.bin"), 900, &config)
            .unwrap();
    fill(&mut source);

    let mut dest = MappedHugeArray::<u64, AnonymousMap>::anonymous(900, &config).unwrap();
    dest.copy_from(&mut source).unwrap();

    assert_eq!(collect(&mut dest), collect(&mut source));
    source.release().unwrap();
    dest.release().unwrap();
}

#[test]
fn test_copy_into_longer_destination_keeps_tail() {
    let mut source = MemoryArray::from_vec(vec![1u64, 2, 3]);
    let mut dest = MemoryArray::from_vec(vec![9u64; 5]);

    dest.copy_from(&mut source).unwrap();

    assert_eq!(dest.as_slice(), &[1, 2, 3, 9, 9]);
}

#[test]
fn test_copy_into_shorter_destination_fails() {
    let mut source = MemoryArray::from_vec(vec![1u64; 10]);
    let mut dest = MappedHugeArray::<u64, AnonymousMap>::anonymous(4, &small_config()).unwrap();

    let result = dest.copy_from(&mut source);

    assert!(matches!(
        result,
        Err(HugeArrayError::IndexOutOfRange { index: 4, len: 4 })
    ));
}
