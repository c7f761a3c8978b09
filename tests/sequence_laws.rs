//! Property-based tests for the sequence adapters.
//!
//! These tests verify the laws every `Sequence` must satisfy, for both
//! backing stores and both ownership disciplines.

use proptest::prelude::*;
use seqkit::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generates up to `max_size` arbitrary elements.
fn elements_strategy(max_size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size)
}

/// Generates a non-empty vector together with a valid index into it.
fn elements_with_index() -> impl Strategy<Value = (Vec<i32>, usize)> {
    prop::collection::vec(any::<i32>(), 1..30).prop_flat_map(|elements| {
        let length = elements.len();
        (Just(elements), 0..length)
    })
}

fn ownership_strategy() -> impl Strategy<Value = Ownership> {
    prop_oneof![Just(Ownership::InPlace), Just(Ownership::CopyOnWrite)]
}

proptest! {
    // =========================================================================
    // Reads
    // =========================================================================

    #[test]
    fn prop_array_and_list_agree(elements in elements_strategy(30), ownership in ownership_strategy()) {
        let array = ArraySequence::from_slice(&elements, ownership).unwrap();
        let list = ListSequence::from_slice(&elements, ownership).unwrap();
        prop_assert_eq!(array.length(), elements.len());
        prop_assert_eq!(list.length(), elements.len());
        for (index, element) in elements.iter().enumerate() {
            prop_assert_eq!(array.get(index), Ok(*element));
            prop_assert_eq!(list.get(index), Ok(*element));
        }
    }

    // =========================================================================
    // Edit Laws
    // =========================================================================

    #[test]
    fn prop_set_then_get((elements, index) in elements_with_index(), value: i32, ownership in ownership_strategy()) {
        let array = ArraySequence::from_slice(&elements, ownership).unwrap().set(value, index).unwrap();
        let list = ListSequence::from_slice(&elements, ownership).unwrap().set(value, index).unwrap();

        let mut expected = elements;
        expected[index] = value;
        prop_assert_eq!(array.to_vec(), expected.clone());
        prop_assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn prop_append_then_remove_last_is_identity(elements in elements_strategy(30), value: i32, ownership in ownership_strategy()) {
        let array = ArraySequence::from_slice(&elements, ownership).unwrap();
        let restored = array.append(value).unwrap().remove_last().unwrap();
        prop_assert_eq!(restored.to_vec(), elements.clone());

        let list = ListSequence::from_slice(&elements, ownership).unwrap();
        let restored = list.append(value).unwrap().remove_last().unwrap();
        prop_assert_eq!(restored.to_vec(), elements);
    }

    #[test]
    fn prop_prepend_then_remove_first_is_identity(elements in elements_strategy(30), value: i32, ownership in ownership_strategy()) {
        let array = ArraySequence::from_slice(&elements, ownership).unwrap();
        let restored = array.prepend(value).unwrap().remove_first().unwrap();
        prop_assert_eq!(restored.to_vec(), elements.clone());

        let list = ListSequence::from_slice(&elements, ownership).unwrap();
        let restored = list.prepend(value).unwrap().remove_first().unwrap();
        prop_assert_eq!(restored.to_vec(), elements);
    }

    #[test]
    fn prop_insert_then_erase_is_identity((elements, index) in elements_with_index(), value: i32, ownership in ownership_strategy()) {
        let array = ArraySequence::from_slice(&elements, ownership).unwrap();
        let inserted = array.insert_at(value, index).unwrap();
        prop_assert_eq!(inserted.get(index), Ok(value));
        prop_assert_eq!(inserted.erase_at(index).unwrap().to_vec(), elements.clone());

        let list = ListSequence::from_slice(&elements, ownership).unwrap();
        let inserted = list.insert_at(value, index).unwrap();
        prop_assert_eq!(inserted.get(index), Ok(value));
        prop_assert_eq!(inserted.erase_at(index).unwrap().to_vec(), elements.clone());

        if ownership.is_copy_on_write() {
            prop_assert_eq!(array.to_vec(), elements.clone());
            prop_assert_eq!(list.to_vec(), elements);
        }
    }

    // =========================================================================
    // Ownership Laws
    // =========================================================================

    #[test]
    fn prop_copy_on_write_never_touches_receiver(elements in elements_strategy(30), value: i32) {
        let array = ArraySequence::from_slice(&elements, Ownership::CopyOnWrite).unwrap();
        let array_alias = array.alias();
        let _ = array.append(value).unwrap().map(|element| element.wrapping_mul(2)).unwrap();
        drop(array);
        prop_assert_eq!(array_alias.to_vec(), elements.clone());

        let list = ListSequence::from_slice(&elements, Ownership::CopyOnWrite).unwrap();
        let list_alias = list.alias();
        let _ = list.prepend(value).unwrap().filter(|element| *element > 0).unwrap();
        drop(list);
        prop_assert_eq!(list_alias.to_vec(), elements);
    }

    #[test]
    fn prop_in_place_visible_through_alias(elements in elements_strategy(30), value: i32) {
        let list = ListSequence::from_slice(&elements, Ownership::InPlace).unwrap();
        let alias = list.alias();
        list.append(value).unwrap();

        let mut expected = elements;
        expected.push(value);
        prop_assert_eq!(alias.to_vec(), expected);
    }

    // =========================================================================
    // Map, Filter, Reduce
    // =========================================================================

    #[test]
    fn prop_map_applies_function_pointwise(elements in elements_strategy(30), ownership in ownership_strategy()) {
        let function = |element: &i32| element.wrapping_add(7);
        let expected: Vec<i32> = elements.iter().map(function).collect();

        let array = ArraySequence::from_slice(&elements, ownership).unwrap().map(function).unwrap();
        let list = ListSequence::from_slice(&elements, ownership).unwrap().map(function).unwrap();
        prop_assert_eq!(array.length(), elements.len());
        prop_assert_eq!(array.to_vec(), expected.clone());
        prop_assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn prop_filter_keeps_exactly_matching_in_order(elements in elements_strategy(30), ownership in ownership_strategy()) {
        let predicate = |element: &i32| element % 3 == 0;
        let expected: Vec<i32> = elements.iter().copied().filter(|element| predicate(element)).collect();

        let array = ArraySequence::from_slice(&elements, ownership).unwrap().filter(predicate).unwrap();
        let list = ListSequence::from_slice(&elements, ownership).unwrap().filter(predicate).unwrap();
        prop_assert_eq!(array.to_vec(), expected.clone());
        prop_assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn prop_reduce_folds_in_index_order(elements in elements_strategy(30)) {
        let expected = elements
            .iter()
            .fold(0_i64, |accumulator, element| i64::from(*element) - accumulator);

        let array = ArraySequence::from_slice(&elements, Ownership::InPlace).unwrap();
        let list = ListSequence::from_slice(&elements, Ownership::CopyOnWrite).unwrap();
        let function = |element: &i32, accumulator: i64| i64::from(*element) - accumulator;
        prop_assert_eq!(array.reduce(function, 0), expected);
        prop_assert_eq!(list.reduce(function, 0), expected);
    }

    // =========================================================================
    // Sub-sequences and Concatenation
    // =========================================================================

    #[test]
    fn prop_sub_sequence_matches_slice(elements in prop::collection::vec(any::<i32>(), 1..30), start_seed: usize, end_seed: usize) {
        let length = elements.len();
        let start = start_seed % length;
        let end = start + 1 + end_seed % (length - start);

        let array = ArraySequence::from_slice(&elements, Ownership::CopyOnWrite).unwrap();
        let list = ListSequence::from_slice(&elements, Ownership::InPlace).unwrap();
        prop_assert_eq!(array.get_sub_sequence(start, end).unwrap().to_vec(), elements[start..end].to_vec());
        prop_assert_eq!(list.get_sub_sequence(start, end).unwrap().to_vec(), elements[start..end].to_vec());
    }

    #[test]
    fn prop_concat_preserves_order(left in elements_strategy(20), right in elements_strategy(20), ownership in ownership_strategy()) {
        let mut expected = left.clone();
        expected.extend_from_slice(&right);

        let joined = ListSequence::from_slice(&left, ownership).unwrap()
            .concat(&ListSequence::from_slice(&right, ownership).unwrap())
            .unwrap();
        prop_assert_eq!(joined.to_vec(), expected.clone());

        let joined = ArraySequence::from_slice(&left, ownership).unwrap()
            .concat(&ArraySequence::from_slice(&right, ownership).unwrap())
            .unwrap();
        prop_assert_eq!(joined.to_vec(), expected);
    }

    #[test]
    fn prop_cross_kind_copy_preserves_contents(elements in elements_strategy(30)) {
        let list = ListSequence::from_slice(&elements, Ownership::InPlace).unwrap();
        let array = ArraySequence::from_sequence(&list, Ownership::InPlace).unwrap();
        let back = ListSequence::from_sequence(&array, Ownership::CopyOnWrite).unwrap();
        prop_assert_eq!(array.to_vec(), elements.clone());
        prop_assert_eq!(back.to_vec(), elements);
    }
}
