#![cfg(test)]

use std::iter;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::error::ErrorKind;
use crate::util::panic::assert_panics;
use crate::util::result::KindExt;

#[test]
fn test_insert_and_remove_head() {
    let values = [42, 3, 7, 13, 6];
    let eight = 8;
    let mut list = LinkedList::new();

    for (i, value) in values.iter().enumerate() {
        assert_eq!(list.push(value), i, "Push should return the index of the new element.");
    }
    list.verify_double_links();

    assert_eq!(list.insert(3, &eight), 3);
    list.verify_double_links();
    assert_eq!(list.get(3), &&8);
    assert!(std::ptr::eq(*list.get(3), &eight));
    assert_eq!(list.len(), 6);
    assert_eq!(list.get(4), &&13);

    assert_eq!(list.remove(0), &42);
    list.verify_double_links();
    assert_eq!(list.len(), 5);
    assert_eq!(list.get(0), &&3);
    assert_eq!(list.front(), Some(&&3));
    assert_eq!(list.back(), Some(&&6));
}

#[test]
fn test_insert_positions() {
    let mut list = LinkedList::new();
    assert_eq!(list.insert(0, 'c'), 0, "Inserting into an empty list should work at 0.");
    assert_eq!(list.insert(0, 'a'), 0);
    assert_eq!(list.insert(2, 'e'), 2);
    assert_eq!(list.insert(1, 'b'), 1);
    assert_eq!(list.insert(3, 'd'), 3);
    list.verify_double_links();

    assert!(list.iter().eq(['a', 'b', 'c', 'd', 'e'].iter()));
    assert!(list.iter().rev().eq(['e', 'd', 'c', 'b', 'a'].iter()));
}

#[test]
fn test_remove_positions() {
    let mut list: LinkedList<_> = (0..7).collect();

    assert_eq!(list.remove(6), 6, "Removing the tail should work.");
    assert_eq!(list.remove(0), 0, "Removing the head should work.");
    list.verify_double_links();
    assert_eq!(list.remove(1), 2, "Removing near the head should work.");
    assert_eq!(list.remove(2), 4, "Removing near the tail should work.");
    list.verify_double_links();
    assert!(list.iter().eq(&[1, 3, 5]));

    assert_eq!(list.remove(1), 3);
    assert_eq!(list.remove(1), 5);
    assert_eq!(list.remove(0), 1);
    assert!(list.is_empty());
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);
}

#[test]
fn test_boundary_errors() {
    let mut list: LinkedList<i32> = LinkedList::new();

    assert_eq!(list.try_get(0), Err(IndexOutOfBounds { index: 0, len: 0 }));
    assert_eq!(list.try_remove(0).err_kind(), Some(ErrorKind::OutOfRange));
    assert_eq!(list.try_insert(1, 5).err_kind(), Some(ErrorKind::OutOfRange));
    assert!(list.is_empty(), "Failed inserts shouldn't change the list.");

    list.extend([1, 2, 3]);
    for index in [3, 4, 73] {
        assert_eq!(list.try_get(index).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(list.try_get_mut(index).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(list.try_set(index, 0).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(list.try_swap(index, 0).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(list.try_remove(index).err_kind(), Some(ErrorKind::OutOfRange));
    }
    for index in [4, 5, 73] {
        assert_eq!(list.try_insert(index, 0).err_kind(), Some(ErrorKind::OutOfRange));
    }
    assert_eq!(list.try_insert(3, 4), Ok(3), "Inserting at len should append.");
    list.verify_double_links();

    assert_panics!({ list.get(4) });
    assert_panics!({ list.insert(6, 0) });
    assert_panics!({ list.remove(4) });
    assert_panics!({ list[4] });
}

#[test]
fn test_seek_from_both_ends() {
    let mut list: LinkedList<_> = (0..100).collect();

    for i in 0..100 {
        assert_eq!(list[i], i, "Index should find the right node from either end.");
    }

    list.set(10, 1000);
    list[90] = 9000;
    assert_eq!(list.swap(50, 5000), 50);
    *list.get_mut(0) += 1;

    assert_eq!(list.get(10), &1000);
    assert_eq!(list.get(90), &9000);
    assert_eq!(list.get(50), &5000);
    assert_eq!(list.get(0), &1);
    list.verify_double_links();
}

#[test]
fn test_push_and_pop() {
    let mut list = LinkedList::new();
    list.push_back(2);
    list.push_front(1);
    list.push_back(3);
    list.verify_double_links();

    *list.front_mut().unwrap() *= 10;
    *list.back_mut().unwrap() *= 10;
    assert!(list.iter().eq(&[10, 2, 30]));

    assert_eq!(list.pop_front(), Some(10));
    assert_eq!(list.pop_back(), Some(30));
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_front(), None);
    assert_eq!(list.pop_back(), None);
    assert_eq!(list.len(), 0);

    list.push_front(4);
    assert_eq!(list.front(), list.back(), "A single node is both head and tail.");
}

#[test]
fn test_search() {
    let (a, b, c, equal_to_b) = (1, 2, 3, 2);
    let mut list: LinkedList<&i32> = [&a, &b, &c, &b].into_iter().collect();

    assert_eq!(list.position_first(&&b), Some(1));
    assert_eq!(list.position_first(&&equal_to_b), None);
    assert!(std::ptr::eq(*list.find_first(Some(&&c)).unwrap(), &c));
    assert_eq!(
        list.find_first(Some(&&equal_to_b)),
        Err(SearchError::NotFound(NotFound))
    );
    assert!(list.find_first(None).unwrap_err().is_missing_probe());
    assert_eq!(list.remove_first(None).err_kind(), Some(ErrorKind::InvalidArgument));

    assert!(std::ptr::eq(list.remove_first(Some(&&b)).unwrap(), &b));
    assert_eq!(list.len(), 3);
    assert_eq!(list.position_first(&&b), Some(2), "Only the first match should be removed.");
    list.verify_double_links();

    assert_eq!(list.find_first_by(&1, |item, min| **item > *min), Ok(&&c));
    assert_eq!(list.position_first_by(&5, |item, max| **item < *max), Some(0));
    assert_eq!(list.remove_first_by(&10, |item, min| **item > *min), Err(NotFound));
    assert_eq!(list.remove_first_by(&2, |item, target| **item == *target), Ok(&b));
    assert!(list.iter().eq([&&a, &&c]));
}

#[test]
fn test_visit_and_iterate() {
    let mut list: LinkedList<_> = (1..=5).collect();

    let mut visited = Vec::new();
    list.for_each(|item| visited.push(*item));
    assert_eq!(visited, [1, 2, 3, 4, 5], "Visiting should happen from head to tail.");

    list.for_each_mut(|item| *item *= 2);
    assert!(list.iter().eq(&[2, 4, 6, 8, 10]));

    for item in list.iter_mut().rev().take(2) {
        *item = 0;
    }
    assert!(list.iter().eq(&[2, 4, 6, 0, 0]));

    let mut iter = list.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next_back(), Some(&0));
    assert_eq!(iter.len(), 3);
    assert!(iter.eq(&[4, 6, 0]));

    let mut into_iter = list.into_iter();
    assert_eq!(into_iter.next_back(), Some(0));
    assert_eq!(into_iter.next(), Some(2));
    assert!(into_iter.eq([4, 6, 0]));
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let list: LinkedList<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    drop(list);
    assert_eq!(counter.drops(), 10, "10 elements should have been dropped.");

    let counter = CountedDrop::new();
    let mut list: LinkedList<_> = iter::repeat_with(|| counter.clone()).take(10).collect();
    list.set(4, counter.clone());
    assert_eq!(counter.drops(), 1, "Set should drop the previous element.");

    let removed = list.remove(5);
    assert_eq!(counter.drops(), 1, "Remove should hand the element back, not drop it.");
    drop(removed);

    list.release();
    assert_eq!(counter.drops(), 11);

    let mut list: LinkedList<_> = iter::repeat_with(|| counter.clone()).take(4).collect();
    drop(list.pop_front());
    let mut iter = list.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.drops(), 15, "Dropping the iterator should drop the remainder.");
}

#[test]
fn test_failed_insert_returns_value() {
    let counter = CountedDrop::new();
    let mut list = LinkedList::new();

    let result = list.try_insert(3, counter.clone());
    assert_eq!(result.err_kind(), Some(ErrorKind::OutOfRange));
    assert_eq!(counter.drops(), 0, "A failed insert shouldn't drop the value.");
    assert!(list.is_empty());

    let value = result.unwrap_err().into_value();
    assert_eq!(list.try_push(value).ok(), Some(0));

    let rejected = list.try_insert(5, counter.clone()).unwrap_err();
    assert_eq!(rejected.error, IndexOutOfBounds { index: 5, len: 1 }.into());
    assert_eq!(counter.drops(), 0);
    assert_eq!(list.len(), 1, "A failed insert shouldn't change the length.");
    list.verify_double_links();

    drop(rejected);
    assert_eq!(counter.drops(), 1, "The rejected value is owned by the caller.");
    drop(list);
    assert_eq!(counter.drops(), 2);
}

#[test]
fn test_release_with() {
    let counter = CountedDrop::new();
    let list: LinkedList<_> = iter::repeat_with(|| counter.clone()).take(5).collect();

    let mut disposed = 0;
    list.release_with(|item| {
        disposed += 1;
        drop(item);
    });

    assert_eq!(disposed, 5, "Every element should be passed to the disposer.");
    assert_eq!(counter.drops(), 5);
}

#[test]
fn test_zst_support() {
    let mut list = LinkedList::new();
    for i in 0..10 {
        assert_eq!(list.push(ZeroSizedType), i);
    }
    assert_eq!(list.remove(5), ZeroSizedType);
    assert_eq!(list.len(), 9);
    list.verify_double_links();
}

#[test]
fn test_clone_equality_and_format() {
    let list: LinkedList<_> = [1, 2, 3].into_iter().collect();
    let mut clone = list.clone();
    assert_eq!(list, clone);
    clone.verify_double_links();

    clone.push_back(4);
    assert_ne!(list, clone);

    assert_eq!(list.to_string(), "(1, 2, 3)");
    assert_eq!(LinkedList::<i32>::new().to_string(), "()");
    assert_eq!(LinkedList::<i32>::default(), LinkedList::new());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn insert_then_remove_restores(
            values in proptest::collection::vec(any::<i32>(), 0..40),
            index in any::<prop::sample::Index>(),
            extra in any::<i32>(),
        ) {
            let mut list: LinkedList<_> = values.iter().copied().collect();
            let index = index.index(values.len() + 1);

            prop_assert_eq!(list.insert(index, extra), index);
            list.verify_double_links();
            prop_assert_eq!(list[index], extra);
            prop_assert_eq!(list.len(), values.len() + 1);

            prop_assert_eq!(list.remove(index), extra);
            list.verify_double_links();
            prop_assert!(list.iter().eq(values.iter()));
        }

        #[test]
        fn matches_a_model(
            ops in proptest::collection::vec(
                (any::<bool>(), any::<prop::sample::Index>(), any::<u8>()),
                0..64,
            ),
        ) {
            let mut list = LinkedList::new();
            let mut model = Vec::new();

            for (insert, index, value) in ops {
                if insert || model.is_empty() {
                    let index = index.index(model.len() + 1);
                    list.insert(index, value);
                    model.insert(index, value);
                } else {
                    let index = index.index(model.len());
                    prop_assert_eq!(list.remove(index), model.remove(index));
                }
            }

            list.verify_double_links();
            prop_assert!(list.iter().eq(model.iter()));
        }
    }
}
