#![cfg(test)]

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::error::ErrorKind;
use crate::util::panic::assert_panics;
use crate::util::result::KindExt;

#[test]
fn test_put_fills_first_hole() {
    let (a, b, c, d) = ("a", "b", "c", "d");
    let mut fa = FixedArray::new(4);

    assert_eq!(fa.put(&a), Ok(0));
    assert_eq!(fa.put(&b), Ok(1));
    assert_eq!(fa.put(&c), Ok(2));

    assert!(std::ptr::eq(fa.unset(1).unwrap(), &b));
    assert_eq!(fa.put(&d), Ok(1), "Put should fill the hole rather than the next free slot.");
    assert!(std::ptr::eq(*fa.find_first(&&d).unwrap(), &d));
    assert_eq!(fa.count(), 3);
    assert_eq!(fa.get(3), None);
}

#[test]
fn test_put_when_full() {
    let mut fa = FixedArray::new(2);
    assert_eq!(fa.put(1), Ok(0));
    assert_eq!(fa.put(2), Ok(1));
    assert!(fa.is_full());

    assert_eq!(fa.put(3), Err(3), "A full table should hand the value back.");
    assert_eq!(fa.count(), 2);
    assert_eq!(fa.to_string(), "[1, 2]");
}

#[test]
fn test_slot_operations() {
    let mut fa = FixedArray::new(3);

    assert_eq!(fa.get(0), None, "New slots should be empty.");
    fa.set(0, 'x');
    assert_eq!(fa.get(0), Some(&'x'));

    assert_eq!(fa.swap(0, 'y'), Some('x'));
    assert_eq!(fa.swap(1, 'z'), None, "Swapping into an empty slot should return nothing.");
    assert_eq!(fa.unset(1), Some('z'));
    assert_eq!(fa.unset(1), None, "Unsetting an empty slot is not an error.");

    if let Some(value) = fa.get_mut(0) {
        *value = 'w';
    }
    assert_eq!(fa.get(0), Some(&'w'));
    assert_eq!(fa.to_string(), "[w, _, _]");
}

#[test]
fn test_boundary_errors() {
    let mut fa = FixedArray::<i32>::new(4);

    for index in [4, 5, 73] {
        assert_eq!(fa.try_get(index).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(fa.try_get_mut(index).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(fa.try_set(index, 1), Err(IndexOutOfBounds { index, len: 4 }));
        assert_eq!(fa.try_unset(index).err_kind(), Some(ErrorKind::OutOfRange));
        assert_eq!(fa.try_swap(index, 1).err_kind(), Some(ErrorKind::OutOfRange));
    }
    assert_eq!(fa.count(), 0, "Failed operations shouldn't change any slot.");

    assert_panics!({ fa.get(4) });
    assert_panics!({ fa.set(4, 1) });
    assert_panics!({ fa.unset(4) });
}

#[test]
fn test_create_errors() {
    assert_eq!(
        FixedArray::<i32>::try_new(0).err_kind(),
        Some(ErrorKind::InvalidArgument)
    );
    assert_eq!(
        FixedArray::<u64>::try_new(usize::MAX).err_kind(),
        Some(ErrorKind::OutOfMemory)
    );
    assert_panics!({ FixedArray::<i32>::new(0) });
}

#[test]
fn test_search() {
    let (a, b, equal_to_a) = (10, 20, 10);
    let mut fa = FixedArray::new(4);
    fa.set(1, &a);
    fa.set(3, &b);

    assert_eq!(fa.position_first(&&b), Some(3));
    assert_eq!(fa.position_first(&&equal_to_a), None, "Identity isn't equality.");
    assert!(std::ptr::eq(*fa.find_first(&&a).unwrap(), &a));
    assert_eq!(fa.find_first(&&equal_to_a).err_kind(), Some(ErrorKind::InvalidArgument));

    assert_eq!(
        fa.position_first_by(&(), |slot, _| slot.is_none()),
        Some(0),
        "Predicates should see empty slots too."
    );
    assert_eq!(fa.find_first_by(&15, |slot, min| slot.is_some_and(|v| *v > min)), Ok(Some(&&b)));
    assert_eq!(fa.find_first_by(&50, |slot, min| slot.is_some_and(|v| *v > min)), Err(NotFound));

    assert!(std::ptr::eq(fa.remove_first(&&a).unwrap(), &a));
    assert_eq!(fa.get(1), None, "Removal should empty the slot in place.");
    assert!(fa.get(3).is_some(), "Other slots should be unaffected.");
    assert_eq!(fa.remove_first(&&a), Err(NotFound));

    assert_eq!(fa.remove_first_by(&(), |slot, _| slot.is_some()), Ok(Some(&b)));
    assert_eq!(fa.count(), 0);
}

#[test]
fn test_iteration() {
    let mut fa = FixedArray::new(5);
    fa.set(0, 1);
    fa.set(2, 3);
    fa.set(4, 5);

    assert!(fa.iter().eq([(0, &1), (2, &3), (4, &5)]), "Only occupied slots should be yielded.");
    assert!(fa.iter().rev().map(|(i, _)| i).eq([4, 2, 0]));

    for (index, value) in fa.iter_mut() {
        *value += index as i32;
    }

    let mut visited = Vec::new();
    fa.for_each(|value| visited.push(*value));
    assert_eq!(visited, [1, 5, 9]);

    fa.for_each_mut(|value| *value = 0);
    assert!(fa.iter().all(|(_, value)| *value == 0));

    assert!(fa.into_iter().map(|(i, _)| i).eq([0, 2, 4]));
}

#[test]
fn test_drop_and_clear() {
    let counter = CountedDrop::new();
    let mut fa = FixedArray::new(6);
    for i in [0, 2, 3, 5] {
        fa.set(i, counter.clone());
    }

    fa.set(0, counter.clone());
    assert_eq!(counter.drops(), 1, "Set should drop the previous value.");

    let mut disposed = Vec::new();
    fa.clear_with(|value| disposed.push(value));
    assert_eq!(disposed.len(), 4);
    assert_eq!(counter.drops(), 1, "Disposed values are owned by the disposer.");
    drop(disposed);
    assert_eq!(counter.drops(), 5);
    assert_eq!(fa.count(), 0);

    fa.set(1, counter.clone());
    fa.set(4, counter.clone());
    fa.clear();
    assert_eq!(counter.drops(), 7);

    fa.set(1, counter.clone());
    drop(fa);
    assert_eq!(counter.drops(), 8);
}

#[test]
fn test_release() {
    let counter = CountedDrop::new();
    let mut fa = FixedArray::new(3);
    fa.set(0, counter.clone());
    fa.set(2, counter.clone());

    let mut disposed = 0;
    fa.release_with(|value| {
        disposed += 1;
        drop(value);
    });
    assert_eq!(disposed, 2, "Every occupied slot should be passed to the disposer.");
    assert_eq!(counter.drops(), 2);

    let mut fa = FixedArray::new(2);
    fa.set(1, counter.clone());
    fa.release();
    assert_eq!(counter.drops(), 3);

    let mut fa = FixedArray::new(4);
    for _ in 0..4 {
        assert!(fa.put(counter.clone()).is_ok());
    }
    let mut iter = fa.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.drops(), 7, "Dropping the iterator should drop the remainder.");
}

#[test]
fn test_zst_support() {
    let mut fa = FixedArray::new(5);
    for i in 0..5 {
        assert_eq!(fa.put(ZeroSizedType), Ok(i));
    }
    assert!(fa.is_full());
    assert_eq!(fa.unset(2), Some(ZeroSizedType));
    assert_eq!(fa.put(ZeroSizedType), Ok(2));
}

#[test]
fn test_clone_and_equality() {
    let mut fa = FixedArray::new(3);
    fa.set(1, String::from("one"));

    let clone = fa.clone();
    assert_eq!(fa, clone);
    assert_eq!(clone.size(), 3);

    fa.set(2, String::from("two"));
    assert_ne!(fa, clone);
    assert_eq!(clone.get(1).map(String::as_str), Some("one"));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn slots_are_independent(
            size in 1..32_usize,
            ops in proptest::collection::vec(
                (any::<prop::sample::Index>(), any::<Option<u8>>()),
                0..64,
            ),
        ) {
            let mut fa = FixedArray::new(size);
            let mut model = vec![None; size];

            for (index, value) in ops {
                let index = index.index(size);
                match value {
                    Some(value) => fa.set(index, value),
                    None => {
                        fa.unset(index);
                    },
                }
                model[index] = value;
            }

            prop_assert_eq!(fa.as_slots(), model.as_slice());
            prop_assert_eq!(fa.count(), model.iter().flatten().count());
        }
    }
}
