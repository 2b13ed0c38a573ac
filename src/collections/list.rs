// ============================================================================
// reactive-list - ReactiveList
// An ordered collection with pull-based tracking and push-based change events
// ============================================================================
//
// Two independent notification channels hang off the list:
//
// 1. A Dependency: tracked computations that read the whole sequence re-run
//    whenever the list changes (invalidation, not value diffing).
// 2. An Emitter<ListChange>: subscribers receive a typed description of each
//    structural edit, detailed enough to patch a derived view in place.
//
// Every mutation finishes updating state before touching either channel, in
// the fixed order invalidate-then-emit, so callbacks that re-enter the list
// always observe consistent post-mutation state.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collections::change::ListChange;
use crate::events::emitter::{Emitter, Listenable};
use crate::primitives::dependency::Dependency;

// =============================================================================
// LIST ERROR
// =============================================================================

/// Error returned when an index argument is outside an operation's range.
///
/// Lower-bound violations cannot occur (indices are `usize`); the two
/// variants identify which upper bound was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The index does not name an existing element (valid range `0..len`).
    IndexOutOfBounds { index: usize, len: usize },

    /// The insertion point is past the end of the list (valid range
    /// `0..=len`).
    InsertOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for list of length {}", index, len)
            }
            ListError::InsertOutOfBounds { index, len } => {
                write!(
                    f,
                    "insertion index {} out of bounds for list of length {}",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for ListError {}

// =============================================================================
// REACTIVE LIST
// =============================================================================

struct ListInner<T: 'static> {
    /// The backing sequence. Mutation borrows are always released before
    /// either notification channel runs.
    items: RefCell<Vec<T>>,

    /// Pull channel: tracked computations registered by whole-sequence reads
    dep: Dependency,

    /// Push channel: structural change subscribers
    changed: Emitter<ListChange<T>>,
}

/// An ordered, observable collection.
///
/// `ReactiveList` is a cheap-to-clone handle; clones share the same list.
/// Reads of the whole sequence made inside a tracked computation (an
/// [`effect`](crate::effect())) register that computation, and every mutation
/// re-runs whatever is registered. Independently, subscribers attached via
/// [`did_change`](ReactiveList::did_change) receive a [`ListChange`]
/// describing each structural edit.
///
/// # Example
///
/// ```
/// use reactive_list::{ListChange, ReactiveList};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let list = ReactiveList::from_vec(vec![10, 20, 30]);
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let seen_clone = seen.clone();
/// let _sub = list.did_change().subscribe(move |change: &ListChange<i32>| {
///     seen_clone.borrow_mut().push(change.clone());
/// });
///
/// list.append(40);
/// assert_eq!(
///     seen.borrow()[0],
///     ListChange::Append { items: vec![40], offset: 3 }
/// );
/// ```
pub struct ReactiveList<T: 'static> {
    inner: Rc<ListInner<T>>,
}

impl<T> Clone for ReactiveList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> ReactiveList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a list that adopts an existing vec as its backing sequence.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(ListInner {
                items: RefCell::new(items),
                dep: Dependency::new(),
                changed: Emitter::new(),
            }),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Number of items. A plain read: does not register a dependency.
    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    /// Check if the list holds no items. A plain read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the whole sequence for the duration of a closure.
    ///
    /// Registers the active tracked computation, if any. The closure must
    /// not mutate the list (doing so panics on the interior borrow).
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.inner.dep.track();
        f(&self.inner.items.borrow())
    }

    /// Visit every item in order.
    ///
    /// Registers the active tracked computation, if any.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        self.inner.dep.track();
        for item in self.inner.items.borrow().iter() {
            f(item);
        }
    }

    /// The attachment point for structural change subscribers.
    ///
    /// External code can subscribe through the returned handle but can
    /// never emit.
    pub fn did_change(&self) -> Listenable<ListChange<T>> {
        self.inner.changed.listenable()
    }

    /// Build an event and deliver it, but only when someone is subscribed;
    /// with no subscribers the payload is never constructed.
    fn emit_if_listened(&self, build: impl FnOnce() -> ListChange<T>) {
        if self.inner.changed.has_listeners() {
            let change = build();
            self.inner.changed.emit(&change);
        }
    }
}

impl<T: Clone> ReactiveList<T> {
    /// Get a clone of the item at `index`. A plain read: per-index access
    /// does not register a dependency (tracking is whole-sequence only).
    pub fn get(&self, index: usize) -> Result<T, ListError> {
        let items = self.inner.items.borrow();
        match items.get(index) {
            Some(item) => Ok(item.clone()),
            None => Err(ListError::IndexOutOfBounds {
                index,
                len: items.len(),
            }),
        }
    }

    /// Clone the whole sequence out. Registers the active tracked
    /// computation, if any.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.dep.track();
        self.inner.items.borrow().clone()
    }

    /// Iterate over a snapshot of the sequence. Registers the active
    /// tracked computation, if any.
    pub fn iter_snapshot(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================
    //
    // Shape of every mutation:
    //   1. mutate the backing vec inside a borrow scope, then release it
    //   2. invalidate the dependency (registered computations re-run here)
    //   3. if anyone is subscribed, build and emit the change event
    // Notifications only fire when state actually changed.
    // =========================================================================

    /// Swap the whole backing sequence for `new_items`, returning the old
    /// one.
    ///
    /// Always counts as a change, even when the contents compare equal: the
    /// list invalidates on structural identity, it does not diff values.
    pub fn replace(&self, new_items: Vec<T>) -> Vec<T> {
        let old_items = self.inner.items.replace(new_items);

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Replace {
            old_items: old_items.clone(),
            new_items: self.inner.items.borrow().clone(),
        });

        old_items
    }

    /// Insert one item at the front.
    pub fn prepend(&self, item: T) {
        self.inner.items.borrow_mut().insert(0, item);

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Prepend {
            items: vec![self.inner.items.borrow()[0].clone()],
            offset: 0,
        });
    }

    /// Insert a sequence of items at the front, order-preserving, as one
    /// edit with one notification cycle. No-op when `items` is empty.
    pub fn prepend_many(&self, items: Vec<T>) {
        if items.is_empty() {
            return;
        }
        let count = items.len();

        {
            let mut current = self.inner.items.borrow_mut();
            let tail = std::mem::replace(&mut *current, items);
            current.extend(tail);
        }

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Prepend {
            items: self.inner.items.borrow()[..count].to_vec(),
            offset: 0,
        });
    }

    /// Insert one item at the end.
    pub fn append(&self, item: T) {
        let offset = {
            let mut items = self.inner.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Append {
            items: vec![self.inner.items.borrow()[offset].clone()],
            offset,
        });
    }

    /// Insert a sequence of items at the end, order-preserving, as one edit
    /// with one notification cycle. No-op when `items` is empty.
    pub fn append_many(&self, items: Vec<T>) {
        if items.is_empty() {
            return;
        }
        let count = items.len();

        let offset = {
            let mut current = self.inner.items.borrow_mut();
            let offset = current.len();
            current.extend(items);
            offset
        };

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Append {
            items: self.inner.items.borrow()[offset..offset + count].to_vec(),
            offset,
        });
    }

    /// Remove and return the last item. No-op on an empty list.
    pub fn pop(&self) -> Option<T> {
        let (removed, offset) = {
            let mut items = self.inner.items.borrow_mut();
            let removed = items.pop()?;
            (removed, items.len())
        };

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Remove {
            items: vec![removed.clone()],
            offset,
        });

        Some(removed)
    }

    /// Remove up to `count` items from the tail, returning them in list
    /// order.
    ///
    /// Clamps rather than fails: asking for more than the list holds
    /// removes everything. No-op when the list is empty or `count` is zero.
    pub fn pop_many(&self, count: usize) -> Vec<T> {
        let (removed, offset) = {
            let mut items = self.inner.items.borrow_mut();
            if count == 0 || items.is_empty() {
                return Vec::new();
            }
            let new_len = items.len().saturating_sub(count);
            (items.split_off(new_len), new_len)
        };

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Remove {
            items: removed.clone(),
            offset,
        });

        removed
    }

    /// Remove and return the item at `index`.
    ///
    /// The bounds check is the single source of truth: on an empty list
    /// every index is out of range, and a failed check performs no
    /// notification of any kind.
    pub fn remove(&self, index: usize) -> Result<T, ListError> {
        let removed = {
            let mut items = self.inner.items.borrow_mut();
            if index >= items.len() {
                return Err(ListError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                });
            }
            items.remove(index)
        };

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Remove {
            items: vec![removed.clone()],
            offset: index,
        });

        Ok(removed)
    }

    /// Insert one item at `index`, shifting everything after it.
    /// Equivalent to `splice(index, 0, vec![item])`.
    pub fn insert(&self, index: usize, item: T) -> Result<(), ListError> {
        self.splice(index, 0, vec![item]).map(|_| ())
    }

    /// Remove `delete_count` items at `index` and insert `items` in their
    /// place, returning the removed run.
    ///
    /// `index` may be anywhere in `0..=len` (inserting at the end is
    /// legal); `delete_count` clamps to the items actually available. An
    /// empty `items` makes this a pure deletion. When nothing is removed
    /// and nothing inserted the whole call is a no-op with no
    /// notifications.
    ///
    /// When both sides are non-empty, subscribers see two events: the
    /// `Remove` first, then the insert-flavored event, both at `index`.
    pub fn splice(
        &self,
        index: usize,
        delete_count: usize,
        items: Vec<T>,
    ) -> Result<Vec<T>, ListError> {
        let inserted_count = items.len();

        let (removed, len_before) = {
            let mut current = self.inner.items.borrow_mut();
            let len_before = current.len();
            if index > len_before {
                return Err(ListError::InsertOutOfBounds {
                    index,
                    len: len_before,
                });
            }
            let delete_count = delete_count.min(len_before - index);
            if delete_count == 0 && inserted_count == 0 {
                return Ok(Vec::new());
            }
            let removed: Vec<T> = current.splice(index..index + delete_count, items).collect();
            (removed, len_before)
        };

        self.inner.dep.invalidate();
        if self.inner.changed.has_listeners() {
            if !removed.is_empty() {
                self.inner.changed.emit(&ListChange::Remove {
                    items: removed.clone(),
                    offset: index,
                });
            }
            if inserted_count > 0 {
                let inserted = self.inner.items.borrow()[index..index + inserted_count].to_vec();
                self.inner
                    .changed
                    .emit(&ListChange::inserted(inserted, index, len_before));
            }
        }

        Ok(removed)
    }

    /// Exchange the items at two positions.
    ///
    /// Both indices are checked before anything moves; a failed check
    /// leaves the list untouched. Unlike the no-op guards elsewhere, a swap
    /// always notifies, even when `index_a == index_b`.
    pub fn swap(&self, index_a: usize, index_b: usize) -> Result<(), ListError> {
        {
            let mut items = self.inner.items.borrow_mut();
            let len = items.len();
            if index_a >= len {
                return Err(ListError::IndexOutOfBounds { index: index_a, len });
            }
            if index_b >= len {
                return Err(ListError::IndexOutOfBounds { index: index_b, len });
            }
            items.swap(index_a, index_b);
        }

        self.inner.dep.invalidate();
        self.emit_if_listened(|| {
            let items = self.inner.items.borrow();
            // Wire contract: indexes reported as [b, a], each paired with
            // the value now at that position
            ListChange::Swap {
                items: [items[index_b].clone(), items[index_a].clone()],
                indexes: [index_b, index_a],
            }
        });

        Ok(())
    }

    /// Keep the first `len` items and remove the rest, returning the
    /// severed tail. No-op when `len` is at or past the current length.
    pub fn truncate(&self, len: usize) -> Vec<T> {
        let removed = {
            let mut items = self.inner.items.borrow_mut();
            if len >= items.len() {
                return Vec::new();
            }
            items.split_off(len)
        };

        self.inner.dep.invalidate();
        self.emit_if_listened(|| ListChange::Remove {
            items: removed.clone(),
            offset: len,
        });

        removed
    }

    /// Remove every item, returning them.
    pub fn clear(&self) -> Vec<T> {
        self.truncate(0)
    }
}

impl<T> Default for ReactiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ReactiveList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveList<T> {
    /// Non-tracking read, like any other debug formatting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self.inner.items.borrow();
        f.debug_struct("ReactiveList")
            .field("items", &*items)
            .field("len", &items.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn spy(list: &ReactiveList<i32>) -> (Rc<RefCell<Vec<ListChange<i32>>>>, crate::Subscription<ListChange<i32>>) {
        let seen: Rc<RefCell<Vec<ListChange<i32>>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let sub = list
            .did_change()
            .subscribe(move |change| seen_clone.borrow_mut().push(change.clone()));
        (seen, sub)
    }

    fn assert_invariant(list: &ReactiveList<i32>) {
        assert_eq!(list.len(), list.with_items(|items| items.len()));
    }

    #[test]
    fn starts_empty() {
        let list: ReactiveList<i32> = ReactiveList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_invariant(&list);
    }

    #[test]
    fn from_vec_adopts_items() {
        let list = ReactiveList::from_vec(vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Ok(1));
        assert_eq!(list.get(2), Ok(3));
        assert_invariant(&list);
    }

    #[test]
    fn from_iterator() {
        let list: ReactiveList<i32> = (1..=4).collect();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn clones_share_the_same_list() {
        let list = ReactiveList::from_vec(vec![1]);
        let alias = list.clone();

        alias.append(2);
        assert_eq!(list.to_vec(), vec![1, 2]);
    }

    #[test]
    fn get_out_of_bounds() {
        let list = ReactiveList::from_vec(vec![1, 2, 3]);
        assert_eq!(
            list.get(3),
            Err(ListError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn append_pop_round_trip() {
        let list = ReactiveList::from_vec(vec![1, 2]);

        list.append(7);
        assert_eq!(list.pop(), Some(7));
        assert_eq!(list.to_vec(), vec![1, 2]);
        assert_invariant(&list);
    }

    #[test]
    fn bulk_append_pop_round_trip() {
        let list = ReactiveList::from_vec(vec![1, 2]);

        list.append_many(vec![3, 4, 5]);
        assert_eq!(list.len(), 5);

        // Removed in list order
        assert_eq!(list.pop_many(3), vec![3, 4, 5]);
        assert_eq!(list.to_vec(), vec![1, 2]);
        assert_invariant(&list);
    }

    #[test]
    fn prepend_orders_items() {
        let list = ReactiveList::from_vec(vec![3]);

        list.prepend(2);
        list.prepend_many(vec![0, 1]);

        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
        assert_invariant(&list);
    }

    #[test]
    fn pop_on_empty_is_a_no_op() {
        let list: ReactiveList<i32> = ReactiveList::new();
        assert_eq!(list.pop(), None);
        assert_eq!(list.pop_many(3), Vec::<i32>::new());
        assert_invariant(&list);
    }

    #[test]
    fn pop_many_clamps_to_available() {
        let list = ReactiveList::from_vec(vec![1, 2, 3]);
        assert_eq!(list.pop_many(10), vec![1, 2, 3]);
        assert!(list.is_empty());
        assert_invariant(&list);
    }

    #[test]
    fn remove_returns_item() {
        let list = ReactiveList::from_vec(vec![1, 2, 3]);
        assert_eq!(list.remove(1), Ok(2));
        assert_eq!(list.to_vec(), vec![1, 3]);
        assert_invariant(&list);
    }

    #[test]
    fn remove_on_empty_is_out_of_range() {
        let list: ReactiveList<i32> = ReactiveList::new();
        assert_eq!(
            list.remove(0),
            Err(ListError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[test]
    fn insert_shifts_tail() {
        let list = ReactiveList::from_vec(vec![1, 3]);
        list.insert(1, 2).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 3]);

        // Insertion at the end is legal
        list.insert(3, 4).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);

        assert_eq!(
            list.insert(9, 9),
            Err(ListError::InsertOutOfBounds { index: 9, len: 4 })
        );
        assert_invariant(&list);
    }

    #[test]
    fn splice_removes_and_inserts() {
        let list = ReactiveList::from_vec(vec![0, 1, 2, 3, 4]);

        let removed = list.splice(1, 2, vec![10, 11, 12]).unwrap();
        assert_eq!(removed, vec![1, 2]);
        assert_eq!(list.to_vec(), vec![0, 10, 11, 12, 3, 4]);
        assert_eq!(list.len(), 6);
        assert_invariant(&list);
    }

    #[test]
    fn splice_clamps_delete_count() {
        let list = ReactiveList::from_vec(vec![0, 1, 2]);
        let removed = list.splice(1, 99, Vec::new()).unwrap();
        assert_eq!(removed, vec![1, 2]);
        assert_eq!(list.to_vec(), vec![0]);
        assert_invariant(&list);
    }

    #[test]
    fn splice_rejects_index_past_end() {
        let list = ReactiveList::from_vec(vec![0, 1, 2]);
        assert_eq!(
            list.splice(4, 0, vec![9]),
            Err(ListError::InsertOutOfBounds { index: 4, len: 3 })
        );
        assert_eq!(list.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn swap_exchanges_items() {
        let list = ReactiveList::from_vec(vec![10, 20, 30]);
        list.swap(0, 2).unwrap();
        assert_eq!(list.to_vec(), vec![30, 20, 10]);
        assert_invariant(&list);
    }

    #[test]
    fn swap_rejects_out_of_range_before_mutating() {
        let list = ReactiveList::from_vec(vec![10, 20, 30]);
        let (seen, _sub) = spy(&list);

        assert_eq!(
            list.swap(3, 0),
            Err(ListError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(list.to_vec(), vec![10, 20, 30]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn replace_swaps_backing_and_returns_old() {
        let list = ReactiveList::from_vec(vec![1, 2]);
        let old = list.replace(vec![7, 8, 9]);
        assert_eq!(old, vec![1, 2]);
        assert_eq!(list.to_vec(), vec![7, 8, 9]);
        assert_invariant(&list);
    }

    #[test]
    fn truncate_and_clear() {
        let list = ReactiveList::from_vec(vec![1, 2, 3, 4, 5]);

        assert_eq!(list.truncate(3), vec![4, 5]);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);

        // At or past the end: no-op
        assert_eq!(list.truncate(3), Vec::<i32>::new());
        assert_eq!(list.truncate(10), Vec::<i32>::new());

        assert_eq!(list.clear(), vec![1, 2, 3]);
        assert!(list.is_empty());
        assert_invariant(&list);
    }

    // =========================================================================
    // Event payloads
    // =========================================================================

    #[test]
    fn append_and_prepend_events() {
        let list = ReactiveList::from_vec(vec![1]);
        let (seen, _sub) = spy(&list);

        list.append(2);
        list.append_many(vec![3, 4]);
        list.prepend(0);
        list.prepend_many(vec![-2, -1]);

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::Append { items: vec![2], offset: 1 },
                ListChange::Append { items: vec![3, 4], offset: 2 },
                ListChange::Prepend { items: vec![0], offset: 0 },
                ListChange::Prepend { items: vec![-2, -1], offset: 0 },
            ]
        );
    }

    #[test]
    fn remove_flavored_events() {
        let list = ReactiveList::from_vec(vec![1, 2, 3, 4, 5]);
        let (seen, _sub) = spy(&list);

        list.pop();
        list.pop_many(2);
        list.remove(0).unwrap();
        list.truncate(0);

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::Remove { items: vec![5], offset: 4 },
                ListChange::Remove { items: vec![3, 4], offset: 2 },
                ListChange::Remove { items: vec![1], offset: 0 },
                ListChange::Remove { items: vec![2], offset: 0 },
            ]
        );
    }

    #[test]
    fn replace_event_carries_both_sequences() {
        let list = ReactiveList::from_vec(vec![1, 2]);
        let (seen, _sub) = spy(&list);

        list.replace(vec![3]);

        assert_eq!(
            *seen.borrow(),
            vec![ListChange::Replace {
                old_items: vec![1, 2],
                new_items: vec![3],
            }]
        );
    }

    #[test]
    fn splice_event_names_follow_offset() {
        let list = ReactiveList::from_vec(vec![0, 1, 2, 3, 4]);
        let (seen, _sub) = spy(&list);

        list.splice(0, 0, vec![10]).unwrap(); // front -> Prepend
        list.splice(6, 0, vec![11]).unwrap(); // end (len is 6 now) -> Append
        list.splice(2, 0, vec![12]).unwrap(); // middle -> Insert

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::Prepend { items: vec![10], offset: 0 },
                ListChange::Append { items: vec![11], offset: 6 },
                ListChange::Insert { items: vec![12], offset: 2 },
            ]
        );
    }

    #[test]
    fn splice_emits_remove_then_insert() {
        let list = ReactiveList::from_vec(vec![0, 1, 2, 3, 4]);
        let (seen, _sub) = spy(&list);

        list.splice(1, 2, vec![10, 11, 12]).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::Remove { items: vec![1, 2], offset: 1 },
                ListChange::Insert { items: vec![10, 11, 12], offset: 1 },
            ]
        );
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn swap_event_pairing_fixture() {
        let list = ReactiveList::from_vec(vec![10, 20, 30]);
        let (seen, _sub) = spy(&list);

        list.swap(0, 2).unwrap();

        assert_eq!(list.to_vec(), vec![30, 20, 10]);
        assert_eq!(
            *seen.borrow(),
            vec![ListChange::Swap {
                items: [10, 30],
                indexes: [2, 0],
            }]
        );
    }

    #[test]
    fn swap_of_same_index_still_emits() {
        let list = ReactiveList::from_vec(vec![10, 20]);
        let (seen, _sub) = spy(&list);

        list.swap(1, 1).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![ListChange::Swap {
                items: [20, 20],
                indexes: [1, 1],
            }]
        );
    }

    #[test]
    fn no_op_mutations_emit_nothing() {
        let list = ReactiveList::from_vec(vec![1, 2, 3]);
        let (seen, _sub) = spy(&list);

        list.splice(1, 0, Vec::new()).unwrap();
        list.pop_many(0);
        list.truncate(3);
        list.append_many(Vec::new());
        list.prepend_many(Vec::new());
        let _ = list.remove(5);
        let _ = list.swap(0, 9);

        assert!(seen.borrow().is_empty());
        assert_invariant(&list);
    }

    #[test]
    fn dropped_subscription_stops_events() {
        let list = ReactiveList::from_vec(vec![1]);
        let (seen, sub) = spy(&list);

        list.append(2);
        assert_eq!(seen.borrow().len(), 1);

        drop(sub);
        list.append(3);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn listener_can_read_the_list_mid_notification() {
        let list = ReactiveList::from_vec(vec![1, 2]);
        let observed_len = Rc::new(Cell::new(0));

        let reader = list.clone();
        let observed_clone = observed_len.clone();
        let _sub = list.did_change().subscribe(move |_| {
            // The mutation is complete by the time we run
            observed_clone.set(reader.len());
        });

        list.append(3);
        assert_eq!(observed_len.get(), 3);

        list.pop();
        assert_eq!(observed_len.get(), 2);
    }

    #[test]
    fn listener_can_mutate_the_list_reentrantly() {
        let list = ReactiveList::from_vec(vec![1]);
        let fired = Rc::new(Cell::new(false));

        let writer = list.clone();
        let fired_clone = fired.clone();
        let _sub = list.did_change().subscribe(move |change| {
            // Append exactly once in response to the first removal
            if matches!(change, ListChange::Remove { .. }) && !fired_clone.get() {
                fired_clone.set(true);
                writer.append(99);
            }
        });

        list.pop();
        assert_eq!(list.to_vec(), vec![99]);
        assert_invariant(&list);
    }
}
