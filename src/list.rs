extern crate alloc;

use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr;

/// A node in the recency list.
///
/// Contains a value and pointers to the neighbouring nodes. Sentinel nodes
/// leave `val` uninitialized.
pub(crate) struct Entry<T> {
    val: mem::MaybeUninit<T>,
    prev: *mut Entry<T>,
    next: *mut Entry<T>,
}

impl<T> Entry<T> {
    fn new(val: T) -> Self {
        Entry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    fn new_sigil() -> Self {
        Entry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Returns a reference to the stored value.
    ///
    /// # Safety
    ///
    /// Must only be called on non-sigil nodes.
    pub(crate) unsafe fn get_value(&self) -> &T {
        // SAFETY: the caller guarantees this is not a sentinel node
        unsafe { self.val.assume_init_ref() }
    }

    /// Returns a mutable reference to the stored value.
    ///
    /// # Safety
    ///
    /// Must only be called on non-sigil nodes.
    pub(crate) unsafe fn get_value_mut(&mut self) -> &mut T {
        // SAFETY: the caller guarantees this is not a sentinel node
        unsafe { self.val.assume_init_mut() }
    }

    /// Consumes a detached node and returns its value.
    ///
    /// # Safety
    ///
    /// Must only be called on non-sigil nodes that are no longer linked.
    pub(crate) unsafe fn into_value(self: Box<Self>) -> T {
        // SAFETY: the caller guarantees the value is initialized. `Entry` has no
        // `Drop` impl, so freeing the box afterwards does not drop `val` twice.
        unsafe { self.val.assume_init_read() }
    }
}

/// An unbounded doubly linked list ordered from most to least recently used.
///
/// Sentinel nodes at both ends keep every link operation branch-free. The
/// list never limits its own length: the byte budget is enforced by the
/// cache that owns it.
pub(crate) struct List<T> {
    len: usize,
    head: *mut Entry<T>,
    tail: *mut Entry<T>,
}

impl<T> List<T> {
    pub(crate) fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Entry::new_sigil()));
        let tail = Box::into_raw(Box::new(Entry::new_sigil()));

        // SAFETY: head and tail are freshly allocated and valid
        unsafe {
            (*head).next = tail;
            (*tail).prev = head;
        }

        List { len: 0, head, tail }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates a node for `v` and links it at the front.
    pub(crate) fn push_front(&mut self, v: T) -> *mut Entry<T> {
        let node = Box::into_raw(Box::new(Entry::new(v)));
        // SAFETY: node is newly allocated and not yet part of any list
        unsafe { self.attach(node) };
        self.len += 1;
        node
    }

    /// Returns the least recently used node without unlinking it.
    pub(crate) fn back(&self) -> Option<*mut Entry<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: tail is valid for the lifetime of the list
        Some(unsafe { (*self.tail).prev })
    }

    /// Unlinks and returns the least recently used node.
    pub(crate) fn pop_back(&mut self) -> Option<Box<Entry<T>>> {
        let node = self.back()?;
        // SAFETY: `back` only returns real nodes linked into this list
        unsafe {
            self.detach(node);
            self.len -= 1;
            Some(Box::from_raw(node))
        }
    }

    /// Moves a node to the front of the list.
    ///
    /// # Safety
    ///
    /// `node` must be a non-sigil node currently linked into this list.
    pub(crate) unsafe fn move_to_front(&mut self, node: *mut Entry<T>) {
        // SAFETY: head is valid and the caller guarantees node is linked here
        unsafe {
            if (*self.head).next == node {
                return;
            }
            self.detach(node);
            self.attach(node);
        }
    }

    /// Iterates from the most recently used node to the least.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        // SAFETY: head is valid for the lifetime of the list
        let first = unsafe { (*self.head).next };
        Iter {
            next: first,
            tail: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Drops every node, leaving the sentinels linked to each other.
    pub(crate) fn clear(&mut self) {
        while let Some(node) = self.pop_back() {
            // SAFETY: popped nodes are real, detached nodes
            drop(unsafe { node.into_value() });
        }
    }

    /// # Safety
    ///
    /// `node` must be a non-sigil node currently linked into this list.
    unsafe fn detach(&mut self, node: *mut Entry<T>) {
        // SAFETY: a linked node always has valid prev and next neighbours
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// # Safety
    ///
    /// `node` must be valid and not linked into any list.
    unsafe fn attach(&mut self, node: *mut Entry<T>) {
        // SAFETY: head is valid and the caller guarantees node is unlinked
        unsafe {
            (*node).next = (*self.head).next;
            (*node).prev = self.head;
            (*self.head).next = node;
            (*(*node).next).prev = node;
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: head and tail were allocated in `new` and are freed only here
        unsafe {
            drop(Box::from_raw(self.head));
            drop(Box::from_raw(self.tail));
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}

/// Borrowing iterator over list values, front to back.
pub(crate) struct Iter<'a, T> {
    next: *mut Entry<T>,
    tail: *mut Entry<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.next == self.tail {
            return None;
        }
        // SAFETY: every node between the sentinels is initialized, and the
        // shared borrow of the list keeps it alive and unmodified for 'a
        unsafe {
            let node = self.next;
            self.next = (*node).next;
            self.remaining -= 1;
            Some((*node).get_value())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn collect(list: &List<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = List::new();
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);
        assert_eq!(collect(&list), [30, 20, 10]);
    }

    #[test]
    fn test_pop_back_returns_oldest() {
        let mut list = List::new();
        assert!(list.pop_back().is_none());
        assert!(list.back().is_none());

        list.push_front(1);
        list.push_front(2);
        let node = list.pop_back().unwrap();
        assert_eq!(unsafe { node.into_value() }, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(collect(&list), [2]);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::new();
        let a = list.push_front(1);
        let _b = list.push_front(2);
        let c = list.push_front(3);

        unsafe { list.move_to_front(a) };
        assert_eq!(collect(&list), [1, 3, 2]);

        // already at the front
        unsafe { list.move_to_front(a) };
        assert_eq!(collect(&list), [1, 3, 2]);

        unsafe { list.move_to_front(c) };
        assert_eq!(collect(&list), [3, 1, 2]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_value_mutation_through_node() {
        let mut list = List::new();
        let node = list.push_front(String::from("test"));
        unsafe {
            (*node).get_value_mut().push_str("_modified");
            assert_eq!((*node).get_value(), "test_modified");
        }
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut list = List::new();
        for i in 0..5 {
            list.push_front(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert!(list.iter().next().is_none());

        list.push_front(42);
        assert_eq!(collect(&list), [42]);
    }

    #[test]
    fn test_drop_releases_values() {
        let tracker = Rc::new(());
        {
            let mut list = List::new();
            for _ in 0..4 {
                list.push_front(Rc::clone(&tracker));
            }
            let popped = list.pop_back().unwrap();
            drop(unsafe { popped.into_value() });
            assert_eq!(Rc::strong_count(&tracker), 4);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_iter_size_hint() {
        let mut list = List::new();
        list.push_front(1u32);
        list.push_front(2u32);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 2);
        iter.next();
        assert_eq!(iter.len(), 1);
    }
}
