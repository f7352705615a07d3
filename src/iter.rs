//! Stack-free traversal.
//!
//! Every traversal order is produced by the same walk: a cursor remembers the node it just left
//! (`previous`) and the node it is standing on (`current`). Comparing `previous` against the
//! links of `current` tells the walk how it got there:
//!
//! ```text
//!          parent
//!            |        previous == parent        => first arrival, go down
//!         current
//!         /     \     previous == first child   => back from the first subtree
//!     first    second previous == second child  => back from the second subtree, go up
//! ```
//!
//! In-order and pre-order take the lesser child as "first"; reverse order mirrors them by taking
//! the greater child first. Only the moment a value is emitted differs between the orders. No
//! recursion and no auxiliary stack is used, just the parent links stored in every node.

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::node::{Link, Node};

/// The order in which a traversal visits the values of a [`Tree`][crate::Tree].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Ascending: lesser subtree, node, greater subtree.
    InOrder,
    /// Structural: node, lesser subtree, greater subtree. Replaying this order into an empty tree
    /// reproduces the same shape.
    PreOrder,
    /// Descending: greater subtree, node, lesser subtree.
    ReverseOrder,
}

/// The `previous`/`current` pair driving a walk, plus the depth of `current` (the root has a
/// depth of 1).
pub(crate) struct Cursor<T> {
    order: Order,
    previous: Link<T>,
    current: Link<T>,
    depth: usize,
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            previous: self.previous,
            current: self.current,
            depth: self.depth,
        }
    }
}

impl<T> Cursor<T> {
    pub(crate) fn new(order: Order, root: Link<T>) -> Self {
        Self {
            order,
            previous: Link::NONE,
            current: root,
            depth: usize::from(root.is_some()),
        }
    }

    /// Walks until the next node to emit and returns it with its depth. Returns `None` once the
    /// walk has climbed back out past the root.
    ///
    /// # Safety
    ///
    /// Every node reachable from the root this cursor was created with must be live, and no node
    /// may be mutated or freed between the creation of the cursor and this call.
    pub(crate) unsafe fn advance(&mut self) -> Option<(NonNull<Node<T>>, usize)> {
        while let Some(ptr) = self.current.0 {
            let node = &*ptr.as_ptr();
            let (first, second) = match self.order {
                Order::InOrder | Order::PreOrder => (node.lesser, node.greater),
                Order::ReverseOrder => (node.greater, node.lesser),
            };

            let from_parent = self.previous == node.parent;
            let from_first = !from_parent && first.is_some() && self.previous == first;
            let depth = self.depth;

            let emit = match self.order {
                Order::PreOrder => from_parent,
                Order::InOrder | Order::ReverseOrder => {
                    from_first || (from_parent && first.is_none())
                }
            };

            self.previous = Link(Some(ptr));
            self.current = if from_parent && first.is_some() {
                self.depth += 1;
                first
            } else if (from_parent || from_first) && second.is_some() {
                self.depth += 1;
                second
            } else {
                self.depth -= 1;
                node.parent
            };

            if emit {
                return Some((ptr, depth));
            }
        }
        None
    }
}

/// A lazy traversal over the values of a [`Tree`][crate::Tree], created by
/// [`Tree::in_order`][crate::Tree::in_order], [`Tree::pre_order`][crate::Tree::pre_order],
/// [`Tree::reverse_order`][crate::Tree::reverse_order] or [`Tree::traverse`][crate::Tree::traverse].
///
/// The iterator borrows the tree, so the tree cannot be changed until the iterator is dropped.
pub struct Iter<'a, T> {
    cursor: Cursor<T>,
    remaining: usize,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    /// `len` must be the number of nodes reachable from `root`, and the nodes must stay untouched
    /// for `'a`.
    pub(crate) fn new(order: Order, root: Link<T>, len: usize) -> Self {
        Self {
            cursor: Cursor::new(order, root),
            remaining: len,
            marker: PhantomData,
        }
    }

    /// The order this traversal emits values in.
    pub fn order(&self) -> Order {
        self.cursor.order
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        // SAFETY: An `Iter` is only created from `&'a Tree`, so every node stays live and
        // unmodified for `'a`: the tree can't be mutated or dropped while the borrow exists.
        let (node, _depth) = unsafe { self.cursor.advance() }?;
        self.remaining -= 1;
        // SAFETY: See above. The returned reference can't outlive the tree borrow.
        Some(unsafe { &(*node.as_ptr()).value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
