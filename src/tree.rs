//! An unbalanced BST whose nodes keep a link to their parent so that every traversal can run
//! without recursion or an explicit stack.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree: Tree<i32> = [5, 3, 8, 1, 4].into_iter().collect();
//!
//! assert!(tree.contains(&4));
//! assert_eq!(tree.len(), 5);
//!
//! // Ascending, structural and descending orders.
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//! assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [5, 3, 1, 4, 8]);
//! assert_eq!(tree.reverse_order().copied().collect::<Vec<_>>(), [8, 5, 4, 3, 1]);
//!
//! // Removing a missing value isn't an error.
//! assert!(tree.remove(&3));
//! assert!(!tree.remove(&99));
//! assert_eq!(tree.len(), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::iter::{Cursor, Iter, Order};
use crate::node::{Link, Node};

/// The comparator used by [`Tree::new`]: the element type's own [`Ord`] implementation.
pub type OrdComparator<T> = fn(&T, &T) -> Ordering;

/// An unbalanced Binary Search Tree over values of type `T`, ordered by a comparator `C`.
///
/// Values that compare equal are all kept; a new value equal to an existing one is placed in
/// that node's greater subtree. No rebalancing is ever done, so inserting already sorted values
/// produces a tree as deep as it is long.
///
/// The tree is neither `Send` nor `Sync`.
pub struct Tree<T, C = OrdComparator<T>> {
    root: Link<T>,
    comparator: C,
    count: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T: Ord> Tree<T> {
    /// Generates a new, empty `Tree` ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Tree<T, C> {
    /// Generates a new, empty `Tree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    /// let mut tree: Tree<&str, _> = Tree::with_comparator(by_len);
    /// tree.extend(["ccc", "a", "bb"]);
    ///
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: Link::NONE,
            comparator,
            count: 0,
            marker: PhantomData,
        }
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Replaces the comparator. This is only allowed while the tree is empty since the values
    /// already stored were placed using the old ordering.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `comparator` is `None`, otherwise [`Error::InvalidState`]
    /// when the tree holds any value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, OrdComparator, Tree};
    ///
    /// let descending: OrdComparator<i32> = |a, b| b.cmp(a);
    ///
    /// let mut tree = Tree::new();
    /// tree.set_comparator(Some(descending)).unwrap();
    /// tree.add(1);
    /// tree.add(2);
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [2, 1]);
    ///
    /// let err = tree.set_comparator(Some(descending));
    /// assert_eq!(err, Err(Error::InvalidState { count: 2 }));
    /// ```
    pub fn set_comparator(&mut self, comparator: Option<C>) -> Result<()> {
        let Some(comparator) = comparator else {
            debug!("rejected missing comparator");
            return Err(Error::InvalidArgument("comparator must be present"));
        };
        if self.count != 0 {
            debug!("rejected comparator change on a tree of {} values", self.count);
            return Err(Error::InvalidState { count: self.count });
        }
        self.comparator = comparator;
        Ok(())
    }

    /// Removes every value from the tree.
    ///
    /// Nodes are released bottom-up by walking child and parent links, so clearing (or dropping)
    /// a tree never recurses no matter how deep it is.
    pub fn clear(&mut self) {
        let released = self.count;
        let mut current = self.root.take().0;
        while let Some(ptr) = current {
            // SAFETY: Every node reachable from the root is live and owned by this tree. Child
            // links are taken before descending so each node is visited for release only once its
            // subtrees are gone, and its parent link is read before it is freed.
            unsafe {
                let node = &mut *ptr.as_ptr();
                if let Some(lesser) = node.lesser.take().0 {
                    current = Some(lesser);
                } else if let Some(greater) = node.greater.take().0 {
                    current = Some(greater);
                } else {
                    current = node.parent.0;
                    drop(Node::free(ptr));
                }
            }
        }
        self.count = 0;
        if released != 0 {
            trace!("cleared {released} values");
        }
    }

    /// The values in ascending order. Same as [`Tree::iter`].
    pub fn in_order(&self) -> Iter<'_, T> {
        self.traverse(Order::InOrder)
    }

    /// The values in structural order: each node before its lesser subtree, then its greater
    /// subtree. Adding these values, in this order, to an empty tree with the same comparator
    /// rebuilds a tree of the same shape.
    pub fn pre_order(&self) -> Iter<'_, T> {
        self.traverse(Order::PreOrder)
    }

    /// The values in descending order.
    pub fn reverse_order(&self) -> Iter<'_, T> {
        self.traverse(Order::ReverseOrder)
    }

    /// The values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.in_order()
    }

    /// The values in the given `order`.
    pub fn traverse(&self, order: Order) -> Iter<'_, T> {
        Iter::new(order, self.root, self.count)
    }

    /// The smallest value, if any.
    pub fn first(&self) -> Option<&T> {
        // SAFETY: `&self` keeps every node live and unmodified for the returned lifetime.
        unsafe {
            self.root
                .0
                .map(|root| &(*Node::leftmost(root).as_ptr()).value)
        }
    }

    /// The largest value, if any.
    pub fn last(&self) -> Option<&T> {
        // SAFETY: `&self` keeps every node live and unmodified for the returned lifetime.
        unsafe {
            self.root
                .0
                .map(|root| &(*Node::rightmost(root).as_ptr()).value)
        }
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0.
    pub fn height(&self) -> usize {
        let mut cursor = Cursor::new(Order::PreOrder, self.root);
        let mut height = 0;
        // SAFETY: `&self` keeps every node live and unmodified during the walk.
        while let Some((_, depth)) = unsafe { cursor.advance() } {
            height = height.max(depth);
        }
        height
    }

    /// Copies every value, in ascending order, into `buffer` starting at `start_index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `start_index` isn't an index of `buffer`, and
    /// [`Error::Capacity`] when fewer than [`Tree::len`] slots remain from `start_index` on. The
    /// buffer is left untouched on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<i32> = [2, 3, 1].into_iter().collect();
    /// let mut buffer = [0; 5];
    /// tree.copy_to(&mut buffer, 1).unwrap();
    ///
    /// assert_eq!(buffer, [0, 1, 2, 3, 0]);
    /// assert!(tree.copy_to(&mut buffer, 3).is_err());
    /// ```
    pub fn copy_to(&self, buffer: &mut [T], start_index: usize) -> Result<()>
    where
        T: Clone,
    {
        if start_index >= buffer.len() {
            debug!("rejected copy starting at {start_index} into {} slots", buffer.len());
            return Err(Error::OutOfRange {
                index: start_index,
                len: buffer.len(),
            });
        }
        let available = buffer.len() - start_index;
        if self.count > available {
            debug!("rejected copy of {} values into {available} slots", self.count);
            return Err(Error::Capacity {
                required: self.count,
                available,
            });
        }

        for (slot, value) in buffer[start_index..].iter_mut().zip(self.in_order()) {
            slot.clone_from(value);
        }
        Ok(())
    }
}

impl<T, C> Tree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Adds `item` to the tree. Adding a value equal to one already present keeps both.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    /// tree.add(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &1]);
    /// ```
    pub fn add(&mut self, item: T) {
        let mut node = Node::new_boxed(item);
        let Some(mut dest) = self.root.0 else {
            self.root = Link::leak(node);
            self.count += 1;
            trace!("added value as the root");
            return;
        };

        let mut depth = 1;
        loop {
            // SAFETY: `dest` is reachable from the root so it is live, and `&mut self` means no
            // other reference into the tree exists.
            let dest_node = unsafe { &mut *dest.as_ptr() };
            let less = (self.comparator)(&node.value, &dest_node.value) == Ordering::Less;
            let slot = if less {
                &mut dest_node.lesser
            } else {
                &mut dest_node.greater
            };
            depth += 1;
            match slot.0 {
                Some(child) => dest = child,
                None => {
                    node.parent = Link(Some(dest));
                    *slot = Link::leak(node);
                    break;
                }
            }
        }
        self.count += 1;
        trace!("added value at depth {depth}");

        if cfg!(debug_assertions) {
            // SAFETY: `dest` is live and we hold `&mut self`.
            let dest_node = unsafe { &*dest.as_ptr() };
            // SAFETY: Each child link of a live node is empty or live.
            if let Some(lesser) = unsafe { dest_node.lesser.get() } {
                assert_eq!(lesser.parent.0, Some(dest));
                assert!((self.comparator)(&lesser.value, &dest_node.value) == Ordering::Less);
            }
            // SAFETY: As above.
            if let Some(greater) = unsafe { dest_node.greater.get() } {
                assert_eq!(greater.parent.0, Some(dest));
                assert!((self.comparator)(&greater.value, &dest_node.value) != Ordering::Less);
            }
        }
    }

    /// Whether the tree holds a value equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Removes a value equal to `item` from the tree. Returns `false` if there is none.
    ///
    /// When several values compare equal to `item`, the one closest to the root is removed.
    pub fn remove(&mut self, item: &T) -> bool {
        self.take(item).is_some()
    }

    /// Removes a value equal to `item` from the tree and returns it, or `None` if there is none.
    ///
    /// When several values compare equal to `item`, the one closest to the root is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
    /// tree.add((1, 'a'));
    ///
    /// assert_eq!(tree.take(&(1, 'z')), Some((1, 'a')));
    /// assert_eq!(tree.take(&(1, 'z')), None);
    /// ```
    pub fn take(&mut self, item: &T) -> Option<T> {
        let node = self.find(item).0?;
        // SAFETY: `find` only returns nodes reachable from the root and `&mut self` means nothing
        // else references them.
        Some(unsafe { self.remove_node(node) })
    }

    /// Binary search from the root. Among equal values, the first one met on the way down wins.
    fn find(&self, item: &T) -> Link<T> {
        let mut current = self.root;
        // SAFETY: Every link reached from the root is empty or live, and `&self` prevents
        // mutation during the search.
        while let Some(node) = unsafe { current.get() } {
            current = match (self.comparator)(item, &node.value) {
                Ordering::Equal => return current,
                Ordering::Less => node.lesser,
                Ordering::Greater => node.greater,
            };
        }
        Link::NONE
    }

    /// Unlinks and frees `target`, returning the value it held.
    ///
    /// A node with two children first swaps values with its in-order successor (the leftmost
    /// node of its greater subtree) and the successor is unlinked instead. The successor has no
    /// lesser child, so it is always unlinked by splicing in its only child, if any.
    ///
    /// # Safety
    ///
    /// `target` must be reachable from `self.root`.
    unsafe fn remove_node(&mut self, mut target: NonNull<Node<T>>) -> T {
        let node = &*target.as_ptr();
        if let (Some(_), Some(greater)) = (node.lesser.0, node.greater.0) {
            let successor = Node::leftmost(greater);
            std::mem::swap(
                &mut (*target.as_ptr()).value,
                &mut (*successor.as_ptr()).value,
            );
            trace!("removing two-child node through its successor");
            target = successor;
        }

        let node = &*target.as_ptr();
        let replacement = if node.greater.is_some() {
            node.greater
        } else {
            node.lesser
        };
        let parent = node.parent;

        if let Some(child) = replacement.0 {
            (*child.as_ptr()).parent = parent;
        }
        match parent.0 {
            None => self.root = replacement,
            Some(parent) => {
                let parent = &mut *parent.as_ptr();
                if parent.lesser.0 == Some(target) {
                    parent.lesser = replacement;
                } else {
                    parent.greater = replacement;
                }
            }
        }

        self.count -= 1;
        trace!("removed value, {} left", self.count);
        Node::free(target)
    }
}

impl<T, C> Drop for Tree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C> Clone for Tree<T, C>
where
    T: Clone,
    C: Clone + Fn(&T, &T) -> Ordering,
{
    /// Builds a tree of the same shape by adding this tree's values in pre-order.
    fn clone(&self) -> Self {
        let mut tree = Self::with_comparator(self.comparator.clone());
        tree.extend(self.pre_order().cloned());
        tree
    }
}

impl<T, C> fmt::Debug for Tree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    /// Adds every value, in iteration order, to a new tree.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C> Extend<T> for Tree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T, C> Extend<&'a T> for Tree<T, C>
where
    T: Copy + 'a,
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.in_order()
    }
}
