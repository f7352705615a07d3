//! Node storage shared by the [`Tree`][crate::Tree] and its traversals.
//!
//! Nodes are allocated with `Box::new` and leaked into raw [`NonNull`] pointers so that a node can
//! be reached both from its parent (downward, owning) and from its children (upward, borrowed).
//! Ownership only ever flows downward: the tree owns the root and every node owns its lesser and
//! greater children. The `parent` link is never used to free anything.

use std::ptr::NonNull;

/// An optional pointer to a [`Node`]. Whether the pointer owns its target depends on the slot it
/// is stored in: `lesser`/`greater` and the tree's root own, `parent` does not.
pub(crate) struct Link<T>(pub(crate) Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<T> Copy for Link<T> {}

impl<T> PartialEq for Link<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Link<T> {}

impl<T> Link<T> {
    pub(crate) const NONE: Self = Link(None);

    /// Leaks `node` and returns an owning link to it. The node must eventually be released with
    /// [`Node::free`].
    pub(crate) fn leak(node: Box<Node<T>>) -> Self {
        Link(Some(NonNull::from(Box::leak(node))))
    }

    pub(crate) fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    /// # Safety
    ///
    /// The link must be empty or point at a live node, and no `&mut` to that node may exist for
    /// the returned lifetime.
    pub(crate) unsafe fn get<'a>(self) -> Option<&'a Node<T>> {
        self.0.map(|ptr| &*ptr.as_ptr())
    }
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Link<T>,
    pub(crate) lesser: Link<T>,
    pub(crate) greater: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn new_boxed(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            parent: Link::NONE,
            lesser: Link::NONE,
            greater: Link::NONE,
        })
    }

    /// Releases a node previously leaked with [`Link::leak`] and returns its value. Children are
    /// not touched; callers detach or free them first.
    ///
    /// # Safety
    ///
    /// `node` must come from [`Link::leak`], must not have been freed already, and nothing may
    /// dereference it afterwards.
    pub(crate) unsafe fn free(node: NonNull<Self>) -> T {
        let node: Node<T> = *Box::from_raw(node.as_ptr());
        node.value
    }

    /// The leftmost node of the subtree rooted at `node`.
    ///
    /// # Safety
    ///
    /// `node` and all of its lesser descendants must be live.
    pub(crate) unsafe fn leftmost(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(lesser) = (*node.as_ptr()).lesser.0 {
            node = lesser;
        }
        node
    }

    /// The rightmost node of the subtree rooted at `node`.
    ///
    /// # Safety
    ///
    /// `node` and all of its greater descendants must be live.
    pub(crate) unsafe fn rightmost(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(greater) = (*node.as_ptr()).greater.0 {
            node = greater;
        }
        node
    }
}
