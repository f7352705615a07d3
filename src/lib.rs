//! This crate exposes an unbalanced Binary Search Tree (BST) whose nodes link back to their
//! parents, so that every traversal can run without recursion or an auxiliary stack.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The invariants kept here are:
//!
//! 1. For every `Node`, all the `Node`s in its lesser subtree have a value
//!    strictly less than its own value.
//! 2. For every `Node`, all the `Node`s in its greater subtree have a value
//!    greater than or equal to its own value. Equal values are all kept.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree does no rebalancing, so adding values
//! in sorted order gives it a height equal to the number of values.
//!
//! ## Traversal
//!
//! Besides owning links to its two children, every `Node` keeps a non-owning link to its parent.
//! [`Tree::in_order`], [`Tree::pre_order`] and [`Tree::reverse_order`] follow those links
//! one step at a time; see [`Order`] for what each visits first.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.add(1);
//! assert!(tree.contains(&1));
//!
//! // Removing reports whether something was removed.
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod iter;
mod node;
mod tree;


pub use error::{Error, Result};
pub use iter::{Iter, Order};
pub use tree::{OrdComparator, Tree};
