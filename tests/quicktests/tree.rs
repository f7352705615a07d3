use linked_bst::{Error, Tree};
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and returns how many of them
/// changed it. Removes that find nothing don't count.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>) -> usize {
    let mut applied = 0;
    for op in ops {
        match op {
            Op::Add(x) => {
                tree.add(*x);
                applied += 1;
            }
            Op::Remove(x) => {
                if tree.remove(x) {
                    applied += 1;
                }
            }
        }
    }
    applied
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let values: Vec<_> = tree.in_order().collect();

    values.windows(2).all(|w| w[0] <= w[1]) && values.len() == xs.len()
}

#[quickcheck]
fn reverse_order_mirrors_in_order(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();

    tree.reverse_order().eq(tree.in_order().collect::<Vec<_>>().into_iter().rev())
}

#[quickcheck]
fn count_tracks_successful_ops(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let adds = ops.iter().filter(|op| matches!(op, Op::Add(_))).count();

    let applied = do_ops(&ops, &mut tree);
    let removed = applied - adds;

    tree.len() == adds - removed && tree.iter().len() == tree.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();

    let mut still_present = xs;
    for remove in &removes {
        let expected = still_present.iter().position(|x| x == remove);
        if tree.remove(remove) != expected.is_some() {
            return false;
        }
        if let Some(pos) = expected {
            still_present.swap_remove(pos);
        }
    }

    still_present.sort_unstable();
    tree.in_order().eq(still_present.iter())
}

#[quickcheck]
fn removing_everything_empties_the_tree(xs: Vec<i8>, seed: Vec<usize>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();

    // Remove in an order unrelated to the insertion order.
    let mut order = xs;
    for (i, s) in seed.iter().enumerate() {
        if !order.is_empty() {
            let len = order.len();
            order.swap(i % len, s % len);
        }
    }

    order.iter().all(|x| tree.remove(x))
        && tree.is_empty()
        && tree.in_order().next().is_none()
        && tree.height() == 0
}

#[quickcheck]
fn contains_then_removed(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<i8> = xs.into_iter().filter(|v| *v != x).collect();

    tree.add(x);
    let added = tree.contains(&x);
    let removed = tree.remove(&x);

    added && removed && !tree.contains(&x)
}

#[quickcheck]
fn pre_order_replay_reproduces_shape(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();
    let replayed: Tree<i8> = tree.pre_order().copied().collect();
    let cloned = tree.clone();

    // A pre-order and an in-order sequence together pin down the shape.
    tree.pre_order().eq(replayed.pre_order())
        && tree.in_order().eq(replayed.in_order())
        && tree.pre_order().eq(cloned.pre_order())
        && tree.height() == cloned.height()
}

#[quickcheck]
fn copy_to(xs: Vec<i8>, start_index: u8, extra: u8) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let start_index = usize::from(start_index);

    let mut buffer = vec![0; start_index + tree.len() + usize::from(extra)];
    if start_index >= buffer.len() {
        return tree.copy_to(&mut buffer, start_index)
            == Err(Error::OutOfRange {
                index: start_index,
                len: buffer.len(),
            });
    }
    if tree.copy_to(&mut buffer, start_index).is_err() {
        return false;
    }

    let mut sorted = xs;
    sorted.sort_unstable();
    buffer[..start_index].iter().all(|x| *x == 0)
        && buffer[start_index..start_index + sorted.len()] == sorted[..]
}

#[quickcheck]
fn copy_to_too_small(xs: Vec<i8>, start_index: u8) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();
    if tree.is_empty() {
        return true;
    }

    // One slot short of what's needed.
    let start_index = usize::from(start_index);
    let mut buffer = vec![0; start_index + tree.len() - 1];
    let expected = if start_index >= buffer.len() {
        Error::OutOfRange {
            index: start_index,
            len: buffer.len(),
        }
    } else {
        Error::Capacity {
            required: tree.len(),
            available: tree.len() - 1,
        }
    };

    tree.copy_to(&mut buffer, start_index) == Err(expected) && buffer.iter().all(|x| *x == 0)
}
