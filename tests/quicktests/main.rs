use quickcheck::{Arbitrary, Gen};

mod tree;

/// Things to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Add the value to the tree
    Add(T),
    /// Remove a value equal to this one from the tree
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Add(T::arbitrary(g))
        } else {
            Op::Remove(T::arbitrary(g))
        }
    }
}
