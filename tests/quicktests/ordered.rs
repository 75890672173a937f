use ordered_bst::ordered::Tree;
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;
use std::ops::Bound;

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and copies we have the same values in both. Copies replace the
/// working tree so later inserts land in a tree built by `clone`.
fn do_ops<T>(ops: &[Op<T>], mut bst: Tree<T>, set: &mut BTreeSet<T>) -> Tree<T>
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Clone => {
                let copy = bst.clone();
                bst = copy;
            }
        }
    }

    bst
}

fn preorder(tree: &Tree<i8>) -> Vec<i8> {
    tree.preorder().copied().collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut set = BTreeSet::new();
    let tree = do_ops(&ops, Tree::new(), &mut set);

    tree.len() == set.len() && tree.iter().eq(set.iter()) && tree.check_sorting_invariant()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x).get() == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == tree.end())
}

#[quickcheck]
fn size_counts_distinct_values(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let distinct: BTreeSet<_> = xs.into_iter().collect();

    tree.len() == distinct.len() && tree.is_empty() == distinct.is_empty()
}

#[quickcheck]
fn sorted_input_is_a_chain(len: u8) -> bool {
    let ascending: Tree<_> = (0..u32::from(len)).collect();
    let descending: Tree<_> = (0..u32::from(len)).rev().collect();

    ascending.height() == usize::from(len) && descending.height() == usize::from(len)
}

#[quickcheck]
fn min_greater_than_matches_range(xs: Vec<i8>, probes: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();

    probes.iter().all(|probe| {
        tree.min_greater_than(probe).get()
            == set.range((Bound::Excluded(probe), Bound::Unbounded)).next()
    })
}

#[quickcheck]
fn cursor_walk_from_anywhere(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x).iter().eq(set.range(x..)))
}

#[quickcheck]
fn copy_is_independent(xs: Vec<i8>, extra: Vec<i8>) -> bool {
    let original: Tree<_> = xs.into_iter().collect();
    let shape = preorder(&original);
    let printed = original.to_string();

    let mut copy = original.clone();
    let same_shape = preorder(&copy) == shape && copy.height() == original.height();
    copy.extend(extra);

    same_shape && preorder(&original) == shape && original.to_string() == printed
}

#[quickcheck]
fn display_lists_ascending(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();

    let mut expected = String::from("[ ");
    for x in &set {
        expected.push_str(&format!("{} ", x));
    }
    expected.push(']');

    tree.to_string() == expected
}
