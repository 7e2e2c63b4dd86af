use balanced_bst::{Tree, TreeError};

use std::collections::BTreeSet;

use crate::Op;

/// Checks the BST invariant from the outside: an in-order walk over a valid BST is strictly
/// ascending, and it visits every node.
fn is_search_tree<K: Ord>(tree: &Tree<K>) -> bool {
    let keys: Vec<_> = tree.inorder().collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
        && keys.len() == tree.len()
        && tree.preorder().count() == tree.len()
}

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts,
/// deletes and rebalances we have the same set of keys in both, and that
/// every insert and delete reported the same outcome the set did.
fn do_ops<K>(ops: &[Op<K>], mut bst: Tree<K>, set: &mut BTreeSet<K>) -> Tree<K>
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                let expected = if set.insert(k.clone()) {
                    Ok(())
                } else {
                    Err(TreeError::DuplicateKey)
                };
                assert_eq!(bst.insert(k.clone()), expected);
            }
            Op::Delete(k) => {
                let expected = if set.is_empty() {
                    Err(TreeError::EmptyTree)
                } else if set.remove(k) {
                    Ok(())
                } else {
                    Err(TreeError::KeyNotFound)
                };
                assert_eq!(bst.delete(k), expected);
            }
            Op::Rebalance => bst.rebalance(),
        }
    }

    bst
}

#[quickcheck]
fn fuzz_multiple_operations_i8(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let mut set: BTreeSet<_> = xs.iter().copied().collect();
    let tree = do_ops(&ops, Tree::new(xs), &mut set);

    is_search_tree(&tree) && tree.inorder().eq(set.iter())
}

#[quickcheck]
fn inorder_is_sorted_and_deduplicated(xs: Vec<i32>) -> bool {
    let tree = Tree::new(xs.clone());

    let mut expected = xs;
    expected.sort_unstable();
    expected.dedup();

    tree.inorder().copied().eq(expected)
}

#[quickcheck]
fn new_is_balanced(xs: Vec<i32>) -> bool {
    let tree = Tree::new(xs);
    is_search_tree(&tree) && tree.is_balanced()
}

#[quickcheck]
fn rebalance_is_idempotent(xs: Vec<i8>, extra: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs);
    tree.extend(extra);

    tree.rebalance();
    let once: Vec<_> = tree.preorder().copied().collect();
    let balanced_once = tree.is_balanced();

    tree.rebalance();
    let twice: Vec<_> = tree.preorder().copied().collect();

    balanced_once && tree.is_balanced() && once == twice
}

#[quickcheck]
fn delete_removes_exactly_one(xs: Vec<i16>, pick: usize) -> bool {
    let mut tree = Tree::new(xs);
    let keys: Vec<_> = tree.inorder().copied().collect();
    if keys.is_empty() {
        return tree.delete(&0) == Err(TreeError::EmptyTree);
    }

    let key = keys[pick % keys.len()];
    let children = tree.get(&key).map(|n| n.children());

    tree.delete(&key).is_ok()
        && children.is_ok()
        && tree.len() == keys.len() - 1
        && !tree.contains(&key)
        && is_search_tree(&tree)
        && tree.inorder().copied().eq(keys.into_iter().filter(|k| *k != key))
}

#[quickcheck]
fn duplicate_insert_is_a_no_op(xs: Vec<i8>, pick: usize) -> bool {
    let mut tree = Tree::new(xs);
    let before: Vec<_> = tree.preorder().copied().collect();
    let Some(&key) = before.get(pick % before.len().max(1)) else {
        return true;
    };

    tree.insert(key) == Err(TreeError::DuplicateKey)
        && tree.preorder().copied().eq(before.iter().copied())
}

#[quickcheck]
fn depth_plus_height_fits_in_tree(xs: Vec<i8>, extra: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs);
    tree.extend(extra);
    let Some(root) = tree.root() else {
        return true;
    };
    let tree_height = tree.height(root.key()).unwrap_or(0);

    tree.inorder().all(|key| {
        let depth = tree.depth(key).unwrap_or(usize::MAX);
        let height = tree.height(key).unwrap_or(usize::MAX);
        depth.saturating_add(height) <= tree_height
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::new(xs.clone());
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[test]
fn scenario_from_unsorted_array() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = Tree::new([1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
    assert_eq!(
        tree.inorder().copied().collect::<Vec<_>>(),
        [1, 3, 4, 5, 7, 8, 9, 23, 67, 324, 6345]
    );

    tree.insert(286).unwrap();
    tree.insert(290).unwrap();
    assert_eq!(tree.insert(290), Err(TreeError::DuplicateKey));
    tree.delete(&23).unwrap();
    tree.delete(&7).unwrap();
    tree.delete(&4).unwrap();
    tree.insert(50).unwrap();
    tree.delete(&8).unwrap();
    tree.delete(&9).unwrap();

    assert_eq!(
        tree.inorder().copied().collect::<Vec<_>>(),
        [1, 3, 5, 50, 67, 286, 290, 324, 6345]
    );
    assert!(is_search_tree(&tree));

    tree.rebalance();
    assert!(tree.is_balanced());
    assert_eq!(tree.len(), 9);
}

#[test]
fn many_skewed_inserts_then_rebalance() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = Tree::new([1, 2, 3, 4, 5]);
    tree.delete(&1).unwrap();
    assert!(tree.is_balanced());

    for x in 100..200 {
        tree.insert(x).unwrap();
    }
    assert!(!tree.is_balanced());

    tree.rebalance();
    assert!(tree.is_balanced());
    assert_eq!(tree.len(), 104);
}
