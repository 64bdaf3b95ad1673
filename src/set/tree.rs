//! Persistent red-black tree shared by the tree-backed representations.
//!
//! [`RedBlackTree`] is an immutable ordered map with structural sharing:
//! inserting copies only the path from the root to the new node. It backs both
//! [`TreeSet`](super::TreeSet) (`V = ()`) and [`ScoreMap`](super::ScoreMap)
//! (`V = Weight`).
//!
//! The tree maintains the usual invariants:
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. Red nodes have only black children
//! 4. Every path from the root to a leaf has the same number of black nodes
//!
//! Iteration is lazy: an explicit stack holds the left spine still to visit,
//! so starting an iteration costs O(log n) and nothing is materialised.

use std::cmp::Ordering;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    left: Option<Arc<Self>>,
    right: Option<Arc<Self>>,
}

impl<K, V> Node<K, V> {
    const fn new(key: K, value: V, color: Color) -> Self {
        Self {
            key,
            value,
            color,
            left: None,
            right: None,
        }
    }

    fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

fn is_red<K, V>(node: Option<&Arc<Node<K, V>>>) -> bool {
    node.is_some_and(|node| node.is_red())
}

/// Persistent ordered map; see the module documentation.
#[derive(Clone)]
pub(super) struct RedBlackTree<K, V> {
    root: Option<Arc<Node<K, V>>>,
    length: usize,
}

impl<K, V> RedBlackTree<K, V> {
    pub(super) const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    pub(super) const fn len(&self) -> usize {
        self.length
    }

    pub(super) const fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub(super) fn iter(&self) -> InOrder<'_, K, V> {
        let mut stack = Vec::new();
        push_left_spine(self.root.as_ref(), &mut stack);
        InOrder {
            stack,
            remaining: self.length,
        }
    }

    pub(super) fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_ref()?;
        while let Some(left) = node.left.as_ref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    pub(super) fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_ref()?;
        while let Some(right) = node.right.as_ref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    #[cfg(test)]
    pub(super) fn check_invariants(&self) -> Result<(), String>
    where
        K: Ord,
    {
        fn black_height<K: Ord, V>(
            node: Option<&Arc<Node<K, V>>>,
            lower: Option<&K>,
            upper: Option<&K>,
        ) -> Result<usize, String> {
            let Some(node) = node else {
                return Ok(1);
            };
            if lower.is_some_and(|lower| &node.key <= lower)
                || upper.is_some_and(|upper| &node.key >= upper)
            {
                return Err("keys out of order".to_string());
            }
            if node.is_red() && (is_red(node.left.as_ref()) || is_red(node.right.as_ref())) {
                return Err("red node with red child".to_string());
            }
            let left = black_height(node.left.as_ref(), lower, Some(&node.key))?;
            let right = black_height(node.right.as_ref(), Some(&node.key), upper)?;
            if left != right {
                return Err(format!("black height mismatch: {left} vs {right}"));
            }
            Ok(left + usize::from(!node.is_red()))
        }

        if is_red(self.root.as_ref()) {
            return Err("red root".to_string());
        }
        black_height(self.root.as_ref(), None, None).map(|_| ())
    }
}

impl<K: Clone + Ord, V: Clone> RedBlackTree<K, V> {
    pub(super) fn get(&self, key: &K) -> Option<&V> {
        let mut node = self.root.as_ref();
        while let Some(current) = node {
            match key.cmp(&current.key) {
                Ordering::Less => node = current.left.as_ref(),
                Ordering::Greater => node = current.right.as_ref(),
                Ordering::Equal => return Some(&current.value),
            }
        }
        None
    }

    pub(super) fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces `key`, returning the new tree.
    pub(super) fn insert(&self, key: K, value: V) -> Self {
        let (new_root, added) = Self::insert_into_node(self.root.as_ref(), key, value);
        let black_root = if new_root.is_red() {
            Node {
                color: Color::Black,
                ..new_root
            }
        } else {
            new_root
        };

        Self {
            root: Some(Arc::new(black_root)),
            length: if added { self.length + 1 } else { self.length },
        }
    }

    fn insert_into_node(node: Option<&Arc<Node<K, V>>>, key: K, value: V) -> (Node<K, V>, bool) {
        let Some(node) = node else {
            return (Node::new(key, value, Color::Red), true);
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                let (new_left, added) = Self::insert_into_node(node.left.as_ref(), key, value);
                let rebuilt = Node {
                    left: Some(Arc::new(new_left)),
                    ..(**node).clone()
                };
                (Self::balance(rebuilt), added)
            }
            Ordering::Greater => {
                let (new_right, added) = Self::insert_into_node(node.right.as_ref(), key, value);
                let rebuilt = Node {
                    right: Some(Arc::new(new_right)),
                    ..(**node).clone()
                };
                (Self::balance(rebuilt), added)
            }
            Ordering::Equal => (
                Node {
                    key,
                    value,
                    ..(**node).clone()
                },
                false,
            ),
        }
    }

    /// Repairs a red-red violation below a black node.
    ///
    /// Each of the four shapes is rewritten into a red node with two black
    /// children, which preserves the black height of the subtree.
    fn balance(node: Node<K, V>) -> Node<K, V> {
        if node.is_red() {
            return node;
        }

        if let Some(left) = node.left.as_ref().filter(|left| left.is_red()) {
            if let Some(left_left) = left.left.as_ref().filter(|child| child.is_red()) {
                return Self::red_parent(
                    Self::recolor(left_left, Color::Black),
                    (left.key.clone(), left.value.clone()),
                    Node {
                        left: left.right.clone(),
                        right: node.right.clone(),
                        ..node.clone()
                    },
                );
            }
            if let Some(left_right) = left.right.as_ref().filter(|child| child.is_red()) {
                return Self::red_parent(
                    Node {
                        right: left_right.left.clone(),
                        color: Color::Black,
                        ..(**left).clone()
                    },
                    (left_right.key.clone(), left_right.value.clone()),
                    Node {
                        left: left_right.right.clone(),
                        right: node.right.clone(),
                        ..node.clone()
                    },
                );
            }
        }

        if let Some(right) = node.right.as_ref().filter(|right| right.is_red()) {
            if let Some(right_left) = right.left.as_ref().filter(|child| child.is_red()) {
                return Self::red_parent(
                    Node {
                        left: node.left.clone(),
                        right: right_left.left.clone(),
                        ..node.clone()
                    },
                    (right_left.key.clone(), right_left.value.clone()),
                    Node {
                        left: right_left.right.clone(),
                        color: Color::Black,
                        ..(**right).clone()
                    },
                );
            }
            if let Some(right_right) = right.right.as_ref().filter(|child| child.is_red()) {
                return Self::red_parent(
                    Node {
                        left: node.left.clone(),
                        right: right.left.clone(),
                        ..node.clone()
                    },
                    (right.key.clone(), right.value.clone()),
                    Self::recolor(right_right, Color::Black),
                );
            }
        }

        node
    }

    fn recolor(node: &Arc<Node<K, V>>, color: Color) -> Node<K, V> {
        Node {
            color,
            ..(**node).clone()
        }
    }

    /// Builds `Red(entry)` over two subtrees that become black.
    fn red_parent(left: Node<K, V>, (key, value): (K, V), right: Node<K, V>) -> Node<K, V> {
        Node {
            key,
            value,
            color: Color::Red,
            left: Some(Arc::new(Node {
                color: Color::Black,
                ..left
            })),
            right: Some(Arc::new(Node {
                color: Color::Black,
                ..right
            })),
        }
    }

    /// Builds a balanced tree from strictly ascending entries in O(n).
    ///
    /// Entries are split at the median so every nil sits at depth `d` or
    /// `d + 1` with `d = floor(log2(n + 1))`; nodes on the partial bottom level
    /// are coloured red and all others black.
    pub(super) fn from_sorted_entries(entries: Vec<(K, V)>) -> Self {
        let length = entries.len();
        let red_depth = (usize::BITS - 1 - (length + 1).leading_zeros()) as usize;
        let mut entries = entries.into_iter();
        let root = build_balanced(&mut entries, length, 0, red_depth);
        Self { root, length }
    }

    pub(super) fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K, V> {
        let mut stack = Vec::new();
        let start = range.start_bound();
        let mut node = self.root.as_ref();
        while let Some(current) = node {
            let above_start = match start {
                Bound::Included(bound) => &current.key >= bound,
                Bound::Excluded(bound) => &current.key > bound,
                Bound::Unbounded => true,
            };
            if above_start {
                stack.push(&**current);
                node = current.left.as_ref();
            } else {
                node = current.right.as_ref();
            }
        }

        Range {
            inner: InOrder {
                stack,
                remaining: self.length,
            },
            end: range.end_bound().cloned(),
            finished: false,
        }
    }
}

fn build_balanced<K, V>(
    entries: &mut std::vec::IntoIter<(K, V)>,
    length: usize,
    depth: usize,
    red_depth: usize,
) -> Option<Arc<Node<K, V>>> {
    if length == 0 {
        return None;
    }
    let left_length = length / 2;
    let left = build_balanced(entries, left_length, depth + 1, red_depth);
    let (key, value) = entries.next()?;
    let right = build_balanced(entries, length - left_length - 1, depth + 1, red_depth);
    let color = if depth == red_depth {
        Color::Red
    } else {
        Color::Black
    };
    Some(Arc::new(Node {
        key,
        value,
        color,
        left,
        right,
    }))
}

fn push_left_spine<'a, K, V>(mut node: Option<&'a Arc<Node<K, V>>>, stack: &mut Vec<&'a Node<K, V>>) {
    while let Some(current) = node {
        stack.push(current);
        node = current.left.as_ref();
    }
}

/// Lazy in-order traversal.
pub(super) struct InOrder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        push_left_spine(node.right.as_ref(), &mut self.stack);
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len().min(self.remaining), Some(self.remaining))
    }
}

/// Lazy in-order traversal of the entries inside a key range.
pub(super) struct Range<'a, K, V> {
    inner: InOrder<'a, K, V>,
    end: Bound<K>,
    finished: bool,
}

impl<'a, K: Ord, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let (key, value) = self.inner.next()?;
        let below_end = match &self.end {
            Bound::Included(bound) => key <= bound,
            Bound::Excluded(bound) => key < bound,
            Bound::Unbounded => true,
        };
        if below_end {
            Some((key, value))
        } else {
            self.finished = true;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, self.inner.size_hint().1)
        }
    }
}
