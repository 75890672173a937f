//! An ordered, unbalanced BST. Every value lives in a node stored in an arena owned by the
//! `Tree`, and nodes refer to each other by index. Each node also knows its parent so that a
//! [`Cursor`] can walk to the next value in order without keeping a stack of ancestors.
//!
//! The tree never rebalances, so its shape (and height) is decided entirely by insertion order.
//! Values are never removed.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::ordered::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1) == tree.end());
//!
//! tree.insert(10);
//! tree.insert(5);
//! tree.insert(15);
//!
//! // Inserting a value that's already present changes nothing.
//! tree.insert(10);
//! assert_eq!(tree.len(), 3);
//!
//! assert_eq!(*tree.find(&5), 5);
//! assert_eq!(tree.to_string(), "[ 5 10 15 ]");
//!
//! // Iteration is always ascending.
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 10, 15]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;
use std::ptr;

/// Trees taller than this are shown by `Debug` as a flat set of values. Showing the nodes nests
/// one formatter call per level, which a long chain would overflow.
const MAX_DEBUG_HEIGHT: usize = 32;

/// Index of a `Node` in its tree's arena. Indices are stable because nodes are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone)]
struct Node<T> {
    value: T,
    // Lookup aid for finding successors. Never an ownership edge.
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A Binary Search Tree of distinct values. This can be used for inserting and finding values,
/// querying bounds, and iterating in ascending order.
///
/// Cloning a `Tree` copies every node so the clone has the same values *and* the same shape as
/// the original, and the two never share anything afterwards.
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
    root: Option<NodeId>,
    /// How many nodes are on the longest path from the root to a leaf. Nodes are only ever added
    /// so this can be kept up to date during `insert`.
    height: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        // The arena is copied index for index so every child and parent link in the copy points
        // at the copied node.
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            height: self.height,
        }
    }

    /// Replaces the contents of `self` with a copy of `source`. The old nodes are dropped but
    /// their allocation is reused.
    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
        self.root = source.root;
        self.height = source.height;
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            height: 0,
        }
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0 and a tree with only a root has a height of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// // Sorted input gives a chain.
    /// let tree: Tree<_> = (0..10).collect();
    /// assert_eq!(tree.height(), 10);
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        self.height
    }

    /// Inserts the value into the tree and returns a cursor to it. If an equal value is already
    /// stored, the tree is left untouched and the cursor points at the stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(*tree.insert(50), 50);
    /// assert_eq!(tree.len(), 1);
    ///
    /// assert_eq!(*tree.insert(50), 50);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        let id = self.insert_node(value);
        self.cursor(Some(id))
    }

    /// Finds the stored value equal to `value`. If there isn't one, the end cursor is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// let tree: Tree<_> = [50, 30, 70].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&30).get(), Some(&30));
    /// assert!(tree.find(&42) == tree.end());
    /// ```
    pub fn find(&self, value: &T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => break,
                Ordering::Greater => node.right,
            };
        }
        self.cursor(current)
    }

    /// Whether a value equal to `value` is stored in the tree.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        !self.find(value).is_end()
    }

    /// A cursor to the smallest value, or the end cursor if the tree is empty.
    pub fn min_element(&self) -> Cursor<'_, T> {
        self.cursor(self.root.map(|root| self.leftmost(root)))
    }

    /// A cursor to the largest value, or the end cursor if the tree is empty.
    pub fn max_element(&self) -> Cursor<'_, T> {
        let mut current = self.root;
        while let Some(right) = current.and_then(|id| self.node(id).right) {
            current = Some(right);
        }
        self.cursor(current)
    }

    /// A cursor to the smallest value strictly greater than `value`. If no stored value is
    /// greater, the end cursor is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// let tree: Tree<_> = [50, 25, 75, 10, 35, 60, 90].into_iter().collect();
    ///
    /// assert_eq!(*tree.min_greater_than(&50), 60);
    /// assert_eq!(*tree.min_greater_than(&35), 50);
    /// assert!(tree.min_greater_than(&90) == tree.end());
    ///
    /// // The cursor can keep going from there.
    /// let rest: Vec<_> = tree.min_greater_than(&35).iter().copied().collect();
    /// assert_eq!(rest, vec![50, 60, 75, 90]);
    /// ```
    pub fn min_greater_than(&self, value: &T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match node.value.cmp(value) {
                // Something smaller than this node might still be greater than `value`.
                Ordering::Greater => {
                    candidate = Some(id);
                    node.left
                }
                Ordering::Less | Ordering::Equal => node.right,
            };
        }
        self.cursor(candidate)
    }

    /// A cursor to the smallest value. Same as [`Tree::min_element`].
    pub fn begin(&self) -> Cursor<'_, T> {
        self.min_element()
    }

    /// The cursor that points past the largest value.
    pub fn end(&self) -> Cursor<'_, T> {
        self.cursor(None)
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.begin(),
            remaining: Some(self.len()),
        }
    }

    /// Iterates over the values in pre-order: each node, then its left subtree, then its right
    /// subtree. This follows the shape of the tree rather than the order of the values.
    pub fn preorder(&self) -> Preorder<'_, T> {
        Preorder {
            tree: self,
            stack: self.root.into_iter().collect(),
            remaining: self.len(),
        }
    }

    /// Writes every value followed by a space, in ascending order. An empty tree writes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// let tree: Tree<_> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
    ///
    /// let mut out = String::new();
    /// tree.traverse_inorder(&mut out).unwrap();
    /// assert_eq!(out, "20 30 40 50 60 70 80 ");
    /// ```
    pub fn traverse_inorder<W>(&self, sink: &mut W) -> fmt::Result
    where
        W: fmt::Write,
        T: fmt::Display,
    {
        self.iter().try_for_each(|value| write!(sink, "{} ", value))
    }

    /// Writes every value followed by a space, in pre-order. An empty tree writes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// let tree: Tree<_> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
    ///
    /// let mut out = String::new();
    /// tree.traverse_preorder(&mut out).unwrap();
    /// assert_eq!(out, "50 30 20 40 70 60 80 ");
    /// ```
    pub fn traverse_preorder<W>(&self, sink: &mut W) -> fmt::Result
    where
        W: fmt::Write,
        T: fmt::Display,
    {
        self.preorder().try_for_each(|value| write!(sink, "{} ", value))
    }

    /// Checks every node against all of its ancestors: values in a left subtree must be smaller
    /// and values in a right subtree must be larger. Also checks the parent links and that every
    /// node is reachable from the root.
    ///
    /// This visits every node so it's meant for tests and debugging.
    pub fn check_sorting_invariant(&self) -> bool
    where
        T: Ord,
    {
        let Some(root) = self.root else {
            return self.nodes.is_empty();
        };
        if self.node(root).parent.is_some() {
            return false;
        }

        let mut visited = 0;
        // Each entry carries the bounds its subtree must fall strictly within.
        let mut stack: Vec<(NodeId, Option<&T>, Option<&T>)> = vec![(root, None, None)];
        while let Some((id, lower, upper)) = stack.pop() {
            let node = self.node(id);
            if lower.map_or(false, |lower| node.value <= *lower)
                || upper.map_or(false, |upper| node.value >= *upper)
            {
                return false;
            }

            visited += 1;
            if visited > self.nodes.len() {
                // A cycle.
                return false;
            }

            for (child, lower, upper) in [
                (node.left, lower, Some(&node.value)),
                (node.right, Some(&node.value), upper),
            ] {
                if let Some(child) = child {
                    if self.node(child).parent != Some(id) {
                        return false;
                    }
                    stack.push((child, lower, upper));
                }
            }
        }

        visited == self.nodes.len()
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn cursor(&self, node: Option<NodeId>) -> Cursor<'_, T> {
        Cursor { tree: self, node }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// The node holding the next value in ascending order, if any.
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }

        // Climb until we come up out of a left subtree. That parent is next.
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }
        None
    }

    /// Descends to where `value` belongs. Returns the node that ends up holding an equal value:
    /// either one that was already there or a newly attached one.
    fn insert_node(&mut self, value: T) -> NodeId
    where
        T: Ord,
    {
        let Some(mut current) = self.root else {
            let id = self.push_node(value, None);
            self.root = Some(id);
            self.height = 1;
            tracing::trace!(node = id.0, "created root");
            return id;
        };

        let mut depth = 1;
        loop {
            let node = self.node(current);
            let ordering = value.cmp(&node.value);
            let child = match ordering {
                Ordering::Less => node.left,
                Ordering::Equal => return current,
                Ordering::Greater => node.right,
            };
            depth += 1;
            match child {
                Some(child) => current = child,
                None => {
                    self.height = self.height.max(depth);
                    return self.attach(current, ordering, value);
                }
            }
        }
    }

    /// Creates a node for `value` as the left (`Ordering::Less`) or right child of `parent`.
    /// That slot must be empty.
    fn attach(&mut self, parent: NodeId, side: Ordering, value: T) -> NodeId
    where
        T: Ord,
    {
        let id = self.push_node(value, Some(parent));
        let parent_node = &mut self.nodes[parent.0];
        let slot = match side {
            Ordering::Less => &mut parent_node.left,
            Ordering::Equal | Ordering::Greater => &mut parent_node.right,
        };
        debug_assert!(slot.is_none(), "attaching over an existing child");
        *slot = Some(id);

        if cfg!(debug_assertions) {
            let parent_node = self.node(parent);
            if let Some(left) = parent_node.left {
                assert!(parent_node.value > self.node(left).value);
            }
            if let Some(right) = parent_node.right {
                assert!(parent_node.value < self.node(right).value);
            }
        }

        tracing::trace!(node = id.0, parent = parent.0, "attached node");
        id
    }

    fn push_node(&mut self, value: T, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            parent,
            left: None,
            right: None,
        });
        id
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    /// Trees are equal when they hold equal values. Their shapes may differ.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    /// Inserts the values in the order they are yielded.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_node(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the values in ascending order as `[ 5 10 15 ]`. An empty tree is `[ ]`.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        self.traverse_inorder(f)?;
        f.write_str("]")
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Tree");
        out.field("len", &self.len()).field("height", &self.height);
        if self.height <= MAX_DEBUG_HEIGHT {
            out.field("root", &self.root.map(|id| DebugNode { tree: self, id }));
        } else {
            out.field("values", &DebugValues(self));
        }
        out.finish()
    }
}

/// Shows the values in ascending order, for trees too tall for [`DebugNode`].
struct DebugValues<'a, T>(&'a Tree<T>);

impl<T> fmt::Debug for DebugValues<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

/// Shows a node and its subtrees without exposing the arena indices. Only used on trees no taller
/// than [`MAX_DEBUG_HEIGHT`].
struct DebugNode<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> fmt::Debug for DebugNode<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.tree.node(self.id);
        let child = |id: Option<NodeId>| id.map(|id| DebugNode { tree: self.tree, id });
        f.debug_struct("Node")
            .field("value", &node.value)
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}

/// Points at one value of a [`Tree`], or past the end of it.
///
/// A cursor borrows its tree, so the tree can't be changed while the cursor is around. Moving
/// forward visits the values in ascending order. The value can be read through
/// [`Cursor::get`], or by dereferencing, which panics on the end cursor.
///
/// Two cursors are equal when they point at the same node of the same tree, or when both are
/// end cursors.
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    node: Option<NodeId>,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    /// The value this cursor points at, or `None` for the end cursor.
    pub fn get(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.node.map(|id| &tree.node(id).value)
    }

    /// Whether this is the end cursor.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the next larger value, or to the end if this was the largest. Moving the end
    /// cursor does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::ordered::Tree;
    ///
    /// let tree: Tree<_> = [20, 10, 30].into_iter().collect();
    ///
    /// let mut cursor = tree.find(&20);
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&30));
    ///
    /// cursor.move_next();
    /// assert!(cursor == tree.end());
    /// ```
    pub fn move_next(&mut self) {
        if let Some(id) = self.node {
            self.node = self.tree.successor(id);
        }
    }

    /// Iterates in ascending order starting at this cursor's value.
    pub fn iter(self) -> Iter<'a, T> {
        Iter {
            cursor: self,
            remaining: None,
        }
    }
}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get().expect("Cannot dereference the end cursor")
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && ptr::eq(self.tree, other.tree),
            _ => false,
        }
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

/// Ascending iterator over a [`Tree`]. Created by [`Tree::iter`] or [`Cursor::iter`].
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    /// Exact number of values left, known when starting from the smallest value.
    remaining: Option<usize>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.get()?;
        self.cursor.move_next();
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.remaining, self.cursor.is_end()) {
            (Some(remaining), _) => (remaining, Some(remaining)),
            (None, true) => (0, Some(0)),
            (None, false) => (1, Some(self.cursor.tree.len())),
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Pre-order iterator over a [`Tree`]. Created by [`Tree::preorder`].
pub struct Preorder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<T> Clone for Preorder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.node(self.stack.pop()?);
        // Right first so the left subtree comes off the stack first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Preorder<'_, T> {}

impl<T> FusedIterator for Preorder<'_, T> {}
