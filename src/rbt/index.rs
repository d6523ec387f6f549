// Module ``index`` implement a classic [red-black tree][rbtree] with
// parent-linked nodes.
//
// All nodes live in a single arena owned by [Index], a node is addressed
// by its handle, the offset into the arena. Links between nodes, left,
// right and parent, are handles. When a node is removed from the tree its
// slot is reclaimed by moving the last node of the arena into it, so the
// arena stays dense and `len()` is simply the arena length.
//
// Insert walks down to an absent child, attaches a Red node there and
// fixes consecutive reds walking up via grandparents. Delete reduces the
// two-children case to the successor node and fixes the lost black, if
// any, walking up via parents.
//
// [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::{self, Ordering},
    fmt, mem,
};

use crate::{
    rbt::{Color, Depth, Dump, DumpValues, Node, Side, Stats},
    Result,
};

/// Maximum depth allowed by [Index::validate], a balanced tree with
/// `usize::MAX` entries shall not cross this depth.
pub const MAX_TREE_DEPTH: usize = 128;

/// Index type, ordered map from key to value, backed by red-black tree.
#[derive(Clone)]
pub struct Index<K, V> {
    name: String,
    root: Option<usize>,
    nodes: Vec<Node<K, V>>,
}

impl<K, V> Default for Index<K, V> {
    fn default() -> Index<K, V> {
        Index::new("rbt")
    }
}

impl<K, V> Index<K, V> {
    pub fn new(name: &str) -> Index<K, V> {
        Index {
            name: name.to_string(),
            root: None,
            nodes: Vec::default(),
        }
    }

    /// Return name of this index instance.
    #[inline]
    pub fn to_name(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return whether index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all entries from index and release their nodes.
    pub fn clear(&mut self) {
        debug!(target: "rbt", "{} clear {} entries", self.name, self.nodes.len());
        self.root = None;
        self.nodes.clear();
    }

    /// Return index statistics. Black-height and depth statistics are
    /// available only from [Index::validate] call.
    pub fn to_stats(&self) -> Stats {
        let mut stats = Stats::new(&self.name);
        stats.node_size = mem::size_of::<Node<K, V>>();
        stats.n_count = self.len();
        stats
    }

    /// Return a read-only view of the root node, to walk the tree.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        let nodes = self.nodes.as_slice();
        self.root.map(|handle| NodeRef { nodes, handle })
    }

    /// Return a printable dump of the tree structure, keys and colors.
    pub fn dump(&self) -> Dump<'_, K, V> {
        Dump::new(self.root())
    }

    /// Same as [Index::dump], along with the value of each entry.
    pub fn dump_with_values(&self) -> DumpValues<'_, K, V> {
        DumpValues::new(self.root())
    }
}

impl<K, V> Index<K, V> {
    /// Get value for `key`. If key is not found return
    /// [Error::KeyNotFound][crate::Error]
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some(handle) => Ok(&self.nodes[handle].value),
            None => err_at!(KeyNotFound, msg: "get missing key"),
        }
    }

    /// Same as [Index::get] but return a mutable reference to the value.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some(handle) => Ok(&mut self.nodes[handle].value),
            None => err_at!(KeyNotFound, msg: "get_mut missing key"),
        }
    }

    /// Return whether `key` is present in index.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Overwrite the value of an existing `key`, and return the older
    /// value. If key is not found return [Error::KeyNotFound][crate::Error]
    /// and index is left untouched.
    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some(handle) => Ok(mem::replace(&mut self.nodes[handle].value, value)),
            None => err_at!(KeyNotFound, msg: "update missing key"),
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut next = self.root;
        while let Some(handle) = next {
            let node = &self.nodes[handle];
            next = match node.key.borrow().cmp(key) {
                Ordering::Greater => node.left,
                Ordering::Less => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }
}

impl<K, V> Index<K, V>
where
    K: Ord,
{
    /// Set `key`, `value` into index. If an older entry exist with same key,
    /// its value shall be overwritten in place and returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = match self.root {
            Some(root) => root,
            None => {
                let root = self.alloc(Node::new(key, value, Color::Black));
                self.root = Some(root);
                return None;
            }
        };

        let side = loop {
            let node = &mut self.nodes[parent];
            let side = match node.key.cmp(&key) {
                Ordering::Greater => Side::Left,
                Ordering::Less => Side::Right,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            };
            match node.child(side) {
                Some(child) => parent = child,
                None => break side,
            }
        };

        let mut node = Node::new(key, value, Color::Red);
        node.parent = Some(parent);
        let child = self.alloc(node);
        self.nodes[parent].set_child(side, Some(child));

        self.insert_fixup(child);
        None
    }

    /// Remove the entry, matching the key, from the index, and return its
    /// value. Removing a missing key is a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut target = self.find(key)?;

        let node = &self.nodes[target];
        if let (Some(_), Some(right)) = (node.left, node.right) {
            let successor = self.leftmost(right);
            self.swap_entry(target, successor);
            target = successor;
        }

        self.detach(target);
        Some(self.release(target).value)
    }

    /// Validate Index tree with following rules:
    ///
    /// * Root node is always black in color, and has no parent.
    /// * Parent link of every node points back to the node holding it.
    /// * Verify the sort order between a node and all its descendants.
    /// * Make sure there are no consecutive reds.
    /// * Make sure number of blacks are same on both left and right arm.
    /// * Make sure the height do not exceed `2 * log2(n + 1)`.
    ///
    /// On success return [Stats] along with black-height and depth
    /// statistics of the tree.
    pub fn validate(&self) -> Result<Stats>
    where
        K: fmt::Debug,
    {
        let mut stats = self.to_stats();

        let root = match self.root {
            Some(root) => root,
            None if self.nodes.is_empty() => return Ok(stats),
            None => err_at!(Fatal, msg: "empty tree holds {} nodes", self.nodes.len())?,
        };
        if self.nodes[root].is_red() {
            err_at!(Fatal, msg: "root node must be black")?;
        }

        let mut depths = Depth::default();
        let (blacks, n_count) =
            self.validate_tree(root, None, false, 0, 1, (None, None), &mut depths)?;

        if n_count != self.nodes.len() {
            err_at!(Fatal, msg: "reachable {} != {}", n_count, self.nodes.len())?;
        }

        depths.check_height(n_count)?;

        debug!(
            target: "rbt",
            "{} validated n_count:{} blacks:{} height:{}",
            self.name,
            n_count,
            blacks,
            depths.to_max()
        );

        stats.blacks = Some(blacks);
        stats.depths = Some(depths);
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn validate_tree(
        &self,
        handle: usize,
        parent: Option<usize>,
        fromred: bool,
        mut n_blacks: usize,
        depth: usize,
        (low, high): (Option<&K>, Option<&K>),
        depths: &mut Depth,
    ) -> Result<(usize, usize)>
    where
        K: fmt::Debug,
    {
        let node = &self.nodes[handle];

        if node.parent != parent {
            let (p, np) = (parent, node.parent);
            err_at!(Fatal, msg: "{:?} parent {:?} != {:?}", node.key, np, p)?;
        }
        if fromred && node.is_red() {
            err_at!(Fatal, msg: "Index has consecutive reds at {:?}", node.key)?;
        }
        if node.is_black() {
            n_blacks += 1;
        }
        if depth > MAX_TREE_DEPTH {
            err_at!(Fatal, msg: "tree exceeds max_depth {}", depth)?;
        }

        // confirm sort order in the tree.
        match low {
            Some(low) if low.ge(&node.key) => {
                err_at!(Fatal, msg: "Index low:{:?}, node:{:?}", low, node.key)?;
            }
            _ => (),
        }
        match high {
            Some(high) if high.le(&node.key) => {
                err_at!(Fatal, msg: "Index high:{:?}, node:{:?}", high, node.key)?;
            }
            _ => (),
        }

        if node.is_leaf() {
            depths.sample(depth, n_blacks)?;
        }

        let red = node.is_red();
        let (lb, lc) = match node.left {
            Some(left) => {
                let bounds = (low, Some(&node.key));
                let p = Some(handle);
                self.validate_tree(left, p, red, n_blacks, depth + 1, bounds, depths)?
            }
            None => (n_blacks, 0),
        };
        let (rb, rc) = match node.right {
            Some(right) => {
                let bounds = (Some(&node.key), high);
                let p = Some(handle);
                self.validate_tree(right, p, red, n_blacks, depth + 1, bounds, depths)?
            }
            None => (n_blacks, 0),
        };

        if lb != rb {
            err_at!(Fatal, msg: "Index unbalanced blacks l:{}, r:{}", lb, rb)?;
        }

        Ok((lb, lc + rc + 1))
    }
}

// Tree surgery.
impl<K, V> Index<K, V> {
    fn alloc(&mut self, node: Node<K, V>) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    // Remove a detached node from the arena. The last node of the arena is
    // moved into the vacated slot and its neighbours are pointed to the new
    // handle.
    fn release(&mut self, handle: usize) -> Node<K, V> {
        let node = self.nodes.swap_remove(handle);

        let moved = self.nodes.len();
        if handle < moved {
            let (parent, left, right) = {
                let node = &self.nodes[handle];
                (node.parent, node.left, node.right)
            };
            match parent {
                Some(parent) => {
                    let parent = &mut self.nodes[parent];
                    if parent.left == Some(moved) {
                        parent.left = Some(handle)
                    } else {
                        parent.right = Some(handle)
                    }
                }
                None => self.root = Some(handle),
            }
            for child in left.into_iter().chain(right) {
                self.nodes[child].parent = Some(handle);
            }
        }

        node
    }

    fn leftmost(&self, mut handle: usize) -> usize {
        while let Some(left) = self.nodes[handle].left {
            handle = left
        }
        handle
    }

    // exchange key and value between two distinct nodes, links and
    // colors stay in place.
    fn swap_entry(&mut self, a: usize, b: usize) {
        let (lo, hi) = (cmp::min(a, b), cmp::max(a, b));
        let (head, tail) = self.nodes.split_at_mut(hi);
        let (x, y) = (&mut head[lo], &mut tail[0]);
        mem::swap(&mut x.key, &mut y.key);
        mem::swap(&mut x.value, &mut y.value);
    }

    #[inline]
    fn is_red(&self, handle: Option<usize>) -> bool {
        handle.map_or(false, |handle| self.nodes[handle].is_red())
    }

    #[inline]
    fn side_of(&self, child: usize, parent: usize) -> Side {
        if self.nodes[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Point `parent`'s link, or root when parent is None, from `old` to
    // `new`, and `new`'s parent link to `parent`.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.nodes[parent].set_child(side, new);
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    //   rotate(node, Side::Left)         rotate(node, Side::Right)
    //
    //      (i)             (i)              (i)             (i)
    //       |               |                |               |
    //      node           pivot             node           pivot
    //      /  \            / \              /  \            / \
    //     a  pivot      node  c          pivot  c          a  node
    //         / \       / \               / \                 / \
    //        b   c     a   b             a   b               b   c
    //
    // Rotate `node` down towards `dir`, its child on the other side, pivot,
    // takes its place. Colors are left untouched.
    fn rotate(&mut self, node: usize, dir: Side) {
        let pivot = match self.nodes[node].child(dir.flip()) {
            Some(pivot) => pivot,
            None => panic!("rotate(): missing pivot ? call-the-programmer"),
        };

        let inner = self.nodes[pivot].child(dir);
        self.nodes[node].set_child(dir.flip(), inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.replace_child(parent, node, Some(pivot));

        self.nodes[pivot].set_child(dir, Some(node));
        self.nodes[node].parent = Some(pivot);
    }

    // Restore red-black rules after attaching a Red node at `current`.
    fn insert_fixup(&mut self, mut current: usize) {
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].is_black() {
                break;
            }
            // a red parent is never the root.
            let grandparent = match self.nodes[parent].parent {
                Some(grandparent) => grandparent,
                None => break,
            };

            let side = self.side_of(parent, grandparent);
            let uncle = self.nodes[grandparent].child(side.flip());

            if self.is_red(uncle) {
                trace!(target: "rbt", "insert_fixup: red uncle, recolor and move up");
                self.nodes[parent].set_black();
                if let Some(uncle) = uncle {
                    self.nodes[uncle].set_black();
                }
                self.nodes[grandparent].set_red();
                current = grandparent;
                continue;
            }

            if self.nodes[parent].child(side) == Some(current) {
                trace!(target: "rbt", "insert_fixup: {:?}-{:?} rotate", side, side);
                self.rotate(grandparent, side.flip());
                self.nodes[parent].set_black();
            } else {
                trace!(target: "rbt", "insert_fixup: {:?}-{:?} rotate", side, side.flip());
                // handles are stable across rotations, grandparent still
                // names the node that moves down.
                self.rotate(parent, side);
                self.rotate(grandparent, side.flip());
                self.nodes[current].set_black();
            }
            self.nodes[grandparent].set_red();
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].set_black();
        }
    }

    // Unhook `target`, a node with at most one child, from the tree. Target
    // slot is left in the arena, with its links cleared.
    fn detach(&mut self, target: usize) {
        let (parent, color, child) = {
            let node = &self.nodes[target];
            (node.parent, node.color, node.left.or(node.right))
        };

        match (color, child) {
            // only a black node can have a single child, and that is red.
            (_, Some(child)) => {
                self.replace_child(parent, target, Some(child));
                self.nodes[child].set_black();
            }
            (Color::Red, None) => self.replace_child(parent, target, None),
            (Color::Black, None) => match parent {
                Some(parent) => {
                    let side = self.side_of(target, parent);
                    self.nodes[parent].set_child(side, None);
                    self.delete_fixup(parent, side);
                }
                None => self.root = None,
            },
        }

        self.nodes[target].unlink();
    }

    // Restore red-black rules when the `side` arm of `parent` is short of
    // one black.
    fn delete_fixup(&mut self, mut parent: usize, mut side: Side) {
        loop {
            let sibling = match self.nodes[parent].child(side.flip()) {
                Some(sibling) => sibling,
                None => panic!("delete_fixup(): missing sibling ? call-the-programmer"),
            };

            if self.nodes[sibling].is_red() {
                trace!(target: "rbt", "delete_fixup: red sibling, rotate {:?}", side);
                self.nodes[sibling].set_black();
                self.nodes[parent].set_red();
                self.rotate(parent, side);
                continue;
            }

            let outer = self.nodes[sibling].child(side.flip());
            let inner = self.nodes[sibling].child(side);

            if let Some(outer) = outer.filter(|outer| self.nodes[*outer].is_red()) {
                trace!(target: "rbt", "delete_fixup: red outer nephew");
                let color = self.nodes[parent].color;
                self.rotate(parent, side);
                self.nodes[sibling].color = color;
                self.nodes[parent].set_black();
                self.nodes[outer].set_black();
                return;
            }

            if let Some(inner) = inner.filter(|inner| self.nodes[*inner].is_red()) {
                trace!(target: "rbt", "delete_fixup: red inner nephew");
                let color = self.nodes[parent].color;
                self.rotate(sibling, side.flip());
                self.rotate(parent, side);
                self.nodes[inner].color = color;
                self.nodes[parent].set_black();
                return;
            }

            self.nodes[sibling].set_red();
            if self.nodes[parent].is_red() {
                self.nodes[parent].set_black();
                return;
            }

            match self.nodes[parent].parent {
                Some(grandparent) => {
                    trace!(target: "rbt", "delete_fixup: double black moves up");
                    side = self.side_of(parent, grandparent);
                    parent = grandparent;
                }
                None => return,
            }
        }
    }
}

/// Read-only view of a tree node, to walk an [Index] from its root.
pub struct NodeRef<'a, K, V> {
    nodes: &'a [Node<K, V>],
    handle: usize,
}

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    #[inline]
    pub fn as_key(&self) -> &'a K {
        let nodes: &'a [Node<K, V>] = self.nodes;
        &nodes[self.handle].key
    }

    #[inline]
    pub fn as_value(&self) -> &'a V {
        let nodes: &'a [Node<K, V>] = self.nodes;
        &nodes[self.handle].value
    }

    #[inline]
    pub fn to_color(&self) -> Color {
        self.nodes[self.handle].color
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.nodes[self.handle].is_black()
    }

    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        let nodes = self.nodes;
        self.nodes[self.handle]
            .left
            .map(|handle| NodeRef { nodes, handle })
    }

    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        let nodes = self.nodes;
        self.nodes[self.handle]
            .right
            .map(|handle| NodeRef { nodes, handle })
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
