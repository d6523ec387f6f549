//! Module implement red-black tree index with parent-linked nodes.
//!
//! Nodes are held in an arena owned by the [Index], parent/left/right links
//! are handles into that arena. Insert and delete descend the tree to the
//! mutation point and then walk back towards the root, recoloring and
//! rotating nodes until all red-black rules are restored.

mod depth;
mod dump;
mod index;
mod node;
mod stats;

pub use depth::Depth;
pub use dump::{Dump, DumpValues};
pub use index::{Index, NodeRef, MAX_TREE_DEPTH};
pub use node::Color;
use node::{Node, Side};
pub use stats::Stats;
