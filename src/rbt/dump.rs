use std::{fmt, result};

use crate::rbt::NodeRef;

/// Printable tree structure, one line per node, with its key and color.
///
/// ```text
/// Tree Structure:
/// └──20(Black)
///     ├──10(Red)
///     └──30(Red)
/// ```
pub struct Dump<'a, K, V> {
    root: Option<NodeRef<'a, K, V>>,
}

/// Same as [Dump], each line is suffixed with the entry's value.
pub struct DumpValues<'a, K, V> {
    root: Option<NodeRef<'a, K, V>>,
}

impl<'a, K, V> Dump<'a, K, V> {
    pub(crate) fn new(root: Option<NodeRef<'a, K, V>>) -> Self {
        Dump { root }
    }
}

impl<'a, K, V> DumpValues<'a, K, V> {
    pub(crate) fn new(root: Option<NodeRef<'a, K, V>>) -> Self {
        DumpValues { root }
    }
}

impl<'a, K, V> fmt::Display for Dump<'a, K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        render(f, self.root, &|_, _| Ok(()))
    }
}

impl<'a, K, V> fmt::Display for DumpValues<'a, K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        render(f, self.root, &|f, node| write!(f, " [{}]", node.as_value()))
    }
}

type Suffix<'a, K, V> = dyn Fn(&mut fmt::Formatter, NodeRef<'a, K, V>) -> fmt::Result;

fn render<'a, K, V>(
    f: &mut fmt::Formatter,
    root: Option<NodeRef<'a, K, V>>,
    suffix: &Suffix<'a, K, V>,
) -> fmt::Result
where
    K: fmt::Display,
{
    match root {
        Some(root) => {
            writeln!(f, "Tree Structure:")?;
            render_node(f, root, false, "", suffix)
        }
        None => writeln!(f, "Tree is empty"),
    }
}

fn render_node<'a, K, V>(
    f: &mut fmt::Formatter,
    node: NodeRef<'a, K, V>,
    is_left: bool,
    prefix: &str,
    suffix: &Suffix<'a, K, V>,
) -> fmt::Result
where
    K: fmt::Display,
{
    let arm = if is_left { "├──" } else { "└──" };
    write!(f, "{}{}{}({})", prefix, arm, node.as_key(), node.to_color())?;
    suffix(f, node)?;
    writeln!(f)?;

    let prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
    if let Some(left) = node.left() {
        render_node(f, left, true, &prefix, suffix)?;
    }
    if let Some(right) = node.right() {
        render_node(f, right, false, &prefix, suffix)?;
    }
    Ok(())
}
