use std::{fmt, result};

/// Color of a tree node. Absent children are treated as Black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

// Side of a child relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// Node corresponds to a single entry in Index instance.
#[derive(Clone)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub left: Option<usize>,   // handle: left child
    pub right: Option<usize>,  // handle: right child
    pub parent: Option<usize>, // handle: parent, not an owner
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V, color: Color) -> Node<K, V> {
        Node {
            key,
            value,
            color,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub fn set_child(&mut self, side: Side, child: Option<usize>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    // clear all links, once the node is detached from the tree.
    pub fn unlink(&mut self) {
        self.left = None;
        self.right = None;
        self.parent = None;
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
