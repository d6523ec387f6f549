//! Package implement an in-memory [red-black tree][rbtree] index, along
//! with a counting-set adapter built on top of it.
//!
//! [rbt::Index] is an ordered map from key to value. All mutations, set,
//! update and delete, complete in O(log n) time, the tree is rebalanced
//! after every insert and delete using color-flips and rotations so that
//! the height of the tree never exceeds `2 * log2(n + 1)`.
//!
//! [set::CountSet] counts occurrences of each key, storing the count as
//! value in an [rbt::Index].
//!
//! Index is single-threaded, mutations take `&mut self`. Applications that
//! need to share an index across threads shall wrap the whole index under
//! a single lock.
//!
//! [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

/// Short form to compose Error values.
///
/// Here are few possible ways:
///
/// ```ignore
/// use crate::Error;
/// err_at!(KeyNotFound, msg: "bad argument");
/// ```
///
/// ```ignore
/// use crate::Error;
/// err_at!(IOError, std::io::read(buf));
/// ```
///
/// ```ignore
/// use crate::Error;
/// err_at!(IOError, std::fs::read(file_path), "read failed");
/// ```
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err($crate::Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod error;

pub mod rbt;
pub mod set;
pub mod util;

pub use crate::error::Error;

/// Type alias for Result return type, used by this package.
pub type Result<T> = std::result::Result<T, Error>;
