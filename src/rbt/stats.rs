use std::{fmt, result};

#[allow(unused_imports)]
use crate::rbt::Index;
use crate::{rbt::Depth, util::ToJson};

/// Statistic type, for [Index] type.
pub struct Stats {
    pub name: String,
    pub node_size: usize,
    pub n_count: usize,
    pub blacks: Option<usize>,
    pub depths: Option<Depth>,
}

impl Stats {
    pub(crate) fn new(name: &str) -> Stats {
        Stats {
            name: name.to_string(),
            node_size: Default::default(),
            n_count: Default::default(),
            blacks: None,
            depths: None,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let none = "none".to_string();
        let b = self.blacks.as_ref().map_or(none.clone(), |x| x.to_string());
        let d = self.depths.as_ref().map_or(none, |x| x.to_string());
        writeln!(f, "rbt.name = {}", self.name)?;
        writeln!(
            f,
            "rbt = {{ n_count={}, node_size={}, blacks={} }}",
            self.n_count, self.node_size, b,
        )?;
        writeln!(f, "rbt.depths = {}", d)
    }
}

impl ToJson for Stats {
    fn to_json(&self) -> String {
        let null = "null".to_string();
        format!(
            concat!(
                r#"{{ "rbt": {{ "name": "{}", "n_count": {}, "#,
                r#""node_size": {}, "blacks": {}, "depths": {} }} }}"#,
            ),
            self.name,
            self.n_count,
            self.node_size,
            self.blacks
                .as_ref()
                .map_or(null.clone(), |x| format!("{}", x)),
            self.depths.as_ref().map_or(null, |x| x.to_json()),
        )
    }
}
