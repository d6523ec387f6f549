use serde::de::DeserializeOwned;

use std::{fs, path, str::from_utf8};

use crate::Result;

/// Load toml file and parse it into type `T`.
pub fn load_toml<P, T>(loc: P) -> Result<T>
where
    P: AsRef<path::Path>,
    T: DeserializeOwned,
{
    let loc: &path::Path = loc.as_ref();
    let data = err_at!(IOError, fs::read(loc), "{:?}", loc)?;
    let s = err_at!(FailConvert, from_utf8(&data), "not utf8 for {:?}", loc)?;
    err_at!(FailConvert, toml::from_str(s), "file:{:?}", loc)
}

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;
