//! Module implement common utility functions and types.

pub mod files;

/// Trait to render statistic types as JSON strings.
pub trait ToJson {
    /// Call this method to get the JSON representation of type.
    fn to_json(&self) -> String;
}
