//! Dashboard table behavior shared by every host
//!
//! The browser binding lives in `dashtable-wasm`; everything here is plain
//! Rust so it can be tested on the native target.

pub mod config;
pub mod error;
pub mod format;
pub mod navigation;
pub mod sort;

pub use config::{DashtableConfig, DisplayConfig};
pub use error::{ConfigError, SortError, UnknownColumnType};
pub use navigation::{is_activation_key, is_interactive_tag, RouteMap, RouteRule, RowInfo};
pub use sort::*;
