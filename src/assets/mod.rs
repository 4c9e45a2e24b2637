//! Model asset fetching: manifest of remote assets and the downloader.

pub mod fetch;
pub mod manifest;

pub use fetch::fetch_all;
pub use manifest::{ASSETS, AssetKind, AssetSpec};
