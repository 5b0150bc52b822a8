pub mod asset;
pub mod generate;
pub mod loader;
pub mod rng;
pub mod validate;

pub use asset::Asset;
pub use loader::{load_assets, parse_assets, LoadError, LoadReport, MalformedRecord};
