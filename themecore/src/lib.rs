pub mod cache;
pub mod color;
pub mod error;
pub mod grouping;
pub mod height;
pub mod layout;
pub mod settings;
pub mod types;

pub use error::{Error, Result};
