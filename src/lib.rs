pub mod core;
pub mod error;
pub mod narration;
pub mod plot;

pub use error::{Error, Result};
