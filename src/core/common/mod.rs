pub mod error;
pub use error::OxikdError;
