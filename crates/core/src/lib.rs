pub mod config;
pub mod error;
pub mod highlight;
pub mod local;
pub mod models;
pub mod validate;

pub use config::PrettyConfig;
pub use error::{RemoteError, ValidationError};
pub use highlight::{highlight, strip_ansi};
pub use local::format_local;
pub use models::*;
pub use validate::validate;
