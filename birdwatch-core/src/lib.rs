pub mod error;
pub mod error_utils;
pub mod path;
pub mod render;
pub mod types;

pub use error::*;
pub use error_utils::*;
pub use path::{PathQuery, PathResult};
pub use render::{FieldValue, Report};
pub use types::*;
