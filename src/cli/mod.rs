//! CLI command implementations
//!
//! - `build`: run the full pipeline and write a decision list
//! - `inspect`: rank candidates, evaluate an existing decision list
//! - `schema`: JSON Schemas of the file formats
//! - `util`: shared argument helpers

pub mod build;
pub mod inspect;
pub mod schema;
pub mod util;

pub use build::cmd_build;
pub use inspect::{cmd_points, cmd_rank};
pub use schema::cmd_schema;
