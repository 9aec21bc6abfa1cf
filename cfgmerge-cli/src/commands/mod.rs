//! CLI command implementations.
//!
//! - `build`: Render the merged configuration tree
//! - `order`: Show the build order and module declarations
//! - `validate`: Check that the modules assemble without errors

pub mod build;
pub mod order;
pub mod validate;

pub use build::BuildCommand;
pub use order::OrderCommand;
pub use validate::ValidateCommand;
