//! Merging config definitions into the configuration tree.

mod builder;

#[cfg(test)]
mod proptests;

pub use builder::ConfigurationTreeBuilder;
