//! Configuration objects and the store handle that loads and saves them
//!
//! This module contains:
//! - [`ConfigObject`]: a named document within one collection
//! - [`ConfigFactory`]: the explicit handle every component reads and writes through

pub mod factory;
pub mod object;

pub use factory::ConfigFactory;
pub use object::ConfigObject;
