//! Fluent construction of resolvers

mod core;

pub use self::core::*;
