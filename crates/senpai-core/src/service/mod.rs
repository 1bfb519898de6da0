//! Application services orchestrating validation and persistence.

pub mod character;
