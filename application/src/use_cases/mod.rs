//! Application use cases

pub mod build_guide;
