//! Tool contracts
//!
//! Everything a tool adapter needs to declare itself and be invoked:
//!
//! - [`entities`]: tool definitions, parameter schemas, and requests
//! - [`validation`]: fail-fast schema validation before any network call
//! - [`value_objects`]: the result/error taxonomy every invocation resolves to
//! - [`payload`]: the closed set of typed success payloads
//! - [`adapter`]: the capability interface implemented per external API

pub mod adapter;
pub mod entities;
pub mod payload;
pub mod validation;
pub mod value_objects;
