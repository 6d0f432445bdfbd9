//! In-process native context for arkmirror
//!
//! This crate plays the part of the native parser/type-checker's memory:
//! it owns the authoritative node records, hands out opaque handles,
//! answers node-kind queries and exposes the post-construction setters
//! the host layer relies on. Everything above it only ever sees handles.

pub mod context;
pub mod data;
pub mod error;
pub mod handle;

pub use context::{NativeContext, NativeNode};
pub use data::*;
pub use error::{MirrorError, Result};
pub use handle::{ContextId, RawHandle};
