//! jdex-core
//!
//! Filing-system data model (areas → categories → items) with validation,
//! JSON io, an id-indexed editable catalog, quick-add parsing and the
//! search trait implemented by `jdex-search`.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod quick_add;
pub mod traits;
pub mod types;
pub mod validation;
