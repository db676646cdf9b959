//! # chatterly-storage
//!
//! Column-family key/value storage backing the chatterly user directory.
//!
//! The directory only talks to the [`Storage`] trait, so the engine can be
//! swapped without touching the authentication core. [`RocksDbStorage`] is
//! the engine shipped with the server.

#![warn(clippy::all)]

pub mod column_families;
pub mod errors;
pub mod rocksdb_impl;
pub mod traits;

pub use column_families::*;
pub use errors::{Result, StorageError};
pub use rocksdb_impl::RocksDbStorage;
pub use traits::{Batch, BatchExt, Storage};
