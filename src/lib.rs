#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Word-to-documents aggregation built on [`HashTable`].
///
/// This module tokenizes documents and records, for every distinct word, the
/// ordered list of documents it appears in.
pub mod bag_of_words;

mod error;

pub mod hash_table;

mod policy;

pub use error::Result;
pub use error::TableError;
pub use hash_table::HashTable;
pub use hash_table::HashTableBuilder;
pub use policy::DEFAULT_CAPACITY;
pub use policy::DEFAULT_MAX_COLLISIONS;
pub use policy::DEFAULT_MAX_LOAD_FACTOR;
pub use policy::GrowthPolicy;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder used when neither `foldhash` nor `std` is enabled.
        ///
        /// It cannot be constructed; tables must be created with an explicit
        /// hasher through [`HashTable::with_hasher`] or a
        /// `HashTableBuilder<S>` for some `S: Default`.
        #[derive(Debug, Clone, Copy)]
        pub enum DefaultHashBuilder {}
    }
}
