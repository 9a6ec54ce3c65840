use thiserror::Error;

/// Errors reported by [`HashTable`](crate::HashTable) and its builder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// No entry with the requested key exists.
    #[error("key not found")]
    KeyNotFound,
    /// A bucket index was negative or not below the bucket count.
    #[error("bucket index out of range for a table with {bucket_count} buckets")]
    IndexOutOfRange {
        /// Number of buckets at the time of the request.
        bucket_count: usize,
    },
    /// A table cannot be built with zero buckets.
    #[error("initial capacity must be positive")]
    InvalidCapacity,
    /// A growth policy parameter was rejected.
    #[error("invalid growth policy: {0}")]
    InvalidPolicy(&'static str),
}

/// Result type used throughout the crate.
pub type Result<T, E = TableError> = core::result::Result<T, E>;
