use crate::error::Result;
use crate::error::TableError;

/// Default number of buckets for a freshly created table.
pub const DEFAULT_CAPACITY: usize = 10;

/// Default ratio of used buckets to capacity above which `set` grows the
/// table before inserting.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.8;

/// Default longest chain tolerated before `set` grows the table.
pub const DEFAULT_MAX_COLLISIONS: usize = 3;

/// Controls when and how much a [`HashTable`](crate::HashTable) grows.
///
/// A table grows in two situations:
///
/// - Before an insertion, when `used_buckets / capacity` is strictly greater
///   than [`max_load_factor`](Self::max_load_factor).
/// - After an insertion, when the chain that received the new entry is longer
///   than [`max_collisions`](Self::max_collisions). This catches clustering
///   that the global fill ratio does not see.
///
/// The new capacity is `capacity * growth_factor + growth_increment`. The
/// defaults (`2` and `1`) keep the capacity odd.
///
/// # Examples
///
/// ```rust
/// use chain_hash::GrowthPolicy;
///
/// let policy = GrowthPolicy::default();
/// assert_eq!(policy.grown(10), 21);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    /// Fill threshold checked before each insertion.
    pub max_load_factor: f64,
    /// Longest chain tolerated after an insertion.
    pub max_collisions: usize,
    /// Multiplier applied to the capacity on growth.
    pub growth_factor: usize,
    /// Constant added to the multiplied capacity on growth.
    pub growth_increment: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            max_collisions: DEFAULT_MAX_COLLISIONS,
            growth_factor: 2,
            growth_increment: 1,
        }
    }
}

impl GrowthPolicy {
    /// Checks that the policy describes a table that can actually grow.
    pub fn validate(&self) -> Result<()> {
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(TableError::InvalidPolicy(
                "max load factor must be finite and positive",
            ));
        }
        if self.max_collisions == 0 {
            return Err(TableError::InvalidPolicy(
                "max collisions must be at least one",
            ));
        }
        if self.growth_factor == 0 || (self.growth_factor == 1 && self.growth_increment == 0) {
            return Err(TableError::InvalidPolicy(
                "growth must strictly increase the capacity",
            ));
        }
        Ok(())
    }

    /// Returns the capacity that follows `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`. Such a table could never
    /// be allocated, so this is treated like an allocation failure.
    #[inline]
    pub fn grown(&self, capacity: usize) -> usize {
        capacity
            .checked_mul(self.growth_factor)
            .and_then(|c| c.checked_add(self.growth_increment))
            .expect("hash table capacity overflow")
    }

    #[inline]
    pub(crate) fn is_overfilled(&self, used_buckets: usize, capacity: usize) -> bool {
        used_buckets as f64 / capacity as f64 > self.max_load_factor
    }
}
