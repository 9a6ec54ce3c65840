use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::mem;

use log::debug;
use log::trace;

use crate::DefaultHashBuilder;
use crate::error::Result;
use crate::error::TableError;
use crate::policy::DEFAULT_CAPACITY;
use crate::policy::GrowthPolicy;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// One entry of a chain. The hash is cached so growth never has to rehash
/// keys.
struct Node<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Link<K, V>,
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Link<K, V>]> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots.into_boxed_slice()
}

/// Unlinks a chain node by node so that long chains are not dropped through
/// recursive `Box` destructors.
fn drop_chain<K, V>(link: &mut Link<K, V>) {
    let mut cursor = link.take();
    while let Some(mut node) = cursor {
        cursor = node.next.take();
    }
}

/// Rebuilds a chain with cloned entries, keeping head-to-tail order.
fn clone_chain<K: Clone, V: Clone>(link: &Link<K, V>) -> Link<K, V> {
    let mut nodes = Vec::new();
    let mut cursor = link.as_deref();
    while let Some(node) = cursor {
        nodes.push(node);
        cursor = node.next.as_deref();
    }

    let mut head = None;
    for node in nodes.into_iter().rev() {
        head = Some(Box::new(Node {
            key: node.key.clone(),
            value: node.value.clone(),
            hash: node.hash,
            next: head,
        }));
    }
    head
}

/// Chain-length statistics for a [`HashTable`].
///
/// Requires the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries in the table
    pub len: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Number of buckets holding at least one entry
    pub used_buckets: usize,
    /// Used buckets divided by capacity
    pub load_factor: f64,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Average chain length over non-empty buckets
    pub mean_chain_length: f64,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Chain Statistics ===");
        println!("Entries: {} in {} buckets", self.len, self.capacity);
        println!(
            "Used buckets: {}/{} ({:.2}% load factor)",
            self.used_buckets,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Chains: longest {}, mean {:.2}",
            self.longest_chain, self.mean_chain_length
        );
    }
}

/// A hash table using separate chaining.
///
/// `HashTable<K, V, S>` maps unique keys to values. Every bucket owns a singly
/// linked chain of entries whose hash falls in that bucket; new entries are
/// pushed at the head of their chain. Each entry caches the hash of its key,
/// computed once with the hasher builder `S`.
///
/// The table grows (never shrinks) according to its [`GrowthPolicy`]:
/// before an insertion when too many buckets are in use, and after an
/// insertion when the receiving chain became too long. Growth relinks the
/// existing entries into a larger bucket array using their cached hashes.
///
/// ## Example
///
/// ```rust
/// use chain_hash::HashTable;
/// use chain_hash::TableError;
///
/// let mut table = HashTable::new();
/// table.set("la".to_string(), vec![0]);
/// table.set("casa".to_string(), vec![0]);
///
/// table.get_mut("casa").unwrap().push(1);
/// assert_eq!(table.get("casa"), Ok(&vec![0, 1]));
/// assert_eq!(table.get("sol"), Err(TableError::KeyNotFound));
///
/// assert!(table.remove("la"));
/// assert!(!table.contains("la"));
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    slots: Box<[Link<K, V>]>,
    bucket_sizes: Box<[usize]>,

    len: usize,
    used_buckets: usize,

    policy: GrowthPolicy,
    hash_builder: S,
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Clone for HashTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.iter().map(clone_chain).collect(),
            bucket_sizes: self.bucket_sizes.clone(),
            len: self.len,
            used_buckets: self.used_buckets,
            policy: self.policy,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, S> Drop for HashTable<K, V, S> {
    fn drop(&mut self) {
        for slot in self.slots.iter_mut() {
            drop_chain(slot);
        }
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<K, V> HashTable<K, V, DefaultHashBuilder> {
    /// Creates an empty table with 10 buckets and the default hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with `capacity` buckets and the default hasher.
    ///
    /// A capacity of zero is raised to one bucket. Use
    /// [`HashTableBuilder::build`] to have it rejected instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let table: HashTable<String, Vec<usize>> = HashTable::with_capacity(13);
    /// assert_eq!(table.bucket_count(), 13);
    ///
    /// let clamped: HashTable<u64, u64> = HashTable::with_capacity(0);
    /// assert_eq!(clamped.bucket_count(), 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Returns a builder for configuring capacity and growth policy.
    pub fn builder() -> HashTableBuilder<DefaultHashBuilder> {
        HashTableBuilder::new()
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table with 10 buckets using `hash_builder` to hash
    /// keys.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty table with `capacity` buckets using `hash_builder` to
    /// hash keys. A capacity of zero is raised to one bucket.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_parts(capacity.max(1), GrowthPolicy::default(), hash_builder)
    }

    fn from_parts(capacity: usize, policy: GrowthPolicy, hash_builder: S) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: empty_slots(capacity),
            bucket_sizes: vec![0; capacity].into_boxed_slice(),
            len: 0,
            used_buckets: 0,
            policy,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of buckets that hold at least one entry.
    pub fn used_buckets(&self) -> usize {
        self.used_buckets
    }

    /// Returns the ratio of used buckets to buckets, the quantity compared
    /// against [`GrowthPolicy::max_load_factor`].
    pub fn load_factor(&self) -> f64 {
        self.used_buckets as f64 / self.slots.len() as f64
    }

    /// Returns the growth policy of this table.
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Returns the hasher builder used for keys.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the length of the chain stored in bucket `index`.
    ///
    /// `index` may be any integer type. Negative values and values not below
    /// [`bucket_count`](Self::bucket_count) fail with
    /// [`TableError::IndexOutOfRange`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// # use chain_hash::TableError;
    /// #
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(10);
    /// assert_eq!(table.bucket_size(3), Ok(0));
    /// assert_eq!(
    ///     table.bucket_size(-1),
    ///     Err(TableError::IndexOutOfRange { bucket_count: 10 })
    /// );
    /// assert!(table.bucket_size(10).is_err());
    /// ```
    pub fn bucket_size<I: TryInto<usize>>(&self, index: I) -> Result<usize> {
        let index = self.checked_bucket(index)?;
        Ok(self.bucket_sizes[index])
    }

    /// Returns an iterator over the entries of bucket `index`, from the most
    /// recently inserted to the oldest.
    ///
    /// Each call starts a fresh pass over the chain. Index validation follows
    /// [`bucket_size`](Self::bucket_size).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(13);
    /// table.set("casa", 1);
    ///
    /// for index in 0..table.bucket_count() {
    ///     for entry in table.bucket(index).unwrap() {
    ///         println!("{} -> {} ({:016x})", entry.key, entry.value, entry.hash);
    ///     }
    /// }
    /// ```
    pub fn bucket<I: TryInto<usize>>(&self, index: I) -> Result<Bucket<'_, K, V>> {
        let index = self.checked_bucket(index)?;
        Ok(Bucket {
            cursor: self.slots[index].as_deref(),
            remaining: self.bucket_sizes[index],
        })
    }

    fn checked_bucket<I: TryInto<usize>>(&self, index: I) -> Result<usize> {
        index
            .try_into()
            .ok()
            .filter(|&index| index < self.slots.len())
            .ok_or(TableError::IndexOutOfRange {
                bucket_count: self.slots.len(),
            })
    }

    /// Returns an iterator over all entries, bucket by bucket and then head
    /// to tail within each chain.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            cursor: None,
            remaining: self.len,
        }
    }

    /// Returns an iterator yielding mutable references to the values, in the
    /// same order as [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            cursor: None,
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            drop_chain(slot);
        }
        self.bucket_sizes.fill(0);
        self.len = 0;
        self.used_buckets = 0;
    }

    #[inline(always)]
    fn slot_index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Pushes `node` onto the head of its bucket under the current capacity.
    #[inline]
    fn link_front(&mut self, mut node: Box<Node<K, V>>) -> usize {
        let index = self.slot_index(node.hash);
        node.next = self.slots[index].take();
        self.slots[index] = Some(node);

        self.len += 1;
        self.bucket_sizes[index] += 1;
        if self.bucket_sizes[index] == 1 {
            self.used_buckets += 1;
        }
        index
    }

    /// Grows the bucket array and relinks every entry by its cached hash.
    ///
    /// The new arrays are allocated before the old ones are detached, and
    /// entries are moved rather than reinserted, so growth cannot recurse.
    #[cold]
    fn rehash(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = self.policy.grown(old_capacity);

        let new_slots = empty_slots(new_capacity);
        let new_sizes = vec![0; new_capacity].into_boxed_slice();
        let old_slots = mem::replace(&mut self.slots, new_slots);
        self.bucket_sizes = new_sizes;

        let entries = self.len;
        self.len = 0;
        self.used_buckets = 0;

        for mut link in old_slots.into_vec() {
            while let Some(mut node) = link {
                link = node.next.take();
                self.link_front(node);
            }
        }

        debug_assert_eq!(self.len, entries);
        debug!(
            "rehashed {} entries from {} to {} buckets ({} in use)",
            entries, old_capacity, new_capacity, self.used_buckets
        );
    }

    /// Counts buckets by chain length: `histogram[n]` is the number of
    /// buckets whose chain holds exactly `n` entries.
    ///
    /// Requires the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let longest = self.bucket_sizes.iter().copied().max().unwrap_or(0);
        let mut hist = vec![0usize; longest + 1];
        for &size in self.bucket_sizes.iter() {
            hist[size] += 1;
        }
        hist
    }

    /// Returns a snapshot of chain-length statistics.
    ///
    /// Requires the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            len: self.len,
            capacity: self.slots.len(),
            used_buckets: self.used_buckets,
            load_factor: self.load_factor(),
            longest_chain: self.bucket_sizes.iter().copied().max().unwrap_or(0),
            mean_chain_length: if self.used_buckets == 0 {
                0.0
            } else {
                self.len as f64 / self.used_buckets as f64
            },
        }
    }

    /// Pretty-prints the chain-length histogram as a horizontal bar chart.
    ///
    /// Requires the `stats` and `std` features.
    #[cfg(all(feature = "stats", feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if self.len == 0 || max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!(
            "chain histogram ({} entries, {} buckets):",
            self.len,
            self.slots.len()
        );
        for (length, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", length, "█".repeat(width), count);
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns a reference to the value stored for `key`.
    ///
    /// The key may be any borrowed form of `K`; `Hash` and `Eq` on the
    /// borrowed form must match those of `K`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if no entry has an equal key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key)
            .map(|node| &node.value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if no entry has an equal key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let index = self.slot_index(hash);
        Self::find_in_chain_mut(&mut self.slots[index], hash, key)
            .map(|node| &mut node.value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Returns `true` if an entry with an equal key exists.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Associates `value` with `key`.
    ///
    /// If the key is already present its value is replaced in place and the
    /// previous value is returned; the table does not grow in that case.
    /// Otherwise the entry is pushed at the head of its bucket and `None` is
    /// returned.
    ///
    /// The table grows before inserting when its load factor is above the
    /// policy's maximum, and after inserting when the receiving bucket holds
    /// more entries than the policy's maximum collisions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table: HashTable<u64, &str> = HashTable::with_capacity(10);
    /// for key in 0..30 {
    ///     table.set(key, "x");
    /// }
    /// assert_eq!(table.len(), 30);
    /// assert!(table.bucket_count() > 10);
    ///
    /// assert_eq!(table.set(3, "y"), Some("x"));
    /// assert_eq!(table.len(), 30);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if self
            .policy
            .is_overfilled(self.used_buckets, self.slots.len())
        {
            self.rehash();
        }

        let hash = self.hash_builder.hash_one(&key);
        let index = self.slot_index(hash);
        if let Some(node) = Self::find_in_chain_mut(&mut self.slots[index], hash, &key) {
            return Some(mem::replace(&mut node.value, value));
        }

        let node = Box::new(Node {
            key,
            value,
            hash,
            next: None,
        });
        let index = self.link_front(node);

        if self.bucket_sizes[index] > self.policy.max_collisions {
            trace!(
                "bucket {} holds {} entries, growing from {} buckets",
                index,
                self.bucket_sizes[index],
                self.slots.len()
            );
            self.rehash();
        }

        None
    }

    /// Removes the entry for `key`, returning `true` if one was present.
    ///
    /// Removal never changes the bucket count.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes the entry for `key` and returns its owned key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let index = self.slot_index(hash);

        let mut link = &mut self.slots[index];
        while link
            .as_ref()
            .is_some_and(|node| node.hash != hash || key != node.key.borrow())
        {
            link = &mut link.as_mut()?.next;
        }

        let mut node = link.take()?;
        *link = node.next.take();

        self.len -= 1;
        self.bucket_sizes[index] -= 1;
        if self.bucket_sizes[index] == 0 {
            self.used_buckets -= 1;
        }

        Some((node.key, node.value))
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let mut cursor = self.slots[self.slot_index(hash)].as_deref();
        while let Some(node) = cursor {
            if node.hash == hash && key == node.key.borrow() {
                return Some(node);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    fn find_in_chain_mut<'a, Q>(
        link: &'a mut Link<K, V>,
        hash: u64,
        key: &Q,
    ) -> Option<&'a mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cursor = link.as_deref_mut();
        while let Some(node) = cursor {
            if node.hash == hash && key == node.key.borrow() {
                return Some(node);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashTable<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(mut self) -> Self::IntoIter {
        let remaining = mem::take(&mut self.len);
        self.used_buckets = 0;
        IntoIter {
            slots: mem::take(&mut self.slots).into_vec().into_iter(),
            chain: None,
            remaining,
        }
    }
}

/// Configures and builds a [`HashTable`].
///
/// Unlike the infallible constructors on [`HashTable`], [`build`] validates
/// its input: a zero capacity and an invalid [`GrowthPolicy`] are reported
/// as errors.
///
/// [`build`]: HashTableBuilder::build
///
/// # Examples
///
/// ```rust
/// # use chain_hash::HashTable;
/// # use chain_hash::HashTableBuilder;
/// # use chain_hash::TableError;
/// #
/// let table: HashTable<String, u32> = HashTableBuilder::new()
///     .with_capacity(5)
///     .with_max_load_factor(0.5)
///     .with_max_collisions(2)
///     .build()?;
/// assert_eq!(table.bucket_count(), 5);
/// assert_eq!(table.policy().max_collisions, 2);
///
/// let rejected = HashTableBuilder::new().with_capacity(0).build::<String, u32>();
/// assert_eq!(rejected.err(), Some(TableError::InvalidCapacity));
/// # Ok::<(), TableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HashTableBuilder<S = DefaultHashBuilder> {
    capacity: usize,
    policy: GrowthPolicy,
    hash_builder: S,
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl HashTableBuilder<DefaultHashBuilder> {
    /// Creates a builder with 10 buckets, the default policy and the default
    /// hasher.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Default> Default for HashTableBuilder<S> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: GrowthPolicy::default(),
            hash_builder: S::default(),
        }
    }
}

impl<S> HashTableBuilder<S> {
    /// Sets the initial number of buckets.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the used-bucket ratio above which insertions grow the table.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.policy.max_load_factor = max_load_factor;
        self
    }

    /// Sets the longest chain tolerated before an insertion grows the table.
    pub fn with_max_collisions(mut self, max_collisions: usize) -> Self {
        self.policy.max_collisions = max_collisions;
        self
    }

    /// Sets the growth formula `capacity * factor + increment`.
    pub fn with_growth(mut self, factor: usize, increment: usize) -> Self {
        self.policy.growth_factor = factor;
        self.policy.growth_increment = increment;
        self
    }

    /// Replaces the whole growth policy.
    pub fn with_policy(mut self, policy: GrowthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the hasher builder, changing the builder's hasher type.
    pub fn with_hasher<T>(self, hash_builder: T) -> HashTableBuilder<T> {
        HashTableBuilder {
            capacity: self.capacity,
            policy: self.policy,
            hash_builder,
        }
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidCapacity`] for a zero capacity, or
    /// [`TableError::InvalidPolicy`] if [`GrowthPolicy::validate`] fails.
    pub fn build<K, V>(self) -> Result<HashTable<K, V, S>> {
        if self.capacity == 0 {
            return Err(TableError::InvalidCapacity);
        }
        self.policy.validate()?;
        Ok(HashTable::from_parts(
            self.capacity,
            self.policy,
            self.hash_builder,
        ))
    }
}

/// An entry yielded by [`Bucket`].
#[derive(Debug)]
pub struct BucketEntry<'a, K, V> {
    /// The entry's key
    pub key: &'a K,
    /// The entry's value
    pub value: &'a V,
    /// The hash cached when the key was inserted
    pub hash: u64,
}

impl<K, V> Clone for BucketEntry<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for BucketEntry<'_, K, V> {}

/// An iterator over the chain of a single bucket.
///
/// This struct is created by [`HashTable::bucket`]. Entries come out head
/// first, which is the reverse of their insertion order.
pub struct Bucket<'a, K, V> {
    cursor: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Bucket<'a, K, V> {
    type Item = BucketEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        self.remaining -= 1;
        Some(BucketEntry {
            key: &node.key,
            value: &node.value,
            hash: node.hash,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Bucket<'_, K, V> {}

impl<K, V> FusedIterator for Bucket<'_, K, V> {}

/// An iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter`].
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Link<K, V>>,
    cursor: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.cursor {
                self.cursor = node.next.as_deref();
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            self.cursor = self.slots.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter_mut`].
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Link<K, V>>,
    cursor: Option<&'a mut Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.cursor.take() {
                self.cursor = node.next.as_deref_mut();
                self.remaining -= 1;
                return Some((&node.key, &mut node.value));
            }
            self.cursor = self.slots.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a [`HashTable`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashTable`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A mutable iterator over the values of a [`HashTable`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An owning iterator over the entries of a [`HashTable`].
///
/// Entries come out in the same order as [`HashTable::iter`].
pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Link<K, V>>,
    chain: Link<K, V>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.remaining -= 1;
                return Some((node.key, node.value));
            }
            self.chain = self.slots.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use core::hash::BuildHasherDefault;
    use core::hash::Hasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipState {
        k0: u64,
        k1: u64,
    }

    impl Default for SipState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap_or(0),
                k1: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    impl BuildHasher for SipState {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    /// Hashes a `u64` key to itself so tests can place keys in buckets.
    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 << 8) | b as u64;
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    type IdentityState = BuildHasherDefault<IdentityHasher>;

    fn identity_table(capacity: usize) -> HashTable<u64, u64, IdentityState> {
        HashTable::with_capacity_and_hasher(capacity, IdentityState::default())
    }

    fn bucket_keys<V, S>(table: &HashTable<u64, V, S>, index: usize) -> Vec<u64> {
        table.bucket(index).unwrap().map(|e| *e.key).collect()
    }

    fn assert_invariants<K, V, S>(table: &HashTable<K, V, S>) {
        let sizes: Vec<usize> = (0..table.bucket_count())
            .map(|i| table.bucket_size(i).unwrap())
            .collect();
        assert_eq!(sizes.iter().sum::<usize>(), table.len());
        assert_eq!(
            sizes.iter().filter(|&&s| s > 0).count(),
            table.used_buckets()
        );
        for (index, &size) in sizes.iter().enumerate() {
            let mut seen = 0;
            for entry in table.bucket(index).unwrap() {
                assert_eq!((entry.hash % table.bucket_count() as u64) as usize, index);
                seen += 1;
            }
            assert_eq!(seen, size);
        }
    }

    #[test]
    fn set_and_get() {
        let mut table = HashTable::with_hasher(SipState::default());
        for k in 0..32u64 {
            assert_eq!(table.set(k, (k as i32) * 2), None);
            assert_eq!(table.get(&k), Ok(&((k as i32) * 2)), "{:#?}", table);
        }
        assert_eq!(table.len(), 32);
        for k in 0..32u64 {
            assert_eq!(table.get(&k), Ok(&((k as i32) * 2)));
            assert!(table.contains(&k));
        }
        assert_eq!(table.get(&999), Err(TableError::KeyNotFound));
        assert!(!table.contains(&999));
        assert_invariants(&table);
    }

    #[test]
    fn set_existing_key_updates_in_place() {
        let mut table = identity_table(5);
        table.set(0, 1);
        table.set(5, 2);
        table.set(10, 3);
        let capacity = table.bucket_count();

        assert_eq!(table.set(5, 20), Some(2));
        assert_eq!(table.len(), 3);
        assert_eq!(table.bucket_count(), capacity);
        assert_eq!(table.get(&5), Ok(&20));
        assert_eq!(bucket_keys(&table, 0), vec![10, 5, 0]);
    }

    #[test]
    fn get_mut_modifies_value() {
        let mut table = HashTable::with_hasher(SipState::default());
        table.set("hello".to_string(), "hello".to_string());

        table.get_mut("hello").unwrap().push_str(" world");
        assert_eq!(table.get("hello"), Ok(&"hello world".to_string()));
        assert_eq!(table.get_mut("missing"), Err(TableError::KeyNotFound));
    }

    #[test]
    fn borrowed_string_lookups() {
        let mut table: HashTable<String, Vec<usize>, SipState> =
            HashTable::with_capacity_and_hasher(13, SipState::default());
        for word in ["la", "casa", "es", "grande"] {
            table.set(word.to_string(), vec![0]);
        }

        assert!(table.contains("casa"));
        assert_eq!(table.get("la"), Ok(&vec![0]));
        assert!(table.remove("es"));
        assert!(!table.contains("es"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn remove_items() {
        let mut table = HashTable::with_hasher(SipState::default());
        for k in 0..50u64 {
            table.set(k, k + 100);
        }
        for k in (0..50u64).step_by(2) {
            assert!(table.remove(&k));
            assert!(!table.contains(&k));
            assert_eq!(table.get(&k), Err(TableError::KeyNotFound));
        }
        assert_eq!(table.len(), 25);
        for k in (1..50u64).step_by(2) {
            assert_eq!(table.get(&k), Ok(&(k + 100)));
        }
        assert_invariants(&table);
    }

    #[test]
    fn remove_absent_key_changes_nothing() {
        let mut table = identity_table(7);
        table.set(1, 1);
        table.set(8, 8);
        let before: Vec<usize> = (0..7).map(|i| table.bucket_size(i).unwrap()).collect();

        assert!(!table.remove(&15));
        assert!(!table.remove(&2));
        assert_eq!(table.remove_entry(&3), None);

        let after: Vec<usize> = (0..7).map(|i| table.bucket_size(i).unwrap()).collect();
        assert_eq!(before, after);
        assert_eq!(table.len(), 2);
        assert_eq!(table.used_buckets(), 1);
        assert_eq!(table.bucket_count(), 7);
    }

    #[test]
    fn remove_releases_bucket_only_when_chain_empties() {
        let mut table = identity_table(5);
        table.set(0, 0);
        table.set(5, 5);
        table.set(1, 1);
        assert_eq!(table.used_buckets(), 2);

        assert!(table.remove(&5));
        assert_eq!(table.bucket_size(0), Ok(1));
        assert_eq!(table.used_buckets(), 2);

        assert!(table.remove(&0));
        assert_eq!(table.bucket_size(0), Ok(0));
        assert_eq!(table.used_buckets(), 1);

        assert!(table.remove(&1));
        assert_eq!(table.used_buckets(), 0);
        assert!(table.is_empty());
        assert_invariants(&table);
    }

    #[test]
    fn remove_from_head_middle_and_tail() {
        let mut table = identity_table(7);
        for k in [0, 7, 14] {
            table.set(k, k);
        }
        assert_eq!(bucket_keys(&table, 0), vec![14, 7, 0]);

        assert_eq!(table.remove_entry(&7), Some((7, 7)));
        assert_eq!(bucket_keys(&table, 0), vec![14, 0]);

        assert_eq!(table.remove_entry(&0), Some((0, 0)));
        assert_eq!(bucket_keys(&table, 0), vec![14]);

        table.set(21, 21);
        assert_eq!(table.remove_entry(&21), Some((21, 21)));
        assert_eq!(bucket_keys(&table, 0), vec![14]);
        assert_invariants(&table);
    }

    #[test]
    fn load_factor_growth() {
        let mut table = identity_table(10);
        for k in 0..9u64 {
            table.set(k, k * 10);
        }
        // 9 of 10 buckets in use; the check only runs on the next insert.
        assert_eq!(table.bucket_count(), 10);
        assert_eq!(table.used_buckets(), 9);

        table.set(9, 90);
        table.set(10, 100);
        assert_eq!(table.bucket_count(), 21);
        assert_eq!(table.len(), 11);
        for k in 0..11u64 {
            assert_eq!(table.get(&k), Ok(&(k * 10)));
        }
        assert_invariants(&table);
    }

    #[test]
    fn collision_growth() {
        let mut table = identity_table(5);
        for k in [0, 5, 10] {
            table.set(k, k);
        }
        assert_eq!(table.bucket_count(), 5);
        assert_eq!(table.bucket_size(0), Ok(3));

        table.set(15, 15);
        assert_eq!(table.bucket_count(), 11);
        assert_eq!(table.len(), 4);
        assert_eq!(table.used_buckets(), 4);
        for (k, bucket) in [(0u64, 0usize), (5, 5), (10, 10), (15, 4)] {
            assert_eq!(bucket_keys(&table, bucket), vec![k]);
        }
        assert_invariants(&table);
    }

    #[test]
    fn explicit_collision_with_relaxed_policy() {
        let mut table: HashTable<u64, u64, IdentityState> = HashTableBuilder::default()
            .with_capacity(1)
            .with_max_load_factor(f64::MAX)
            .with_max_collisions(usize::MAX)
            .build()
            .unwrap();
        for k in 0..65u64 {
            table.set(k, k);
        }
        assert_eq!(table.bucket_count(), 1);
        assert_eq!(table.bucket_size(0), Ok(65));
        for k in 0..65u64 {
            assert_eq!(table.get(&k), Ok(&k));
        }
    }

    #[test]
    fn bucket_size_out_of_range() {
        let table = identity_table(10);
        let err = TableError::IndexOutOfRange { bucket_count: 10 };
        assert_eq!(table.bucket_size(-1), Err(err));
        assert_eq!(table.bucket_size(10), Err(err));
        assert_eq!(table.bucket_size(table.bucket_count()), Err(err));
        assert_eq!(table.bucket_size(i64::MIN), Err(err));
        assert!(table.bucket(10usize).is_err());
        assert!(table.bucket(-3).is_err());
        assert_eq!(table.bucket_size(9u8), Ok(0));
    }

    #[test]
    fn rehash_preserves_associations_and_hashes() {
        let mut table = HashTable::with_capacity_and_hasher(3, SipState::default());
        for k in 0..8u64 {
            table.set(k, k.to_string());
        }
        let hashes: BTreeMap<u64, u64> = (0..table.bucket_count())
            .flat_map(|i| table.bucket(i).unwrap())
            .map(|e| (*e.key, e.hash))
            .collect();

        let capacity = table.bucket_count();
        for k in 8..200u64 {
            table.set(k, k.to_string());
        }
        assert!(table.bucket_count() > capacity);

        for i in 0..table.bucket_count() {
            for entry in table.bucket(i).unwrap() {
                if let Some(&hash) = hashes.get(entry.key) {
                    assert_eq!(entry.hash, hash);
                }
                assert_eq!(entry.hash, table.hasher().hash_one(entry.key));
            }
        }
        for k in 0..200u64 {
            assert_eq!(table.get(&k), Ok(&k.to_string()));
        }
        assert_invariants(&table);
    }

    #[test]
    fn capacity_is_odd_and_never_shrinks() {
        let mut table = HashTable::with_capacity_and_hasher(10, SipState::default());
        let mut last = table.bucket_count();
        for k in 0..500u64 {
            table.set(k, ());
            assert!(table.bucket_count() >= last);
            last = table.bucket_count();
        }
        assert_eq!(last % 2, 1);
        for k in 0..500u64 {
            table.remove(&k);
        }
        assert_eq!(table.bucket_count(), last);
        assert!(table.is_empty());
    }

    #[test]
    fn random_operations_match_model() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut table = HashTable::with_capacity_and_hasher(4, SipState::default());
        let mut model = BTreeMap::new();

        for step in 0..2_000u32 {
            let key = rng.random_range(0..128u64);
            if rng.random_bool(0.35) {
                assert_eq!(table.remove(&key), model.remove(&key).is_some());
            } else {
                assert_eq!(table.set(key, step), model.insert(key, step));
            }
            assert_eq!(table.len(), model.len());
        }

        for (key, value) in &model {
            assert_eq!(table.get(key), Ok(value));
        }
        for key in 0..128u64 {
            assert_eq!(table.contains(&key), model.contains_key(&key));
        }
        assert_invariants(&table);
    }

    #[test]
    fn bucket_iteration_is_head_first_and_restartable() {
        let mut table = identity_table(7);
        for k in [0, 7, 14, 3] {
            table.set(k, k + 1);
        }

        let bucket = table.bucket(0).unwrap();
        assert_eq!(bucket.len(), 3);
        let entries: Vec<(u64, u64, u64)> = bucket.map(|e| (*e.key, *e.value, e.hash)).collect();
        assert_eq!(entries, vec![(14, 15, 14), (7, 8, 7), (0, 1, 0)]);

        assert_eq!(bucket_keys(&table, 0), vec![14, 7, 0]);
        assert_eq!(bucket_keys(&table, 3), vec![3]);
        assert_eq!(table.bucket(1).unwrap().next().map(|e| *e.key), None);
    }

    #[test]
    fn iter_visits_buckets_in_order() {
        let mut table = identity_table(10);
        for k in [3, 1, 2, 11] {
            table.set(k, k * 2);
        }
        let keys: Vec<u64> = table.keys().copied().collect();
        assert_eq!(keys, vec![11, 1, 2, 3]);
        let values: Vec<u64> = table.values().copied().collect();
        assert_eq!(values, vec![22, 2, 4, 6]);
        assert_eq!(table.iter().len(), 4);
        assert_eq!((&table).into_iter().count(), 4);
    }

    #[test]
    fn iter_mut_and_values_mut() {
        let mut table = HashTable::with_hasher(SipState::default());
        for k in 0..20u64 {
            table.set(k, k);
        }
        for (k, v) in table.iter_mut() {
            *v += *k;
        }
        for v in table.values_mut() {
            *v += 1;
        }
        for k in 0..20u64 {
            assert_eq!(table.get(&k), Ok(&(2 * k + 1)));
        }
    }

    #[test]
    fn into_iter_yields_everything() {
        let mut table = HashTable::with_hasher(SipState::default());
        for k in 0..30u64 {
            table.set(k, k.to_string());
        }
        let mut drained: Vec<(u64, String)> = table.into_iter().collect();
        drained.sort();
        assert_eq!(drained.len(), 30);
        for (k, (key, value)) in drained.into_iter().enumerate() {
            assert_eq!(key, k as u64);
            assert_eq!(value, k.to_string());
        }
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        let mut table = HashTable::with_hasher(SipState::default());
        for k in 0..30u64 {
            table.set(k, k.to_string());
        }
        let mut iter = table.into_iter();
        assert!(iter.next().is_some());
        assert_eq!(iter.size_hint(), (29, Some(29)));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut table = HashTable::with_capacity_and_hasher(3, SipState::default());
        for k in 0..40u64 {
            table.set(k, k);
        }
        let capacity = table.bucket_count();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.used_buckets(), 0);
        assert_eq!(table.bucket_count(), capacity);
        assert!(!table.contains(&1));
        assert_invariants(&table);

        table.set(1, 1);
        assert_eq!(table.get(&1), Ok(&1));
    }

    #[test]
    fn clone_preserves_bucket_order_and_is_independent() {
        let mut table = identity_table(7);
        for k in [0, 7, 14, 2] {
            table.set(k, k);
        }
        let mut cloned = table.clone();
        assert_eq!(bucket_keys(&cloned, 0), vec![14, 7, 0]);
        assert_eq!(cloned.len(), table.len());
        assert_eq!(cloned.used_buckets(), table.used_buckets());

        cloned.set(2, 200);
        cloned.remove(&7);
        assert_eq!(table.get(&2), Ok(&2));
        assert!(table.contains(&7));
        assert_invariants(&cloned);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut table = identity_table(0);
        assert_eq!(table.bucket_count(), 1);
        table.set(4, 4);
        table.set(5, 5);
        assert_eq!(table.len(), 2);
        assert!(table.bucket_count() > 1);
    }

    #[test]
    fn builder_validates_input() {
        let zero = HashTableBuilder::<IdentityState>::default()
            .with_capacity(0)
            .build::<u64, u64>();
        assert_eq!(zero.err(), Some(TableError::InvalidCapacity));

        let bad_policy = HashTableBuilder::<IdentityState>::default()
            .with_max_load_factor(-1.0)
            .build::<u64, u64>();
        assert!(matches!(bad_policy, Err(TableError::InvalidPolicy(_))));

        let bad_growth = HashTableBuilder::<IdentityState>::default()
            .with_growth(1, 0)
            .build::<u64, u64>();
        assert!(matches!(bad_growth, Err(TableError::InvalidPolicy(_))));
    }

    #[test]
    fn custom_growth_policy() {
        let mut table: HashTable<u64, u64, _> = HashTableBuilder::new()
            .with_hasher(IdentityState::default())
            .with_capacity(4)
            .with_max_collisions(1)
            .with_growth(3, 0)
            .build()
            .unwrap();

        table.set(0, 0);
        table.set(4, 4);
        assert_eq!(table.bucket_count(), 12);
        assert_eq!(table.bucket_size(0), Ok(1));
        assert_eq!(table.bucket_size(4), Ok(1));
    }

    #[test]
    fn long_chain_drops_and_clears() {
        let mut table: HashTable<u64, String, IdentityState> = HashTableBuilder::default()
            .with_capacity(1)
            .with_max_load_factor(f64::MAX)
            .with_max_collisions(usize::MAX)
            .build()
            .unwrap();
        for k in 0..10_000u64 {
            table.set(k, format!("value {k}"));
        }
        assert_eq!(table.bucket_size(0), Ok(10_000));
        let cloned = table.clone();
        table.clear();
        assert!(table.is_empty());
        drop(cloned);
    }

    #[test]
    fn extend_and_collect() {
        let mut table: HashTable<u64, u64, SipState> = (0..10u64).map(|k| (k, k)).collect();
        assert_eq!(table.len(), 10);
        table.extend((5..15u64).map(|k| (k, k * 10)));
        assert_eq!(table.len(), 15);
        assert_eq!(table.get(&4), Ok(&4));
        assert_eq!(table.get(&5), Ok(&50));
    }

    #[test]
    fn debug_formats_as_map() {
        let mut table = identity_table(5);
        table.set(1, 10);
        assert_eq!(format!("{:?}", table), "{1: 10}");
    }

    #[test]
    fn default_table_uses_default_capacity() {
        let table: HashTable<u64, u64> = HashTable::default();
        assert_eq!(table.bucket_count(), DEFAULT_CAPACITY);
        assert_eq!(table.load_factor(), 0.0);
        assert_eq!(*table.policy(), GrowthPolicy::default());
    }

    #[cfg(feature = "stats")]
    #[test]
    fn chain_statistics() {
        let mut table = identity_table(7);
        for k in [0, 7, 14, 1, 8, 2] {
            table.set(k, k);
        }
        assert_eq!(table.chain_histogram(), vec![4, 1, 1, 1]);

        let stats = table.debug_stats();
        assert_eq!(stats.len, 6);
        assert_eq!(stats.capacity, 7);
        assert_eq!(stats.used_buckets, 3);
        assert_eq!(stats.longest_chain, 3);
        assert!((stats.mean_chain_length - 2.0).abs() < f64::EPSILON);
    }
}
