//! Separate-chaining hash map over linked-list buckets.
//!
//! This module provides [`ChainedHashMap`], a mutable hash map that keeps a
//! fixed number of buckets chosen at construction time.
//!
//! # Overview
//!
//! A key is placed by hashing it to a `u64` and compressing the hash with
//! `hash % bucket_count`. Keys that collide share a bucket, and each bucket
//! is a [`LinkedList`] of [`Entry`] values scanned linearly.
//!
//! - O(1 + L) `put`, `get`, `delete` where L is the bucket length
//! - O(1) `len` and `is_empty`
//! - No automatic resize: keep the load factor `len / bucket_count` low by
//!   picking a generous, preferably prime, bucket count
//!
//! # Examples
//!
//! ```rust
//! use ordkit::hashing::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new(11).unwrap();
//! assert_eq!(map.put("one".to_string(), 1), None);
//! assert_eq!(map.put("one".to_string(), 100), Some(1));
//!
//! assert_eq!(map.get("one"), Ok(&100));
//! assert_eq!(map["one"], 100);
//! assert_eq!(map.len(), 1);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};
use std::ops::Index;

use super::DefaultHashBuilder;
use crate::error::CollectionError;
use crate::linked::{LinkedList, LinkedListIterator};

// =============================================================================
// Constants
// =============================================================================

/// Bucket count used by `Default`, `FromIterator`, and deserialisation.
pub const DEFAULT_BUCKET_COUNT: usize = 31;

// =============================================================================
// Entry Definition
// =============================================================================

/// A key/value pair stored in a bucket.
///
/// The key never changes once the entry exists; only the value is mutable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Returns the key.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

// =============================================================================
// ChainedHashMap Definition
// =============================================================================

/// A hash map resolving collisions by separate chaining.
///
/// For every key present, exactly one [`Entry`] with that key exists, and it
/// lives in bucket `hash(key) % bucket_count`.
///
/// # Time Complexity
///
/// | Operation      | Average | Worst |
/// |----------------|---------|-------|
/// | `put`          | O(1)    | O(n)  |
/// | `get`          | O(1)    | O(n)  |
/// | `delete`       | O(1)    | O(n)  |
/// | `contains_key` | O(1)    | O(n)  |
/// | `len`          | O(1)    | O(1)  |
///
/// # Examples
///
/// ```rust
/// use ordkit::error::CollectionError;
/// use ordkit::hashing::ChainedHashMap;
///
/// let mut map = ChainedHashMap::new(4).unwrap();
/// map.put("a", 1);
/// map.put("b", 2);
/// map.delete("a");
///
/// assert_eq!(map.get("a"), Err(CollectionError::KeyNotFound));
/// assert_eq!(map.len(), 1);
///
/// // Deleting an absent key is a no-op.
/// assert_eq!(map.delete("a"), None);
/// ```
///
/// # Writing
///
/// [`put`](Self::put) is the only way to insert; it also overwrites. Indexing
/// is read-only: `map[key]` reads like [`get`](Self::get) but panics on a
/// missing key, and `map[key] = value` does not compile, since indexing
/// cannot create an entry. To change a stored value in place, use
/// [`get_mut`](Self::get_mut).
///
/// ```rust
/// use ordkit::hashing::ChainedHashMap;
///
/// let mut map = ChainedHashMap::new(8).unwrap();
/// assert_eq!(map.put("visits", 1), None);
/// assert_eq!(map.put("visits", 2), Some(1));
/// *map.get_mut("visits").unwrap() += 1;
///
/// assert_eq!(map["visits"], 3);
/// ```
///
/// ```compile_fail
/// use ordkit::hashing::ChainedHashMap;
///
/// let mut map = ChainedHashMap::new(8).unwrap();
/// map.put("visits", 1);
/// map["visits"] = 2;
/// ```
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    buckets: Vec<LinkedList<Entry<K, V>>>,
    /// Number of entries across all buckets
    length: usize,
    hash_builder: S,
}

impl<K, V> ChainedHashMap<K, V> {
    /// Creates an empty map with `bucket_count` buckets and the default hasher.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfiguration`] if `bucket_count` is 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::hashing::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<String, i32> = ChainedHashMap::new(8).unwrap();
    /// assert_eq!(map.bucket_count(), 8);
    /// assert!(ChainedHashMap::<String, i32>::new(0).is_err());
    /// ```
    pub fn new(bucket_count: usize) -> Result<Self, CollectionError> {
        Self::with_hasher(bucket_count, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates an empty map with `bucket_count` buckets hashed by `hash_builder`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfiguration`] if `bucket_count` is 0.
    pub fn with_hasher(bucket_count: usize, hash_builder: S) -> Result<Self, CollectionError> {
        let bucket_count = CollectionError::require_at_least("bucket_count", bucket_count, 1)?;
        tracing::debug!(bucket_count, "created chained hash map");
        Ok(Self::with_buckets(bucket_count, hash_builder))
    }

    fn with_buckets(bucket_count: usize, hash_builder: S) -> Self {
        Self {
            buckets: (0..bucket_count).map(|_| LinkedList::new()).collect(),
            length: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the fixed number of buckets.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries chained in bucket `index`.
    #[must_use]
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(LinkedList::len)
    }

    /// Returns `len / bucket_count`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.buckets.len() as f64
    }

    /// Returns the map's hash builder.
    #[inline]
    pub const fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry, keeping the bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.length = 0;
    }

    /// Iterates over entries bucket by bucket.
    ///
    /// The order depends on the hasher and is not meaningful.
    #[must_use]
    pub fn iter(&self) -> ChainedHashMapIterator<'_, K, V> {
        ChainedHashMapIterator {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.length,
        }
    }

    /// Iterates over keys in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over values in bucket order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedHashMap<K, V, S> {
    /// Compresses the key's hash into a bucket index.
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        // The remainder is below `buckets.len()`, which is a usize.
        (hash % self.buckets.len() as u64) as usize
    }

    /// Inserts or overwrites the value for `key`.
    ///
    /// Returns the previous value when the key was already present; the
    /// length only grows when a new entry is chained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::hashing::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new(4).unwrap();
    /// assert_eq!(map.put(1, "one"), None);
    /// assert_eq!(map.put(1, "uno"), Some("one"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some(entry) = bucket.find_mut(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        bucket.append(Entry { key, value });
        self.length += 1;
        None
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::KeyNotFound`] when no entry matches. A
    /// present entry is always returned, whatever its value.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, CollectionError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
            .ok_or(CollectionError::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::KeyNotFound`] when no entry matches.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, CollectionError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .find_mut(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
            .ok_or(CollectionError::KeyNotFound)
    }

    /// Returns `true` if an entry for `key` exists.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_ok()
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// Deleting a key that is not present is a successful no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let removed = self.buckets[index].remove_first(|entry| entry.key.borrow() == key)?;
        self.length -= 1;
        Some(removed.value)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// Iterator over the entries of a [`ChainedHashMap`].
pub struct ChainedHashMapIterator<'a, K, V> {
    buckets: std::slice::Iter<'a, LinkedList<Entry<K, V>>>,
    current: Option<LinkedListIterator<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for ChainedHashMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for ChainedHashMapIterator<'_, K, V> {}

impl<K, V> FusedIterator for ChainedHashMapIterator<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, S: Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT, S::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for ChainedHashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = ChainedHashMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, V, S> Index<&Q> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present; use [`ChainedHashMap::get`] to
    /// handle absence.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for ChainedHashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_ok_and(|other_value| other_value == value))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for ChainedHashMap<K, V, S> {}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for ChainedHashMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for ChainedHashMap<K, V, S>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct ChainedHashMapVisitor<K, V, S> {
    marker: std::marker::PhantomData<(K, V, S)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::de::Visitor<'de> for ChainedHashMapVisitor<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = ChainedHashMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = ChainedHashMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for ChainedHashMap<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(ChainedHashMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
