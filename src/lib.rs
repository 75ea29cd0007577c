//! A thread-safe, fixed-capacity cache with least recently used eviction.
//!
//! The cache keeps its entries in a recency list backed by a slab of index-linked nodes, plus a
//! hash map from key to slot. Inserting, updating and evicting are all O(1).
//!
//! # Features
//!
//! - Thread-safe by default - no need for explicit synchronization
//! - Bounded by entry count, evicting the least recently written entry on overflow
//! - Optional eviction notifier and diagnostic logging through [`tracing`]
//! - No unsafe code
//!
//! # Examples
//!
//! Basic usage with string keys and values:
//!
//! ```rust
//! use plain_lru::Cache;
//!
//! // Create a new cache with a capacity of 1000 items
//! let cache = Cache::with_capacity(1000).unwrap();
//!
//! // Insert and retrieve a value
//! assert!(cache.set("key1", "value1"));
//! assert_eq!(cache.get("key1"), Some("value1"));
//! ```
//!
//! Evicting the least recently used entry:
//!
//! ```rust
//! use plain_lru::{Cache, Options};
//! use std::sync::{Arc, Mutex};
//!
//! let evicted = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&evicted);
//! let options = Options::<&str, u32>::default()
//!     .eviction_notifier(move |key: &'static str, _value: u32| sink.lock().unwrap().push(key));
//!
//! let cache = Cache::new(2, options).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//!
//! // Updating "a" makes it the most recently used entry
//! assert!(!cache.set("a", 3));
//! cache.set("c", 4);
//!
//! assert_eq!(cache.keys(), vec!["c", "a"]);
//! assert_eq!(*evicted.lock().unwrap(), vec!["b"]);
//! ```
//!
//! A zero capacity is rejected:
//!
//! ```rust
//! use plain_lru::{Cache, Error};
//!
//! let cache: Result<Cache<u32, u32>, Error> = Cache::with_capacity(0);
//! assert_eq!(cache.err(), Some(Error::ZeroCapacity));
//! ```
//!
//! Thread-safe usage across multiple threads:
//!
//! ```rust
//! use plain_lru::Cache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(Cache::with_capacity(100).unwrap());
//! cache.set("key1", "value1");
//!
//! // Spawn a thread that inserts a value
//! let cache_in_arc = Arc::clone(&cache);
//! let handle = thread::spawn(move || {
//!     cache_in_arc.set("key2", "value2");
//! });
//!
//! handle.join().unwrap();
//!
//! assert_eq!(cache.get("key1"), Some("value1"));
//! assert_eq!(cache.get("key2"), Some("value2"));
//! ```

#![forbid(unsafe_code)]
pub mod cache;
mod error;

pub use cache::Cache;
pub use cache::options::{EvictionNotifier, Options, ReadPolicy};
pub use cache::stats::Stats;
pub use error::Error;
