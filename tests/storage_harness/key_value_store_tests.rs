//! Macro-generated test suite for `KeyValueStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use catalog::storage::InMemoryKeyValueStore;
//!
//! key_value_store_tests!(((), InMemoryKeyValueStore::new()));
//! ```
//!
//! # Generated Tests
//!
//! - `test_get_missing`: unknown key reads as None
//! - `test_set_and_get`: stored value is returned verbatim
//! - `test_overwrite`: second write replaces the first
//! - `test_remove`: removed key reads as None
//! - `test_remove_missing`: removing an unknown key is Ok
//! - `test_keys_are_independent`: writes never leak across keys
//! - `test_similar_keys_do_not_collide`: keys differing only in punctuation stay apart
//! - `test_concurrent_writes`: parallel writers from spawned threads
//! - `test_favorites_survive_reload`: a second `Favorites` sees the first's writes

/// Generate a full `KeyValueStore` conformance test suite.
///
/// `$factory` must evaluate to a `(guard, store)` tuple. The guard is kept
/// alive for the duration of each test (e.g. a `TempDir`); the store must be
/// `KeyValueStore + 'static`. It is re-evaluated for each test to ensure
/// isolation.
#[macro_export]
macro_rules! key_value_store_tests {
    ($factory:expr) => {
        mod key_value_store_contract_tests {
            use super::*;
            use catalog::core::favorites::Favorites;
            use catalog::core::store::KeyValueStore;
            use std::sync::Arc;

            #[test]
            fn test_get_missing() {
                let (_guard, store) = $factory;
                assert_eq!(store.get("missing").unwrap(), None);
            }

            #[test]
            fn test_set_and_get() {
                let (_guard, store) = $factory;
                store.set("favorites", r#"["itm_001"]"#).unwrap();
                assert_eq!(
                    store.get("favorites").unwrap().as_deref(),
                    Some(r#"["itm_001"]"#)
                );
                assert!(!store.backend().is_empty());
            }

            #[test]
            fn test_overwrite() {
                let (_guard, store) = $factory;
                store.set("favorites", "[]").unwrap();
                store.set("favorites", r#"["itm_002"]"#).unwrap();
                assert_eq!(
                    store.get("favorites").unwrap().as_deref(),
                    Some(r#"["itm_002"]"#)
                );
            }

            #[test]
            fn test_remove() {
                let (_guard, store) = $factory;
                store.set("favorites", "[]").unwrap();
                store.remove("favorites").unwrap();
                assert_eq!(store.get("favorites").unwrap(), None);
            }

            #[test]
            fn test_remove_missing() {
                let (_guard, store) = $factory;
                assert!(store.remove("never-written").is_ok());
            }

            #[test]
            fn test_keys_are_independent() {
                let (_guard, store) = $factory;
                store.set("first", "1").unwrap();
                store.set("second", "2").unwrap();
                store.remove("first").unwrap();

                assert_eq!(store.get("first").unwrap(), None);
                assert_eq!(store.get("second").unwrap().as_deref(), Some("2"));
            }

            #[test]
            fn test_similar_keys_do_not_collide() {
                let (_guard, store) = $factory;
                let keys = ["a.b", "a_b", "a/b", "a b", "a%2Eb"];
                for (i, key) in keys.iter().enumerate() {
                    store.set(key, &i.to_string()).unwrap();
                }

                for (i, key) in keys.iter().enumerate() {
                    assert_eq!(store.get(key).unwrap(), Some(i.to_string()), "key {}", key);
                }
            }

            #[test]
            fn test_concurrent_writes() {
                let (_guard, store) = $factory;
                let store = Arc::new(store);

                let handles: Vec<_> = (0..8)
                    .map(|i| {
                        let store = Arc::clone(&store);
                        std::thread::spawn(move || {
                            store.set(&format!("key-{}", i), &i.to_string()).unwrap();
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }

                for i in 0..8 {
                    assert_eq!(
                        store.get(&format!("key-{}", i)).unwrap(),
                        Some(i.to_string())
                    );
                }
            }

            #[test]
            fn test_favorites_survive_reload() {
                let (_guard, store) = $factory;
                let store: Arc<dyn KeyValueStore> = Arc::new(store);

                let favorites = Favorites::load(Arc::clone(&store));
                favorites.toggle("itm_003");
                favorites.toggle("itm_001");
                favorites.toggle("itm_002");
                favorites.remove("itm_001");

                let reloaded = Favorites::load(store);
                assert_eq!(reloaded.ids(), vec!["itm_003", "itm_002"]);
                assert_eq!(reloaded.count(), 2);
            }
        }
    };
}
