//! # Registration Flows
//!
//! Coordinator wired to real filters and stores:
//!
//! 1. **Concurrent claims**: one commit per name no matter how many callers
//! 2. **Warm start**: names on disk are unavailable after startup
//! 3. **Restart**: a committed name survives a process restart
//! 4. **Storage failure**: the documented false positive lasts until restart

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use ng_membership::{
        AtomicBloomFilter, FileNameStore, FilterConfig, HashScheme, InMemoryNameStore,
        MembershipFilter, NameStore, RegistrationApi, RegistrationCoordinator, RegistrationError,
    };
    use ng_node::{NodeConfig, NodeRuntime};
    use proptest::prelude::*;
    use rand::distributions::Alphanumeric;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tempfile::tempdir;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn file_coordinator(
        path: &std::path::Path,
    ) -> Arc<RegistrationCoordinator<AtomicBloomFilter, FileNameStore>> {
        Arc::new(RegistrationCoordinator::new(
            Arc::new(AtomicBloomFilter::new(200_000, 3)),
            Arc::new(FileNameStore::new(path)),
        ))
    }

    fn node_config(dir: &std::path::Path) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.storage.data_file = dir.join("users.txt");
        config
    }

    // =============================================================================
    // CONCURRENT CLAIMS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_claims_commit_exactly_once_on_disk() {
        const CALLERS: usize = 64;
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.txt");
        let coordinator = file_coordinator(&path);

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { coordinator.register("alice").await })
            })
            .collect();

        let mut committed = 0;
        let mut taken = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => committed += 1,
                Err(RegistrationError::AlreadyTaken(_)) => taken += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(committed, 1);
        assert_eq!(taken, CALLERS - 1);

        let stored = FileNameStore::new(&path).load_all().await.unwrap();
        assert_eq!(stored, vec!["alice"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_interleaved_claims_on_many_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.txt");
        let coordinator = file_coordinator(&path);
        let names: Vec<String> = (0..20).map(|i| format!("user_{}", i)).collect();

        // Four callers per name, interleaved
        let handles: Vec<_> = (0..4)
            .flat_map(|_| names.clone())
            .map(|name| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { (name.clone(), coordinator.register(&name).await) })
            })
            .collect();

        let mut winners = Vec::new();
        for handle in handles {
            let (name, result) = handle.await.unwrap();
            if result.is_ok() {
                winners.push(name);
            }
        }

        let unique: HashSet<_> = winners.iter().cloned().collect();
        assert_eq!(winners.len(), names.len(), "one winner per name");
        assert_eq!(unique.len(), names.len());

        let stored = FileNameStore::new(&path).load_all().await.unwrap();
        assert_eq!(stored.len(), names.len());
    }

    // =============================================================================
    // WARM START
    // =============================================================================

    #[tokio::test]
    async fn test_warm_start_from_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(&path, "alice\nbob\n").unwrap();

        let coordinator = file_coordinator(&path);
        assert_eq!(coordinator.warm_start().await.unwrap(), 2);

        assert!(!coordinator.check_availability("alice"));
        assert!(!coordinator.check_availability("bob"));
        assert!(coordinator.check_availability("carol"));
    }

    #[tokio::test]
    async fn test_warm_start_with_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let coordinator = file_coordinator(&dir.path().join("never").join("created.txt"));

        assert_eq!(coordinator.warm_start().await.unwrap(), 0);
        assert!(coordinator.check_availability("anyone"));
    }

    // =============================================================================
    // RESTART
    // =============================================================================

    #[tokio::test]
    async fn test_register_restart_round_trip() {
        let dir = tempdir().unwrap();

        let node = NodeRuntime::new(node_config(dir.path())).unwrap();
        node.start().await.unwrap();
        node.coordinator().register("dave").await.unwrap();
        drop(node);

        let restarted = NodeRuntime::new(node_config(dir.path())).unwrap();
        restarted.start().await.unwrap();

        assert!(!restarted.coordinator().check_availability("dave"));
        assert_eq!(restarted.metrics().snapshot().names_warmed, 1);
    }

    #[tokio::test]
    async fn test_restart_with_other_scheme_keeps_names() {
        let dir = tempdir().unwrap();

        let node = NodeRuntime::new(node_config(dir.path())).unwrap();
        node.start().await.unwrap();
        for name in ["erin", "frank", "grace"] {
            node.coordinator().register(name).await.unwrap();
        }
        drop(node);

        // The filter is derived state; resizing or rehashing only needs a warm start
        let mut config = node_config(dir.path());
        config.filter = FilterConfig::new(8192, 6, HashScheme::DoubleMurmur).unwrap();
        let restarted = NodeRuntime::new(config).unwrap();
        assert_eq!(restarted.start().await.unwrap(), 3);

        for name in ["erin", "frank", "grace"] {
            assert!(!restarted.coordinator().check_availability(name));
        }
    }

    // =============================================================================
    // STORAGE FAILURE
    // =============================================================================

    #[tokio::test]
    async fn test_failed_append_is_false_positive_until_rebuild() {
        let store = Arc::new(InMemoryNameStore::with_names(["alice"]));
        let coordinator = RegistrationCoordinator::new(
            Arc::new(AtomicBloomFilter::new(10_000, 3)),
            Arc::clone(&store),
        );
        coordinator.warm_start().await.unwrap();

        store.set_fail_appends(true);
        let result = coordinator.register("heidi").await;
        assert!(matches!(result, Err(RegistrationError::StorageUnavailable(_))));
        assert!(!coordinator.check_availability("heidi"));

        // Rebuilding from the store clears the false positive
        store.set_fail_appends(false);
        let rebuilt = RegistrationCoordinator::new(
            Arc::new(AtomicBloomFilter::new(10_000, 3)),
            Arc::clone(&store),
        );
        rebuilt.warm_start().await.unwrap();
        assert!(rebuilt.check_availability("heidi"));
        rebuilt.register("heidi").await.unwrap();
        assert_eq!(store.names(), vec!["alice", "heidi"]);
    }

    // =============================================================================
    // FALSE POSITIVE RATE AT DEFAULT SIZING
    // =============================================================================

    #[test]
    fn test_default_sizing_false_positive_rate() {
        let config = FilterConfig::default();
        let filter = AtomicBloomFilter::from_config(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let inserted: HashSet<String> = (0..10_000)
            .map(|_| (0..12).map(|_| char::from(rng.sample(Alphanumeric))).collect())
            .collect();
        for name in &inserted {
            filter.add(name);
        }

        let mut false_positives = 0;
        let mut sampled = 0;
        while sampled < 20_000 {
            let probe: String = (0..12).map(|_| char::from(rng.sample(Alphanumeric))).collect();
            if inserted.contains(&probe) {
                continue;
            }
            sampled += 1;
            if filter.contains(&probe) {
                false_positives += 1;
            }
        }

        // Expected rate ≈ 2.6e-5, about 0.5 hits in 20k samples
        assert!(false_positives <= 5, "{} false positives", false_positives);
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_warm_start_covers_every_stored_name(
            names in proptest::collection::vec("[a-z0-9_]{1,24}", 0..100),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let store = Arc::new(InMemoryNameStore::with_names(names.clone()));
            let coordinator = RegistrationCoordinator::new(
                Arc::new(AtomicBloomFilter::new(4096, 3)),
                store,
            );

            let loaded = runtime.block_on(coordinator.warm_start()).unwrap();
            prop_assert_eq!(loaded, names.len());
            for name in &names {
                prop_assert!(!coordinator.check_availability(name));
            }
        }

        #[test]
        fn prop_registered_names_are_never_available(
            names in proptest::collection::hash_set("[a-z]{1,16}", 1..40),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let coordinator = RegistrationCoordinator::new(
                Arc::new(AtomicBloomFilter::new(8192, 4)),
                Arc::new(InMemoryNameStore::new()),
            );

            for name in &names {
                // A false positive may refuse a fresh name; it never admits a taken one
                let _ = runtime.block_on(coordinator.register(name));
            }
            for name in &names {
                prop_assert!(!coordinator.check_availability(name));
                let second = runtime.block_on(coordinator.register(name));
                prop_assert!(
                    matches!(second, Err(RegistrationError::AlreadyTaken(_))),
                    "expected AlreadyTaken for {:?}",
                    name
                );
            }
        }
    }
}
