//! Health monitor integration tests
//!
//! Probe cycles over mock backends, and their effect on routing.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, MockBackend, ProviderFactory};
    use crate::{assert_err, assert_ok};
    use routewise::GatewayError;
    use routewise::core::router::{CostBasedPolicy, FailoverPolicy, RoutingPolicy};
    use routewise::monitoring::{HealthMonitor, HealthMonitorConfig};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    const MODEL: &str = "gpt-4";

    fn monitor(interval_secs: u64, probe_timeout_ms: u64) -> HealthMonitor {
        HealthMonitor::new(HealthMonitorConfig {
            interval: Duration::from_secs(interval_secs),
            probe_timeout: Duration::from_millis(probe_timeout_ms),
        })
    }

    #[tokio::test]
    async fn test_uptime_after_three_successes_and_one_failure() {
        let backend = Arc::new(MockBackend::new("flaky", &[MODEL]));
        let handle = ProviderFactory::with_backend("flaky", &[MODEL], 0.01, 100, Arc::clone(&backend));
        let monitor = monitor(30, 500);
        monitor.add_provider(handle);

        for reachable in [true, true, false, true] {
            backend.set_reachable(reachable);
            monitor.force_check().await;
        }

        let metrics = assert_ok!(monitor.get_metrics("flaky"));
        assert_eq!(metrics.total_checks, 4);
        assert_eq!(metrics.successful_checks, 3);
        assert_eq!(metrics.failed_checks, 1);
        assert!((metrics.uptime - 75.0).abs() < 1e-9);
        assert!(assert_ok!(monitor.get_health("flaky")).healthy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_providers_probed_concurrently() {
        let monitor = monitor(30, 1_000);
        let backends: Vec<Arc<MockBackend>> = (0..5)
            .map(|i| {
                let name = format!("p{}", i);
                let backend =
                    Arc::new(MockBackend::new(&name, &[MODEL]).with_probe_delay(Duration::from_millis(200)));
                monitor.add_provider(ProviderFactory::with_backend(
                    &name,
                    &[MODEL],
                    0.01,
                    100,
                    Arc::clone(&backend),
                ));
                backend
            })
            .collect();

        let started = Instant::now();
        let summary = monitor.force_check().await;

        assert_eq!(summary.probed, 5);
        assert_eq!(summary.healthy, 5);
        // Sequential probing would take a full second
        assert!(started.elapsed() < Duration::from_millis(400));

        let all = monitor.get_all_health();
        assert_eq!(all.len(), 5);
        for record in all.values() {
            assert!(record.healthy);
            assert!(record.last_checked >= summary.started_at);
        }
        assert!(backends.iter().all(|b| b.probes() == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_probe_times_out_without_stalling_others() {
        let monitor = monitor(30, 500);
        let hung = Arc::new(MockBackend::new("hung", &[MODEL]).with_probe_delay(Duration::from_secs(120)));
        monitor.add_provider(ProviderFactory::with_backend("hung", &[MODEL], 0.01, 100, hung));
        monitor.add_provider(ProviderFactory::fixed("fast", &[MODEL], 0.01, 100).0);

        let started = Instant::now();
        let summary = monitor.force_check().await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(summary.healthy, 1);
        assert_eq!(summary.unhealthy, 1);

        let record = assert_ok!(monitor.get_health("hung"));
        assert!(!record.healthy);
        assert_eq!(record.latency, Duration::from_millis(500));
        assert!(record.last_error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_failed_probe_steers_routing_away() {
        let cheap_backend = Arc::new(MockBackend::new("cheap", &[MODEL]));
        let cheap = ProviderFactory::with_backend("cheap", &[MODEL], 0.001, 100, Arc::clone(&cheap_backend));
        let (pricey, _) = ProviderFactory::fixed("pricey", &[MODEL], 0.1, 100);
        let registry = ProviderFactory::registry(&[cheap.clone(), pricey.clone()]);

        let monitor = monitor(30, 500);
        monitor.add_provider(cheap);
        monitor.add_provider(pricey);

        let policy = CostBasedPolicy::new();
        let request = ChatRequestFactory::simple(MODEL);

        cheap_backend.set_reachable(false);
        monitor.force_check().await;
        let decision = assert_ok!(policy.decide_route(&request, &registry));
        assert_eq!(decision.provider_name, "pricey");

        cheap_backend.set_reachable(true);
        monitor.force_check().await;
        let decision = assert_ok!(policy.decide_route(&request, &registry));
        assert_eq!(decision.provider_name, "cheap");
    }

    #[tokio::test]
    async fn test_unhealthy_primary_fails_over_to_backup() {
        let primary_backend = Arc::new(MockBackend::new("primary", &[MODEL]));
        let primary =
            ProviderFactory::with_backend("primary", &[MODEL], 0.01, 100, Arc::clone(&primary_backend));
        let (backup, _) = ProviderFactory::fixed("backup", &[MODEL], 0.01, 100);
        let registry = ProviderFactory::registry(&[primary.clone(), backup.clone()]);

        let monitor = monitor(30, 500);
        monitor.add_provider(primary);
        monitor.add_provider(backup);

        let policy = FailoverPolicy::new("primary", vec!["backup".into()]);
        primary_backend.set_reachable(false);
        monitor.force_check().await;

        let decision = assert_ok!(policy.decide_route(&ChatRequestFactory::simple(MODEL), &registry));
        assert_eq!(decision.provider_name, "backup");
        assert!(decision.fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_loop_probes_on_interval_until_stopped() {
        let backend = Arc::new(MockBackend::new("a", &[MODEL]));
        let monitor = monitor(10, 500);
        monitor.add_provider(ProviderFactory::with_backend("a", &[MODEL], 0.01, 100, Arc::clone(&backend)));

        monitor.start();
        assert!(monitor.is_running());

        // First tick fires immediately, then every 10s
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(backend.probes(), 1);
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(backend.probes(), 3);

        monitor.stop().await;
        assert!(!monitor.is_running());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(backend.probes(), 3);
    }

    #[tokio::test]
    async fn test_unknown_provider_lookups_fail() {
        let monitor = monitor(30, 500);
        let err = assert_err!(monitor.get_health("ghost"));
        assert!(matches!(err, GatewayError::ProviderNotFound(_)));
        let err = assert_err!(monitor.get_metrics("ghost"));
        assert!(matches!(err, GatewayError::ProviderNotFound(_)));
    }
}
