//! Routing policy integration tests
//!
//! Policies deciding over registries of mock-backed providers.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, ProviderFactory};
    use crate::{assert_err, assert_ok};
    use routewise::core::router::{
        CostBasedPolicy, FailoverPolicy, RouterError, RoutingPolicy, build_policy,
    };
    use routewise::config::RoutingPolicyConfig;
    use std::time::Duration;

    const MODEL: &str = "gpt-4";

    // ==================== Validation ====================

    #[test]
    fn test_invalid_requests_rejected_before_providers_are_touched() {
        let (a, backend) = ProviderFactory::fixed("a", &[MODEL], 0.01, 100);
        let registry = ProviderFactory::registry(&[a]);

        let policies: Vec<Box<dyn RoutingPolicy>> = vec![
            Box::new(CostBasedPolicy::new()),
            Box::new(FailoverPolicy::new("a", vec![])),
        ];

        for policy in policies {
            let err = assert_err!(policy.decide_route(&ChatRequestFactory::empty(MODEL), &registry));
            assert!(matches!(err, RouterError::InvalidRequest(_)));

            let err = assert_err!(policy.decide_route(&ChatRequestFactory::simple(""), &registry));
            assert!(matches!(err, RouterError::InvalidRequest(_)));
            assert_eq!(policy.metrics().snapshot().total_decisions, 0);
        }
        assert_eq!(backend.calls(), 0);
        assert_eq!(backend.probes(), 0);
    }

    // ==================== Cost-Based ====================

    #[test]
    fn test_end_to_end_default_weights() {
        // A: cheaper but slower. B: pricier but faster.
        // Default weights: A = 0.6*0.01 + 0.3*0.2 = 0.066, B = 0.6*0.03 + 0.3*0.1 = 0.048
        let (a, _) = ProviderFactory::fixed("A", &[MODEL], 0.01, 200);
        let (b, _) = ProviderFactory::fixed("B", &[MODEL], 0.03, 100);
        let registry = ProviderFactory::registry(&[a, b]);

        let policy = CostBasedPolicy::new();
        let decision = assert_ok!(policy.decide_route(&ChatRequestFactory::simple(MODEL), &registry));

        assert_eq!(decision.provider_name, "B");
        assert!(!decision.fallback);
        assert_eq!(decision.alternatives, vec!["A".to_string()]);
        assert!((decision.confidence - (0.8_f64 + 0.2 * (0.066 - 0.048) / 0.048).min(1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_end_to_end_cost_only_weights_picks_cheapest() {
        let (a, _) = ProviderFactory::fixed("A", &[MODEL], 0.01, 200);
        let (b, _) = ProviderFactory::fixed("B", &[MODEL], 0.03, 100);
        let registry = ProviderFactory::registry(&[a, b]);

        let policy = assert_ok!(CostBasedPolicy::with_settings(1.0, 0.0, 0.0, Duration::from_secs(5)));
        let decision = assert_ok!(policy.decide_route(&ChatRequestFactory::simple(MODEL), &registry));

        assert_eq!(decision.provider_name, "A");
        assert!(!decision.fallback);
        assert!((decision.estimated_cost.unwrap() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_single_eligible_provider_has_full_confidence() {
        let (a, _) = ProviderFactory::fixed("a", &[MODEL], 0.05, 300);
        let (b, _) = ProviderFactory::fixed("b", &["claude-3"], 0.001, 50);
        let (c, _) = ProviderFactory::fixed("c", &[MODEL], 0.001, 50);
        c.set_health(false, Duration::from_millis(10), Some("down".into()));
        let registry = ProviderFactory::registry(&[a, b, c]);

        let decision =
            assert_ok!(CostBasedPolicy::new().decide_route(&ChatRequestFactory::simple(MODEL), &registry));
        assert_eq!(decision.provider_name, "a");
        assert_eq!(decision.confidence, 1.0);
        assert!(decision.alternatives.is_empty());
    }

    #[test]
    fn test_chosen_provider_has_lowest_score() {
        let specs = [
            ("p1", 0.020, 900),
            ("p2", 0.004, 1500),
            ("p3", 0.015, 300),
            ("p4", 0.050, 100),
            ("p5", 0.001, 6000),
        ];
        let handles: Vec<_> = specs
            .iter()
            .map(|(name, cost, latency)| ProviderFactory::fixed(name, &[MODEL], *cost, *latency).0)
            .collect();
        let registry = ProviderFactory::registry(&handles);

        let policy = CostBasedPolicy::new();
        let decision = assert_ok!(policy.decide_route(&ChatRequestFactory::simple(MODEL), &registry));

        let weights = policy.weights();
        let score = |cost: f64, latency_ms: u64| {
            cost * weights.cost + latency_ms as f64 / 1000.0 * weights.latency
        };
        let surviving: Vec<_> = specs.iter().filter(|(_, _, latency)| *latency <= 5000).collect();
        let best = surviving
            .iter()
            .min_by(|a, b| score(a.1, a.2).total_cmp(&score(b.1, b.2)))
            .unwrap();

        assert_eq!(decision.provider_name, best.0);
        // p5 is over the 5s ceiling and never considered
        assert!(!decision.alternatives.contains(&"p5".to_string()));
        assert_eq!(decision.alternatives.len(), surviving.len() - 1);
    }

    #[test]
    fn test_latency_ceiling_excludes_everything() {
        let (slow, _) = ProviderFactory::fixed("slow", &[MODEL], 0.001, 800);
        let registry = ProviderFactory::registry(&[slow]);

        let policy = CostBasedPolicy::new();
        policy.set_max_latency_threshold(Duration::from_millis(500));

        let err = assert_err!(policy.decide_route(&ChatRequestFactory::simple(MODEL), &registry));
        assert_eq!(err, RouterError::NoSuitableProvider(MODEL.to_string()));
        assert!(err.is_service_unavailable());
    }

    #[test]
    fn test_weight_normalization() {
        let policy = CostBasedPolicy::new();
        for (cost, latency, health) in [(1.0, 1.0, 1.0), (3.0, 0.5, 0.0), (0.2, 7.0, 2.5)] {
            assert_ok!(policy.set_weights(cost, latency, health));
            let w = policy.weights();
            assert!((w.cost + w.latency + w.health - 1.0).abs() < 1e-9);
        }

        let before = policy.weights();
        assert!(policy.set_weights(0.0, 0.0, 0.0).is_err());
        assert!(policy.set_weights(f64::NAN, 1.0, 1.0).is_err());
        assert_eq!(policy.weights(), before);
    }

    // ==================== Failover ====================

    #[test]
    fn test_failover_to_second_backup_supporting_model() {
        let (primary, _) = ProviderFactory::fixed("primary", &[MODEL], 0.01, 100);
        let (backup1, _) = ProviderFactory::fixed("backup1", &["claude-3"], 0.01, 100);
        let (backup2, _) = ProviderFactory::fixed("backup2", &[MODEL], 0.01, 100);
        primary.set_health(false, Duration::from_millis(10), Some("down".into()));
        let registry = ProviderFactory::registry(&[primary, backup1, backup2]);

        let policy = FailoverPolicy::new("primary", vec!["backup1".into(), "backup2".into()]);
        let decision = assert_ok!(policy.decide_route(&ChatRequestFactory::simple(MODEL), &registry));

        assert_eq!(decision.provider_name, "backup2");
        assert!(decision.fallback);
        assert_eq!(decision.confidence, 0.8);
    }

    #[test]
    fn test_failover_nothing_available() {
        let (primary, _) = ProviderFactory::fixed("primary", &[MODEL], 0.01, 100);
        let (backup, _) = ProviderFactory::fixed("backup", &[MODEL], 0.01, 100);
        primary.set_health(false, Duration::ZERO, None);
        backup.set_health(false, Duration::ZERO, None);
        let registry = ProviderFactory::registry(&[primary, backup]);

        let policy = FailoverPolicy::new("primary", vec!["backup".into()]);
        let err = assert_err!(policy.decide_route(&ChatRequestFactory::with_system(MODEL), &registry));
        assert_eq!(err, RouterError::NoAvailableProvider(MODEL.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failover_cool_down_cycle() {
        let (primary, _) = ProviderFactory::fixed("primary", &[MODEL], 0.01, 100);
        let (backup, _) = ProviderFactory::fixed("backup", &[MODEL], 0.01, 100);
        let registry = ProviderFactory::registry(&[primary, backup]);
        let request = ChatRequestFactory::simple(MODEL);

        let policy = FailoverPolicy::new("primary", vec!["backup".into()])
            .with_failover_delay(Duration::from_secs(10));

        policy.mark_failover("backup");
        assert!(policy.should_use_primary());

        policy.mark_failover("primary");
        assert!(!policy.should_use_primary());
        let decision = assert_ok!(policy.decide_route(&request, &registry));
        assert_eq!(decision.provider_name, "backup");

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(!policy.should_use_primary());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!policy.should_use_primary());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(policy.should_use_primary());
        let decision = assert_ok!(policy.decide_route(&request, &registry));
        assert_eq!(decision.provider_name, "primary");
        assert!(!decision.fallback);
    }

    // ==================== Construction ====================

    #[test]
    fn test_policies_built_from_config() {
        let (a, _) = ProviderFactory::fixed("a", &[MODEL], 0.01, 100);
        let (b, _) = ProviderFactory::fixed("b", &[MODEL], 0.001, 100);
        let registry = ProviderFactory::registry(&[a, b]);
        let request = ChatRequestFactory::simple(MODEL);

        let cost = assert_ok!(build_policy(&RoutingPolicyConfig::default()));
        assert_eq!(cost.name(), "cost_based");
        assert_eq!(assert_ok!(cost.decide_route(&request, &registry)).provider_name, "b");

        let failover = assert_ok!(build_policy(&RoutingPolicyConfig::Failover {
            primary: "a".into(),
            backups: vec!["b".into()],
            failover_delay_secs: 5,
        }));
        assert_eq!(failover.name(), "failover");
        assert_eq!(assert_ok!(failover.decide_route(&request, &registry)).provider_name, "a");
    }
}
