//! Dispatch integration tests
//!
//! Decide, execute and re-route across mock-backed providers.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, MockBackend, ProviderFactory};
    use crate::{assert_err, assert_ok};
    use routewise::GatewayError;
    use routewise::core::providers::ProviderError;
    use routewise::core::router::{
        CostBasedPolicy, Dispatcher, FailoverPolicy, RouterError, RoutingPolicy,
    };
    use std::sync::Arc;
    use std::time::Duration;

    const MODEL: &str = "gpt-4";

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(3, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_rate_limited_provider_is_skipped_for_next_best() {
        let cheap = Arc::new(
            MockBackend::new("cheap", &[MODEL]).fail_next(ProviderError::rate_limit("cheap", Some(30))),
        );
        let registry = ProviderFactory::registry(&[
            ProviderFactory::with_backend("cheap", &[MODEL], 0.001, 100, Arc::clone(&cheap)),
            ProviderFactory::fixed("mid", &[MODEL], 0.01, 100).0,
            ProviderFactory::fixed("pricey", &[MODEL], 0.1, 100).0,
        ]);

        let policy = CostBasedPolicy::new();
        let outcome = assert_ok!(
            dispatcher()
                .dispatch(&policy, &registry, &ChatRequestFactory::simple(MODEL))
                .await
        );

        assert_eq!(outcome.decision.provider_name, "mid");
        assert_eq!(outcome.response.provider, "mid");
        assert_eq!(outcome.attempts, 2);
        assert_eq!(cheap.calls(), 1);

        let snapshot = policy.metrics().snapshot();
        assert_eq!(snapshot.total_decisions, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.successful_requests, 1);
    }

    #[tokio::test]
    async fn test_authentication_failure_is_not_retried() {
        let cheap = Arc::new(
            MockBackend::new("cheap", &[MODEL])
                .fail_next(ProviderError::authentication("cheap", "invalid api key")),
        );
        let (pricey, pricey_backend) = ProviderFactory::fixed("pricey", &[MODEL], 0.1, 100);
        let registry = ProviderFactory::registry(&[
            ProviderFactory::with_backend("cheap", &[MODEL], 0.001, 100, Arc::clone(&cheap)),
            pricey,
        ]);

        let err = assert_err!(
            dispatcher()
                .dispatch(&CostBasedPolicy::new(), &registry, &ChatRequestFactory::simple(MODEL))
                .await
        );

        assert!(matches!(
            err,
            GatewayError::Provider(ProviderError::Authentication { .. })
        ));
        assert_eq!(pricey_backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_providers_failing_surfaces_last_execution_error() {
        let a = Arc::new(MockBackend::new("a", &[MODEL]).fail_next(ProviderError::network("a", "reset")));
        let b = Arc::new(
            MockBackend::new("b", &[MODEL]).fail_next(ProviderError::provider_unavailable("b", "overloaded")),
        );
        let registry = ProviderFactory::registry(&[
            ProviderFactory::with_backend("a", &[MODEL], 0.001, 100, Arc::clone(&a)),
            ProviderFactory::with_backend("b", &[MODEL], 0.01, 100, Arc::clone(&b)),
        ]);

        let err = assert_err!(
            dispatcher()
                .dispatch(&CostBasedPolicy::new(), &registry, &ChatRequestFactory::simple(MODEL))
                .await
        );

        match err {
            GatewayError::Provider(e) => assert_eq!(e.provider(), "b"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_candidates_is_a_routing_error() {
        let registry = ProviderFactory::registry(&[ProviderFactory::fixed("a", &["claude-3"], 0.01, 100).0]);

        let err = assert_err!(
            dispatcher()
                .dispatch(&CostBasedPolicy::new(), &registry, &ChatRequestFactory::simple(MODEL))
                .await
        );
        assert!(matches!(
            err,
            GatewayError::Routing(RouterError::NoSuitableProvider(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_primary_times_out_and_fails_over() {
        let primary = Arc::new(MockBackend::new("primary", &[MODEL]).with_execute_delay(Duration::from_secs(60)));
        let (backup, backup_backend) = ProviderFactory::fixed("backup", &[MODEL], 0.01, 100);
        let registry = ProviderFactory::registry(&[
            ProviderFactory::with_backend("primary", &[MODEL], 0.01, 100, Arc::clone(&primary)),
            backup,
        ]);

        let policy = FailoverPolicy::new("primary", vec!["backup".into()])
            .with_failover_delay(Duration::from_secs(30));
        let dispatcher = Dispatcher::new(2, Duration::from_secs(2));

        let outcome = assert_ok!(
            dispatcher
                .dispatch(&policy, &registry, &ChatRequestFactory::simple(MODEL))
                .await
        );
        assert_eq!(outcome.decision.provider_name, "backup");
        assert!(outcome.decision.fallback);
        assert!(policy.is_in_failover_mode());

        // The cool-down keeps later requests off the primary
        let outcome = assert_ok!(
            dispatcher
                .dispatch(&policy, &registry, &ChatRequestFactory::simple(MODEL))
                .await
        );
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.decision.provider_name, "backup");
        assert_eq!(primary.calls(), 1);
        assert_eq!(backup_backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_share_policy() {
        let registry = Arc::new(ProviderFactory::registry(&[
            ProviderFactory::fixed("a", &[MODEL], 0.001, 100).0,
            ProviderFactory::fixed("b", &[MODEL], 0.01, 100).0,
        ]));
        let policy: Arc<dyn RoutingPolicy> = Arc::new(CostBasedPolicy::new());
        let dispatcher = Arc::new(dispatcher());

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let policy = Arc::clone(&policy);
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    let request = ChatRequestFactory::simple(MODEL).with_request_id(format!("req-{}", i));
                    dispatcher.dispatch(policy.as_ref(), &registry, &request).await
                })
            })
            .collect();

        for task in tasks {
            let outcome = assert_ok!(task.await.unwrap());
            assert_eq!(outcome.decision.provider_name, "a");
            assert!(outcome.response.request_id.unwrap().starts_with("req-"));
        }

        let snapshot = policy.metrics().snapshot();
        assert_eq!(snapshot.total_decisions, 16);
        assert_eq!(snapshot.successful_requests, 16);
        assert_eq!(snapshot.provider_selections.get("a"), Some(&16));
    }
}
