//! # Creation Flow Scenarios
//!
//! The creation path: encrypt off-chain, submit on-chain, await
//! confirmation, refresh the projection. A failed step must leave no
//! partial record anywhere.

#[cfg(test)]
mod tests {
    use crate::support::connected_service;
    use clp_status::StatusPhase;
    use clp_workflow::{CreatePointRequest, LoyaltyWorkflowApi, WorkflowError};

    #[tokio::test]
    async fn test_disconnected_create_makes_no_ledger_write() {
        let (service, ledger, provider) = crate::support::test_service();

        let result = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;

        assert!(matches!(result, Err(WorkflowError::NotConnected)));
        assert_eq!(ledger.submission_count(), 0);
        assert_eq!(provider.encrypt_calls(), 0);
        assert_eq!(service.status().current().phase, StatusPhase::Error);
    }

    #[tokio::test]
    async fn test_create_submits_exactly_one_write() {
        let (service, ledger, _provider) = connected_service();

        let record = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await
            .unwrap();

        assert_eq!(ledger.submission_count(), 1);

        let snapshot = service.store_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, record.id);
        assert!(!snapshot[0].is_verified);
        assert_eq!(snapshot[0].brand, "Starbucks");
        assert_eq!(snapshot[0].category, "Food");
        assert_eq!(snapshot[0].display_value(), None);
    }

    #[tokio::test]
    async fn test_create_success_publishes_and_logs() {
        let (service, _ledger, _provider) = connected_service();

        service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await
            .unwrap();

        let notice = service.status().current();
        assert!(notice.visible);
        assert_eq!(notice.phase, StatusPhase::Success);

        let history = service.history().entries();
        assert!(history
            .iter()
            .any(|entry| entry.summary.contains("Created point: Coffee Points (250 points)")));
    }

    #[tokio::test]
    async fn test_user_rejection_surfaces_distinguished_message() {
        let (service, ledger, _provider) = connected_service();
        ledger.set_reject_submissions(true);

        let result = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;

        assert!(matches!(result, Err(WorkflowError::RejectedByUser)));
        let notice = service.status().current();
        assert_eq!(notice.phase, StatusPhase::Error);
        assert_eq!(notice.message, "Transaction rejected by user");
        assert!(service.store_snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_encrypt_failure_aborts_before_any_write() {
        let (service, ledger, provider) = connected_service();
        provider.set_fail_encrypt(true);

        let result = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;

        assert!(matches!(result, Err(WorkflowError::ProviderFailure(_))));
        assert_eq!(ledger.submission_count(), 0);
        assert_eq!(service.status().current().phase, StatusPhase::Error);
    }

    #[tokio::test]
    async fn test_malformed_value_rejected_not_coerced() {
        let (service, ledger, _provider) = connected_service();

        for raw in ["", "ten", "-3", "2.5"] {
            let result = service
                .create(CreatePointRequest::new("Coffee Points", raw, 4, 2))
                .await;
            assert!(
                matches!(result, Err(WorkflowError::InvalidPointValue(_))),
                "value {raw:?} should be rejected"
            );
        }
        assert_eq!(ledger.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_workflow_usable_after_failure() {
        let (service, ledger, _provider) = connected_service();
        ledger.set_reject_submissions(true);

        let failed = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;
        assert!(failed.is_err());

        ledger.set_reject_submissions(false);
        let record = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;
        assert!(record.is_ok());
        assert_eq!(ledger.submission_count(), 1);
    }
}
