//! # Status Channel Scenarios
//!
//! The presentation contract: one live notice, pending transitions during a
//! workflow, auto-clear after the display duration.

#[cfg(test)]
mod tests {
    use crate::support::connected_service;
    use clp_status::StatusPhase;
    use clp_workflow::{CreatePointRequest, LoyaltyWorkflowApi};
    use std::time::Duration;

    #[tokio::test]
    async fn test_create_walks_through_pending_to_success() {
        let (service, _ledger, _provider) = connected_service();
        let mut receiver = service.status().subscribe();

        service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await
            .unwrap();

        // Observers only ever see the latest notice; by completion that is
        // the success one.
        receiver.changed().await.unwrap();
        let notice = receiver.borrow_and_update().clone();
        assert_eq!(notice.phase, StatusPhase::Success);
        assert_eq!(notice.message, "Loyalty point created successfully!");
    }

    #[tokio::test]
    async fn test_success_notice_autoclears() {
        let (service, _ledger, _provider) = connected_service();

        service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await
            .unwrap();
        assert!(service.status().current().visible);

        // for_testing display duration is tens of milliseconds.
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!service.status().current().visible);
    }

    #[tokio::test]
    async fn test_error_notice_autoclears() {
        let (service, _ledger, _provider) = connected_service();
        service.disconnect();

        let _ = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;
        assert_eq!(service.status().current().phase, StatusPhase::Error);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!service.status().current().visible);
    }

    #[tokio::test]
    async fn test_new_operation_overwrites_stale_notice() {
        let (service, ledger, _provider) = connected_service();
        ledger.set_reject_submissions(true);
        let _ = service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await;
        assert_eq!(service.status().current().phase, StatusPhase::Error);

        // A follow-up operation takes the slot regardless of the error.
        ledger.set_reject_submissions(false);
        service
            .create(CreatePointRequest::new("Coffee Points", "250", 4, 2))
            .await
            .unwrap();
        assert_eq!(service.status().current().phase, StatusPhase::Success);
    }

    #[tokio::test]
    async fn test_ledger_check_publishes_outcome() {
        let (service, ledger, _provider) = connected_service();

        service.check_ledger().await;
        assert_eq!(service.status().current().phase, StatusPhase::Success);

        ledger.set_available(false);
        service.check_ledger().await;
        assert_eq!(service.status().current().phase, StatusPhase::Error);
    }
}
