//! # Recall and Quarantine Integration Tests
//!
//! Admin recall from every eligible state, the quarantine-only transfer
//! rule, and recall monotonicity.

#[cfg(test)]
mod tests {
    use crate::integration::*;
    use shared_types::{AccountId, BatchStatus, Capability};
    use tc_04_transition_guard::GuardError;

    #[test]
    fn test_only_admin_can_recall() {
        let mut guard = deployed();
        let id = mint(&mut guard);

        assert_eq!(
            guard.recall(PRODUCER, id, b"reason"),
            Err(GuardError::MissingRole(Capability::Admin))
        );

        guard.recall(ADMIN, id, b"reason").unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Recalled));
    }

    #[test]
    fn test_recall_from_every_eligible_state() {
        let mut guard = deployed();

        // Harvested
        let harvested = mint(&mut guard);
        // Inspecting
        let inspecting = mint_and_inspect(&mut guard);
        // In transit
        let in_transit = mint_and_inspect(&mut guard);
        guard
            .transfer(PRODUCER, PRODUCER, CARRIER, in_transit)
            .unwrap();
        // Delivered
        let delivered = deliver(&mut guard);
        // Retailed
        let retailed = deliver(&mut guard);
        guard.advance_retail(RETAILER, retailed).unwrap();

        for id in [harvested, inspecting, in_transit, delivered, retailed] {
            guard.recall(ADMIN, id, b"sweep").unwrap();
            assert_eq!(guard.status_of(id), Ok(BatchStatus::Recalled));
        }
    }

    #[test]
    fn test_recall_leaves_custody_unchanged() {
        let mut guard = deployed();
        let id = deliver(&mut guard);

        guard.recall(ADMIN, id, b"qa").unwrap();

        assert_eq!(guard.status_of(id), Ok(BatchStatus::Recalled));
        assert_eq!(guard.owner_of(id), Ok(RETAILER));
    }

    #[test]
    fn test_recalled_transfers_only_to_quarantine() {
        let mut guard = deployed();
        let id = deliver(&mut guard);
        guard.recall(ADMIN, id, b"qa").unwrap();

        // Any role-holder destination is rejected
        assert_eq!(
            guard.transfer(RETAILER, RETAILER, CARRIER, id),
            Err(GuardError::RecallDestinationOnly)
        );
        // So is the wrong vault
        assert_eq!(
            guard.transfer(RETAILER, RETAILER, AccountId::ARCHIVE_VAULT, id),
            Err(GuardError::RecallDestinationOnly)
        );

        guard
            .transfer(RETAILER, RETAILER, AccountId::QUARANTINE_VAULT, id)
            .unwrap();
        assert_eq!(guard.owner_of(id), Ok(AccountId::QUARANTINE_VAULT));
    }

    #[test]
    fn test_recalled_status_persists_after_quarantine() {
        let mut guard = deployed();
        let id = deliver(&mut guard);

        guard.recall(ADMIN, id, b"test").unwrap();
        guard
            .transfer(RETAILER, RETAILER, AccountId::QUARANTINE_VAULT, id)
            .unwrap();

        assert_eq!(guard.status_of(id), Ok(BatchStatus::Recalled));
        assert_eq!(guard.owner_of(id), Ok(AccountId::QUARANTINE_VAULT));
    }

    #[test]
    fn test_recall_is_not_idempotent() {
        let mut guard = deployed();
        let id = mint(&mut guard);

        guard.recall(ADMIN, id, b"once").unwrap();
        assert_eq!(
            guard.recall(ADMIN, id, b"twice"),
            Err(GuardError::AlreadyRecalled)
        );
        // The original reason is preserved
        assert_eq!(guard.recall_reason_of(id), Ok(Some(&b"once"[..])));
    }

    #[test]
    fn test_cannot_recall_consumed_batch() {
        let mut guard = deployed();
        let id = deliver(&mut guard);
        guard.advance_retail(RETAILER, id).unwrap();
        guard.advance_retail(RETAILER, id).unwrap();

        assert_eq!(
            guard.recall(ADMIN, id, b"try"),
            Err(GuardError::AlreadyConsumed)
        );
    }

    #[test]
    fn test_multiple_batches_in_quarantine() {
        let mut guard = deployed();

        let mut ids = Vec::new();
        for round in 0..3u8 {
            let id = deliver(&mut guard);
            guard.recall(ADMIN, id, &[b'r', round]).unwrap();
            guard
                .transfer(RETAILER, RETAILER, AccountId::QUARANTINE_VAULT, id)
                .unwrap();
            ids.push(id);
        }

        for id in ids {
            assert_eq!(guard.owner_of(id), Ok(AccountId::QUARANTINE_VAULT));
            assert_eq!(guard.status_of(id), Ok(BatchStatus::Recalled));
        }
        assert_eq!(guard.balance_of(AccountId::QUARANTINE_VAULT), Ok(3));
    }

    #[test]
    fn test_recall_unknown_batch() {
        let mut guard = deployed();
        let missing = shared_types::BatchId::new(999);
        assert_eq!(
            guard.recall(ADMIN, missing, b"x"),
            Err(GuardError::UnknownBatch(missing))
        );
    }
}
