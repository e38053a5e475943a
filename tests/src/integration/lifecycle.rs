//! # Lifecycle Integration Tests
//!
//! The forward path from creation to archival custody, and per-batch
//! status independence.

#[cfg(test)]
mod tests {
    use crate::integration::*;
    use shared_types::{AccountId, BatchId, BatchStatus};
    use tc_04_transition_guard::GuardError;

    #[test]
    fn test_full_path_from_harvest_to_archive() {
        let mut guard = deployed();

        // Producer mints
        let id = guard
            .create_batch(PRODUCER, "ipfs://cid-demo/meta.json")
            .unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Harvested));
        assert_eq!(guard.owner_of(id), Ok(PRODUCER));

        // Inspector attests
        guard.inspect_batch(INSPECTOR, id, None).unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Inspecting));

        // Producer hands to the carrier
        guard.transfer(PRODUCER, PRODUCER, CARRIER, id).unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::InTransit));
        assert_eq!(guard.owner_of(id), Ok(CARRIER));

        // Carrier delivers to the retailer
        guard.transfer(CARRIER, CARRIER, RETAILER, id).unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Delivered));
        assert_eq!(guard.owner_of(id), Ok(RETAILER));

        // Retailer shelves and sells through
        guard.advance_retail(RETAILER, id).unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Retailed));
        guard.advance_retail(RETAILER, id).unwrap();
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Consumed));

        // Archival custody
        guard
            .transfer(RETAILER, RETAILER, AccountId::ARCHIVE_VAULT, id)
            .unwrap();
        assert_eq!(guard.owner_of(id), Ok(AccountId::ARCHIVE_VAULT));
        assert_eq!(guard.status_of(id), Ok(BatchStatus::Consumed));
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut guard = deployed();

        let first = mint(&mut guard);
        let second = mint(&mut guard);
        let third = mint(&mut guard);

        assert_eq!(first, BatchId::new(1));
        assert_eq!(second, BatchId::new(2));
        assert_eq!(third, BatchId::new(3));
        assert_eq!(guard.batch_count(), 3);

        // Archiving a batch frees nothing: the next id keeps counting
        guard.inspect_batch(INSPECTOR, first, None).unwrap();
        assert_eq!(mint(&mut guard), BatchId::new(4));
    }

    #[test]
    fn test_each_batch_tracks_status_independently() {
        let mut guard = deployed();

        let batch_delivered = deliver(&mut guard);
        let batch_in_transit = mint_and_inspect(&mut guard);
        guard
            .transfer(PRODUCER, PRODUCER, CARRIER, batch_in_transit)
            .unwrap();
        let batch_recalled = deliver(&mut guard);
        guard.recall(ADMIN, batch_recalled, b"recall").unwrap();

        assert_eq!(guard.status_of(batch_delivered), Ok(BatchStatus::Delivered));
        assert_eq!(guard.status_of(batch_in_transit), Ok(BatchStatus::InTransit));
        assert_eq!(guard.status_of(batch_recalled), Ok(BatchStatus::Recalled));
    }

    #[test]
    fn test_producer_owns_multiple_batches() {
        let mut guard = deployed();

        let initial = guard.balance_of(PRODUCER).unwrap();
        let ids: Vec<_> = (0..5).map(|_| mint(&mut guard)).collect();

        assert_eq!(guard.balance_of(PRODUCER), Ok(initial + 5));
        for id in ids {
            assert_eq!(guard.owner_of(id), Ok(PRODUCER));
        }
    }

    #[test]
    fn test_transfer_one_batch_leaves_others_alone() {
        let mut guard = deployed();

        let moved = mint_and_inspect(&mut guard);
        let kept = mint_and_inspect(&mut guard);

        guard.transfer(PRODUCER, PRODUCER, CARRIER, moved).unwrap();

        assert_eq!(guard.owner_of(moved), Ok(CARRIER));
        assert_eq!(guard.owner_of(kept), Ok(PRODUCER));
        assert_eq!(guard.status_of(moved), Ok(BatchStatus::InTransit));
        assert_eq!(guard.status_of(kept), Ok(BatchStatus::Inspecting));
    }

    #[test]
    fn test_no_backward_transitions_exist() {
        let mut guard = deployed();
        let id = deliver(&mut guard);

        // Delivered cannot be re-inspected
        assert_eq!(
            guard.inspect_batch(INSPECTOR, id, None),
            Err(GuardError::InvalidState(BatchStatus::Delivered))
        );
        // Delivered cannot move back up the chain
        assert_eq!(
            guard.transfer(RETAILER, RETAILER, CARRIER, id),
            Err(GuardError::TransferNotAllowed(BatchStatus::Delivered))
        );
    }

    #[test]
    fn test_content_ref_follows_the_batch() {
        let mut guard = deployed();
        let id = mint(&mut guard);
        assert_eq!(guard.content_ref_of(id), Ok("ipfs://cid-demo/meta.json"));

        guard
            .inspect_batch(INSPECTOR, id, Some("ipfs://cid-demo/inspected.json"))
            .unwrap();
        assert_eq!(
            guard.content_ref_of(id),
            Ok("ipfs://cid-demo/inspected.json")
        );

        guard.transfer(PRODUCER, PRODUCER, CARRIER, id).unwrap();
        guard
            .update_content_ref(INSPECTOR, id, "ipfs://cid-demo/in-transit.json")
            .unwrap();
        assert_eq!(
            guard.content_ref_of(id),
            Ok("ipfs://cid-demo/in-transit.json")
        );
    }
}
