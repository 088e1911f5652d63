//! # Registry Integration Flows
//!
//! Drives the registry end to end through the wire envelope, against both
//! ledger backends.
//!
//! ## Flows Tested:
//!
//! 1. **Create → Exists → Transfer → Read** over JSON requests
//! 2. **Durability**: file-backed ledger state survives a reopen
//! 3. **Isolation of failures**: a failed request leaves no trace
//! 4. **Seeding**: `InitLedger` from configuration is idempotent

#[cfg(test)]
mod tests {
    use lot_registry::{
        AssetRegistry, AssetRegistryApi, ErrorKind, FileBackedLedger, InMemoryLedger, Lot,
        LotProduct, RegistryConfig, RegistryHandler, RegistryResponse, ResponsePayload,
    };
    use serde_json::{json, Value};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn create_payload(id: &str, total: i64) -> Value {
        json!({
            "function": "CreateAsset",
            "args": {
                "id": id,
                "nfId": format!("nf-{}", id),
                "lotProducts": [
                    {"name": "soy", "quantity": 10, "unitValue": 8, "unit": "sack"},
                    {"name": "corn", "quantity": 4, "unitValue": 5, "unit": "sack"}
                ],
                "owner": "Cooperative",
                "ownerId": 11,
                "lotType": "grain",
                "createdAt": "2024-03-15T08:30:00Z",
                "total": total,
                "formatedAddress": "Estrada Rural km 4"
            }
        })
    }

    fn send<L: lot_registry::AtomicBatchWrite>(
        handler: &RegistryHandler,
        ledger: &mut L,
        request: Value,
    ) -> RegistryResponse {
        let bytes = serde_json::to_vec(&request).unwrap();
        handler.handle_bytes(ledger, &bytes)
    }

    fn read_lot<L: lot_registry::AtomicBatchWrite>(
        handler: &RegistryHandler,
        ledger: &mut L,
        id: &str,
    ) -> Lot {
        match send(handler, ledger, json!({"function": "ReadAsset", "args": {"id": id}})) {
            RegistryResponse::Ok {
                payload: Some(ResponsePayload::Lot(lot)),
            } => *lot,
            other => panic!("Expected lot for {}, got {:?}", id, other),
        }
    }

    fn make_handler() -> RegistryHandler {
        RegistryHandler::new(AssetRegistry::new(RegistryConfig::default()))
    }

    // =============================================================================
    // INTEGRATION TESTS: WIRE ENVELOPE → REGISTRY → LEDGER
    // =============================================================================

    #[test]
    fn test_lot_lifecycle_over_wire() {
        let handler = make_handler();
        let mut ledger = InMemoryLedger::new();

        assert!(send(&handler, &mut ledger, create_payload("lot1", 100)).is_ok());

        let exists = send(
            &handler,
            &mut ledger,
            json!({"function": "AssetExists", "args": {"id": "lot1"}}),
        );
        assert_eq!(exists, RegistryResponse::ok(Some(ResponsePayload::Exists(true))));

        let transfer = send(
            &handler,
            &mut ledger,
            json!({"function": "TransferAsset", "args": {"id": "lot1", "newOwner": "Alice", "newOwnerId": 7}}),
        );
        assert!(transfer.is_ok());

        let lot = read_lot(&handler, &mut ledger, "lot1");
        assert_eq!(lot.owner, "Alice");
        assert_eq!(lot.owner_id, 7);
        assert_eq!(lot.total, 100);
        assert_eq!(lot.nf_id, "nf-lot1");
        assert_eq!(
            lot.lot_products,
            vec![
                LotProduct::new("soy", 10, 8, "sack"),
                LotProduct::new("corn", 4, 5, "sack"),
            ]
        );
    }

    #[test]
    fn test_duplicate_create_over_wire() {
        let handler = make_handler();
        let mut ledger = InMemoryLedger::new();

        assert!(send(&handler, &mut ledger, create_payload("lot1", 100)).is_ok());
        let second = send(&handler, &mut ledger, create_payload("lot1", 5));
        assert_eq!(second.error_kind(), Some(ErrorKind::AlreadyExists));

        assert_eq!(read_lot(&handler, &mut ledger, "lot1").total, 100);
    }

    #[test]
    fn test_enumeration_completeness() {
        let handler = make_handler();
        let mut ledger = InMemoryLedger::new();

        let ids = ["b-7", "a-1", "c-3", "a-10", "b-2"];
        for id in ids {
            assert!(send(&handler, &mut ledger, create_payload(id, 100)).is_ok());
        }

        let response = send(&handler, &mut ledger, json!({"function": "GetAllAssets"}));
        let RegistryResponse::Ok {
            payload: Some(ResponsePayload::Lots(lots)),
        } = response
        else {
            panic!("Expected lots payload");
        };

        let mut listed: Vec<String> = lots.into_iter().map(|lot| lot.id).collect();
        let mut expected: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(listed.len(), expected.len());
        listed.sort();
        expected.sort();
        assert_eq!(listed, expected);
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn test_empty_namespace_lists_nothing() {
        let handler = make_handler();
        let mut ledger = InMemoryLedger::new();

        let response = send(&handler, &mut ledger, json!({"function": "GetAllAssets"}));
        assert_eq!(
            response,
            RegistryResponse::ok(Some(ResponsePayload::Lots(Vec::new())))
        );
    }

    #[test]
    fn test_file_backed_ledger_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world-state.bin");
        let handler = make_handler();

        {
            let mut ledger = FileBackedLedger::open(&path).unwrap();
            assert!(send(&handler, &mut ledger, create_payload("lot1", 100)).is_ok());
            assert!(send(
                &handler,
                &mut ledger,
                json!({"function": "TransferAsset", "args": {"id": "lot1", "newOwner": "Bob", "newOwnerId": 2}}),
            )
            .is_ok());
        }

        let mut reopened = FileBackedLedger::open(&path).unwrap();
        let lot = read_lot(&handler, &mut reopened, "lot1");
        assert_eq!(lot.owner, "Bob");
        assert_eq!(lot.owner_id, 2);

        let duplicate = send(&handler, &mut reopened, create_payload("lot1", 100));
        assert_eq!(duplicate.error_kind(), Some(ErrorKind::AlreadyExists));
    }

    #[test]
    fn test_failed_transfer_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world-state.bin");
        let handler = make_handler();

        let mut ledger = FileBackedLedger::open(&path).unwrap();
        assert!(send(&handler, &mut ledger, create_payload("lot1", 100)).is_ok());
        let before = std::fs::read(&path).unwrap();

        let response = send(
            &handler,
            &mut ledger,
            json!({"function": "TransferAsset", "args": {"id": "ghost", "newOwner": "Eve", "newOwnerId": 66}}),
        );
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_seeded_registry_is_idempotent_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world-state.bin");

        let seed: Lot = serde_json::from_value(json!({
            "ID": "genesis-lot", "nfId": "nf-0", "lotProducts": null,
            "owner": "Registry", "ownerId": 0, "lotType": "reference",
            "createdAt": "2024-01-01T00:00:00Z", "total": 0, "formatedAddress": ""
        }))
        .unwrap();
        let registry = AssetRegistry::new(RegistryConfig::new().with_seed_lots(vec![seed.clone()]));
        let handler = RegistryHandler::new(registry);

        for _ in 0..2 {
            let mut ledger = FileBackedLedger::open(&path).unwrap();
            let response = send(&handler, &mut ledger, json!({"function": "InitLedger"}));
            assert_eq!(
                response,
                RegistryResponse::ok(Some(ResponsePayload::Seeded(1)))
            );
        }

        let ledger = FileBackedLedger::open(&path).unwrap();
        let all = handler.registry().get_all_assets(&ledger).unwrap();
        assert_eq!(all, vec![seed]);
    }
}
