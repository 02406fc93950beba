//! Route configuration persistence across store instances.

use bridge_wizard::bridge::store::{RouteConfigStore, RouteStoreError};
use bridge_wizard::bridge::types::{BridgeTransferDirection, NetworkKind};

fn temp_path(name: &str) -> String {
    let dir = std::env::temp_dir().join(format!("bridge-wizard-{}-{}", name, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join("routes.json").to_string_lossy().to_string()
}

#[test]
fn test_overrides_survive_reload() {
    let path = temp_path("reload");
    let store = RouteConfigStore::load_from_file(&path).unwrap();
    assert_eq!(store.count(), 0);

    let mut config = store.get(NetworkKind::Testnet, BridgeTransferDirection::CryptoOrgToCronos);
    config.bridge_channel = Some("channel-7".to_string());
    store.update(config).unwrap();

    let reloaded = RouteConfigStore::load_from_file(&path).unwrap();
    assert!(reloaded.is_overridden(NetworkKind::Testnet, BridgeTransferDirection::CryptoOrgToCronos));
    assert_eq!(
        reloaded
            .get(NetworkKind::Testnet, BridgeTransferDirection::CryptoOrgToCronos)
            .bridge_channel
            .as_deref(),
        Some("channel-7")
    );

    reloaded
        .reset(NetworkKind::Testnet, BridgeTransferDirection::CryptoOrgToCronos)
        .unwrap();
    let again = RouteConfigStore::load_from_file(&path).unwrap();
    assert_eq!(again.count(), 0);
}

#[test]
fn test_invalid_update_is_not_persisted() {
    let path = temp_path("invalid");
    let store = RouteConfigStore::load_from_file(&path).unwrap();

    let mut config = store.get(NetworkKind::Mainnet, BridgeTransferDirection::CronosToCryptoOrg);
    config.cronos_bridge_contract_address = Some("not-an-address".to_string());
    match store.update(config).unwrap_err() {
        RouteStoreError::Invalid(errors) => {
            assert!(errors.iter().any(|e| e.field == "cronosBridgeContractAddress"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!std::path::Path::new(&path).exists());
}
