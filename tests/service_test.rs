mod common;

use std::time::Duration;

use common::{create_test_config, create_test_service};

#[tokio::test]
async fn first_cycle_populates_the_store() {
    let config = create_test_config();
    let service = create_test_service(&config);

    assert!(service.get_snapshot("0xT1").await.is_none());

    service.refresh_all().await;

    let snapshot = service.get_snapshot("0xT1").await.expect("snapshot after refresh");
    assert_eq!(snapshot.info.address, "0xT1");
    assert!(snapshot.market.price > 0.0);

    let exported = service.export_all().await;
    assert!(exported.contains_key("0xT1"));
    assert_eq!(exported["0xT1"].historical_prices.len(), 1);
}

#[tokio::test]
async fn started_service_keeps_refreshing_until_stopped() {
    let config = create_test_config();
    let service = create_test_service(&config);

    service.start(Duration::from_millis(50)).await;
    assert!(service.is_running());

    // The immediate cycle ran during start; wait for at least one tick.
    tokio::time::sleep(Duration::from_millis(130)).await;
    let while_running = service.history_len("0xT1").await;
    assert!(while_running >= 2, "expected ticks to refresh, got {}", while_running);

    service.stop();
    assert!(!service.is_running());

    // Let any in-flight cycle drain, then confirm the store is frozen.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let frozen = service.history_len("0xT1").await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(service.history_len("0xT1").await, frozen);

    let last_update = service.last_update().await.expect("cycles ran");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(service.last_update().await.unwrap(), last_update);
}

#[tokio::test]
async fn manual_refresh_works_without_the_loop() {
    let config = create_test_config();
    let service = create_test_service(&config);

    service.refresh_all().await;
    service.refresh_all().await;
    service.refresh_all().await;

    assert_eq!(service.history_len("0xT1").await, 3);
    assert!(!service.is_running());
}
