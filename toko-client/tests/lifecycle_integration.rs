//! End-to-end lifecycle tests: two browser-like clients sharing one
//! store, each with its own mirror, one of them driving the controller.

use std::sync::Arc;

use toko_client::{
    LifecycleController, MemoryStore, MirrorEvent, Resolution, StoreMirror, TreeStore,
};

use shared::{Customer, Order, OrderItem, OrderStatus, PaymentType};
use tokio::sync::broadcast;

fn order(id: &str, timestamp: i64) -> Order {
    Order {
        id: id.into(),
        payment_type: PaymentType::Qris,
        customer: Customer {
            name: "Siti".into(),
            whatsapp: "628111222333".into(),
            address: "Jl. Kenanga 12".into(),
            lat: None,
            lng: None,
        },
        items: vec![
            OrderItem {
                id: 1,
                name: "Yakult Original".into(),
                qty: 2,
                price: 10_500.0,
            },
            OrderItem {
                id: 3,
                name: "Yakult Light".into(),
                qty: 1,
                price: 13_000.0,
            },
        ],
        total: 34_000.0,
        fee: 0.0,
        status: OrderStatus::Pending,
        timestamp,
        proof_url: None,
    }
}

async fn wait_updated(rx: &mut broadcast::Receiver<MirrorEvent>) {
    loop {
        match rx.recv().await {
            Ok(MirrorEvent::Updated) => break,
            Ok(_) => continue,
            Err(e) => panic!("event feed closed: {e}"),
        }
    }
}

#[tokio::test]
async fn both_clients_observe_the_same_lifecycle() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

    // "customer" client and "admin" client, independent mirrors
    let customer_mirror = StoreMirror::spawn(store.clone());
    let admin_mirror = StoreMirror::spawn(store.clone());
    let mut customer_events = customer_mirror.subscribe_events();
    let mut admin_events = admin_mirror.subscribe_events();

    let customer = LifecycleController::new(store.clone(), customer_mirror.clone());
    let admin = LifecycleController::new(store.clone(), admin_mirror.clone());

    wait_updated(&mut customer_events).await;
    wait_updated(&mut admin_events).await;

    // customer submits, both sides converge
    customer.submit_order(&order("TX-1", 1_000)).await.unwrap();
    wait_updated(&mut customer_events).await;
    wait_updated(&mut admin_events).await;

    assert_eq!(customer_mirror.data().active.len(), 1);
    assert_eq!(admin_mirror.data().active.len(), 1);

    // the admin-side mirror raises the sound alert for the new order
    let mut saw_new_orders = false;
    while let Ok(event) = admin_events.try_recv() {
        if matches!(event, MirrorEvent::NewOrders { count: 1 }) {
            saw_new_orders = true;
        }
    }
    assert!(saw_new_orders);

    // customer attaches proof; admin sees paid status
    customer
        .attach_proof("TX-1", "https://proof.example/tx1.jpg")
        .await
        .unwrap();
    wait_updated(&mut customer_events).await;
    wait_updated(&mut admin_events).await;
    assert_eq!(
        admin_mirror.data().find_active("TX-1").map(|o| o.status),
        Some(OrderStatus::Paid)
    );

    // admin confirms from its own mirror
    admin.resolve("TX-1", Resolution::Confirmed).await.unwrap();
    wait_updated(&mut customer_events).await;
    wait_updated(&mut admin_events).await;

    for mirror in [&customer_mirror, &admin_mirror] {
        let data = mirror.data();
        assert!(data.find_active("TX-1").is_none());
        let archived = data.find_history("TX-1").expect("order in history");
        assert_eq!(archived.status, OrderStatus::Confirmed);
        assert_eq!(archived.total, 34_000.0);
        assert_eq!(archived.timestamp, 1_000);
        assert_eq!(archived.items.len(), 2);
    }

    customer_mirror.shutdown();
    admin_mirror.shutdown();
}

#[tokio::test]
async fn resolving_twice_leaves_exactly_one_history_record() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let mirror = StoreMirror::spawn(store.clone());
    let mut events = mirror.subscribe_events();
    let admin = LifecycleController::new(store.clone(), mirror.clone());

    wait_updated(&mut events).await;
    admin.submit_order(&order("TX-9", 42)).await.unwrap();
    wait_updated(&mut events).await;

    admin.resolve("TX-9", Resolution::Rejected).await.unwrap();
    wait_updated(&mut events).await;
    // second resolve finds the order in history and patches in place
    admin.resolve("TX-9", Resolution::Confirmed).await.unwrap();
    wait_updated(&mut events).await;

    let (snapshot, _) = store.subscribe();
    let history = snapshot["history"].as_object().expect("history branch");
    assert_eq!(history.len(), 1);
    assert_eq!(history["TX-9"]["status"], "confirmed");
    assert!(snapshot.get("transactions").is_none());

    mirror.shutdown();
}

#[tokio::test]
async fn mirror_decodes_preexisting_remote_data_on_startup() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            "transactions/OLD-1",
            serde_json::to_value(order("OLD-1", 7)).unwrap(),
        )
        .await
        .unwrap();

    let mirror = StoreMirror::spawn(store.clone());
    let mut events = mirror.subscribe_events();
    wait_updated(&mut events).await;

    assert_eq!(mirror.data().active[0].id, "OLD-1");
    // pre-existing orders in the first snapshot never ring the bell
    assert!(events.try_recv().is_err());

    mirror.shutdown();
}
