//! Simulated admin session against the in-memory store.
//!
//! Run with: `cargo run -p toko-client --example admin_session`

use std::sync::Arc;

use toko_client::{
    DashboardStats, LifecycleController, MemoryStore, MirrorEvent, Resolution, StoreMirror,
};

use shared::{Customer, Order, OrderItem, OrderStatus, PaymentType, util};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = Arc::new(MemoryStore::new());
    let mirror = StoreMirror::spawn(store.clone());
    let mut events = mirror.subscribe_events();
    let controller = LifecycleController::new(store, mirror.clone());

    // sound alert stand-in
    tokio::spawn({
        let mut rx = mirror.subscribe_events();
        async move {
            while let Ok(event) = rx.recv().await {
                if let MirrorEvent::NewOrders { count } = event {
                    tracing::info!(active = count, "🔔 ding: new order");
                }
            }
        }
    });

    let order = Order {
        id: "TX-0001".into(),
        payment_type: PaymentType::Qris,
        customer: Customer {
            name: "Siti".into(),
            whatsapp: "628111222333".into(),
            address: "Jl. Kenanga 12".into(),
            lat: None,
            lng: None,
        },
        items: vec![OrderItem {
            id: 1,
            name: "Yakult Original".into(),
            qty: 5,
            price: 10_500.0,
        }],
        total: 52_500.0,
        fee: 0.0,
        status: OrderStatus::Pending,
        timestamp: util::now_millis(),
        proof_url: None,
    };

    controller.submit_order(&order).await?;
    while events.recv().await? != MirrorEvent::Updated {}

    controller
        .attach_proof("TX-0001", "https://proof.example/tx1.jpg")
        .await?;
    while events.recv().await? != MirrorEvent::Updated {}

    controller.resolve("TX-0001", Resolution::Confirmed).await?;
    while events.recv().await? != MirrorEvent::Updated {}

    controller.record_loss(4_000.0, "botol pecah di pengiriman").await?;
    while events.recv().await? != MirrorEvent::Updated {}

    let stats = DashboardStats::compute(&mirror.data());
    tracing::info!(
        revenue = stats.revenue,
        items_sold = stats.items_sold,
        total_loss = stats.total_loss,
        net = stats.net,
        pending = stats.pending,
        "session summary"
    );

    mirror.shutdown();
    Ok(())
}
