//! Calendar Bridge entry point
//!
//! The browser build is driven from JavaScript through `WebBridge`. The
//! native binary runs a save/restart smoke check against an in-memory store.

#[cfg(not(target_arch = "wasm32"))]
use calendar_bridge::{BridgeConfig, WidgetActivator};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let config = BridgeConfig::load(std::env::var("CALENDAR_BRIDGE_CONFIG").ok().as_deref());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    log::info!("Calendar Bridge (native) starting...");
    log::info!("Native mode has no LocalStorage - build for wasm32 to run in a page");

    println!("\nRunning save/restart check...");
    smoke_check(&config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebBridge, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn logging_activator(config: &BridgeConfig) -> WidgetActivator<impl FnMut(&str)> {
    WidgetActivator::new(config.comments.project_id.clone(), |id: &str| {
        log::info!("commentBox({}) would run here", id)
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check(config: &BridgeConfig) {
    use calendar_bridge::{DayId, Host, Inbound, MemoryStore, Outbound, SaveRequest};
    use serde_json::json;

    let mut host = Host::new(MemoryStore::new(), logging_activator(config));
    host.start_with(|_| log::info!("Initial snapshot delivered"));
    let day = DayId::new(3).expect("day 3 is in range");
    host.dispatch(Inbound::Save(SaveRequest::new(day, json!({"solved": true}))));
    host.dispatch(Inbound::InitWidget);
    host.widget_loaded();
    assert_eq!(host.comments().activation_count(), 1);

    let mut restarted = Host::new(host.into_store(), logging_activator(config));
    let Some(Outbound::StateSnapshot(snapshot)) = restarted.start() else {
        panic!("restarted host delivered no snapshot");
    };
    assert_eq!(snapshot.present_count(), 1, "only day 3 should be saved");
    assert!(snapshot.get(day).is_some(), "day 3 should survive restart");
    println!("✓ Save/restart check passed! ({})", snapshot.to_json());
}
