//! JavaScript-facing bridge object
//!
//! The page wires it to the app's ports:
//!
//! ```js
//! const bridge = new WebBridge(JSON.stringify(config)); // config optional
//! app.ports.saveToLocalStorage.subscribe((req) => bridge.save(req));
//! app.ports.initComments.subscribe(() => bridge.init_comments());
//! bridge.start((snapshot) => app.ports.stateFromLocalStorage.send(snapshot));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::scripts;
use super::storage::LocalStore;
use crate::activator::WidgetActivator;
use crate::config::BridgeConfig;
use crate::day::{SaveRequest, Snapshot};
use crate::host::{Host, Inbound, Outbound};
use crate::persistence::{KeyValueStore, MemoryStore};

type Activate = Box<dyn FnMut(&str)>;
type SharedHost = Rc<RefCell<Host<Box<dyn KeyValueStore>, Activate>>>;

#[wasm_bindgen]
pub struct WebBridge {
    host: SharedHost,
}

#[wasm_bindgen]
impl WebBridge {
    /// Set up logging, open LocalStorage, and inject the third-party scripts
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> WebBridge {
        console_error_panic_hook::set_once();
        // Already set if another bridge was created on this page
        let _ = console_log::init_with_level(log::Level::Info);

        let config = BridgeConfig::load(config_json.as_deref());
        log::set_max_level(config.log_level.to_level().to_level_filter());

        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::error!("{}; progress will not be kept", e);
                Box::new(MemoryStore::new())
            }
        };

        let activate: Activate = Box::new(scripts::activate_comments);
        let comments = WidgetActivator::new(config.comments.project_id.clone(), activate);
        let host = Rc::new(RefCell::new(Host::new(store, comments)));

        inject_scripts(&config, &host);

        log::info!("Calendar bridge ready");
        WebBridge { host }
    }

    /// Deliver the startup snapshot to `callback` on a later turn
    ///
    /// Only the first call delivers.
    pub fn start(&self, callback: js_sys::Function) {
        let host = self.host.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // Release the borrow before calling out; the app may save right away
            let msg = host.borrow_mut().start();
            if let Some(Outbound::StateSnapshot(snapshot)) = msg {
                if let Err(e) = deliver(&callback, &snapshot) {
                    log::error!("Snapshot delivery failed: {:?}", e);
                }
            }
        });
    }

    /// `{ day, model }` from the app; fire-and-forget
    pub fn save(&self, request: JsValue) {
        match parse_save(&request) {
            Ok(req) => self.host.borrow_mut().dispatch(Inbound::Save(req)),
            Err(e) => log::error!("Dropping malformed save request: {}", e),
        }
    }

    /// The app wants the comment widget initialized
    pub fn init_comments(&self) {
        self.host.borrow_mut().dispatch(Inbound::InitWidget);
    }
}

fn inject_scripts(config: &BridgeConfig, host: &SharedHost) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document, third-party scripts not injected");
        return;
    };

    if let Err(e) = scripts::inject_analytics(&document, &config.analytics) {
        log::error!("Analytics injection failed: {:?}", e);
    }

    let host = host.clone();
    let on_load = move || host.borrow_mut().widget_loaded();
    if let Err(e) = scripts::inject_comments(&document, &config.comments, on_load) {
        log::error!("Comment widget injection failed: {:?}", e);
    }
}

fn parse_save(request: &JsValue) -> Result<SaveRequest, String> {
    let json = js_sys::JSON::stringify(request).map_err(|e| format!("{:?}", e))?;
    SaveRequest::from_json(&String::from(json)).map_err(|e| e.to_string())
}

fn deliver(callback: &js_sys::Function, snapshot: &Snapshot) -> Result<(), JsValue> {
    let value = js_sys::JSON::parse(&snapshot.to_json())?;
    callback.call1(&JsValue::NULL, &value)?;
    Ok(())
}
