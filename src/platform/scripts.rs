//! Third-party script injection
//!
//! Both tags are async + deferred and appended to `<body>`. The comment
//! script's load event is the widget's one-time load signal.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement};

use crate::config::{AnalyticsConfig, CommentsConfig};

// Global init function installed by the comment widget script
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = commentBox, catch)]
    fn comment_box(project_id: &str) -> Result<JsValue, JsValue>;
}

fn script_tag(document: &Document, src: &str) -> Result<HtmlScriptElement, JsValue> {
    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_type("text/javascript");
    script.set_async(true);
    script.set_defer(true);
    script.set_src(src);
    Ok(script)
}

fn append_to_body(document: &Document, script: &HtmlScriptElement) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(script)?;
    Ok(())
}

/// Add the analytics script
pub fn inject_analytics(document: &Document, config: &AnalyticsConfig) -> Result<(), JsValue> {
    let script = script_tag(document, &config.src)?;
    script.set_attribute("data-domain", &config.domain)?;
    append_to_body(document, &script)?;
    log::info!("Analytics script injected");
    Ok(())
}

/// Add the comment widget script; `on_load` runs once it has loaded
pub fn inject_comments(
    document: &Document,
    config: &CommentsConfig,
    on_load: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    let script = script_tag(document, &config.src)?;
    let closure = Closure::once(on_load);
    script.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    append_to_body(document, &script)?;
    log::info!("Comment widget script injected");
    Ok(())
}

/// Run `f` on a later turn of the event loop (`setTimeout(f, 0)`)
pub fn defer(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let closure = Closure::once(f);
    window.set_timeout_with_callback(closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Call the widget's global init on the next turn, so the app has rendered
/// the container it attaches to
pub fn activate_comments(project_id: &str) {
    let project_id = project_id.to_string();
    let scheduled = defer(move || {
        if let Err(e) = comment_box(&project_id) {
            log::error!(
                "Comment widget init failed: {}",
                super::storage::js_error_text(&e)
            );
        } else {
            log::info!("Comment widget initialized");
        }
    });
    if let Err(e) = scheduled {
        log::error!("Could not schedule comment widget init: {:?}", e);
    }
}
