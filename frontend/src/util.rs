use wasm_bindgen::JsValue;

/// Best effort text for a thrown JS value.
pub fn js_error_message(error: &JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

pub fn alert(message: &str) {
    if gloo_utils::window().alert_with_message(message).is_err() {
        gloo_console::error!(format!("Could not show alert: {message}"));
    }
}
