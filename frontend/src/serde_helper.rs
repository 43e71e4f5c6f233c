use js_sys::wasm_bindgen::JsValue;
use serde::{Serialize, de::DeserializeOwned};
use tasktracker::TrackerError;

/// Serialize a Rust data structure into a plain JS object
pub fn to_value<T: Serialize>(value: &T) -> Result<JsValue, TrackerError> {
    // Numbers stay JS numbers so the SDK can JSON.stringify them
    let serializer =
        serde_wasm_bindgen::Serializer::new().serialize_large_number_types_as_bigints(false);
    value
        .serialize(&serializer)
        .map_err(|e| TrackerError::serialization(e.to_string()))
}

/// Deserialize a JsValue into a Rust data structure
pub fn from_value<T: DeserializeOwned>(value: JsValue) -> Result<T, TrackerError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| TrackerError::serialization(e.to_string()))
}

/// Best-effort text of a thrown JS value (`Error.message`, a string, or its debug form)
pub fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
