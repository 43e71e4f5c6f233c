//! `fetch`-backed implementation of the core HTTP client.

use crate::serde_helper::js_message;
use async_trait::async_trait;
use tasktracker::request::{HttpClient, HttpRequest, HttpResponse};
use tasktracker::{Result, TrackerError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

fn build_error(op: &str, e: JsValue) -> TrackerError {
    TrackerError::http(js_message(&e)).in_op(op)
}

/// Browser HTTP client over `window.fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let headers = Headers::new().map_err(|e| build_error("fetch.headers", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| build_error("fetch.headers", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| build_error("fetch.request", e))?;

        let window = web_sys::window()
            .ok_or_else(|| TrackerError::http("window is not available").in_op("fetch.send"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| build_error("fetch.send", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| build_error("fetch.response", e))?;

        let promise = response.text().map_err(|e| build_error("fetch.body", e))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| build_error("fetch.body", e))?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
