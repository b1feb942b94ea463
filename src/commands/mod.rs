//! Notification Service Bindings
//!
//! Browser `fetch` wrappers for the notification endpoints.

mod notifications;

use notify_core::ApiError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

pub use notifications::HttpNotificationApi;

/// GET `url` and return the body text of a 2xx response
pub(crate) async fn get_text(url: &str) -> Result<String, ApiError> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_credentials(RequestCredentials::SameOrigin);

    let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;
    request.headers().set("Accept", "application/json").map_err(js_error)?;

    let response = send(request).await?;
    let promise = response.text().map_err(js_error)?;
    let body = JsFuture::from(promise).await.map_err(js_error)?;
    body.as_string()
        .ok_or_else(|| ApiError::Decode("response body is not text".to_string()))
}

/// POST an urlencoded form body; redirects are followed
pub(crate) async fn post_form(url: &str, body: &str) -> Result<Response, ApiError> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/x-www-form-urlencoded")
        .map_err(js_error)?;

    send(request).await
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response)
}

fn js_error(e: JsValue) -> ApiError {
    let message = match e.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => e.as_string().unwrap_or_else(|| format!("{:?}", e)),
    };
    ApiError::Network(message)
}
