//! Browser glue: timers, fetch and console reporting.
use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

fn browser_window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no browser window"))
}

/// Best-effort text for a thrown JS value.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Log `err` to the console, prefixed with what was being attempted.
pub fn report(context: &str, err: &JsValue) {
    console_error(&format!("{context}: {}", js_error_message(err)));
}

/// # Errors
/// Fails without a browser window or when the timeout is refused.
#[allow(clippy::future_not_send)]
pub async fn sleep_ms(duration_ms: u32) -> Result<(), JsValue> {
    let window = browser_window()?;
    let timeout = i32::try_from(duration_ms).unwrap_or(i32::MAX);
    let timer = Promise::new(&mut |resolve, reject| {
        if let Err(err) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
        {
            let _ = reject.call1(&JsValue::UNDEFINED, &err);
        }
    });
    JsFuture::from(timer).await.map(drop)
}

/// # Errors
/// Fails when the request is rejected or yields something other than a `Response`.
#[allow(clippy::future_not_send)]
pub async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    JsFuture::from(browser_window()?.fetch_with_str(url))
        .await?
        .dyn_into::<Response>()
}

/// # Errors
/// Fails when the body cannot be read as text.
#[allow(clippy::future_not_send)]
pub async fn response_text(resp: &Response) -> Result<String, JsValue> {
    let body = JsFuture::from(resp.text()?).await?;
    body.as_string()
        .ok_or_else(|| JsValue::from_str("response body was not text"))
}
