//! `fetch`-backed form transport.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, HtmlFormElement, Request, RequestInit, Response};

use crate::contact::{FormRequest, Transport};
use crate::error::SubmitError;

fn transport_err(err: JsValue) -> SubmitError {
    SubmitError::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Snapshot a form element into a request. File inputs are skipped.
pub fn form_request(form: &HtmlFormElement) -> Result<FormRequest, SubmitError> {
    let data = FormData::new_with_form(form).map_err(transport_err)?;
    let mut fields = Vec::new();
    if let Some(entries) = js_sys::try_iter(&data).map_err(transport_err)? {
        for entry in entries {
            let entry: Array = entry.map_err(transport_err)?.unchecked_into();
            if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                fields.push((name, value));
            }
        }
    }
    Ok(FormRequest::new(form.action(), &form.method(), fields))
}

pub struct FetchTransport {
    window: web_sys::Window,
}

impl FetchTransport {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    fn build(&self, request: &FormRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        headers.set("Accept", FormRequest::ACCEPT)?;

        let init = RequestInit::new();
        init.set_method(&request.method);
        init.set_headers(&headers);

        if !matches!(request.method.as_str(), "GET" | "HEAD") {
            let body = FormData::new()?;
            for (name, value) in &request.fields {
                body.append_with_str(name, value)?;
            }
            init.set_body(&body);
        }

        Request::new_with_str_and_init(&request.action, &init)
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: &FormRequest) -> Result<u16, SubmitError> {
        let req = self.build(request).map_err(transport_err)?;
        let value = JsFuture::from(self.window.fetch_with_request(&req))
            .await
            .map_err(transport_err)?;
        let response: Response = value.dyn_into().map_err(transport_err)?;
        Ok(response.status())
    }
}
