use crate::error::{Error, Result};
use headless_chrome::{Browser, LaunchOptionsBuilder};
use serde::Deserialize;

/// Selector for the disguised download form the landing page fills in from
/// client-side logic after load.
const FORM_SELECTOR: &str = r#"form[name="F1"]"#;

/// Snapshots the F1 form inside the page. Returns a JSON string so the value
/// always travels back over CDP as a plain primitive.
const FORM_SNAPSHOT_JS: &str = r#"
(() => {
    const form = document.querySelector('form[name="F1"]');
    if (form === null) {
        return null;
    }
    const fields = [];
    for (const [name, value] of new FormData(form).entries()) {
        fields.push({ name, value: String(value) });
    }
    return JSON.stringify(fields);
})()
"#;

/// Session state lifted out of the rendered landing page. Both sequences
/// keep capture order: cookies as reported by the browser, form fields in
/// DOM order.
#[derive(Clone, Debug)]
pub struct CaptureResult {
    pub cookies: Vec<(String, String)>,
    pub form_fields: Vec<(String, String)>,
}

impl CaptureResult {
    /// Serializes cookies into a single `name=value; name=value` header.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Deserialize)]
struct FormField {
    name: String,
    value: String,
}

/// Renders a landing page and lifts cookies plus the hidden form out of it.
/// A seam rather than a direct browser call, so the pipeline can run against
/// canned data in tests.
pub trait Capture {
    fn capture(&self, url: &str) -> Result<CaptureResult>;
}

pub struct ChromeCapture {
    headless: bool,
    proxy: Option<String>,
}

impl ChromeCapture {
    pub fn new(headless: bool, proxy: Option<String>) -> Self {
        Self { headless, proxy }
    }
}

impl Capture for ChromeCapture {
    fn capture(&self, url: &str) -> Result<CaptureResult> {
        // The browser and its tab live only for this call, so the chromium
        // process is reaped on every exit path.
        let browser = Browser::new(
            LaunchOptionsBuilder::default()
                .headless(self.headless)
                .proxy_server(self.proxy.as_deref())
                .build()
                .map_err(|e| Error::Navigation(e.to_string()))?,
        )
        .map_err(navigation)?;
        let tab = browser.new_tab().map_err(navigation)?;

        tab.navigate_to(url).map_err(navigation)?;
        tab.wait_until_navigated().map_err(navigation)?;

        // The form is populated after load; polling for it stands in for a
        // network-idle wait. The element timing out means the page never
        // produced a download form at all.
        tab.wait_for_element(FORM_SELECTOR)
            .map_err(|_| Error::FormNotFound)?;

        let cookies = tab
            .get_cookies()
            .map_err(navigation)?
            .into_iter()
            .map(|cookie| (cookie.name, cookie.value))
            .collect();

        let snapshot = tab.evaluate(FORM_SNAPSHOT_JS, false).map_err(navigation)?;
        let form_fields = match snapshot.value {
            Some(serde_json::Value::String(json)) => {
                serde_json::from_str::<Vec<FormField>>(&json)
                    .map_err(|e| Error::Navigation(e.to_string()))?
            }
            _ => return Err(Error::FormNotFound),
        };

        if form_fields.is_empty() {
            return Err(Error::EmptyForm);
        }

        Ok(CaptureResult {
            cookies,
            form_fields: form_fields
                .into_iter()
                .map(|field| (field.name, field.value))
                .collect(),
        })
    }
}

fn navigation(e: anyhow::Error) -> Error {
    Error::Navigation(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_joins_pairs_in_capture_order() {
        let session = CaptureResult {
            cookies: vec![
                ("lang".to_owned(), "tr".to_owned()),
                ("xfss".to_owned(), "abc123".to_owned()),
            ],
            form_fields: vec![],
        };

        assert_eq!(session.cookie_header(), "lang=tr; xfss=abc123");
    }

    #[test]
    fn cookie_header_is_empty_without_cookies() {
        let session = CaptureResult {
            cookies: vec![],
            form_fields: vec![],
        };

        assert_eq!(session.cookie_header(), "");
    }

    #[test]
    fn form_snapshot_json_preserves_field_order() {
        let json = r#"[
            {"name": "op", "value": "download2"},
            {"name": "id", "value": "abcdefabcdef"},
            {"name": "rand", "value": ""},
            {"name": "method_free", "value": "Free Download"}
        ]"#;

        let fields = serde_json::from_str::<Vec<FormField>>(json).unwrap();
        let names = fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();

        assert_eq!(names, ["op", "id", "rand", "method_free"]);
        assert_eq!(fields[3].value, "Free Download");
    }
}
