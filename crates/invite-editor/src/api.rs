use gloo::net::http::Request;

use crate::error::EditorError;

/// Fetches raw template markup. The body is read whatever the status code.
pub async fn fetch_template(path: &str) -> Result<String, EditorError> {
    let response = Request::get(path)
        .send()
        .await
        .map_err(|e| EditorError::Fetch(format!("request error: {e}")))?;

    if !response.ok() {
        tracing::debug!(
            path,
            status = response.status(),
            "template preview returned non-success status"
        );
    }

    response
        .text()
        .await
        .map_err(|e| EditorError::Fetch(format!("body read error: {e}")))
}
