/// Client for the external taste-vector service.
///
/// One JSON POST per call, no retries: the service turns a finished quiz
/// result into a baseline vector for the user's long-lived profile.
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::output::ResultExport;

#[derive(Serialize)]
struct SubmitRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    result: &'a ResultExport,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "baselineVector")]
    baseline_vector: Vec<f64>,
}

/// Send `result` to the service at `url` and return the baseline vector.
///
/// Returns Err on network failures, non-2xx responses, and malformed bodies.
pub async fn submit_result(
    client: &Client,
    url: &str,
    user_id: &str,
    result: &ResultExport,
) -> Result<Vec<f64>, String> {
    let request = SubmitRequest { user_id, result };

    let resp = client
        .post(url)
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("HTTP request failed: {e}"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(format!("taste service returned {status}: {}", truncate(&body, 200)));
    }

    let data: SubmitResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse taste service response JSON: {e}"))?;

    tracing::debug!(dimensions = data.baseline_vector.len(), "baseline vector received");
    Ok(data.baseline_vector)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
