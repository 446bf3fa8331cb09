use crate::settings::AdzunaSettings;
use jobmatch_core::{MatchError, Posting, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

/// Page through the Adzuna search API and map every usable record into a posting.
pub async fn fetch_adzuna_jobs(settings: &AdzunaSettings) -> Result<Vec<Posting>> {
    let (app_id, app_key) = match (&settings.app_id, &settings.app_key) {
        (Some(id), Some(key)) => (id.as_str(), key.as_str()),
        _ => {
            return Err(MatchError::Config(
                "Adzuna credentials missing. Set ADZUNA_APP_ID and ADZUNA_APP_KEY.".into(),
            ))
        }
    };

    let client = Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| MatchError::Config(format!("failed to build HTTP client: {e}")))?;

    let max_pages = settings.max_pages.max(1);
    let mut postings = Vec::new();
    for page in 1..=max_pages {
        let url = page_url(settings, page, app_id, app_key)?;
        tracing::debug!(page, "requesting adzuna page");
        let resp = client
            .get(url)
            .send()
            .await
            .map_err(|e| MatchError::Data(format!("Adzuna request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            return Err(MatchError::Data(
                format!("Adzuna request failed (status {}). {}", status.as_u16(), detail).trim().to_string(),
            ));
        }

        let payload: Value = resp
            .json()
            .await
            .map_err(|e| MatchError::Data(format!("Adzuna returned an unreadable payload: {e}")))?;
        let results = payload.get("results").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
        postings.extend(results.iter().filter_map(to_posting));

        if results.len() < settings.results_per_page {
            break;
        }
    }

    if postings.is_empty() {
        return Err(MatchError::Data("No jobs retrieved from Adzuna. Adjust query parameters.".into()));
    }
    tracing::info!(num_postings = postings.len(), "fetched jobs from adzuna");
    Ok(postings)
}

fn page_url(settings: &AdzunaSettings, page: usize, app_id: &str, app_key: &str) -> Result<Url> {
    let base = settings.endpoint.trim_end_matches('/');
    let raw = format!("{base}/{}/search/{page}", settings.country);
    let mut url = Url::parse(&raw).map_err(|e| MatchError::Config(format!("invalid ADZUNA_ENDPOINT '{raw}': {e}")))?;
    {
        let mut q = url.query_pairs_mut();
        q.append_pair("app_id", app_id);
        q.append_pair("app_key", app_key);
        q.append_pair("results_per_page", &settings.results_per_page.to_string());
        if let Some(what) = &settings.query { q.append_pair("what", what); }
        if let Some(place) = &settings.location { q.append_pair("where", place); }
        if let Some(filters) = &settings.filters { q.append_pair("what_and", filters); }
    }
    Ok(url)
}

/// Server-supplied `error` or `message`, else the raw body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|k| json.get(*k).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Map one raw record; records without an id are dropped.
pub fn to_posting(record: &Value) -> Option<Posting> {
    let id = match record.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let text_or = |pointer: &str, default: &str| {
        record
            .pointer(pointer)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    Some(Posting {
        id,
        title: text_or("/title", "Untitled role"),
        company: text_or("/company/display_name", "Unknown company"),
        location: text_or("/location/display_name", "Remote/Unspecified"),
        description: text_or("/description", ""),
        skills: extract_skills(record),
    })
}

/// Tag labels followed by the category label, deduplicated case-insensitively, `;`-joined.
fn extract_skills(record: &Value) -> String {
    let tags = record
        .get("tags")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|tag| {
            let label = |key: &str| tag.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty());
            label("tag").or_else(|| label("label"))
        });
    let category = record.pointer("/category/label").and_then(Value::as_str);

    let mut seen = HashSet::new();
    tags.chain(category)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.to_lowercase()))
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_defaults_for_missing_fields() {
        let p = to_posting(&json!({ "id": 42, "description": "Ship code" })).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.title, "Untitled role");
        assert_eq!(p.company, "Unknown company");
        assert_eq!(p.location, "Remote/Unspecified");
        assert_eq!(p.skills, "");
    }

    #[test]
    fn drops_records_without_id() {
        assert!(to_posting(&json!({ "title": "Ghost job" })).is_none());
    }

    #[test]
    fn skills_come_from_tags_then_category_deduplicated() {
        let p = to_posting(&json!({
            "id": "a1",
            "title": "Rust Engineer",
            "company": { "display_name": "Ferris Inc" },
            "location": { "display_name": "Berlin" },
            "tags": [{ "tag": " Rust " }, { "label": "rust" }, { "label": "IT Jobs" }, { "other": 1 }],
            "category": { "label": "it jobs" }
        }))
        .unwrap();
        assert_eq!(p.company, "Ferris Inc");
        assert_eq!(p.location, "Berlin");
        assert_eq!(p.skills, "Rust;IT Jobs");
    }

    #[test]
    fn empty_tag_falls_back_to_label() {
        let p = to_posting(&json!({
            "id": "t1",
            "tags": [{ "tag": "", "label": "Python" }, { "tag": "  ", "label": "SQL" }, { "tag": "" }]
        }))
        .unwrap();
        assert_eq!(p.skills, "Python;SQL");
    }

    #[test]
    fn error_detail_prefers_json_fields() {
        assert_eq!(error_detail(r#"{"error":"bad key"}"#), "bad key");
        assert_eq!(error_detail(r#"{"message":"slow down"}"#), "slow down");
        assert_eq!(error_detail("gateway timeout"), "gateway timeout");
    }
}
