use jobmatch_core::{MatchError, Posting, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const REQUIRED_FIELDS: [&str; 6] = ["job_id", "job_title", "company", "location", "description", "skills"];

/// Load postings from a `.csv`, `.json` (array or single object) or `.jsonl` file.
pub fn load_dataset(path: &Path) -> Result<Vec<Posting>> {
    if !path.exists() {
        return Err(MatchError::Data(format!(
            "Job dataset not found at {}. Update JOB_DATASET_PATH or add the file.",
            path.display()
        )));
    }
    let extension = path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
    if extension.as_deref() == Some("csv") {
        let postings = load_csv(path)?;
        tracing::info!(path = %path.display(), num_postings = postings.len(), "loaded job dataset");
        return Ok(postings);
    }

    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let reader = BufReader::new(file);

    let records: Vec<Value> = if extension.as_deref() == Some("jsonl") {
        let mut out: Vec<Value> = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| read_error(path, e))?;
            if line.trim().is_empty() { continue; }
            out.push(serde_json::from_str(&line).map_err(|e| read_error(path, e))?);
        }
        out
    } else {
        let json: Value = serde_json::from_reader(reader).map_err(|e| read_error(path, e))?;
        match json {
            Value::Array(arr) => arr,
            obj @ Value::Object(_) => vec![obj],
            _ => return Err(MatchError::Data(format!("{} does not hold job records", path.display()))),
        }
    };

    let postings = records
        .iter()
        .enumerate()
        .map(|(i, record)| record_to_posting(i, record))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(path = %path.display(), num_postings = postings.len(), "loaded job dataset");
    Ok(postings)
}

/// Header row must name every required column; extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<Posting>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(path, e))?;
    let headers = reader.headers().map_err(|e| read_error(path, e))?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let mut missing: Vec<&str> = REQUIRED_FIELDS.iter().copied().filter(|f| column(*f).is_none()).collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(MatchError::Config(format!("Dataset is missing required columns: {missing:?}")));
    }
    let [id, title, company, location, description, skills] = REQUIRED_FIELDS.map(|f| column(f).unwrap_or_default());

    let mut postings = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| read_error(path, e))?;
        let cell = |i: usize| row.get(i).unwrap_or_default().to_string();
        postings.push(Posting {
            id: cell(id),
            title: cell(title),
            company: cell(company),
            location: cell(location),
            description: cell(description),
            skills: cell(skills),
        });
    }
    Ok(postings)
}

fn record_to_posting(index: usize, record: &Value) -> Result<Posting> {
    let empty = Map::new();
    let obj = record.as_object().unwrap_or(&empty);
    let mut missing: Vec<&str> = REQUIRED_FIELDS.iter().copied().filter(|f| !obj.contains_key(*f)).collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(MatchError::Config(format!("Dataset record {index} is missing required fields: {missing:?}")));
    }
    let field = |name: &str| obj.get(name).map(as_text).unwrap_or_default();
    Ok(Posting {
        id: field("job_id"),
        title: field("job_title"),
        company: field("company"),
        location: field("location"),
        description: field("description"),
        skills: field("skills"),
    })
}

/// Scalars become text; null and nested values degrade to an empty string.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> MatchError {
    MatchError::Data(format!("failed to read job dataset {}: {err}", path.display()))
}
