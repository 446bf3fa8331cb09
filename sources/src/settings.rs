use jobmatch_core::config::{DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K};
use jobmatch_core::{MatchError, RecommenderConfig, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATASET_PATH: &str = "data/jobs_sample.csv";
pub const DEFAULT_ADZUNA_ENDPOINT: &str = "https://api.adzuna.com/v1/api/jobs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Local CSV, JSON or JSON-lines dataset file.
    Dataset,
    /// Live postings from the Adzuna search API.
    Adzuna,
}

impl FromStr for DataSource {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dataset" | "csv" => Ok(DataSource::Dataset),
            "adzuna" => Ok(DataSource::Adzuna),
            _ => Err(MatchError::Config(format!("Unsupported JOB_DATA_SOURCE '{s}'."))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdzunaSettings {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub country: String,
    pub results_per_page: usize,
    pub max_pages: usize,
    pub query: Option<String>,
    pub location: Option<String>,
    pub filters: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AdzunaSettings {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            country: "us".into(),
            results_per_page: 50,
            max_pages: 2,
            query: None,
            location: None,
            filters: None,
            endpoint: DEFAULT_ADZUNA_ENDPOINT.into(),
            timeout_secs: 20,
        }
    }
}

/// Runtime configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_source: DataSource,
    pub dataset_path: PathBuf,
    pub recommender: RecommenderConfig,
    pub adzuna: AdzunaSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_source: DataSource::Dataset,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            recommender: RecommenderConfig::default(),
            adzuna: AdzunaSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AdzunaSettings::default();

        Ok(Settings {
            data_source: get("JOB_DATA_SOURCE").as_deref().unwrap_or("dataset").parse()?,
            dataset_path: get("JOB_DATASET_PATH").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            recommender: RecommenderConfig {
                top_k: parse_or(&get, "TOP_K_RESULTS", DEFAULT_TOP_K)?,
                min_similarity: parse_or(&get, "MIN_SIMILARITY_THRESHOLD", DEFAULT_MIN_SIMILARITY)?,
            },
            adzuna: AdzunaSettings {
                app_id: get("ADZUNA_APP_ID"),
                app_key: get("ADZUNA_APP_KEY"),
                country: get("ADZUNA_COUNTRY").unwrap_or(defaults.country),
                results_per_page: parse_or(&get, "ADZUNA_RESULTS_PER_PAGE", defaults.results_per_page)?,
                max_pages: parse_or(&get, "ADZUNA_MAX_PAGES", defaults.max_pages)?,
                query: get("ADZUNA_QUERY"),
                location: get("ADZUNA_LOCATION"),
                filters: get("ADZUNA_FILTERS"),
                endpoint: get("ADZUNA_ENDPOINT").unwrap_or(defaults.endpoint),
                timeout_secs: parse_or(&get, "ADZUNA_TIMEOUT_SECS", defaults.timeout_secs)?,
            },
        })
    }
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MatchError::Config(format!("{key} must be a number, got '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("JOB_DATA_SOURCE", "Adzuna"),
            ("TOP_K_RESULTS", "10"),
            ("MIN_SIMILARITY_THRESHOLD", "0.2"),
            ("ADZUNA_COUNTRY", "gb"),
            ("ADZUNA_QUERY", "rust developer"),
        ]))
        .unwrap();
        assert_eq!(s.data_source, DataSource::Adzuna);
        assert_eq!(s.recommender.top_k, 10);
        assert_eq!(s.recommender.min_similarity, 0.2);
        assert_eq!(s.adzuna.country, "gb");
        assert_eq!(s.adzuna.query.as_deref(), Some("rust developer"));
    }

    #[test]
    fn csv_selects_the_dataset_source() {
        let s = Settings::from_lookup(lookup(&[("JOB_DATA_SOURCE", "CSV")])).unwrap();
        assert_eq!(s.data_source, DataSource::Dataset);
        assert_eq!(s.dataset_path, PathBuf::from("data/jobs_sample.csv"));
    }

    #[test]
    fn unknown_source_is_a_config_error() {
        let err = Settings::from_lookup(lookup(&[("JOB_DATA_SOURCE", "sql")])).unwrap_err();
        assert!(matches!(err, MatchError::Config(m) if m.contains("'sql'")));
    }

    #[test]
    fn malformed_number_names_the_variable() {
        let err = Settings::from_lookup(lookup(&[("TOP_K_RESULTS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("TOP_K_RESULTS"));
    }
}
