use jobmatch_core::MatchError;
use jobmatch_sources::{load_dataset, load_postings, DataSource, Settings};
use std::fs;
use tempfile::tempdir;

const JSONL: &str = r#"{"job_id": 1, "job_title": "Data Analyst", "company": "Acme", "location": "NYC", "description": "SQL dashboards", "skills": "SQL; Excel"}

{"job_id": "b2", "job_title": "ML Engineer", "company": null, "location": "Remote", "description": "Train models", "skills": "Python, PyTorch"}
"#;

#[test]
fn loads_jsonl_records_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.jsonl");
    fs::write(&path, JSONL).unwrap();

    let postings = load_dataset(&path).unwrap();
    assert_eq!(postings.len(), 2);
    assert_eq!(postings[0].id, "1");
    assert_eq!(postings[1].id, "b2");
    assert_eq!(postings[1].company, "");
    assert_eq!(postings[1].skill_list(), vec!["Python", "PyTorch"]);
}

#[test]
fn loads_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    fs::write(
        &path,
        r#"[{"job_id": "x", "job_title": "Chef", "company": "Bistro", "location": "Paris", "description": "Cook", "skills": "Baking"}]"#,
    )
    .unwrap();
    let postings = load_dataset(&path).unwrap();
    assert_eq!(postings[0].title, "Chef");
}

#[test]
fn missing_fields_are_a_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.jsonl");
    fs::write(&path, r#"{"job_id": "1", "job_title": "Chef", "description": "Cook"}"#).unwrap();
    match load_dataset(&path).unwrap_err() {
        MatchError::Config(msg) => assert!(msg.contains(r#"["company", "location", "skills"]"#), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn absent_file_is_a_data_error() {
    let dir = tempdir().unwrap();
    let err = load_dataset(&dir.path().join("nope.jsonl")).unwrap_err();
    assert!(matches!(err, MatchError::Data(ref m) if m.contains("JOB_DATASET_PATH")));
}

#[tokio::test]
async fn settings_select_the_dataset_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.jsonl");
    fs::write(&path, JSONL).unwrap();
    let settings = Settings { data_source: DataSource::Dataset, dataset_path: path, ..Settings::default() };
    let rec = jobmatch_sources::load_recommender(&settings).await.unwrap();
    assert_eq!(rec.postings().len(), 2);
    assert_eq!(load_postings(&settings).await.unwrap().len(), 2);
}

const CSV: &str = "job_id,job_title,company,location,description,skills,salary
7,Data Scientist,Acme,\"New York, NY\",Model churn,\"Python; Machine Learning, Statistics\",100k
8,Chef,,Paris,Bake bread,Baking,
";

#[test]
fn loads_csv_with_quoted_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs_sample.csv");
    fs::write(&path, CSV).unwrap();

    let postings = load_dataset(&path).unwrap();
    assert_eq!(postings.len(), 2);
    assert_eq!(postings[0].id, "7");
    assert_eq!(postings[0].location, "New York, NY");
    assert_eq!(postings[0].skill_list(), vec!["Python", "Machine Learning", "Statistics"]);
    assert_eq!(postings[1].company, "");
}

#[test]
fn csv_missing_columns_are_a_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    fs::write(&path, "job_title,job_id,description\nChef,1,Cook\n").unwrap();
    match load_dataset(&path).unwrap_err() {
        MatchError::Config(msg) => assert!(msg.contains(r#"["company", "location", "skills"]"#), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn csv_source_name_loads_the_dataset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    fs::write(&path, CSV).unwrap();
    let path_str = path.to_string_lossy().to_string();
    let settings = Settings::from_lookup(|key| match key {
        "JOB_DATA_SOURCE" => Some("csv".to_string()),
        "JOB_DATASET_PATH" => Some(path_str.clone()),
        _ => None,
    })
    .unwrap();
    assert_eq!(settings.data_source, DataSource::Dataset);
    assert_eq!(load_postings(&settings).await.unwrap().len(), 2);
}
