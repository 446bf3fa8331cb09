pub mod adzuna;
pub mod dataset;
pub mod resume;
pub mod settings;

pub use adzuna::fetch_adzuna_jobs;
pub use dataset::load_dataset;
pub use resume::load_resume_text;
pub use settings::{AdzunaSettings, DataSource, Settings};

use jobmatch_core::{Posting, Recommender, Result};

/// Load postings from whichever source the settings select.
pub async fn load_postings(settings: &Settings) -> Result<Vec<Posting>> {
    match settings.data_source {
        DataSource::Dataset => load_dataset(&settings.dataset_path),
        DataSource::Adzuna => fetch_adzuna_jobs(&settings.adzuna).await,
    }
}

/// Load postings and fit a fresh engine over them.
pub async fn load_recommender(settings: &Settings) -> Result<Recommender> {
    let postings = load_postings(settings).await?;
    Ok(Recommender::new(postings, settings.recommender))
}
