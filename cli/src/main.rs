use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use jobmatch_core::Recommendation;
use jobmatch_sources::{load_recommender, load_resume_text, Settings};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jobmatch")]
#[command(about = "Match a resume against job postings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank job postings for a resume
    Recommend(RecommendArgs),
    /// List the postings the configured source provides
    Jobs,
}

#[derive(Args)]
struct RecommendArgs {
    /// Path to a resume text or PDF file
    #[arg(long, conflicts_with = "resume_text")]
    resume_file: Option<PathBuf>,
    /// Raw resume text to evaluate
    #[arg(long)]
    resume_text: Option<String>,
    /// Number of recommendations to return
    #[arg(long)]
    top_k: Option<usize>,
    /// Similarity floor applied once top-k results are collected
    #[arg(long)]
    min_similarity: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Commands::Recommend(args) => recommend(&settings, args).await,
        Commands::Jobs => list_jobs(&settings).await,
    }
}

async fn recommend(settings: &Settings, args: RecommendArgs) -> Result<()> {
    let resume_text = match (&args.resume_file, args.resume_text) {
        (Some(path), _) => {
            if !path.exists() {
                bail!("Resume file not found: {}", path.display());
            }
            let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let name = path.file_name().and_then(|n| n.to_str());
            load_resume_text(&bytes, name)?
        }
        (None, Some(text)) => text,
        (None, None) => bail!("Provide --resume-file or --resume-text."),
    };

    let recommender = load_recommender(settings).await?;
    let recommendations = recommender.recommend(&resume_text, args.top_k, args.min_similarity)?;
    tracing::info!(returned = recommendations.len(), "recommendations ready");

    if recommendations.is_empty() {
        println!("No matching jobs found.");
        return Ok(());
    }
    for (idx, rec) in recommendations.iter().enumerate() {
        print_recommendation(idx + 1, rec);
    }
    Ok(())
}

fn print_recommendation(rank: usize, rec: &Recommendation<'_>) {
    let job = rec.posting;
    println!("{rank}. {} @ {} ({}) - similarity {:.3}", job.title, job.company, job.location, rec.similarity);
    if !rec.matched_skills.is_empty() {
        println!("   matched skills: {}", rec.matched_skills.join(", "));
    }
    if !rec.missing_skills.is_empty() {
        println!("   potential gaps: {}", rec.missing_skills.join(", "));
    }
    println!();
}

async fn list_jobs(settings: &Settings) -> Result<()> {
    let postings = jobmatch_sources::load_postings(settings).await?;
    for p in &postings {
        println!("{}\t{} @ {} ({})", p.id, p.title, p.company, p.location);
    }
    tracing::info!(count = postings.len(), "listed postings");
    Ok(())
}
