mod analysis;
mod api;
mod locations;
mod model;
mod output;
mod reviews;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::analysis::aggregate::{self, DateWindow, PageFetcher, ScanMode};
use crate::analysis::arrangement;
use crate::analysis::skills::Vocabulary;
use crate::api::JobsClient;
use crate::model::Job;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "itjobs", about = "ITJobs.pt listings from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the N most recent listings
    Top {
        /// How many listings to fetch
        n: u32,
        /// Write the listings to a CSV file instead of printing JSON
        #[arg(long, value_name = "FILE")]
        export_csv: Option<PathBuf>,
    },
    /// Search part-time listings for a company within one district
    Search {
        /// District name (e.g. "lisboa", "viana do castelo")
        district: String,
        /// Company name to search for
        company: String,
        /// How many listings to fetch
        n: u32,
        /// Write the listings to a CSV file instead of printing JSON
        #[arg(long, value_name = "FILE")]
        export_csv: Option<PathBuf>,
    },
    /// Work arrangement (remote/hybrid/on-site) of one listing
    Type {
        /// Listing id
        job_id: u64,
    },
    /// Rank skill mentions across listings published in a date window
    Skills {
        /// Window start, YYYY-MM-DD
        start: NaiveDate,
        /// Window end (inclusive), YYYY-MM-DD
        end: NaiveDate,
        /// Walk every page instead of stopping at the window start
        #[arg(long)]
        full_scan: bool,
    },
    /// Community reviews for a company
    Reviews {
        /// Company name
        company: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let result = match cli.command {
        Commands::Top { n, export_csv } => {
            let client = JobsClient::new(&settings)?;
            let jobs = client.list_top(n)?;
            present_jobs(&jobs, export_csv.as_deref())
        }
        Commands::Search {
            district,
            company,
            n,
            export_csv,
        } => {
            let Some(district_id) = locations::district_id(&district) else {
                anyhow::bail!("unknown district {district:?}");
            };
            let client = JobsClient::new(&settings)?;
            let jobs = client.search_part_time(&company, district_id, n)?;
            present_jobs(&jobs, export_csv.as_deref())
        }
        Commands::Type { job_id } => {
            let client = JobsClient::new(&settings)?;
            let job = client.get_job(job_id)?;
            let arrangement = arrangement::classify(
                job.title(),
                job.body(),
                &job.location_names(),
                job.allow_remote(),
            );
            println!("{arrangement}");
            Ok(())
        }
        Commands::Skills {
            start,
            end,
            full_scan,
        } => {
            let window = DateWindow::new(start, end)?;
            let client = JobsClient::new(&settings)?;
            let mode = if full_scan {
                ScanMode::FullScan
            } else {
                ScanMode::EarlyStop
            };
            run_skill_scan(&client, &window, mode, start, end)
        }
        Commands::Reviews { company } => {
            let company_reviews = reviews::fetch_company_reviews(&company, settings.timeout_secs)?;
            output::print_json(&company_reviews)
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn present_jobs(jobs: &[Job], export: Option<&Path>) -> anyhow::Result<()> {
    if jobs.is_empty() {
        println!("No jobs found for the given criteria.");
        return Ok(());
    }
    match export {
        Some(path) => output::export_csv(path, jobs),
        None => output::print_json(&jobs),
    }
}

struct SpinnerFetcher<'a> {
    client: &'a JobsClient,
    spinner: indicatif::ProgressBar,
}

impl PageFetcher for SpinnerFetcher<'_> {
    fn fetch_page(&mut self, page: u32, limit: u32) -> anyhow::Result<Vec<Job>> {
        self.spinner.set_message(format!("page {page}"));
        self.spinner.tick();
        Ok(self.client.list_page(page, limit)?)
    }
}

fn run_skill_scan(
    client: &JobsClient,
    window: &DateWindow,
    mode: ScanMode,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} scanning {msg}")
            .unwrap(),
    );

    let vocabulary = Vocabulary::standard();
    let mut fetcher = SpinnerFetcher { client, spinner };
    let tally = aggregate::scan_window(&mut fetcher, &vocabulary, window, mode)?;
    fetcher.spinner.finish_and_clear();

    println!("Analyzed {} jobs between {} and {}.", tally.matched, start, end);
    output::print_json(&vocabulary.rank(&tally.totals))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn skills_dates_must_be_iso() {
        assert!(Cli::try_parse_from(["itjobs", "skills", "2024-03-01", "2024-03-31"]).is_ok());
        assert!(Cli::try_parse_from(["itjobs", "skills", "01-03-2024", "2024-03-31"]).is_err());
    }
}
