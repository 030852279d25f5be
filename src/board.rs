// src/board.rs
//! Interaction controller shared by the web and terminal surfaces.
//!
//! Every action returns a renderable view. Failures end up as a [`Notice`]
//! on that view and never escape the action that caused them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::core::{AppConfig, Database, JobRepository, PipelineEntry, SaveOutcome, SavedJob};
use crate::job_search::{
    or_placeholder, JobSummary, Quota, SearchClient, COMPANY_PLACEHOLDER, LOCATION_PLACEHOLDER,
    SOURCE_PLACEHOLDER, TITLE_PLACEHOLDER,
};

pub const PAGE_TITLE: &str = "Universal Job Scraper";
pub const PAGE_TAGLINE: &str = "Fetching the latest 10 roles across LinkedIn, Indeed, and more.";
pub const DEFAULT_ROLE: &str = "Data Analyst";
pub const DEFAULT_LOCATION: &str = "Remote";

pub const NO_JOBS_FOUND: &str = "No jobs found. Try a different role.";
pub const NO_APPLY_LINKS: &str = "No direct apply links found.";
pub const SAVED: &str = "Saved to database!";
pub const ALREADY_SAVED: &str = "Already saved!";
pub const EMPTY_PIPELINE: &str = "Search and save jobs to see them here.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Success(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCard {
    pub heading: String,
    pub location: String,
    pub source: String,
    /// Raw summary, sent back unchanged to save the job
    pub job: JobSummary,
}

impl From<JobSummary> for JobCard {
    fn from(job: JobSummary) -> Self {
        Self {
            heading: format!("{} - {}", job.title_or_placeholder(), job.company_or_placeholder()),
            location: job.location_or_placeholder().to_string(),
            source: job.source_or_placeholder().to_string(),
            job,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchView {
    pub role: String,
    pub location: String,
    pub jobs: Vec<JobCard>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsView {
    pub job_id: Option<String>,
    pub description: Option<String>,
    pub apply_links: Vec<ApplyLink>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveView {
    pub job_id: Option<String>,
    pub outcome: Option<SaveOutcome>,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRow {
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: String,
}

impl From<PipelineEntry> for PipelineRow {
    fn from(entry: PipelineEntry) -> Self {
        Self {
            title: or_placeholder(&entry.title, TITLE_PLACEHOLDER).to_string(),
            company: or_placeholder(&entry.company, COMPANY_PLACEHOLDER).to_string(),
            location: or_placeholder(&entry.location, LOCATION_PLACEHOLDER).to_string(),
            source: or_placeholder(&entry.source, SOURCE_PLACEHOLDER).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub title: String,
    pub tagline: String,
    pub quota: Quota,
    pub quota_display: String,
    pub default_role: String,
    pub default_location: String,
    pub pipeline: Vec<PipelineRow>,
    pub notice: Option<Notice>,
}

pub struct JobBoard {
    client: SearchClient,
    database: Database,
}

impl JobBoard {
    pub fn new(client: SearchClient, database: Database) -> Self {
        Self { client, database }
    }

    /// Build the search client and open the store described by `config`
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let client = SearchClient::new(&config.search)?;
        let database = Database::new(&config.database_path).await?;
        Ok(Self::new(client, database))
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn repository(&self) -> JobRepository<'_> {
        JobRepository::new(self.database.pool())
    }

    pub async fn quota(&self) -> Quota {
        self.client.check_quota().await
    }

    pub async fn search(&self, role: &str, location: &str) -> SearchView {
        let (jobs, notice) = match self.client.search_jobs(role, location).await {
            Ok(results) => match results.error {
                Some(message) => (Vec::new(), Some(Notice::Error(format!("Error: {}", message)))),
                None if results.jobs.is_empty() => {
                    (Vec::new(), Some(Notice::Warning(NO_JOBS_FOUND.to_string())))
                }
                None => (results.jobs.into_iter().map(JobCard::from).collect(), None),
            },
            Err(e) => {
                error!("Job search failed: {:#}", e);
                (Vec::new(), Some(Notice::Error(format!("Error: {}", e))))
            }
        };

        SearchView {
            role: role.to_string(),
            location: location.to_string(),
            jobs,
            notice,
        }
    }

    pub async fn reveal_details(&self, job_id: Option<&str>) -> DetailsView {
        let job_id_owned = job_id.map(str::to_string);

        let detail = match self.client.fetch_details(job_id).await {
            Ok(detail) => detail,
            Err(e) => {
                error!("Fetching details failed: {:#}", e);
                return DetailsView {
                    job_id: job_id_owned,
                    description: None,
                    apply_links: Vec::new(),
                    notice: Some(Notice::Error(format!("Error: {}", e))),
                };
            }
        };

        let apply_links: Vec<ApplyLink> = detail
            .apply_options
            .iter()
            .map(|option| ApplyLink {
                title: or_placeholder(&option.title, "Apply").to_string(),
                url: or_placeholder(&option.link, "#").to_string(),
            })
            .collect();

        let notice = apply_links
            .is_empty()
            .then(|| Notice::Info(NO_APPLY_LINKS.to_string()));

        DetailsView {
            job_id: job_id_owned,
            description: Some(detail.description_or_placeholder().to_string()),
            apply_links,
            notice,
        }
    }

    pub async fn save(&self, job: &JobSummary) -> SaveView {
        let job_id = job.job_id.clone();

        let saved = match SavedJob::from_summary(job) {
            Ok(saved) => saved,
            Err(e) => {
                return SaveView {
                    job_id,
                    outcome: None,
                    notice: Notice::Error(format!("Error: {}", e)),
                }
            }
        };

        match self.repository().save_job(&saved).await {
            Ok(outcome) => {
                let notice = match outcome {
                    SaveOutcome::Saved => Notice::Success(SAVED.to_string()),
                    SaveOutcome::AlreadySaved => Notice::Info(ALREADY_SAVED.to_string()),
                };
                SaveView {
                    job_id,
                    outcome: Some(outcome),
                    notice,
                }
            }
            Err(e) => {
                error!("Saving job failed: {:#}", e);
                SaveView {
                    job_id,
                    outcome: None,
                    notice: Notice::Error(format!("Error: {}", e)),
                }
            }
        }
    }

    pub async fn pipeline(&self) -> Result<Vec<PipelineEntry>> {
        self.repository().list_saved().await
    }

    /// Quota and the full pipeline, both re-read on every call
    pub async fn render_page(&self) -> PageView {
        let quota = self.quota().await;

        let (pipeline, notice) = match self.pipeline().await {
            Ok(entries) if entries.is_empty() => {
                (Vec::new(), Some(Notice::Info(EMPTY_PIPELINE.to_string())))
            }
            Ok(entries) => (entries.into_iter().map(PipelineRow::from).collect(), None),
            Err(e) => {
                error!("Reading pipeline failed: {:#}", e);
                (Vec::new(), Some(Notice::Error(format!("Error: {}", e))))
            }
        };

        PageView {
            title: PAGE_TITLE.to_string(),
            tagline: PAGE_TAGLINE.to_string(),
            quota,
            quota_display: quota.to_string(),
            default_role: DEFAULT_ROLE.to_string(),
            default_location: DEFAULT_LOCATION.to_string(),
            pipeline,
            notice,
        }
    }

    pub async fn shutdown(&self) {
        info!("Shutting down job board");
        self.database.close().await;
    }
}
