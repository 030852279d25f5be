// src/cli.rs
use crate::board::{JobBoard, PipelineRow, DEFAULT_LOCATION, DEFAULT_ROLE};
use crate::core::{AppConfig, FsOps};
use crate::terminal::TerminalSession;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Search Google Jobs and keep a local pipeline of saved roles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file (defaults to ./jobscout.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the configured path
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the browser page and JSON API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Interactive search session in the terminal
    Browse,
    /// Run one search and print the results
    Search {
        #[arg(default_value = DEFAULT_ROLE)]
        role: String,
        #[arg(default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// Show description and apply links for a job id
    Details { job_id: String },
    /// List saved jobs, optionally exporting them as CSV
    Pipeline {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show remaining searches on the SerpApi plan
    Quota,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config = config.with_database_path(database);
    }
    if let Command::Serve { port: Some(port) } = &cli.command {
        config = config.with_port(*port);
    }

    let board = JobBoard::open(&config).await?;

    if let Command::Serve { .. } = cli.command {
        // The server owns the board and closes the store on shutdown
        return start_web_server(board, &config.server).await;
    }

    let result = run_local_command(&board, cli.command).await;
    board.shutdown().await;
    result
}

async fn run_local_command(board: &JobBoard, command: Command) -> Result<()> {
    match command {
        Command::Serve { .. } => anyhow::bail!("serve runs the web server, not a local session"),

        Command::Browse => {
            let input = BufReader::new(tokio::io::stdin());
            let mut session = TerminalSession::new(input, tokio::io::stdout());
            session.run(board).await?;
        }

        Command::Search { role, location } => {
            let view = board.search(&role, &location).await;
            if let Some(notice) = &view.notice {
                println!("{}", notice.message());
            }
            for (i, card) in view.jobs.iter().enumerate() {
                println!("{:>2}. {}", i + 1, card.heading);
                println!("    Location:   {}", card.location);
                println!("    Posted via: {}", card.source);
                if let Some(id) = &card.job.job_id {
                    println!("    Job id:     {}", id);
                }
            }
        }

        Command::Details { job_id } => {
            let view = board.reveal_details(Some(job_id.as_str())).await;
            if let Some(description) = &view.description {
                println!("Description\n{}\n", description);
                println!("Apply Here");
            }
            for link in &view.apply_links {
                println!("  {} <{}>", link.title, link.url);
            }
            if let Some(notice) = &view.notice {
                println!("{}", notice.message());
            }
        }

        Command::Pipeline { csv } => {
            let rows: Vec<PipelineRow> = board
                .pipeline()
                .await?
                .into_iter()
                .map(PipelineRow::from)
                .collect();

            match csv {
                Some(path) => export_pipeline(&rows, &path).await?,
                None if rows.is_empty() => println!("Search and save jobs to see them here."),
                None => {
                    println!("{:<40} {:<25} {:<25} {:<20}", "title", "company", "location", "source");
                    println!("{}", "-".repeat(113));
                    for row in rows {
                        println!(
                            "{:<40} {:<25} {:<25} {:<20}",
                            row.title, row.company, row.location, row.source
                        );
                    }
                }
            }
        }

        Command::Quota => {
            println!("Free Credits Left: {}", board.quota().await);
        }
    }

    Ok(())
}

pub fn pipeline_csv(rows: &[PipelineRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["title", "company", "location", "source"])?;
    }
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV export: {}", e))
}

async fn export_pipeline(rows: &[PipelineRow], path: &Path) -> Result<()> {
    let data = pipeline_csv(rows)?;
    FsOps::write_file_safe(path, &data).await?;
    info!("Exported {} saved jobs to {}", rows.len(), path.display());
    println!("Exported {} saved jobs to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str) -> PipelineRow {
        PipelineRow {
            title: title.to_string(),
            company: "Acme, Inc.".to_string(),
            location: "Remote".to_string(),
            source: "LinkedIn".to_string(),
        }
    }

    #[test]
    fn test_csv_has_header_and_quotes_commas() {
        let data = pipeline_csv(&[row("Analyst"), row("Engineer")]).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "title,company,location,source");
        assert_eq!(lines[1], "Analyst,\"Acme, Inc.\",Remote,LinkedIn");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_empty_pipeline_still_has_header() {
        let text = String::from_utf8(pipeline_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "title,company,location,source\n");
    }

    #[test]
    fn test_cli_parses_search_defaults() {
        let cli = Cli::try_parse_from(["jobscout", "search"]).unwrap();
        match cli.command {
            Command::Search { role, location } => {
                assert_eq!(role, "Data Analyst");
                assert_eq!(location, "Remote");
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_cli_global_database_flag() {
        let cli = Cli::try_parse_from(["jobscout", "pipeline", "--database", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
    }
}
