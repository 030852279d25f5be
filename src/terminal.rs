// src/terminal.rs
//! Interactive terminal session over a [`JobBoard`]

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::board::{
    DetailsView, JobBoard, Notice, PageView, SearchView, DEFAULT_LOCATION, DEFAULT_ROLE,
};

const HELP: &str = "Commands: d <n> details | s <n> save | p pipeline | n new search | q quit";

pub struct TerminalSession<R, W> {
    lines: Lines<R>,
    out: W,
}

enum Step {
    NewSearch,
    Quit,
}

impl<R, W> TerminalSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, board: &JobBoard) -> Result<()> {
        let page = board.render_page().await;
        self.write_header(&page).await?;
        self.write_pipeline(&page).await?;

        loop {
            let Some(role) = self.prompt_with_default("Job Role", DEFAULT_ROLE).await? else {
                break;
            };
            let Some(location) = self.prompt_with_default("Location", DEFAULT_LOCATION).await? else {
                break;
            };

            self.write(&format!("Searching the web for \"{} {}\"...\n", role, location))
                .await?;
            let view = board.search(&role, &location).await;
            self.write_results(&view).await?;

            match self.result_commands(board, &view).await? {
                Step::NewSearch => continue,
                Step::Quit => break,
            }
        }

        self.out.flush().await.context("Failed to flush output")?;
        Ok(())
    }

    async fn result_commands(&mut self, board: &JobBoard, view: &SearchView) -> Result<Step> {
        if view.jobs.is_empty() {
            return Ok(Step::NewSearch);
        }
        self.write(&format!("{}\n", HELP)).await?;

        loop {
            let Some(line) = self.prompt("> ").await? else {
                return Ok(Step::Quit);
            };
            let mut parts = line.split_whitespace();
            let command = parts.next().unwrap_or_default();
            let index = parts.next().and_then(|n| n.parse::<usize>().ok());

            match (command, index) {
                ("q", _) => return Ok(Step::Quit),
                ("n", _) => return Ok(Step::NewSearch),
                ("p", _) => {
                    let page = board.render_page().await;
                    self.write_pipeline(&page).await?;
                }
                ("d", Some(n)) | ("s", Some(n)) => {
                    let Some(card) = n.checked_sub(1).and_then(|i| view.jobs.get(i)) else {
                        self.write(&format!("No result numbered {}\n", n)).await?;
                        continue;
                    };

                    if command == "d" {
                        let details = board.reveal_details(card.job.job_id.as_deref()).await;
                        self.write_details(&details).await?;
                    } else {
                        let saved = board.save(&card.job).await;
                        self.write_notice(&saved.notice).await?;
                    }
                }
                ("", _) => {}
                _ => self.write(&format!("{}\n", HELP)).await?,
            }
        }
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .await
            .context("Failed to write to terminal")
    }

    /// Next input line, `None` at end of input
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.write(label).await?;
        self.out.flush().await.context("Failed to flush output")?;
        let line = self
            .lines
            .next_line()
            .await
            .context("Failed to read input")?;
        Ok(line.map(|line| line.trim().to_string()))
    }

    async fn prompt_with_default(&mut self, label: &str, default: &str) -> Result<Option<String>> {
        let answer = self.prompt(&format!("{} [{}]: ", label, default)).await?;
        Ok(answer.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    async fn write_header(&mut self, page: &PageView) -> Result<()> {
        self.write(&format!(
            "{}\n{}\nFree Credits Left: {}\n\n",
            page.title, page.tagline, page.quota_display
        ))
        .await
    }

    async fn write_notice(&mut self, notice: &Notice) -> Result<()> {
        let label = match notice {
            Notice::Info(_) => "info",
            Notice::Success(_) => "ok",
            Notice::Warning(_) => "warning",
            Notice::Error(_) => "error",
        };
        self.write(&format!("[{}] {}\n", label, notice.message())).await
    }

    async fn write_results(&mut self, view: &SearchView) -> Result<()> {
        if let Some(notice) = &view.notice {
            self.write_notice(notice).await?;
        }
        for (i, card) in view.jobs.iter().enumerate() {
            self.write(&format!(
                "{:>2}. {}\n    Location: {}\n    Posted via: {}\n",
                i + 1,
                card.heading,
                card.location,
                card.source
            ))
            .await?;
        }
        Ok(())
    }

    async fn write_details(&mut self, details: &DetailsView) -> Result<()> {
        if let Some(description) = &details.description {
            self.write(&format!("Description\n{}\nApply Here\n", description))
                .await?;
        }
        for link in &details.apply_links {
            self.write(&format!("  {} <{}>\n", link.title, link.url)).await?;
        }
        if let Some(notice) = &details.notice {
            self.write_notice(notice).await?;
        }
        Ok(())
    }

    async fn write_pipeline(&mut self, page: &PageView) -> Result<()> {
        self.write("My Saved Pipeline\n").await?;
        if let Some(notice) = &page.notice {
            self.write_notice(notice).await?;
        }
        for row in &page.pipeline {
            self.write(&format!(
                "  {} | {} | {} | {}\n",
                row.title, row.company, row.location, row.source
            ))
            .await?;
        }
        self.write("\n").await
    }
}
