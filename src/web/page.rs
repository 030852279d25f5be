// src/web/page.rs
//! Server-rendered HTML for the browser surface

use rocket::http::RawStr;
use rocket::uri;
use std::fmt::Write;

use crate::board::{DetailsView, JobCard, Notice, PageView, SearchView, EMPTY_PIPELINE};

fn escape(text: &str) -> String {
    RawStr::new(text).html_escape().into_owned()
}

fn notice_html(notice: &Notice) -> String {
    let class = match notice {
        Notice::Info(_) => "info",
        Notice::Success(_) => "success",
        Notice::Warning(_) => "warning",
        Notice::Error(_) => "error",
    };
    format!(
        "<p class=\"notice {}\">{}</p>\n",
        class,
        escape(notice.message())
    )
}

fn hidden_field(html: &mut String, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        let _ = writeln!(
            html,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            name,
            escape(value)
        );
    }
}

fn job_card_html(html: &mut String, card: &JobCard) {
    let job = &card.job;
    let _ = writeln!(html, "<details class=\"job\"><summary>{}</summary>", escape(&card.heading));
    let _ = writeln!(html, "<p><strong>Location:</strong> {}</p>", escape(&card.location));
    let _ = writeln!(html, "<p><strong>Posted via:</strong> {}</p>", escape(&card.source));

    if let Some(id) = job.job_id.as_deref() {
        let _ = writeln!(
            html,
            "<p><a href=\"{}\">Reveal Apply Links &amp; Description</a></p>",
            uri!(crate::web::details_page(job_id = id))
        );
    }

    html.push_str("<form method=\"post\" action=\"/save\">\n");
    hidden_field(html, "job_id", &job.job_id);
    hidden_field(html, "title", &job.title);
    hidden_field(html, "company", &job.company);
    hidden_field(html, "location", &job.location);
    hidden_field(html, "source", &job.source);
    html.push_str("<button type=\"submit\">Save to My Pipeline</button>\n</form>\n</details>\n");
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn render_page_html(page: &PageView, search: Option<&SearchView>, flash: Option<&Notice>) -> String {
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<aside><h2>API Status</h2><p>Free Credits Left: <strong>{}</strong></p></aside>",
        escape(&page.quota_display)
    );
    let _ = writeln!(body, "<h1>{}</h1>\n<p>{}</p>", escape(&page.title), escape(&page.tagline));

    if let Some(flash) = flash {
        body.push_str(&notice_html(flash));
    }

    let (role, location) = match search {
        Some(search) => (search.role.as_str(), search.location.as_str()),
        None => (page.default_role.as_str(), page.default_location.as_str()),
    };
    let _ = writeln!(
        body,
        "<form method=\"get\" action=\"/\">\n<label>Job Role <input name=\"role\" value=\"{}\"></label>\n<label>Location <input name=\"location\" value=\"{}\"></label>\n<button type=\"submit\">Search Top 10 Jobs</button>\n</form>",
        escape(role),
        escape(location)
    );

    if let Some(search) = search {
        if let Some(notice) = &search.notice {
            body.push_str(&notice_html(notice));
        }
        for card in &search.jobs {
            job_card_html(&mut body, card);
        }
    }

    body.push_str("<hr>\n<h2>My Saved Pipeline</h2>\n");
    if page.pipeline.is_empty() {
        let _ = writeln!(body, "<p>{}</p>", EMPTY_PIPELINE);
    } else {
        body.push_str("<table>\n<tr><th>title</th><th>company</th><th>location</th><th>source</th></tr>\n");
        for row in &page.pipeline {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&row.title),
                escape(&row.company),
                escape(&row.location),
                escape(&row.source)
            );
        }
        body.push_str("</table>\n");
    }

    layout(&page.title, &body)
}

pub fn render_details_html(view: &DetailsView) -> String {
    let mut body = String::new();

    if let Some(description) = &view.description {
        let _ = writeln!(body, "<h3>Description</h3>\n<p>{}</p>", escape(description));
        body.push_str("<h3>Apply Here</h3>\n");
    }

    if !view.apply_links.is_empty() {
        body.push_str("<ul>\n");
        for link in &view.apply_links {
            let _ = writeln!(
                body,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&link.url),
                escape(&link.title)
            );
        }
        body.push_str("</ul>\n");
    }

    if let Some(notice) = &view.notice {
        body.push_str(&notice_html(notice));
    }
    body.push_str("<p><a href=\"/\">Back</a></p>\n");

    layout("Job details", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ApplyLink, PipelineRow};
    use crate::job_search::{JobSummary, Quota};

    fn page(pipeline: Vec<PipelineRow>) -> PageView {
        PageView {
            title: "Universal Job Scraper".to_string(),
            tagline: "tagline".to_string(),
            quota: Quota::Unavailable,
            quota_display: "N/A".to_string(),
            default_role: "Data Analyst".to_string(),
            default_location: "Remote".to_string(),
            pipeline,
            notice: None,
        }
    }

    #[test]
    fn test_empty_pipeline_message() {
        let html = render_page_html(&page(Vec::new()), None, None);
        assert!(html.contains(EMPTY_PIPELINE));
        assert!(html.contains("value=\"Data Analyst\""));
        // html_escape also encodes `/`
        assert!(html.contains("<strong>N&#x2F;A</strong>"));
    }

    #[test]
    fn test_results_are_escaped() {
        let search = SearchView {
            role: "Dev".to_string(),
            location: "Remote".to_string(),
            jobs: vec![JobCard::from(JobSummary {
                job_id: Some("a/b=".to_string()),
                title: Some("<script>".to_string()),
                ..JobSummary::default()
            })],
            notice: None,
        };

        let html = render_page_html(&page(Vec::new()), Some(&search), None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Reveal Apply Links"));
    }

    #[test]
    fn test_details_without_links_shows_notice() {
        let view = DetailsView {
            job_id: Some("j1".to_string()),
            description: Some("Plain text".to_string()),
            apply_links: Vec::new(),
            notice: Some(Notice::Info("No direct apply links found.".to_string())),
        };
        let html = render_details_html(&view);
        assert!(html.contains("Plain text"));
        assert!(html.contains("No direct apply links found."));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_details_lists_links() {
        let view = DetailsView {
            job_id: Some("j1".to_string()),
            description: Some("Text".to_string()),
            apply_links: vec![ApplyLink {
                title: "Indeed".to_string(),
                url: "https://indeed.example/1".to_string(),
            }],
            notice: None,
        };
        let html = render_details_html(&view);
        assert!(html.contains("<a href=\"https:&#x2F;&#x2F;indeed.example&#x2F;1\">Indeed</a>"));
    }
}
