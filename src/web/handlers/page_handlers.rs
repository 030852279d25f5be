// src/web/handlers/page_handlers.rs

use crate::board::{JobBoard, DEFAULT_LOCATION, DEFAULT_ROLE};
use crate::job_search::JobSummary;
use crate::web::page::{render_details_html, render_page_html};
use crate::web::types::SaveForm;

use rocket::form::Form;
use rocket::response::content::RawHtml;
use rocket::State;

pub async fn index_handler(
    role: Option<String>,
    location: Option<String>,
    board: &State<JobBoard>,
) -> RawHtml<String> {
    let search = if role.is_some() || location.is_some() {
        let role = role.unwrap_or_else(|| DEFAULT_ROLE.to_string());
        let location = location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        Some(board.search(&role, &location).await)
    } else {
        None
    };

    // The pipeline is re-read on every render
    let page = board.render_page().await;
    RawHtml(render_page_html(&page, search.as_ref(), None))
}

pub async fn details_page_handler(job_id: &str, board: &State<JobBoard>) -> RawHtml<String> {
    let view = board.reveal_details(Some(job_id)).await;
    RawHtml(render_details_html(&view))
}

pub async fn save_page_handler(form: Form<SaveForm>, board: &State<JobBoard>) -> RawHtml<String> {
    let job: JobSummary = form.into_inner().into();
    let view = board.save(&job).await;
    let page = board.render_page().await;
    RawHtml(render_page_html(&page, None, Some(&view.notice)))
}
