// src/web/handlers/board_handlers.rs

use crate::board::{DetailsView, JobBoard, PageView, PipelineRow, SaveView, SearchView};
use crate::board::{DEFAULT_LOCATION, DEFAULT_ROLE};
use crate::job_search::JobSummary;
use crate::web::types::{DataResponse, QuotaData, SearchRequest, StandardErrorResponse};

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn page_handler(board: &State<JobBoard>) -> Json<DataResponse<PageView>> {
    let page = board.render_page().await;
    Json(DataResponse::success("Page rendered", page))
}

pub async fn quota_handler(board: &State<JobBoard>) -> Json<DataResponse<QuotaData>> {
    let quota = board.quota().await;
    Json(DataResponse::success(
        "Quota checked",
        QuotaData {
            quota,
            display: quota.to_string(),
        },
    ))
}

pub async fn search_handler(
    request: Json<SearchRequest>,
    board: &State<JobBoard>,
) -> Json<DataResponse<SearchView>> {
    let request = request.into_inner();
    let role = request.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());
    let location = request.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    info!("Search requested: role={} location={}", role, location);
    let view = board.search(&role, &location).await;
    let message = format!("{} jobs found", view.jobs.len());

    Json(DataResponse::success(message, view))
}

pub async fn details_handler(job_id: &str, board: &State<JobBoard>) -> Json<DataResponse<DetailsView>> {
    let view = board.reveal_details(Some(job_id)).await;
    Json(DataResponse::success("Details fetched", view))
}

pub async fn save_handler(
    job: Json<JobSummary>,
    board: &State<JobBoard>,
) -> Json<DataResponse<SaveView>> {
    let view = board.save(&job).await;
    let message = view.notice.message().to_string();
    Json(DataResponse::success(message, view))
}

pub async fn pipeline_handler(
    board: &State<JobBoard>,
) -> Result<Json<DataResponse<Vec<PipelineRow>>>, (Status, Json<StandardErrorResponse>)> {
    match board.pipeline().await {
        Ok(entries) => {
            let rows: Vec<PipelineRow> = entries.into_iter().map(PipelineRow::from).collect();
            let message = format!("{} saved jobs", rows.len());
            Ok(Json(DataResponse::success(message, rows)))
        }
        Err(e) => {
            error!("Failed to read pipeline: {:#}", e);
            Err((
                Status::InternalServerError,
                Json(StandardErrorResponse::new(
                    "Failed to read saved jobs",
                    "DATABASE_ERROR",
                    &["Try again in a few moments"],
                )),
            ))
        }
    }
}
