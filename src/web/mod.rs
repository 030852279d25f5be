// src/web/mod.rs

pub mod handlers;
pub mod page;
pub mod types;

pub use types::*;

use crate::board::{DetailsView, JobBoard, PageView, PipelineRow, SaveView, SearchView};
use crate::core::config_manager::ServerConfig;
use crate::job_search::JobSummary;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// JSON API

#[get("/page")]
pub async fn page_view(board: &State<JobBoard>) -> Json<DataResponse<PageView>> {
    handlers::page_handler(board).await
}

#[get("/quota")]
pub async fn quota(board: &State<JobBoard>) -> Json<DataResponse<QuotaData>> {
    handlers::quota_handler(board).await
}

#[post("/search", data = "<request>")]
pub async fn search(
    request: Json<SearchRequest>,
    board: &State<JobBoard>,
) -> Json<DataResponse<SearchView>> {
    handlers::search_handler(request, board).await
}

#[get("/jobs/<job_id>/details")]
pub async fn job_details(job_id: &str, board: &State<JobBoard>) -> Json<DataResponse<DetailsView>> {
    handlers::details_handler(job_id, board).await
}

#[post("/pipeline", data = "<job>")]
pub async fn save_job(job: Json<JobSummary>, board: &State<JobBoard>) -> Json<DataResponse<SaveView>> {
    handlers::save_handler(job, board).await
}

#[get("/pipeline")]
pub async fn pipeline(
    board: &State<JobBoard>,
) -> Result<Json<DataResponse<Vec<PipelineRow>>>, (Status, Json<StandardErrorResponse>)> {
    handlers::pipeline_handler(board).await
}

#[get("/health")]
pub async fn health(
    board: &State<JobBoard>,
) -> Result<Json<DataResponse<HealthData>>, (Status, Json<StandardErrorResponse>)> {
    handlers::health_handler(board).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// HTML pages

#[get("/?<role>&<location>")]
pub async fn index(
    role: Option<String>,
    location: Option<String>,
    board: &State<JobBoard>,
) -> RawHtml<String> {
    handlers::index_handler(role, location, board).await
}

#[get("/details/<job_id>")]
pub async fn details_page(job_id: &str, board: &State<JobBoard>) -> RawHtml<String> {
    handlers::details_page_handler(job_id, board).await
}

#[post("/save", data = "<form>")]
pub async fn save_page(form: Form<SaveForm>, board: &State<JobBoard>) -> RawHtml<String> {
    handlers::save_page_handler(form, board).await
}

// Error catchers

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request JSON format",
            "Verify all required fields are present",
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found",
        "NOT_FOUND",
        &["Check the request path"],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be understood",
        "UNPROCESSABLE_ENTITY",
        &["Send a JSON object with the documented fields"],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        &[
            "Try again in a few moments",
            "Check the server log for details",
        ],
    ))
}

/// Assemble the application around an already-opened board
pub fn build_rocket(board: JobBoard, server: &ServerConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", server.address.clone()))
        .merge(("port", server.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(board)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![page_view, quota, search, job_details, save_job, pipeline, health, options],
        )
        .mount("/", routes![index, details_page, save_page])
}

pub async fn start_web_server(board: JobBoard, server: &ServerConfig) -> Result<()> {
    info!("Starting job board on http://{}:{}", server.address, server.port);

    let rocket = build_rocket(board, server)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    // Launch returns after graceful shutdown; release the store
    if let Some(board) = rocket.state::<JobBoard>() {
        board.shutdown().await;
    }

    Ok(())
}
