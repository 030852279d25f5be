// src/web/handlers/system_handlers.rs

use crate::board::JobBoard;
use crate::core::JobRepository;
use crate::web::types::{DataResponse, HealthData, StandardErrorResponse};

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub async fn health_handler(
    board: &State<JobBoard>,
) -> Result<Json<DataResponse<HealthData>>, (Status, Json<StandardErrorResponse>)> {
    match JobRepository::new(board.database().pool()).count().await {
        Ok(saved_jobs) => Ok(Json(DataResponse::success(
            "OK",
            HealthData {
                status: "ok",
                saved_jobs,
            },
        ))),
        Err(e) => {
            error!("Health check failed: {:#}", e);
            Err((
                Status::ServiceUnavailable,
                Json(StandardErrorResponse::new(
                    "Database unavailable",
                    "DATABASE_ERROR",
                    &["Check that the database file is readable"],
                )),
            ))
        }
    }
}
