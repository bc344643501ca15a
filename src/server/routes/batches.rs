//! Batch submission and polling endpoints

use crate::core::batch::SubmitBatchRequest;
use crate::server::routes::{ApiResponse, errors};
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{error, info};

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/batches")
            .route("", web::post().to(submit_batch))
            .route("", web::get().to(list_batches))
            .route("/{batch_id}", web::get().to(get_batch)),
    );
}

/// Submit a batch for processing
///
/// Runs the batch to completion and returns the aggregate result. The
/// response is always batch-result shaped once a batch exists — an
/// unknown batch type comes back as `status = failed` with a top-level
/// `error`, not as a transport error. Only a missing `batchType` is
/// rejected before a batch is created.
pub async fn submit_batch(
    state: web::Data<AppState>,
    request: web::Json<SubmitBatchRequest>,
) -> ActixResult<HttpResponse> {
    if request.batch_type.trim().is_empty() {
        return Ok(errors::validation_error("batchType is required"));
    }

    info!(batch_type = %request.batch_type, "batch submission received");

    let job = state.coordinator.submit_batch(request.into_inner()).await;
    Ok(HttpResponse::Ok().json(job))
}

/// Poll the latest checkpoint of a batch
pub async fn get_batch(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let batch_id = path.into_inner();

    match state.checkpoints.get(&batch_id).await {
        Ok(Some(job)) => Ok(HttpResponse::Ok().json(job)),
        Ok(None) => Ok(errors::not_found_error(&format!(
            "batch {} not found",
            batch_id
        ))),
        Err(e) => {
            error!(batch_id = %batch_id, error = %e, "failed to read checkpoint");
            Ok(errors::internal_error("failed to read batch status"))
        }
    }
}

/// List summaries of all known batches
pub async fn list_batches(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    match state.checkpoints.list().await {
        Ok(summaries) => Ok(HttpResponse::Ok().json(ApiResponse::success(summaries))),
        Err(e) => {
            error!(error = %e, "failed to list batches");
            Ok(errors::internal_error("failed to list batches"))
        }
    }
}
