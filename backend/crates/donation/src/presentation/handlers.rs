//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use kernel::id::DonationId;
use std::sync::Arc;

use crate::application::config::DonationConfig;
use crate::application::{DonationStatsUseCase, ListDonationsUseCase, RecordDonationUseCase};
use crate::domain::repository::DonationRepository;
use crate::domain::value_objects::PageRequest;
use crate::error::{DonationError, DonationResult};
use crate::presentation::dto::{
    CreateDonationResponse, DonationPageResponse, DonationRequest, DonationResponse, PageQuery,
    ValidateDonationResponse,
};

/// Shared state for donation handlers
pub struct DonationAppState<R>
where
    R: DonationRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<DonationConfig>,
}

impl<R> Clone for DonationAppState<R>
where
    R: DonationRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// POST /api/admin/donations
pub async fn create_donation<R>(
    State(state): State<DonationAppState<R>>,
    body: Bytes,
) -> DonationResult<impl IntoResponse>
where
    R: DonationRepository + Send + Sync + 'static,
{
    let req = parse_body(&body)?;

    let donation = RecordDonationUseCase::new(state.repo.clone())
        .execute(&req)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDonationResponse {
            message: "Donation added successfully".to_string(),
            donation: DonationResponse::from(&donation),
        }),
    ))
}

/// POST /api/admin/donations/validate
///
/// Same rules as the create endpoint; nothing is stored.
pub async fn validate_donation<R>(
    State(state): State<DonationAppState<R>>,
    body: Bytes,
) -> DonationResult<Json<ValidateDonationResponse>>
where
    R: DonationRepository + Send + Sync + 'static,
{
    let req = parse_body(&body)?;

    RecordDonationUseCase::new(state.repo.clone()).check(&req)?;

    Ok(Json(ValidateDonationResponse { valid: true }))
}

// ============================================================================
// Read
// ============================================================================

/// GET /api/admin/donations?page=N
pub async fn list_donations<R>(
    State(state): State<DonationAppState<R>>,
    Query(query): Query<PageQuery>,
) -> DonationResult<Json<DonationPageResponse>>
where
    R: DonationRepository + Send + Sync + 'static,
{
    let request = PageRequest::from_query(query.page.as_deref(), state.config.page_size);

    let page = ListDonationsUseCase::new(state.repo.clone())
        .page(request)
        .await?;

    Ok(Json(DonationPageResponse::from(&page)))
}

/// GET /api/admin/donations/{id}
pub async fn get_donation<R>(
    State(state): State<DonationAppState<R>>,
    Path(id): Path<String>,
) -> DonationResult<Json<DonationResponse>>
where
    R: DonationRepository + Send + Sync + 'static,
{
    // A non-numeric id cannot name a donation
    let id = id.parse::<i64>().map_err(|_| DonationError::NotFound)?;

    let donation = ListDonationsUseCase::new(state.repo.clone())
        .get(DonationId::from_raw(id))
        .await?;

    Ok(Json(DonationResponse::from(&donation)))
}

/// GET /api/stats
pub async fn stats<R>(State(state): State<DonationAppState<R>>) -> DonationResult<impl IntoResponse>
where
    R: DonationRepository + Send + Sync + 'static,
{
    let stats = DonationStatsUseCase::new(state.repo.clone(), state.config.clone())
        .execute(Utc::now())
        .await?;

    Ok(Json(stats))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a JSON body; an empty body counts as `{}`
fn parse_body(body: &[u8]) -> DonationResult<DonationRequest> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|_| DonationError::BadRequest("Malformed JSON body".into()))
}
