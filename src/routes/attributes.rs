// src/routes/attributes.rs

use axum::{extract::State, Json};

use crate::{db, error::AppError, models::AttributeList, AppState};

/// GET /api/attributes
pub async fn list_attributes(
    State(state): State<AppState>,
) -> Result<Json<AttributeList>, AppError> {
    let mut conn = state.db.connect().await?;
    let attributes = db::list_attributes(&mut conn).await;
    db::close(conn).await;

    let attributes = attributes?;
    tracing::debug!(count = attributes.len(), "listed attributes");
    Ok(Json(AttributeList { attributes }))
}
