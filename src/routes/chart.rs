// src/routes/chart.rs

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Form, Json,
};
use serde::Deserialize;

use crate::models::{ChartOptions, ChartResponse};
use crate::{db, error::AppError, pivot, AppState};

pub const CHART_TYPE: &str = "ColumnChart";
pub const ATTRIBUTE_FIELD: &str = "attribute";

#[derive(Debug, Default, Deserialize)]
struct ChartForm {
    attribute: Option<String>,
}

/// The optional `attribute` form field, read from a urlencoded or multipart
/// body. The value is used exactly as sent; only an absent field means
/// "all attributes".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChartFilter(pub Option<String>);

#[async_trait]
impl<S> FromRequest<S> for ChartFilter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).to_ascii_lowercase());

        let Some(content_type) = content_type else {
            return Ok(ChartFilter(None));
        };

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<ChartForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidForm(e.body_text()))?;
            Ok(ChartFilter(form.attribute))
        } else if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidForm(e.body_text()))?;
            // first occurrence wins
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::InvalidForm(e.body_text()))?
            {
                if field.name() == Some(ATTRIBUTE_FIELD) {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::InvalidForm(e.body_text()))?;
                    return Ok(ChartFilter(Some(value)));
                }
            }
            Ok(ChartFilter(None))
        } else {
            Err(AppError::UnsupportedMediaType(content_type))
        }
    }
}

/// POST /api/chart
///
/// Without an `attribute` field the matrix has one column per attribute;
/// with one, the header echoes the value as sent and only matching rows
/// are counted. Bodies that are neither urlencoded nor multipart are
/// rejected with 415.
pub async fn get_chart(
    State(state): State<AppState>,
    ChartFilter(attribute): ChartFilter,
) -> Result<Json<ChartResponse>, AppError> {
    let filter = attribute.as_deref();

    let mut conn = state.db.connect().await?;
    let fetched = async {
        let catalog: Vec<String> = match filter {
            Some(_) => Vec::new(),
            None => db::list_attributes(&mut conn)
                .await?
                .into_iter()
                .map(|a| a.name)
                .collect(),
        };
        let rows = db::aggregate(&mut conn, filter).await?;
        Ok::<_, AppError>((catalog, rows))
    }
    .await;
    db::close(conn).await;

    let (catalog, rows) = fetched?;
    let data = pivot::build_chart(filter, &catalog, &rows)?;
    tracing::debug!(filter = ?filter, rows = data.len(), "built chart matrix");

    Ok(Json(ChartResponse {
        chart_type: CHART_TYPE.to_string(),
        data,
        options: ChartOptions::default(),
    }))
}
