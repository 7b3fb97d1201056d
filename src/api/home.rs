//! Catalog home page

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{services::home::CatalogCounts, AppState};

use super::views::View;

/// Home page data: the counts, or why they could not be gathered
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeData {
    pub error: Option<String>,
    pub data: Option<CatalogCounts>,
}

/// Catalog summary
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Home view with record counts", body = HomeData)
    )
)]
pub async fn index(State(state): State<AppState>) -> View<HomeData> {
    let data = match state.services.home.counts().await {
        Ok(counts) => HomeData {
            error: None,
            data: Some(counts),
        },
        Err(e) => {
            tracing::warn!("Home counts failed: {}", e);
            HomeData {
                error: Some(e.to_string()),
                data: None,
            }
        }
    };
    View::new("index", "Local Library Home", data)
}
