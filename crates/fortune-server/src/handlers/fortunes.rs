//! Fortune handlers

use super::{json_response, ApiError};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};
use fortune_core::{Fortune, FortuneError};
use tracing::debug;

/// Id looked up when a random pick finds the store empty. It never passes
/// the id check, so the request ends as a plain 404.
const EMPTY_PICK: &str = "zero";

fn is_fortune_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let fortunes = state.store.list().await;
    json_response(&fortunes)
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    fetch(&state, &id).await
}

pub async fn random(State(state): State<AppState>) -> Result<Response, ApiError> {
    let id = state
        .store
        .random_id()
        .await
        .unwrap_or_else(|| EMPTY_PICK.to_string());
    debug!("Random pick resolved to {}", id);
    fetch(&state, &id).await
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let fortune = decode_fortune(&body)?;

    let created = state.store.create(fortune).await;
    json_response(&created)
}

/// Decode the first JSON value in `body`; anything after it is ignored
fn decode_fortune(body: &[u8]) -> Result<Fortune, FortuneError> {
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<Fortune>()
        .next()
    {
        Some(Ok(fortune)) => Ok(fortune),
        Some(Err(e)) => {
            debug!("Rejected create body: {}", e);
            Err(FortuneError::Decode(e.to_string()))
        }
        None => {
            debug!("Rejected empty create body");
            Err(FortuneError::Decode("empty body".to_string()))
        }
    }
}

async fn fetch(state: &AppState, id: &str) -> Result<Response, ApiError> {
    if !is_fortune_id(id) {
        return Err(ApiError::RouteNotFound);
    }
    let fortune = state.store.get(id).await?;
    json_response(&fortune)
}
