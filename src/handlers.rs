use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::extract::Title;
use crate::services::render_service::{EDIT_TEMPLATE, VIEW_TEMPLATE};
use crate::types::{AppState, Page};

/// Form posted by the edit page
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// 302 Found to `location`
fn found(location: &str) -> Result<Response, WikiError> {
    let value = HeaderValue::from_str(location)
        .map_err(|e| WikiError::Render(format!("invalid redirect target {location:?}: {e}")))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}

/// Handle root path requests
pub async fn handle_root(State(state): State<AppState>) -> Result<Response, WikiError> {
    found(&format!("/{}", state.welcome_title))
}

pub async fn handle_favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Show a page, or send the client to its edit form when it does not exist yet
pub async fn handle_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    title: Title,
) -> Result<Response, WikiError> {
    log::info!("View request for '{}'", title.as_str());
    match state.store.load(title.as_str()) {
        Ok(page) => state.renderer.render(&headers, VIEW_TEMPLATE, &page),
        Err(WikiError::NotFound) => {
            log::debug!("Page '{}' missing, redirecting to editor", title.as_str());
            found(&format!("/{}/edit", title.as_str()))
        }
        Err(e) => Err(e),
    }
}

/// Pull the `body` field out of a urlencoded or multipart form.
///
/// Any other content type, or no content type at all, reads as an empty body.
async fn read_body_field(request: Request) -> Result<String, WikiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<SaveForm>::from_request(request, &())
            .await
            .map_err(|e| WikiError::BadRequest(e.body_text()))?;
        return Ok(form.body);
    }

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| WikiError::BadRequest(e.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| WikiError::BadRequest(e.body_text()))?
        {
            if field.name() == Some("body") {
                return field.text().await.map_err(|e| WikiError::BadRequest(e.body_text()));
            }
        }
        return Ok(String::new());
    }

    log::debug!("Save without form content type {:?}, treating body as empty", content_type);
    Ok(String::new())
}

/// Persist the posted body and redirect back to the page
pub async fn handle_save(
    State(state): State<AppState>,
    title: Title,
    request: Request,
) -> Result<Response, WikiError> {
    log::info!("Save request for '{}'", title.as_str());
    let body = read_body_field(request).await?;
    let page = Page::new(title.as_str(), body);
    state.store.save(&page)?;
    found(&format!("/{}", page.title))
}

/// Edit form; a missing page is edited as an empty one
pub async fn handle_edit(State(state): State<AppState>, title: Title) -> Result<Response, WikiError> {
    log::info!("Edit request for '{}'", title.as_str());
    let page = match state.store.load(title.as_str()) {
        Ok(page) => page,
        Err(WikiError::NotFound) => Page::placeholder(title.as_str()),
        Err(e) => return Err(e),
    };
    state.renderer.render_html(EDIT_TEMPLATE, &page)
}
