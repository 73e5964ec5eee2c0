//! Listing pages and form handlers

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};

use crate::error::ServerResult;
use crate::http::extractors::ListingForm;
use crate::http::views;
use crate::state::AppState;

/// GET / - all listings
async fn index(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let listings = state.listings().list().await?;
    Ok(views::index(&listings))
}

/// GET /listing/{id}
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Html<String>> {
    let listing = state.listings().get(id).await?;
    Ok(views::detail(&listing))
}

/// GET /admin - creation form
async fn admin_form() -> Html<String> {
    views::admin()
}

/// POST /admin - create a listing from the submitted form
async fn create_listing(
    State(state): State<AppState>,
    form: ListingForm,
) -> ServerResult<Redirect> {
    state.listings().create(form.input, &form.files).await?;
    Ok(Redirect::to("/"))
}

/// GET /edit/{id} - pre-filled edit form
async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Html<String>> {
    let listing = state.listings().get(id).await?;
    Ok(views::edit(&listing))
}

/// POST /edit/{id}
async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: ListingForm,
) -> ServerResult<Redirect> {
    state.listings().update(id, form.input, &form.files).await?;
    Ok(Redirect::to("/"))
}

/// POST /delete/{id} - always redirects, whether or not the listing existed
async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Redirect> {
    state.listings().delete(id).await?;
    Ok(Redirect::to("/"))
}

/// Listing routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/listing/{id}", get(detail))
        .route("/admin", get(admin_form).post(create_listing))
        .route("/edit/{id}", get(edit_form).post(update_listing))
        .route("/delete/{id}", post(delete_listing))
}
