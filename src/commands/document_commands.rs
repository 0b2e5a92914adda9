use tauri::{command, State};

use crate::error::AppError;
use crate::models::document::{DocumentKind, DocumentsView};
use crate::state::AppState;

#[command]
pub fn get_documents(state: State<'_, AppState>) -> Result<DocumentsView, AppError> {
    Ok(state.documents().view())
}

#[command]
pub fn set_document_search(
    query: String,
    state: State<'_, AppState>,
) -> Result<DocumentsView, AppError> {
    let mut docs = state.documents();
    docs.search = query;
    Ok(docs.view())
}

#[command]
pub fn toggle_document_tag(
    tag: String,
    state: State<'_, AppState>,
) -> Result<DocumentsView, AppError> {
    let mut docs = state.documents();
    docs.toggle_tag(&tag);
    Ok(docs.view())
}

#[command]
pub fn add_document(
    name: String,
    kind: String,
    tags: Option<Vec<String>>,
    state: State<'_, AppState>,
) -> Result<DocumentsView, AppError> {
    let kind = kind.parse().unwrap_or(DocumentKind::Other);
    let mut docs = state.documents();
    docs.add(&name, kind, tags.unwrap_or_default())?;
    Ok(docs.view())
}
