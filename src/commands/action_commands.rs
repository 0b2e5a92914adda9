use tauri::{command, State};

use crate::error::AppError;
use crate::models::action::ActionItem;
use crate::state::AppState;

#[command]
pub fn get_actions(state: State<'_, AppState>) -> Result<Vec<ActionItem>, AppError> {
    Ok(state.actions().actions.clone())
}

#[command]
pub fn add_action(
    description: String,
    state: State<'_, AppState>,
) -> Result<Vec<ActionItem>, AppError> {
    let mut actions = state.actions();
    actions.add(&description)?;
    Ok(actions.actions.clone())
}

#[command]
pub fn toggle_action(id: String, state: State<'_, AppState>) -> Result<Vec<ActionItem>, AppError> {
    let mut actions = state.actions();
    actions.toggle(&id)?;
    Ok(actions.actions.clone())
}
