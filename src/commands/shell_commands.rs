use tauri::{command, State};

use crate::error::AppError;
use crate::models::panel::Panel;
use crate::state::AppState;

#[command]
pub fn get_active_panel(state: State<'_, AppState>) -> Result<Panel, AppError> {
    Ok(state.shell().active)
}

#[command]
pub fn select_panel(panel: String, state: State<'_, AppState>) -> Result<Panel, AppError> {
    let panel = panel.parse::<Panel>().map_err(AppError::General)?;
    Ok(state.activate_panel(panel))
}
