use tauri::{command, State};

use crate::error::AppError;
use crate::models::recommendation::Recommendation;
use crate::state::AppState;

#[command]
pub fn get_recommendations(state: State<'_, AppState>) -> Result<Vec<Recommendation>, AppError> {
    state.recommendations.fetch()
}
