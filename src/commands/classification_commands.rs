use std::time::Duration;

use tauri::{command, State};

use crate::error::AppError;
use crate::models::classification::Classification;
use crate::state::AppState;

const CLASSIFY_DELAY_MS: u64 = 1000;

/// Classifies `text` and records the result on the panel. The delay
/// stands in for the latency a real model would add, so the UI flow
/// stays honest when the mock is swapped out.
pub async fn run_classification(
    state: &AppState,
    text: &str,
) -> Result<Classification, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::General("no text to classify".to_string()));
    }

    state.classification().result = None;
    tokio::time::sleep(Duration::from_millis(CLASSIFY_DELAY_MS)).await;

    let label = state.classifier.classify(text)?;
    let classification = Classification {
        label,
        classified_at: chrono::Utc::now().to_rfc3339(),
    };
    state.classification().result = Some(classification.clone());
    Ok(classification)
}

#[command]
pub async fn classify_text(
    text: String,
    state: State<'_, AppState>,
) -> Result<Classification, AppError> {
    run_classification(state.inner(), &text).await
}

#[command]
pub fn get_classification(
    state: State<'_, AppState>,
) -> Result<Option<Classification>, AppError> {
    Ok(state.classification().result.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn test_state() -> AppState {
        AppState::new(Settings::default())
    }

    #[tokio::test]
    async fn classification_stores_a_label_from_the_category_set() {
        let state = test_state();
        let result = run_classification(&state, "renewal contract for review")
            .await
            .unwrap();

        assert!(state
            .settings
            .classification_categories
            .contains(&result.label));
        let stored = state.classification().result.clone().unwrap();
        assert_eq!(stored.label, result.label);
        assert!(!stored.classified_at.is_empty());
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_clearing_the_panel() {
        let state = test_state();
        run_classification(&state, "first pass").await.unwrap();

        let err = run_classification(&state, "   ").await;
        assert!(err.is_err());
        assert!(state.classification().result.is_some());
    }
}
