use rand::Rng;

use crate::error::AppError;

/// Capability seam for text classification. The dashboard ships with a
/// mock; a real model plugs in here without touching the panel.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String, AppError>;
}

/// Picks a random category, standing in for a real model.
pub struct MockClassifier {
    categories: Vec<String>,
}

impl MockClassifier {
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }
}

impl Classifier for MockClassifier {
    fn classify(&self, _text: &str) -> Result<String, AppError> {
        if self.categories.is_empty() {
            return Err(AppError::General(
                "no classification categories configured".to_string(),
            ));
        }
        let idx = rand::thread_rng().gen_range(0..self.categories.len());
        Ok(self.categories[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_labels_come_from_the_configured_set() {
        let categories = vec!["Finance".to_string(), "Legal".to_string()];
        let classifier = MockClassifier::new(categories.clone());

        for _ in 0..20 {
            let label = classifier.classify("quarterly invoice summary").unwrap();
            assert!(categories.contains(&label), "unexpected label: {label}");
        }
    }

    #[test]
    fn empty_category_set_is_an_error() {
        let classifier = MockClassifier::new(Vec::new());
        assert!(classifier.classify("anything").is_err());
    }
}
