use crate::error::AppError;
use crate::models::recommendation::Recommendation;

/// Capability seam for the recommendations panel. The shipped source is
/// a fixed list; a real backend plugs in here.
pub trait RecommendationSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Recommendation>, AppError>;
}

pub struct StaticRecommendations;

impl RecommendationSource for StaticRecommendations {
    fn fetch(&self) -> Result<Vec<Recommendation>, AppError> {
        Ok(vec![
            Recommendation {
                id: "1".to_string(),
                title: "Introduce a document tagging scheme".to_string(),
                detail: "Consistent tags across the archive make categorization \
                         and search far more reliable."
                    .to_string(),
            },
            Recommendation {
                id: "2".to_string(),
                title: "Refresh the document retention policy".to_string(),
                detail: "Review retention periods against current regulations \
                         and archive or purge what no longer applies."
                    .to_string(),
            },
            Recommendation {
                id: "3".to_string(),
                title: "Schedule information security training".to_string(),
                detail: "Regular sessions keep document handling practices \
                         aligned with the security guidelines."
                    .to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn recommendations_are_stable_across_fetches() {
        let source = StaticRecommendations;
        let first = source.fetch().unwrap();
        let second = source.fetch().unwrap();

        assert_eq!(first.len(), 3);
        let ids: Vec<_> = first.iter().map(|r| r.id.clone()).collect();
        let again: Vec<_> = second.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn recommendation_ids_are_unique() {
        let source = StaticRecommendations;
        let recs = source.fetch().unwrap();
        let ids: HashSet<_> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), recs.len());
    }
}
