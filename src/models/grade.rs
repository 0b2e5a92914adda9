use serde::{Deserialize, Serialize};

/// One column of a grade record: a label like "Parcial 1" and the value
/// read for it. Kept as a list rather than a map so the column order of
/// the source table survives serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCell {
    pub label: String,
    pub value: String,
}

/// A subject row reconstructed from OCR text: the subject line verbatim
/// plus its grade columns in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub subject: String,
    pub grades: Vec<GradeCell>,
}

impl GradeRecord {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grades: Vec::new(),
        }
    }

    /// Records a grade under `label`. A repeated label overwrites the
    /// earlier value but keeps its original position.
    pub fn set_grade(&mut self, label: &str, value: &str) {
        if let Some(cell) = self.grades.iter_mut().find(|c| c.label == label) {
            cell.value = value.to_string();
        } else {
            self.grades.push(GradeCell {
                label: label.to_string(),
                value: value.to_string(),
            });
        }
    }
}
