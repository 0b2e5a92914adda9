use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Folder,
    Other,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Folder => write!(f, "folder"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    // Unrecognized kinds file as `Other`; this parse never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "folder" => Ok(Self::Folder),
            _ => Ok(Self::Other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    pub last_modified: String,
    pub tags: Vec<String>,
}

/// Snapshot of the documents panel after filtering: the visible documents
/// plus the filter controls needed to render the toolbar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsView {
    pub documents: Vec<Document>,
    pub all_tags: Vec<String>,
    pub search: String,
    pub active_tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kind_names_parse_exactly() {
        assert_eq!("pdf".parse::<DocumentKind>(), Ok(DocumentKind::Pdf));
        assert_eq!("folder".parse::<DocumentKind>(), Ok(DocumentKind::Folder));
    }

    #[test]
    fn unknown_kind_parses_as_other() {
        assert_eq!("xlsx".parse::<DocumentKind>(), Ok(DocumentKind::Other));
        assert_eq!("".parse::<DocumentKind>(), Ok(DocumentKind::Other));
    }
}
