use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::error::AppError;
use crate::models::action::ActionItem;
use crate::models::classification::Classification;
use crate::models::digitalization::{CropSelection, DigitalizationView, ImageMeta};
use crate::models::document::{Document, DocumentKind, DocumentsView};
use crate::models::grade::GradeRecord;
use crate::models::panel::Panel;
use crate::services::classification_service::{Classifier, MockClassifier};
use crate::services::ocr_service::OcrEngineHandle;
use crate::services::recommendation_service::{RecommendationSource, StaticRecommendations};
use crate::settings::Settings;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

pub struct ShellState {
    pub active: Panel,
}

pub struct DocumentsPanel {
    pub documents: Vec<Document>,
    pub search: String,
    pub active_tags: Vec<String>,
}

impl DocumentsPanel {
    fn seeded() -> Self {
        Self {
            documents: seed_documents(),
            search: String::new(),
            active_tags: Vec::new(),
        }
    }

    /// Every tag in use, deduplicated, in the order first seen across
    /// the document list.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for doc in &self.documents {
            for tag in &doc.tags {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    /// Case-insensitive name substring match, and every active tag must
    /// be present on the document.
    pub fn filtered(&self) -> Vec<Document> {
        let needle = self.search.to_lowercase();
        self.documents
            .iter()
            .filter(|doc| {
                doc.name.to_lowercase().contains(&needle)
                    && self.active_tags.iter().all(|tag| doc.tags.contains(tag))
            })
            .cloned()
            .collect()
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.active_tags.iter().position(|t| t == tag) {
            self.active_tags.remove(pos);
        } else {
            self.active_tags.push(tag.to_string());
        }
    }

    pub fn add(
        &mut self,
        name: &str,
        kind: DocumentKind,
        tags: Vec<String>,
    ) -> Result<Document, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::General("document name cannot be empty".to_string()));
        }
        let doc = Document {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind,
            last_modified: chrono::Local::now().format("%Y-%m-%d").to_string(),
            tags,
        };
        self.documents.push(doc.clone());
        Ok(doc)
    }

    pub fn view(&self) -> DocumentsView {
        DocumentsView {
            documents: self.filtered(),
            all_tags: self.all_tags(),
            search: self.search.clone(),
            active_tags: self.active_tags.clone(),
        }
    }
}

/// The loaded image as held on the Rust side: original pixels plus the
/// file name for display.
pub struct StoredImage {
    pub name: String,
    pub pixels: image::DynamicImage,
}

pub struct DigitalizationPanel {
    pub image: Option<StoredImage>,
    pub zoom: f64,
    pub crop: Option<CropSelection>,
    pub records: Vec<GradeRecord>,
    pub trace: Vec<String>,
    pub processing: bool,
}

impl DigitalizationPanel {
    fn new() -> Self {
        Self {
            image: None,
            zoom: 1.0,
            crop: None,
            records: Vec::new(),
            trace: vec!["Panel initialized".to_string()],
            processing: false,
        }
    }

    pub fn push_trace(&mut self, line: impl Into<String>) {
        self.trace.push(line.into());
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        self.zoom
    }

    pub fn view(&self) -> DigitalizationView {
        DigitalizationView {
            image: self.image.as_ref().map(|img| ImageMeta {
                name: img.name.clone(),
                natural_width: img.pixels.width(),
                natural_height: img.pixels.height(),
            }),
            zoom: self.zoom,
            crop: self.crop,
            records: self.records.clone(),
            trace: self.trace.clone(),
            processing: self.processing,
        }
    }
}

#[derive(Default)]
pub struct ClassificationPanel {
    pub result: Option<Classification>,
}

pub struct ActionsPanel {
    pub actions: Vec<ActionItem>,
}

impl ActionsPanel {
    fn seeded() -> Self {
        Self {
            actions: seed_actions(),
        }
    }

    pub fn add(&mut self, description: &str) -> Result<ActionItem, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::General(
                "action description cannot be empty".to_string(),
            ));
        }
        let action = ActionItem {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.to_string(),
            completed: false,
        };
        self.actions.push(action.clone());
        Ok(action)
    }

    pub fn toggle(&mut self, id: &str) -> Result<ActionItem, AppError> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::General(format!("unknown action: {id}")))?;
        action.completed = !action.completed;
        Ok(action.clone())
    }
}

pub struct AppState {
    pub settings: Settings,
    pub shell: Mutex<ShellState>,
    pub documents: Mutex<DocumentsPanel>,
    pub digitalization: Mutex<DigitalizationPanel>,
    pub classification: Mutex<ClassificationPanel>,
    pub actions: Mutex<ActionsPanel>,
    pub ocr: Arc<OcrEngineHandle>,
    pub classifier: Box<dyn Classifier>,
    pub recommendations: Box<dyn RecommendationSource>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let ocr = OcrEngineHandle::new(&settings.ocr_language);
        let classifier = Box::new(MockClassifier::new(
            settings.classification_categories.clone(),
        ));
        Self::with_capabilities(settings, ocr, classifier, Box::new(StaticRecommendations))
    }

    /// Wires the state with explicit capability implementations. Tests
    /// swap in scripted engines and classifiers through here.
    pub fn with_capabilities(
        settings: Settings,
        ocr: OcrEngineHandle,
        classifier: Box<dyn Classifier>,
        recommendations: Box<dyn RecommendationSource>,
    ) -> Self {
        Self {
            settings,
            shell: Mutex::new(ShellState {
                active: Panel::default(),
            }),
            documents: Mutex::new(DocumentsPanel::seeded()),
            digitalization: Mutex::new(DigitalizationPanel::new()),
            classification: Mutex::new(ClassificationPanel::default()),
            actions: Mutex::new(ActionsPanel::seeded()),
            ocr: Arc::new(ocr),
            classifier,
            recommendations,
        }
    }

    pub fn shell(&self) -> MutexGuard<'_, ShellState> {
        self.shell
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn documents(&self) -> MutexGuard<'_, DocumentsPanel> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn digitalization(&self) -> MutexGuard<'_, DigitalizationPanel> {
        self.digitalization
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn classification(&self) -> MutexGuard<'_, ClassificationPanel> {
        self.classification
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn actions(&self) -> MutexGuard<'_, ActionsPanel> {
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Switches the active panel. Leaving the digitalization panel is the
    /// teardown point for the OCR engine; it comes back lazily on the
    /// next recognition.
    pub fn activate_panel(&self, panel: Panel) -> Panel {
        let previous = {
            let mut shell = self.shell();
            let previous = shell.active;
            shell.active = panel;
            previous
        };
        if previous != panel {
            debug!("Panel switched: {previous} -> {panel}");
        }
        if previous == Panel::Digitalization && panel != Panel::Digitalization {
            self.ocr.release();
        }
        panel
    }
}

fn seed_documents() -> Vec<Document> {
    vec![
        Document {
            id: "1".to_string(),
            name: "Annual Report 2023".to_string(),
            kind: DocumentKind::Pdf,
            last_modified: "2024-03-15".to_string(),
            tags: vec!["Finance".to_string(), "Annual".to_string()],
        },
        Document {
            id: "2".to_string(),
            name: "Employee Contracts".to_string(),
            kind: DocumentKind::Folder,
            last_modified: "2024-02-28".to_string(),
            tags: vec!["HR".to_string()],
        },
        Document {
            id: "3".to_string(),
            name: "Client Invoice XYZ".to_string(),
            kind: DocumentKind::Docx,
            last_modified: "2024-03-10".to_string(),
            tags: vec!["Sales".to_string(), "Billing".to_string()],
        },
    ]
}

fn seed_actions() -> Vec<ActionItem> {
    vec![
        ActionItem {
            id: "1".to_string(),
            description: "Review and update the privacy policy".to_string(),
            completed: false,
        },
        ActionItem {
            id: "2".to_string(),
            description: "Implement an automated backup system".to_string(),
            completed: true,
        },
        ActionItem {
            id: "3".to_string(),
            description: "Organize a training session on the new tools".to_string(),
            completed: false,
        },
    ]
}
