use std::path::PathBuf;
use std::process::Command;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{bail, Context, Result};
use log::debug;
use tempfile::NamedTempFile;

use crate::error::AppError;

/// An OCR backend. Engines are owned by the dedicated worker thread and
/// never shared, so recognition can take `&mut self`.
pub trait OcrEngine: Send {
    fn recognize(&mut self, image: &[u8]) -> Result<String>;
}

type EngineFactory = dyn Fn() -> Result<Box<dyn OcrEngine>> + Send + Sync;

/// Recognizes text by invoking the `tesseract` CLI on a temp file. Keeps
/// the crate free of native library bindings; any stock tesseract install
/// with the right language data works.
pub struct TesseractEngine {
    program: PathBuf,
    language: String,
}

impl TesseractEngine {
    pub fn new(language: impl Into<String>) -> Self {
        Self::with_program("tesseract", language)
    }

    pub fn with_program(program: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            language: language.into(),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&mut self, image: &[u8]) -> Result<String> {
        let input = NamedTempFile::with_suffix(".jpg")?;
        std::fs::write(input.path(), image)?;

        // --psm 6: assume a single uniform block of text, which is what a
        // cropped grade table is.
        let output = Command::new(&self.program)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("6")
            .output()
            .with_context(|| format!("could not launch {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

enum OcrCommand {
    Recognize {
        image: Vec<u8>,
        reply: Sender<Result<String>>,
    },
    Release,
}

/// Hands OCR jobs to a dedicated worker thread that owns the engine.
///
/// The engine is expensive to set up, so it is created on the first job
/// and kept warm for the next one. `release` drops it again; the next job
/// transparently re-creates it. A failed creation is reported to that
/// caller only, and the following job retries from scratch.
pub struct OcrEngineHandle {
    tx: Mutex<Option<Sender<OcrCommand>>>,
    factory: Arc<EngineFactory>,
}

impl OcrEngineHandle {
    pub fn new(language: &str) -> Self {
        let language = language.to_string();
        Self::with_factory(move || {
            Ok(Box::new(TesseractEngine::new(language.clone())) as Box<dyn OcrEngine>)
        })
    }

    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn OcrEngine>> + Send + Sync + 'static,
    {
        Self {
            tx: Mutex::new(None),
            factory: Arc::new(factory),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<OcrCommand>, AppError> {
        let mut guard = self
            .tx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<OcrCommand>();
        let factory = Arc::clone(&self.factory);

        thread::Builder::new()
            .name("ocr-engine".to_string())
            .spawn(move || worker_loop(rx, factory))
            .map_err(|e| AppError::Ocr(format!("could not start OCR thread: {e}")))?;

        *guard = Some(tx.clone());
        Ok(tx)
    }

    /// Runs one recognition job to completion. Blocks the calling thread
    /// until the worker replies, so callers inside the async runtime
    /// should wrap this in `spawn_blocking`.
    pub fn recognize(&self, image: Vec<u8>) -> Result<String, AppError> {
        let tx = self.ensure_thread()?;
        let (reply_tx, reply_rx) = mpsc::channel();
        tx.send(OcrCommand::Recognize {
            image,
            reply: reply_tx,
        })
        .map_err(|_| AppError::Ocr("OCR worker is gone".to_string()))?;

        reply_rx
            .recv()
            .map_err(|_| AppError::Ocr("OCR worker is gone".to_string()))?
            .map_err(|e| AppError::Ocr(format!("{e:#}")))
    }

    /// Drops the engine if one is warm. The worker thread stays around
    /// and the next job re-creates the engine.
    pub fn release(&self) {
        let guard = self
            .tx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(tx) = guard.as_ref() {
            let _ = tx.send(OcrCommand::Release);
        }
    }
}

fn worker_loop(rx: Receiver<OcrCommand>, factory: Arc<EngineFactory>) {
    let mut engine: Option<Box<dyn OcrEngine>> = None;

    while let Ok(cmd) = rx.recv() {
        match cmd {
            OcrCommand::Recognize { image, reply } => {
                if engine.is_none() {
                    match factory() {
                        Ok(e) => {
                            debug!("OCR engine initialized");
                            engine = Some(e);
                        }
                        Err(err) => {
                            let _ = reply.send(Err(err));
                            continue;
                        }
                    }
                }
                if let Some(warm) = engine.as_mut() {
                    let _ = reply.send(warm.recognize(&image));
                }
            }
            OcrCommand::Release => {
                if engine.take().is_some() {
                    debug!("OCR engine released");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedEngine;

    impl OcrEngine for ScriptedEngine {
        fn recognize(&mut self, image: &[u8]) -> Result<String> {
            Ok(format!("saw {} bytes", image.len()))
        }
    }

    fn counting_handle() -> (OcrEngineHandle, Arc<AtomicUsize>) {
        let created = Arc::new(AtomicUsize::new(0));
        let created_in_factory = Arc::clone(&created);
        let handle = OcrEngineHandle::with_factory(move || {
            created_in_factory.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(ScriptedEngine) as Box<dyn OcrEngine>)
        });
        (handle, created)
    }

    #[test]
    fn engine_is_created_lazily_and_reused() {
        let (handle, created) = counting_handle();
        assert_eq!(created.load(Ordering::SeqCst), 0);

        assert_eq!(handle.recognize(vec![1, 2, 3]).unwrap(), "saw 3 bytes");
        assert_eq!(handle.recognize(vec![9]).unwrap(), "saw 1 bytes");
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn release_drops_the_engine_and_next_job_recreates_it() {
        let (handle, created) = counting_handle();

        handle.recognize(vec![0; 4]).unwrap();
        handle.release();
        handle.recognize(vec![0; 4]).unwrap();

        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn release_without_prior_use_is_a_no_op() {
        let (handle, created) = counting_handle();

        handle.release();
        assert_eq!(created.load(Ordering::SeqCst), 0);

        handle.recognize(vec![7]).unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_engine_creation_reaches_the_caller_and_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_in_factory = Arc::clone(&attempts);
        let handle = OcrEngineHandle::with_factory(move || {
            if attempts_in_factory.fetch_add(1, Ordering::SeqCst) == 0 {
                bail!("no language data");
            }
            Ok(Box::new(ScriptedEngine) as Box<dyn OcrEngine>)
        });

        let err = handle.recognize(vec![1]).unwrap_err();
        assert!(err.to_string().contains("no language data"));

        assert_eq!(handle.recognize(vec![1]).unwrap(), "saw 1 bytes");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_tesseract_binary_reports_launch_failure() {
        let mut engine = TesseractEngine::with_program("/nonexistent/tesseract", "spa");
        let err = engine.recognize(&[0u8; 16]).unwrap_err();
        assert!(err.to_string().contains("could not launch"));
    }
}
