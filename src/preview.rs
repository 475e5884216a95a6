//! Upload/preview state: asynchronously reads the selected file and
//! publishes the result, superseding any still-running read from an earlier
//! selection.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// No file selected.
    Placeholder,
    Loading {
        file_name: String,
    },
    Ready {
        file_name: String,
        image: Vec<u8>,
    },
    Failed {
        file_name: String,
        error: String,
    },
}

impl PreviewState {
    pub fn is_settled(&self) -> bool {
        matches!(self, PreviewState::Ready { .. } | PreviewState::Failed { .. })
    }
}

/// Localized caption shown next to the selected file.
pub fn selected_caption(file_name: &str) -> String {
    format!("الصورة المختارة: {file_name}")
}

pub struct PreviewPane {
    // Every publish to `tx` happens while holding this lock, so a stale
    // read can never land after a newer selection's generation bump.
    generation: Arc<Mutex<u64>>,
    tx: watch::Sender<PreviewState>,
}

impl PreviewPane {
    pub fn new() -> (Self, watch::Receiver<PreviewState>) {
        let (tx, rx) = watch::channel(PreviewState::Placeholder);
        (
            Self {
                generation: Arc::new(Mutex::new(0)),
                tx,
            },
            rx,
        )
    }

    /// React to a file selection. `None` resets to the placeholder.
    /// Selecting a file starts an async read whose result is published only
    /// if no newer selection has happened in the meantime.
    pub fn select(&self, path: Option<PathBuf>) {
        let mut generation = self.generation.lock().expect("preview state lock");
        *generation += 1;

        let Some(path) = path else {
            self.tx.send_replace(PreviewState::Placeholder);
            return;
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.tx.send_replace(PreviewState::Loading {
            file_name: file_name.clone(),
        });

        let my_generation = *generation;
        drop(generation);

        let generation = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = tokio::fs::read(&path).await;

            // Check and publish under the same lock: a newer selection
            // cannot slip in between the generation test and the send.
            let current = generation.lock().expect("preview state lock");
            if *current != my_generation {
                tracing::debug!(?path, "preview read superseded, discarding");
                return;
            }

            let state = match result {
                Ok(image) => PreviewState::Ready { file_name, image },
                Err(err) => PreviewState::Failed {
                    file_name,
                    error: err.to_string(),
                },
            };
            tx.send_replace(state);
        });
    }
}
