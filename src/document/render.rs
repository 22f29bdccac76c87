use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::document::backend::{DocumentBackend, DocumentProvider};
use crate::error::RenderError;
use crate::session::question::QuestionKind;
use crate::session::section::Section;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagePosition {
    pub index: usize,
    pub count: usize,
}

/// What the display layer should show for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedQuestion {
    pub source: PathBuf,
    pub kind: QuestionKind,
    /// The file an external viewer should open: the source itself for
    /// images, an extracted single-page file for PDFs.
    pub display_path: PathBuf,
    pub page: Option<PagePosition>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PageKey {
    section: String,
    index: usize,
    page: usize,
}

/// Resolves questions to displayable files and owns the caches that make
/// repeat views cheap: opened documents keyed by source path and extracted
/// page files keyed by (section, question, page). Both are dropped together
/// by [`QuestionRenderer::clear`].
pub struct QuestionRenderer {
    provider: Box<dyn DocumentProvider>,
    documents: HashMap<PathBuf, Box<dyn DocumentBackend>>,
    pages: HashMap<PageKey, PathBuf>,
    scratch: Option<TempDir>,
    /// Serial number for page files. Sanitized section names can coincide,
    /// so the serial keeps every extracted file distinct.
    extracted: usize,
}

impl QuestionRenderer {
    pub fn new(provider: Box<dyn DocumentProvider>) -> Self {
        Self {
            provider,
            documents: HashMap::new(),
            pages: HashMap::new(),
            scratch: None,
            extracted: 0,
        }
    }

    pub fn cached_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    /// Resolve the section's current question. PDF pages are clamped into
    /// the document and the clamped value is written back to the section.
    /// Returns `Ok(None)` for a section without files.
    pub fn resolve(&mut self, section: &mut Section) -> Result<Option<RenderedQuestion>, RenderError> {
        let Some(question) = section.current_question().cloned() else {
            return Ok(None);
        };

        match question.kind {
            QuestionKind::Image => {
                check_readable(&question.path)?;
                Ok(Some(RenderedQuestion {
                    display_path: question.path.clone(),
                    source: question.path,
                    kind: QuestionKind::Image,
                    page: None,
                }))
            }
            QuestionKind::Pdf => {
                let page_count = self.document(&question.path)?.page_count();
                if page_count == 0 {
                    return Err(RenderError::EmptyDocument(question.path));
                }
                let page = section.clamp_page(page_count);
                let key = PageKey {
                    section: section.name().to_string(),
                    index: section.current_index(),
                    page,
                };
                let display_path = self.page_file(&question.path, key)?;
                Ok(Some(RenderedQuestion {
                    source: question.path,
                    kind: QuestionKind::Pdf,
                    display_path,
                    page: Some(PagePosition {
                        index: page,
                        count: page_count,
                    }),
                }))
            }
        }
    }

    fn document(&mut self, path: &Path) -> Result<&dyn DocumentBackend, RenderError> {
        if !self.documents.contains_key(path) {
            let doc = self.provider.open(path)?;
            debug!(path = %path.display(), pages = doc.page_count(), "document opened");
            self.documents.insert(path.to_path_buf(), doc);
        }
        Ok(self.documents[path].as_ref())
    }

    fn page_file(&mut self, source: &Path, key: PageKey) -> Result<PathBuf, RenderError> {
        if let Some(existing) = self.pages.get(&key) {
            if existing.exists() {
                return Ok(existing.clone());
            }
        }

        let dir = self.scratch_dir()?;
        self.extracted += 1;
        let dest = dir.join(format!(
            "_temp_{}_{}_{}_{}.pdf",
            self.extracted,
            sanitize(&key.section),
            key.index,
            key.page
        ));
        self.documents[source].extract_page(key.page, &dest)?;
        self.pages.insert(key, dest.clone());
        Ok(dest)
    }

    fn scratch_dir(&mut self) -> Result<PathBuf, RenderError> {
        if self.scratch.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("quizdeck-")
                .tempdir()
                .map_err(|source| RenderError::Io {
                    path: std::env::temp_dir(),
                    source,
                })?;
            self.scratch = Some(dir);
        }
        Ok(self
            .scratch
            .as_ref()
            .map(|d| d.path().to_path_buf())
            .unwrap_or_default())
    }

    /// Drop every cached document and delete extracted page files.
    /// Removal failures are logged and otherwise ignored.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.pages.clear();
        if let Some(dir) = self.scratch.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(path = %path.display(), error = %e, "failed to remove temporary pages");
            }
        }
    }
}

impl Drop for QuestionRenderer {
    fn drop(&mut self) {
        self.clear();
    }
}

fn check_readable(path: &Path) -> Result<(), RenderError> {
    let meta = fs::metadata(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(RenderError::NotAFile(path.to_path_buf()));
    }
    fs::File::open(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
