use std::io;
use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// An opened paginated document.
pub trait DocumentBackend {
    fn page_count(&self) -> usize;
    /// Write page `page_index` (0-based) as a standalone file at `dest`.
    fn extract_page(&self, page_index: usize, dest: &Path) -> Result<(), RenderError>;
}

pub trait DocumentProvider {
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentBackend>, RenderError>;
}

/// Opens PDFs with `lopdf`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfProvider;

impl DocumentProvider for PdfProvider {
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentBackend>, RenderError> {
        let doc = lopdf::Document::load(path).map_err(|source| RenderError::Pdf {
            path: path.to_path_buf(),
            source,
        })?;
        let page_count = doc.get_pages().len();
        Ok(Box::new(PdfDocument {
            path: path.to_path_buf(),
            doc,
            page_count,
        }))
    }
}

pub struct PdfDocument {
    path: PathBuf,
    doc: lopdf::Document,
    page_count: usize,
}

impl DocumentBackend for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn extract_page(&self, page_index: usize, dest: &Path) -> Result<(), RenderError> {
        if page_index >= self.page_count {
            return Err(RenderError::PageOutOfRange {
                path: self.path.clone(),
                page: page_index,
                page_count: self.page_count,
            });
        }
        // lopdf numbers pages from 1.
        let keep = page_index as u32 + 1;
        let mut single = self.doc.clone();
        let others: Vec<u32> = single
            .get_pages()
            .keys()
            .copied()
            .filter(|n| *n != keep)
            .collect();
        if !others.is_empty() {
            single.delete_pages(&others);
        }
        single.prune_objects();
        single.save(dest).map_err(|e| RenderError::Io {
            path: dest.to_path_buf(),
            source: io::Error::other(e),
        })?;
        Ok(())
    }
}
