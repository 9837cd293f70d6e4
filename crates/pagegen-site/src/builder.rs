//! Build orchestration: discover pages, render each, write the output tree.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pagegen_config::SiteData;
use pagegen_storage::FileStore;

use crate::error::SiteError;
use crate::layout::resolve_layout;
use crate::render::PageRenderer;
use crate::template::{TemplateUnit, template_name};

/// Source tree layout for a build.
///
/// Directories are relative to the store root. Passed explicitly so no
/// process-wide state is involved.
#[derive(Clone, Debug)]
pub struct SiteBuilderConfig {
    /// Directory holding layout templates.
    pub layout_dir: PathBuf,
    /// Directory holding shared template fragments.
    pub part_dir: PathBuf,
    /// Directory holding page content files.
    pub page_dir: PathBuf,
}

impl Default for SiteBuilderConfig {
    fn default() -> Self {
        Self {
            layout_dir: PathBuf::from("layout"),
            part_dir: PathBuf::from("part"),
            page_dir: PathBuf::from("page"),
        }
    }
}

/// Counts reported by a full build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pages rendered and written.
    pub written: usize,
    /// Pages that failed to render or write and were skipped.
    pub failed: usize,
}

/// Renders every page under the page directory into a destination tree.
///
/// Template units are assembled once per distinct layout and reused for
/// all pages that resolve to it. Pages are processed sequentially; a
/// page that fails to render is reported and skipped so one bad page
/// never aborts a batch build. Config load and template assembly
/// failures are fatal — without a layout nothing can render.
pub struct SiteBuilder {
    store: Arc<dyn FileStore>,
    config: SiteBuilderConfig,
    renderer: PageRenderer,
}

impl SiteBuilder {
    /// Create a builder over the given store and source tree layout.
    #[must_use]
    pub fn new(store: Arc<dyn FileStore>, config: SiteBuilderConfig) -> Self {
        let renderer = PageRenderer::new(Arc::clone(&store), config.page_dir.clone());
        Self {
            store,
            config,
            renderer,
        }
    }

    /// Render every page into `dest`, mirroring the page tree.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Walk`] if page discovery fails and any
    /// assembly error verbatim. Per-page render and write failures are
    /// logged and counted in the summary instead.
    pub fn build(&self, data: &SiteData, dest: &Path) -> Result<BuildSummary, SiteError> {
        let pages = self
            .store
            .list(&self.config.page_dir)
            .map_err(|source| SiteError::Walk {
                path: self.config.page_dir.clone(),
                source,
            })?;

        let mut units: HashMap<String, TemplateUnit> = HashMap::new();
        let mut summary = BuildSummary::default();

        for rel_path in pages {
            let layout = resolve_layout(&template_name(&rel_path), &data.layouts);

            let unit = match units.entry(layout.to_owned()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(TemplateUnit::assemble(
                    self.store.as_ref(),
                    &self.config.layout_dir,
                    &self.config.part_dir,
                    layout,
                )?),
            };

            let result = self
                .renderer
                .render(unit, &rel_path, data)
                .and_then(|bytes| write_output(dest, &rel_path, &bytes));

            match result {
                Ok(dest_path) => {
                    tracing::info!(
                        page = %rel_path.display(),
                        layout,
                        dest = %dest_path.display(),
                        "wrote page"
                    );
                    summary.written += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        page = %rel_path.display(),
                        layout,
                        %error,
                        "page skipped"
                    );
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Render a single page into `dest`.
    ///
    /// Used for targeted rebuilds of one page; assembles the page's
    /// layout fresh.
    ///
    /// # Errors
    ///
    /// Returns any assembly, render, or write error verbatim.
    pub fn build_page(
        &self,
        data: &SiteData,
        page_rel_path: &Path,
        dest: &Path,
    ) -> Result<(), SiteError> {
        let layout = resolve_layout(&template_name(page_rel_path), &data.layouts);
        let unit = TemplateUnit::assemble(
            self.store.as_ref(),
            &self.config.layout_dir,
            &self.config.part_dir,
            layout,
        )?;

        let bytes = self.renderer.render(&unit, page_rel_path, data)?;
        let dest_path = write_output(dest, page_rel_path, &bytes)?;

        tracing::info!(
            page = %page_rel_path.display(),
            layout,
            dest = %dest_path.display(),
            "wrote page"
        );
        Ok(())
    }
}

/// Write rendered bytes to `dest/rel_path`, creating directories as needed.
fn write_output(dest: &Path, rel_path: &Path, bytes: &[u8]) -> Result<PathBuf, SiteError> {
    let dest_path = dest.join(rel_path);

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(|source| SiteError::Write {
            path: dest_path.clone(),
            source,
        })?;
    }

    fs::write(&dest_path, bytes).map_err(|source| SiteError::Write {
        path: dest_path.clone(),
        source,
    })?;

    Ok(dest_path)
}
