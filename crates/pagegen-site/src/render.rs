//! Page rendering against an assembled template unit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::ErrorKind;

use pagegen_config::SiteData;
use pagegen_storage::{FileStore, StoreErrorKind};

use crate::context::template_context;
use crate::error::SiteError;
use crate::template::TemplateUnit;

/// Name under which page content is registered in the template namespace.
const PAGE_TEMPLATE: &str = "__page__";

/// Renders page content files through an assembled [`TemplateUnit`].
///
/// Rendering is a pure function of the unit, the page file, and the site
/// data: no side effects, and byte-identical output for identical inputs.
/// Output is buffered in full before being returned, so a failure midway
/// (a missing data key, say) yields an error and zero bytes, never a
/// truncated page.
pub struct PageRenderer {
    store: Arc<dyn FileStore>,
    page_dir: PathBuf,
}

impl PageRenderer {
    /// Create a renderer reading pages from `page_dir` through `store`.
    #[must_use]
    pub fn new(store: Arc<dyn FileStore>, page_dir: PathBuf) -> Self {
        Self { store, page_dir }
    }

    /// Render the page at `page_rel_path` with the given unit and data.
    ///
    /// The page content is parsed as one more template in the unit's
    /// namespace. A page that does not open with `{% extends %}` is
    /// implicitly wrapped to extend the unit's layout, so blocks the page
    /// defines override blocks declared by the layout or parts.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::PageNotFound`] / [`SiteError::PagePermission`]
    /// / [`SiteError::Read`] if the page file is absent or unreadable,
    /// [`SiteError::PageParse`] on a syntax error,
    /// [`SiteError::MissingKey`] if execution references a field absent
    /// from the data context, and [`SiteError::Execution`] for any other
    /// evaluation failure.
    pub fn render(
        &self,
        unit: &TemplateUnit,
        page_rel_path: &Path,
        data: &SiteData,
    ) -> Result<Vec<u8>, SiteError> {
        let page_path = self.page_dir.join(page_rel_path);
        let content = self.store.read(&page_path).map_err(|source| match source.kind {
            StoreErrorKind::NotFound => SiteError::PageNotFound {
                path: page_path.clone(),
                source,
            },
            StoreErrorKind::PermissionDenied => SiteError::PagePermission {
                path: page_path.clone(),
                source,
            },
            _ => SiteError::Read {
                path: page_path.clone(),
                source,
            },
        })?;

        let source = wrap_page(&content, unit.layout_name());

        // The unit stays immutable; the page template goes into a
        // per-render clone of its environment.
        let mut env = unit.env().clone();
        env.add_template_owned(PAGE_TEMPLATE.to_owned(), source)
            .map_err(|source| SiteError::PageParse {
                path: page_path.clone(),
                source,
            })?;

        let template = env
            .get_template(PAGE_TEMPLATE)
            .map_err(|source| SiteError::Execution {
                path: page_path.clone(),
                source,
            })?;

        let rendered = template
            .render(template_context(data))
            .map_err(|source| match source.kind() {
                ErrorKind::UndefinedError => SiteError::MissingKey {
                    path: page_path.clone(),
                    source,
                },
                _ => SiteError::Execution {
                    path: page_path.clone(),
                    source,
                },
            })?;

        Ok(rendered.into_bytes())
    }
}

/// Wrap page content so it extends its resolved layout.
///
/// Pages that already declare `{% extends %}` are left alone.
fn wrap_page(content: &str, layout_name: &str) -> String {
    if declares_extends(content) {
        content.to_owned()
    } else {
        format!("{{% extends {layout_name:?} %}}\n{content}")
    }
}

/// Whether content opens with an `extends` tag.
///
/// Whitespace inside the tag delimiter is optional and `{%-`/`{%+`
/// whitespace-control markers are allowed, so `{%extends "x"%}` counts.
fn declares_extends(content: &str) -> bool {
    let Some(tag) = content.trim_start().strip_prefix("{%") else {
        return false;
    };
    let tag = tag.strip_prefix(['-', '+']).unwrap_or(tag);
    match tag.trim_start().strip_prefix("extends") {
        Some(rest) => !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}
