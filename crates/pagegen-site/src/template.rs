//! Template assembly: layout plus shared parts in one strict namespace.

use std::path::{Component, Path};

use minijinja::{Environment, UndefinedBehavior};

use pagegen_storage::{FileStore, StoreError, StoreErrorKind};

use crate::error::SiteError;

/// An assembled, ready-to-render template.
///
/// Holds the layout and every file from the part directory as named
/// templates in one [`Environment`], configured to hard-error on any
/// reference to an undefined field. Assembly is deterministic and
/// side-effect free, so units can be cached by layout filename for the
/// duration of a run. A unit is never mutated by rendering; the renderer
/// works on a clone of the environment.
#[derive(Debug)]
pub struct TemplateUnit {
    layout_name: String,
    env: Environment<'static>,
}

impl TemplateUnit {
    /// Assemble the layout `layout_dir/layout_name` together with every
    /// regular file under `part_dir`.
    ///
    /// Parts are named by their path relative to `part_dir` with forward
    /// slashes, so a layout includes `part/nav/menu.html` as
    /// `{% include "nav/menu.html" %}`. A missing part directory means
    /// "no parts" and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::TemplateNotFound`] /
    /// [`SiteError::TemplatePermission`] / [`SiteError::Read`] if the
    /// layout is absent or unreadable, [`SiteError::TemplateParse`] if
    /// it has a syntax error, and [`SiteError::PartsLoad`] if the part
    /// walk fails or a part does not parse.
    pub fn assemble(
        store: &dyn FileStore,
        layout_dir: &Path,
        part_dir: &Path,
        layout_name: &str,
    ) -> Result<Self, SiteError> {
        let layout_path = layout_dir.join(layout_name);
        let layout_source = store.read(&layout_path).map_err(|source| match source.kind {
            StoreErrorKind::NotFound => SiteError::TemplateNotFound {
                path: layout_path.clone(),
                source,
            },
            StoreErrorKind::PermissionDenied => SiteError::TemplatePermission {
                path: layout_path.clone(),
                source,
            },
            _ => SiteError::Read {
                path: layout_path.clone(),
                source,
            },
        })?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_template_owned(layout_name.to_owned(), layout_source)
            .map_err(|source| SiteError::TemplateParse {
                path: layout_path,
                source,
            })?;

        for rel_path in list_parts(store, part_dir)? {
            let part_path = part_dir.join(&rel_path);
            let part_source =
                store
                    .read(&part_path)
                    .map_err(|source| SiteError::PartsLoad {
                        path: part_path.clone(),
                        source: Box::new(source),
                    })?;

            env.add_template_owned(template_name(&rel_path), part_source)
                .map_err(|source| SiteError::PartsLoad {
                    path: part_path,
                    source: Box::new(source),
                })?;
        }

        Ok(Self {
            layout_name: layout_name.to_owned(),
            env,
        })
    }

    /// The layout filename this unit was built from.
    #[must_use]
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// The composed template environment.
    pub(crate) fn env(&self) -> &Environment<'static> {
        &self.env
    }
}

/// List part files, treating a missing part directory as empty.
fn list_parts(
    store: &dyn FileStore,
    part_dir: &Path,
) -> Result<Vec<std::path::PathBuf>, SiteError> {
    match store.list(part_dir) {
        Ok(files) => Ok(files),
        Err(StoreError {
            kind: StoreErrorKind::NotFound,
            ..
        }) => Ok(Vec::new()),
        Err(source) => Err(SiteError::PartsLoad {
            path: part_dir.to_path_buf(),
            source: Box::new(source),
        }),
    }
}

/// Template name for a relative path: segments joined by forward slashes.
pub(crate) fn template_name(rel_path: &Path) -> String {
    let segments: Vec<&str> = rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    segments.join("/")
}
