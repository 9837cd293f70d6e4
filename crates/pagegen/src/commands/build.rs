//! `pagegen build` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;

use pagegen_config::SiteData;
use pagegen_site::{SiteBuilder, SiteBuilderConfig};
use pagegen_storage::FsStore;

use crate::error::CliError;
use crate::output::Output;

/// Configuration filename under the source directory.
const DATA_FILE: &str = "data.toml";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Source directory holding layout/, part/, page/ and data.toml.
    #[arg(short, long)]
    source: PathBuf,

    /// Destination directory for rendered output.
    #[arg(short, long)]
    dest: PathBuf,

    /// Pages to render (relative to the page directory). With no pages,
    /// `all`, the data file, or a layout/part path, everything is rebuilt.
    pages: Vec<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let store = Arc::new(FsStore::new(self.source.clone()));
        let data = SiteData::load(store.as_ref(), Path::new(DATA_FILE))?;

        let config = SiteBuilderConfig::default();
        let full_build = wants_full_build(&self.pages, &self.source, &config);
        let builder = SiteBuilder::new(store, config);

        output.info(&format!("Source: {}", self.source.display()));
        output.info(&format!("Output: {}", self.dest.display()));

        if full_build {
            let summary = builder.build(&data, &self.dest)?;

            if summary.failed > 0 {
                output.warning(&format!("{} page(s) failed to render", summary.failed));
            }
            output.success(&format!("Rendered {} page(s)", summary.written));
            return Ok(());
        }

        let page = page_rel_path(&self.pages[0], &self.source);
        builder.build_page(&data, page, &self.dest)?;
        output.success(&format!("Rendered {}", page.display()));
        Ok(())
    }
}

/// Decide whether the given page arguments require a full rebuild.
///
/// No arguments, several arguments, `all`, the data file itself, or any
/// path under the layout or part directories all trigger a full rebuild:
/// a layout or part edit invalidates every page. Arguments may be given
/// relative to the source directory (`templates/data.toml`) or bare
/// (`data.toml`).
fn wants_full_build(pages: &[String], source: &Path, config: &SiteBuilderConfig) -> bool {
    let [only] = pages else {
        return true;
    };

    let path = Path::new(only);
    let path = path.strip_prefix(source).unwrap_or(path);
    only == "all"
        || path == Path::new(DATA_FILE)
        || path.starts_with(&config.layout_dir)
        || path.starts_with(&config.part_dir)
}

/// Page path relative to the page directory.
///
/// Accepts `blog/a.html`, `page/blog/a.html`, and the source-qualified
/// `templates/page/blog/a.html`.
fn page_rel_path<'a>(arg: &'a str, source: &Path) -> &'a Path {
    let path = Path::new(arg);
    let path = path.strip_prefix(source).unwrap_or(path);
    path.strip_prefix("page").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "templates";

    fn config() -> SiteBuilderConfig {
        SiteBuilderConfig::default()
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_owned()).collect()
    }

    fn full_build(pages: &[&str]) -> bool {
        wants_full_build(&strings(pages), Path::new(SOURCE), &config())
    }

    #[test]
    fn no_pages_is_full_build() {
        assert!(full_build(&[]));
    }

    #[test]
    fn several_pages_is_full_build() {
        assert!(full_build(&["page/a.html", "page/b.html"]));
    }

    #[test]
    fn all_keyword_is_full_build() {
        assert!(full_build(&["all"]));
    }

    #[test]
    fn data_file_is_full_build() {
        assert!(full_build(&["data.toml"]));
    }

    #[test]
    fn source_qualified_data_file_is_full_build() {
        assert!(full_build(&["templates/data.toml"]));
    }

    #[test]
    fn layout_path_is_full_build() {
        assert!(full_build(&["layout/main.html"]));
        assert!(full_build(&["templates/layout/main.html"]));
    }

    #[test]
    fn part_path_is_full_build() {
        assert!(full_build(&["part/header.html"]));
        assert!(full_build(&["templates/part/header.html"]));
    }

    #[test]
    fn single_page_is_targeted_build() {
        assert!(!full_build(&["page/blog/a.html"]));
        assert!(!full_build(&["templates/page/blog/a.html"]));
    }

    #[test]
    fn page_rel_path_strips_page_dir() {
        let source = Path::new(SOURCE);

        assert_eq!(
            page_rel_path("page/blog/a.html", source),
            Path::new("blog/a.html")
        );
        assert_eq!(
            page_rel_path("blog/a.html", source),
            Path::new("blog/a.html")
        );
        assert_eq!(
            page_rel_path("templates/page/blog/a.html", source),
            Path::new("blog/a.html")
        );
    }
}
