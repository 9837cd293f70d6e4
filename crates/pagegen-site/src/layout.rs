//! Layout resolution by longest-path-prefix matching.

use pagegen_config::LayoutRule;

/// Layout used when no rule matches (or no rules exist).
pub const DEFAULT_LAYOUT: &str = "main.html";

/// Resolve which layout applies to a page path.
///
/// The page path is normalized with a leading `/` so prefix rules match
/// against an absolute-style path (`blog/a.html` is matched as
/// `/blog/a.html`). `rules` must be sorted longest-prefix-first, which is
/// how [`SiteData`] stores them; scanning in that order with
/// first-match-wins makes the most specific rule override more general
/// ancestor-directory rules without needing a trie.
///
/// This is a total function: with no rules or no matching rule it falls
/// back to [`DEFAULT_LAYOUT`]. A single-rule set short-circuits to that
/// rule's filename without any prefix check; the behavior is part of the
/// contract (see DESIGN.md).
///
/// [`SiteData`]: pagegen_config::SiteData
#[must_use]
pub fn resolve_layout<'a>(page_rel_path: &str, rules: &'a [LayoutRule]) -> &'a str {
    match rules {
        [] => DEFAULT_LAYOUT,
        [only] => &only.filename,
        _ => {
            let normalized = format!("/{page_rel_path}");
            rules
                .iter()
                .find(|rule| {
                    rule.path.len() <= normalized.len() && normalized.starts_with(&rule.path)
                })
                .map_or(DEFAULT_LAYOUT, |rule| &rule.filename)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(path: &str, filename: &str) -> LayoutRule {
        LayoutRule {
            path: path.to_owned(),
            filename: filename.to_owned(),
        }
    }

    #[test]
    fn empty_rules_use_default() {
        assert_eq!(resolve_layout("blog/a.html", &[]), DEFAULT_LAYOUT);
        assert_eq!(resolve_layout("", &[]), DEFAULT_LAYOUT);
    }

    #[test]
    fn single_rule_wins_without_prefix_check() {
        let rules = vec![rule("/very/narrow/prefix", "narrow.html")];

        assert_eq!(resolve_layout("about.html", &rules), "narrow.html");
        assert_eq!(resolve_layout("blog/a.html", &rules), "narrow.html");
    }

    #[test]
    fn longest_matching_prefix_wins() {
        // Stored order is longest-first, as SiteData::load produces.
        let rules = vec![
            rule("/blog/drafts", "draft.html"),
            rule("/blog", "blog.html"),
            rule("/", "main.html"),
        ];

        assert_eq!(resolve_layout("blog/drafts/x.html", &rules), "draft.html");
        assert_eq!(resolve_layout("blog/a.html", &rules), "blog.html");
        assert_eq!(resolve_layout("about.html", &rules), "main.html");
    }

    #[test]
    fn first_rule_wins_among_equal_lengths() {
        let rules = vec![rule("/blog", "first.html"), rule("/blog", "second.html")];

        assert_eq!(resolve_layout("blog/a.html", &rules), "first.html");
    }

    #[test]
    fn rule_longer_than_path_is_skipped() {
        let rules = vec![
            rule("/blog/a-very-long-prefix", "long.html"),
            rule("/b", "short.html"),
        ];

        assert_eq!(resolve_layout("blog", &rules), "short.html");
    }

    #[test]
    fn no_match_falls_back_to_default() {
        let rules = vec![rule("/blog", "blog.html"), rule("/docs", "docs.html")];

        assert_eq!(resolve_layout("about.html", &rules), DEFAULT_LAYOUT);
    }

    #[test]
    fn prefix_match_is_byte_for_byte() {
        // "/blogging/x.html" starts with "/blog" as raw bytes; the rule
        // applies even though "blogging" is a different directory.
        let rules = vec![rule("/blog", "blog.html"), rule("/", "main.html")];

        assert_eq!(resolve_layout("blogging/x.html", &rules), "blog.html");
    }

    #[test]
    fn scenario_blog_page() {
        let rules = vec![rule("/blog", "blog.html"), rule("/", "main.html")];

        assert_eq!(resolve_layout("blog/a.html", &rules), "blog.html");
    }

    #[test]
    fn scenario_top_level_page() {
        let rules = vec![rule("/blog", "blog.html"), rule("/", "main.html")];

        assert_eq!(resolve_layout("about.html", &rules), "main.html");
    }
}
