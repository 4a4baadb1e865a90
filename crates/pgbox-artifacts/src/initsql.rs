//! Init-SQL artifact.
//!
//! Collects per-extension initialization SQL, deduplicated by content
//! checksum (two extensions whose statements are textually identical
//! collapse into one fragment), and renders fragments sorted by name
//! with begin/end comment wrappers.

use std::collections::HashMap;

use pgbox_blocks::content_checksum;

/// One named piece of initialization SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub sql: String,
}

/// The init-SQL artifact for one request.
#[derive(Debug, Clone, Default)]
pub struct InitSql {
    fragments: Vec<Fragment>,
    /// checksum -> index into `fragments`
    index: HashMap<String, usize>,
}

impl InitSql {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment. Content is trimmed and hashed; a fragment whose
    /// trimmed content matches an existing one collapses into it, and
    /// the lexicographically smallest name labels the survivor so the
    /// rendered file is independent of insertion order. Empty content
    /// is skipped outright.
    pub fn add_fragment(&mut self, name: impl Into<String>, sql: &str) {
        let sql = sql.trim();
        if sql.is_empty() {
            return;
        }
        let name = name.into();
        let checksum = content_checksum(sql);
        match self.index.get(&checksum) {
            Some(&i) => {
                if name < self.fragments[i].name {
                    self.fragments[i].name = name;
                }
            }
            None => {
                self.index.insert(checksum, self.fragments.len());
                self.fragments.push(Fragment {
                    name,
                    sql: sql.to_string(),
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Fragments sorted by name, independent of insertion order.
    pub fn ordered_fragments(&self) -> Vec<&Fragment> {
        let mut ordered: Vec<&Fragment> = self.fragments.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));
        ordered
    }

    /// Render as SQL lines, each fragment wrapped in begin/end
    /// comments so regenerated files remain diffable.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for fragment in self.ordered_fragments() {
            lines.push(format!("-- pgbox: begin {}", fragment.name));
            lines.extend(fragment.sql.lines().map(str::to_string));
            lines.push(format!("-- pgbox: end {}", fragment.name));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_content_different_names_collapses() {
        let mut init = InitSql::new();
        init.add_fragment("extA", "CREATE EXTENSION IF NOT EXISTS foo;");
        init.add_fragment("extB", "CREATE EXTENSION IF NOT EXISTS foo;");
        assert_eq!(init.len(), 1);
        assert_eq!(init.ordered_fragments()[0].name, "extA");
    }

    #[test]
    fn collapsed_fragment_keeps_smallest_name_either_way() {
        let mut init = InitSql::new();
        init.add_fragment("extB", "CREATE EXTENSION IF NOT EXISTS foo;");
        init.add_fragment("extA", "CREATE EXTENSION IF NOT EXISTS foo;");
        assert_eq!(init.len(), 1);
        // same label as inserting extA first
        assert_eq!(init.ordered_fragments()[0].name, "extA");
    }

    #[test]
    fn trimming_happens_before_dedup() {
        let mut init = InitSql::new();
        init.add_fragment("a", "CREATE EXTENSION IF NOT EXISTS foo;");
        init.add_fragment("b", "  CREATE EXTENSION IF NOT EXISTS foo;\n\n");
        assert_eq!(init.len(), 1);
    }

    #[test]
    fn empty_content_is_skipped() {
        let mut init = InitSql::new();
        init.add_fragment("auto_explain", "   \n  ");
        assert!(init.is_empty());
    }

    #[test]
    fn repeated_add_is_idempotent() {
        let mut init = InitSql::new();
        init.add_fragment("hstore", "CREATE EXTENSION IF NOT EXISTS hstore;");
        init.add_fragment("hstore", "CREATE EXTENSION IF NOT EXISTS hstore;");
        assert_eq!(init.len(), 1);
    }

    #[test]
    fn fragments_ordered_by_name_not_insertion() {
        let mut init = InitSql::new();
        init.add_fragment("zeta", "CREATE EXTENSION IF NOT EXISTS zeta;");
        init.add_fragment("alpha", "CREATE EXTENSION IF NOT EXISTS alpha;");
        let names: Vec<&str> = init
            .ordered_fragments()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn render_wraps_fragments_in_comments() {
        let mut init = InitSql::new();
        init.add_fragment("hstore", "CREATE EXTENSION IF NOT EXISTS hstore;");
        assert_eq!(
            init.render(),
            vec![
                "-- pgbox: begin hstore",
                "CREATE EXTENSION IF NOT EXISTS hstore;",
                "-- pgbox: end hstore",
            ]
        );
    }

    #[test]
    fn multiline_fragment_renders_all_lines() {
        let mut init = InitSql::new();
        init.add_fragment(
            "earthdistance",
            "CREATE EXTENSION IF NOT EXISTS cube;\nCREATE EXTENSION IF NOT EXISTS earthdistance;",
        );
        let lines = init.render();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "CREATE EXTENSION IF NOT EXISTS cube;");
        assert_eq!(lines[2], "CREATE EXTENSION IF NOT EXISTS earthdistance;");
    }
}
