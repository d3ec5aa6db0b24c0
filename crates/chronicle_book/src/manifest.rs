use std::collections::HashMap;

use serde::Serialize;

use chronicle_core::{Fragment, FragmentKind};

/// Per-year dependency record: the derived output target plus the source
/// identifiers of every authored fragment feeding it, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub year: i32,
    pub target: String,
    pub sources: Vec<String>,
}

impl ManifestEntry {
    /// Make-style dependency line for an external incremental-build tool.
    pub fn render_line(&self) -> String {
        format!("{} : {}\n", self.target, self.sources.join(" "))
    }

    pub fn file_name(&self) -> String {
        format!("{}.d", self.year)
    }
}

pub fn output_target(year: i32) -> String {
    format!("pdf/{}.pdf", year)
}

/// Build the per-year manifest from fragments in their original discovery
/// order. Only authored fragments contribute; order within a year is
/// preserved exactly as discovered, whatever order the producer yielded.
pub fn build_manifest(fragments: &[Fragment]) -> Vec<ManifestEntry> {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut entries: Vec<ManifestEntry> = Vec::new();
    for fragment in fragments {
        if fragment.kind != FragmentKind::Authored {
            continue;
        }
        let Some(source) = fragment.source.as_ref() else {
            continue;
        };
        let slot = match index.get(&fragment.year) {
            Some(&slot) => slot,
            None => {
                entries.push(ManifestEntry {
                    year: fragment.year,
                    target: output_target(fragment.year),
                    sources: Vec::new(),
                });
                index.insert(fragment.year, entries.len() - 1);
                entries.len() - 1
            }
        };
        entries[slot].sources.push(source.clone());
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::{DayKey, Role};

    fn fragment(year: i32, month: u32, day: u32, order: &str, source: &str) -> Fragment {
        Fragment::authored(
            year,
            month,
            day,
            order.to_string(),
            String::new(),
            source.to_string(),
        )
        .expect("fragment")
    }

    #[test]
    fn discovery_order_is_preserved_per_year() {
        // Discovery order deliberately differs from chronological order.
        let fragments = vec![
            fragment(2021, 3, 1, "a", "f/2021/03/one"),
            fragment(2020, 6, 2, "a", "f/2020/06/two"),
            fragment(2021, 1, 9, "a", "f/2021/01/three"),
            fragment(2020, 1, 1, "a", "f/2020/01/four"),
        ];
        let manifest = build_manifest(&fragments);
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].year, 2021);
        assert_eq!(
            manifest[0].sources,
            vec!["f/2021/03/one", "f/2021/01/three"]
        );
        assert_eq!(manifest[1].year, 2020);
        assert_eq!(
            manifest[1].sources,
            vec!["f/2020/06/two", "f/2020/01/four"]
        );
    }

    #[test]
    fn year_partition_matches_fragment_years() {
        let fragments = vec![
            fragment(2020, 1, 1, "a", "a"),
            fragment(2020, 1, 1, "b", "b"),
            fragment(2021, 1, 1, "a", "c"),
        ];
        let manifest = build_manifest(&fragments);
        let total: usize = manifest.iter().map(|e| e.sources.len()).sum();
        assert_eq!(total, fragments.len());
        for entry in &manifest {
            for source in &entry.sources {
                let fragment = fragments
                    .iter()
                    .find(|f| f.source.as_deref() == Some(source.as_str()))
                    .expect("source belongs to a fragment");
                assert_eq!(fragment.year, entry.year);
            }
        }
    }

    #[test]
    fn synthesized_fragments_are_not_dependencies() {
        let day = DayKey {
            year: 2020,
            month: 1,
            day: 1,
        };
        let fragments = vec![
            fragment(2020, 1, 1, "a", "real"),
            Fragment::synthesized(Role::DayHeader, day, "<h3>x</h3>".to_string()),
        ];
        let manifest = build_manifest(&fragments);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest[0].sources, vec!["real"]);
    }

    #[test]
    fn line_format_is_make_style() {
        let entry = ManifestEntry {
            year: 2020,
            target: output_target(2020),
            sources: vec!["a/one".to_string(), "a/two".to_string()],
        };
        assert_eq!(entry.render_line(), "pdf/2020.pdf : a/one a/two\n");
        assert_eq!(entry.file_name(), "2020.d");
    }
}
