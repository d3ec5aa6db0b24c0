use std::fs;
use std::path::{Path, PathBuf};

use chronicle_core::{ChronicleError, Fragment, FragmentMeta};

pub const FRAGMENT_META_FILE: &str = "fragment.json";
pub const FRAGMENT_CONTENT_FILE: &str = "fragment.html";

/// Walk the corpus root and load every fragment source. Any directory
/// containing a `fragment.json` is a fragment source; the usual layout is
/// `<root>/<year>/<month>/<fragment>/`, but no particular shape is required.
/// Listings are sorted so discovery order is deterministic.
pub fn load_fragments(root: &Path) -> Result<Vec<Fragment>, ChronicleError> {
    if !root.is_dir() {
        return Err(ChronicleError::Io(format!(
            "fragment directory not found: {}",
            root.display()
        )));
    }
    let mut fragments = Vec::new();
    walk(root, &mut fragments)?;
    Ok(fragments)
}

fn walk(dir: &Path, out: &mut Vec<Fragment>) -> Result<(), ChronicleError> {
    let meta_path = dir.join(FRAGMENT_META_FILE);
    if meta_path.is_file() {
        out.push(load_fragment_dir(dir, &meta_path)?);
        return Ok(());
    }
    let entries = fs::read_dir(dir)
        .map_err(|err| ChronicleError::Io(format!("read dir {}: {}", dir.display(), err)))?;
    let mut children: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|err| ChronicleError::Io(format!("read dir {}: {}", dir.display(), err)))?;
        let path = entry.path();
        if path.is_dir() {
            children.push(path);
        }
    }
    children.sort();
    for child in children {
        walk(&child, out)?;
    }
    Ok(())
}

fn load_fragment_dir(dir: &Path, meta_path: &Path) -> Result<Fragment, ChronicleError> {
    let source = dir.display().to_string();
    let raw = fs::read_to_string(meta_path)
        .map_err(|err| ChronicleError::Io(format!("read {}: {}", meta_path.display(), err)))?;
    let meta: FragmentMeta =
        serde_json::from_str(&raw).map_err(|err| ChronicleError::Parse {
            source: source.clone(),
            message: err.to_string(),
        })?;
    let content = match meta.content {
        Some(content) => content,
        None => {
            let content_path = dir.join(FRAGMENT_CONTENT_FILE);
            fs::read_to_string(&content_path).map_err(|err| ChronicleError::Parse {
                source: source.clone(),
                message: format!(
                    "no inline content and no {}: {}",
                    FRAGMENT_CONTENT_FILE, err
                ),
            })?
        }
    };
    Fragment::authored(meta.year, meta.month, meta.day, meta.order, content, source)
}
