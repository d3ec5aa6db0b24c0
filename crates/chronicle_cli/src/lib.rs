use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use chronicle_book::{build_manifest, compile_pdf, merge_years};
use chronicle_core::{
    build_sequence, synthesize, BuildInfo, ChronicleError, EnglishCalendar, Templates,
};

mod internal;
mod loader;

use internal::sha256_hex;
pub use loader::{load_fragments, FRAGMENT_CONTENT_FILE, FRAGMENT_META_FILE};

pub const HTML_DIR: &str = "html";
pub const PDF_DIR: &str = "pdf";
pub const DEPS_DIR: &str = "dependencies";

#[derive(Debug, Clone)]
pub struct GenerateInput {
    pub input: PathBuf,
    pub templates: Option<PathBuf>,
    pub output: PathBuf,
    pub clean: bool,
    pub skip_pdf: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub html_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<String>,
    pub manifest_path: String,
    pub source_count: usize,
    pub html_sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub fragments_loaded: usize,
    pub fragments_synthesized: usize,
    pub years: Vec<YearSummary>,
}

/// Run the whole pipeline: load, bucket, synthesize, merge, write. Fails
/// fast on the first error; nothing is written until the corpus has been
/// fully loaded and checked.
pub fn generate(input: &GenerateInput) -> Result<GenerateOutput, ChronicleError> {
    let fragments = load_fragments(&input.input)?;
    let fragments_loaded = fragments.len();
    let manifest = build_manifest(&fragments);
    let mut sequence = build_sequence(fragments)?;

    let fragments_synthesized = match input.templates.as_ref() {
        Some(dir) => {
            let templates = Templates::open(dir)?;
            let build = BuildInfo::from_env();
            synthesize(&mut sequence, &templates, &EnglishCalendar, &build)?
        }
        None => 0,
    };

    let years = merge_years(&sequence);

    if input.clean && input.output.exists() {
        fs::remove_dir_all(&input.output).map_err(|err| {
            ChronicleError::Io(format!("clean {}: {}", input.output.display(), err))
        })?;
    }
    let html_dir = input.output.join(HTML_DIR);
    let pdf_dir = input.output.join(PDF_DIR);
    let deps_dir = input.output.join(DEPS_DIR);
    for dir in [&html_dir, &pdf_dir, &deps_dir] {
        fs::create_dir_all(dir)
            .map_err(|err| ChronicleError::Io(format!("mkdir {}: {}", dir.display(), err)))?;
    }

    let mut manifest_paths: HashMap<i32, (String, usize)> = HashMap::new();
    for entry in &manifest {
        let path = deps_dir.join(entry.file_name());
        fs::write(&path, entry.render_line())
            .map_err(|err| ChronicleError::Io(format!("write {}: {}", path.display(), err)))?;
        manifest_paths.insert(
            entry.year,
            (path.display().to_string(), entry.sources.len()),
        );
    }

    let mut summaries = Vec::new();
    for year in &years {
        let html_path = html_dir.join(format!("{}.html", year.year));
        fs::write(&html_path, &year.html).map_err(|err| {
            ChronicleError::Io(format!("write {}: {}", html_path.display(), err))
        })?;
        let pdf_path = if input.skip_pdf {
            None
        } else {
            let pdf = compile_pdf(&year.html, &html_dir)?;
            let path = pdf_dir.join(format!("{}.pdf", year.year));
            fs::write(&path, pdf).map_err(|err| {
                ChronicleError::Io(format!("write {}: {}", path.display(), err))
            })?;
            Some(path.display().to_string())
        };
        let (manifest_path, source_count) = manifest_paths
            .get(&year.year)
            .cloned()
            .unwrap_or_default();
        summaries.push(YearSummary {
            year: year.year,
            html_path: html_path.display().to_string(),
            pdf_path,
            manifest_path,
            source_count,
            html_sha256: sha256_hex(year.html.as_bytes()),
        });
    }

    Ok(GenerateOutput {
        fragments_loaded,
        fragments_synthesized,
        years: summaries,
    })
}

/// The five build-metadata values as (label, value) pairs for display.
pub fn build_info_fields(info: &BuildInfo) -> Vec<(&'static str, String)> {
    vec![
        ("build_id", info.build_id.clone()),
        ("build_date", info.build_date.clone()),
        ("git_commit", info.git_commit.clone()),
        ("git_branch", info.git_branch.clone()),
        ("git_url", info.git_url.clone()),
    ]
}

/// Template directory sanity check used before a run: every role the engine
/// can synthesize must have a template file present.
pub fn check_templates(dir: &Path) -> Result<(), ChronicleError> {
    for role in chronicle_core::ALL_ROLES {
        let path = dir.join(format!("{}.html", role.template_name()));
        if !path.is_file() {
            return Err(ChronicleError::TemplateNotFound(
                role.template_name().to_string(),
            ));
        }
    }
    Ok(())
}
