mod manifest;
mod merge;
mod pdf;

pub use manifest::{build_manifest, output_target, ManifestEntry};
pub use merge::{collapse_continuations, merge_years, YearHtml};
pub use pdf::compile_pdf;
