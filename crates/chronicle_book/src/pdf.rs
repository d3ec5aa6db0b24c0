use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chronicle_core::ChronicleError;

/// Hand a finished year document to the external HTML renderer and return
/// the binary PDF. `base_url` resolves relative resource references inside
/// the HTML.
pub fn compile_pdf(html: &str, base_url: &Path) -> Result<Vec<u8>, ChronicleError> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ChronicleError::Render(format!("clock error: {e}")))?
        .as_millis();
    let scratch = std::env::temp_dir().join(format!("chronicle-{stamp}-{}", std::process::id()));
    fs::create_dir_all(&scratch)
        .map_err(|e| ChronicleError::Render(format!("mkdir {}: {e}", scratch.display())))?;
    let html_path = scratch.join("year.html");
    let pdf_path = scratch.join("year.pdf");
    fs::write(&html_path, html)
        .map_err(|e| ChronicleError::Render(format!("write {}: {e}", html_path.display())))?;

    let output = Command::new("weasyprint")
        .arg("--base-url")
        .arg(base_url)
        .arg(&html_path)
        .arg(&pdf_path)
        .output()
        .map_err(|e| ChronicleError::Render(format!("failed to run `weasyprint` binary: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChronicleError::Render(format!(
            "weasyprint failed: {}",
            stderr.trim()
        )));
    }
    let pdf = fs::read(&pdf_path)
        .map_err(|e| ChronicleError::Render(format!("read {}: {e}", pdf_path.display())))?;
    let _ = fs::remove_dir_all(&scratch);
    Ok(pdf)
}
