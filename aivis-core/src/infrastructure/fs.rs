// aivis-core/src/infrastructure/fs.rs

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::ports::ReportRenderer;
use crate::domain::scoring::PageScoreReport;
use crate::error::AivisError;
use crate::infrastructure::error::InfrastructureError;

/// Write content to a file atomically using a temporary file.
///
/// The temporary file lives in the target's directory so the final rename
/// never crosses filesystems: the target is either fully written or untouched.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;
    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// File stem derived from a page URL: `https://example.com/blog/post` becomes
/// `example.com_blog_post`.
pub fn report_slug(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let mut slug = String::with_capacity(without_scheme.len());
    for c in without_scheme.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "report".to_string()
    } else {
        slug.to_string()
    }
}

/// Report file stem: the readable slug plus a short digest of the full URL,
/// so URLs that slug alike (`/a/b` and `/a?b`) never share a file.
pub fn report_file_stem(url: &str) -> String {
    let digest = blake3::hash(url.as_bytes()).to_hex();
    format!("{}-{}", report_slug(url), &digest.as_str()[..REPORT_DIGEST_LEN])
}

const REPORT_DIGEST_LEN: usize = 8;

/// Renders `report` and writes it under `dir`, returning the written path.
pub fn write_report(
    dir: &Path,
    report: &PageScoreReport,
    renderer: &dyn ReportRenderer,
) -> Result<PathBuf, AivisError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", report_file_stem(&report.url), renderer.extension()));
    let content = renderer.render(report)?;
    atomic_write(&path, content)?;
    debug!(path = ?path, "Report written");
    Ok(path)
}
