//! Add-on packaging into `.mcaddon` archives.
//!
//! Walks each pack directory, stores every file under
//! `<pack dir name>/<relative path>` in a deflate-compressed zip, and
//! reports the SHA-256 digest of the result.

use super::packaging_error::PackagingError;
use log::{debug, trace, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Input parameters for the [`package_addon`] function.
#[derive(Debug, Clone)]
pub struct PackageParams {
    /// Pack directories to include, in archive order.
    pub pack_dirs: Vec<PathBuf>,
    /// Where the archive is written.
    pub archive_path: PathBuf,
}

/// Output produced by [`package_addon`].
#[derive(Debug, Clone)]
pub struct PackageOutput {
    /// Path to the created archive.
    pub archive_path: PathBuf,
    /// Entry names written to the archive, in order.
    pub entries: Vec<String>,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
}

/// Return the name a pack directory's entries are stored under.
///
/// # Errors
///
/// Returns [`PackagingError::UnnamedPackDir`] when the path has no final
/// normal component (for example `/` or `..`).
pub fn pack_dir_name(dir: &Path) -> Result<String, PackagingError> {
    match dir.components().next_back() {
        Some(Component::Normal(name)) => Ok(name.to_string_lossy().into_owned()),
        _ => Err(PackagingError::UnnamedPackDir(dir.to_path_buf())),
    }
}

/// Check that no two pack directories would store entries under the same
/// name.
///
/// # Errors
///
/// Returns [`PackagingError::DuplicatePackName`] on the first collision, or
/// [`PackagingError::UnnamedPackDir`] for a directory without a name.
pub fn ensure_distinct_pack_names(pack_dirs: &[PathBuf]) -> Result<(), PackagingError> {
    let mut seen: Vec<(String, &PathBuf)> = Vec::with_capacity(pack_dirs.len());
    for dir in pack_dirs {
        let name = pack_dir_name(dir)?;
        if let Some((_, first)) = seen.iter().find(|(existing, _)| *existing == name) {
            return Err(PackagingError::DuplicatePackName {
                name,
                first: (*first).clone(),
                second: dir.clone(),
            });
        }
        seen.push((name, dir));
    }
    Ok(())
}

/// Collect `(source_path, archive_name)` pairs for every file under the
/// pack directories.
///
/// Files are visited in file-name order so archives are reproducible.
/// Directories that do not exist are skipped with a warning; symlinks to
/// directories are not followed.
///
/// # Errors
///
/// Returns [`PackagingError::Walk`] if a directory cannot be read.
pub fn collect_entries(pack_dirs: &[PathBuf]) -> Result<Vec<(PathBuf, String)>, PackagingError> {
    let mut entries = Vec::new();
    for dir in pack_dirs {
        if !dir.is_dir() {
            warn!("pack directory {} does not exist; skipping", dir.display());
            continue;
        }
        let prefix = pack_dir_name(dir)?;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            let name = archive_name(&prefix, relative);
            trace!("queued {} as {name}", entry.path().display());
            entries.push((entry.into_path(), name));
        }
    }
    Ok(entries)
}

/// Join a pack prefix and a relative path with `/` separators.
fn archive_name(prefix: &str, relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .fold(prefix.to_owned(), |mut name, part| {
            name.push('/');
            name.push_str(&part);
            name
        })
}

/// Create a deflate-compressed zip archive at `output_path`.
///
/// Each entry in `files` is a `(source_path, archive_name)` pair.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if a source file cannot be read or the
/// archive cannot be written, or [`PackagingError::Zip`] if the zip writer
/// rejects an entry.
pub fn create_archive(
    output_path: &Path,
    files: &[(PathBuf, String)],
) -> Result<(), PackagingError> {
    let output_file = fs::File::create(output_path)?;
    let mut writer = ZipWriter::new(output_file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (source_path, archive_name) in files {
        writer.start_file(archive_name.as_str(), options)?;
        let mut source = fs::File::open(source_path)?;
        io::copy(&mut source, &mut writer)?;
    }

    writer.finish()?;
    Ok(())
}

/// Compute the SHA-256 digest of a file as lowercase hex.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String, PackagingError> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Package the pack directories into a single `.mcaddon` archive.
///
/// # Errors
///
/// Returns [`PackagingError`] if the pack names collide, a directory
/// cannot be walked, or the archive cannot be written.
pub fn package_addon(params: &PackageParams) -> Result<PackageOutput, PackagingError> {
    ensure_distinct_pack_names(&params.pack_dirs)?;
    let files = collect_entries(&params.pack_dirs)?;
    debug!(
        "writing {} file(s) to {}",
        files.len(),
        params.archive_path.display()
    );

    create_archive(&params.archive_path, &files)?;
    let sha256 = compute_sha256(&params.archive_path)?;

    Ok(PackageOutput {
        archive_path: params.archive_path.clone(),
        entries: files.into_iter().map(|(_, name)| name).collect(),
        sha256,
    })
}

#[cfg(test)]
#[path = "packaging_tests.rs"]
mod tests;
