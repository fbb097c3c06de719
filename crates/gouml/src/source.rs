//! Loading Go sources from disk or memory.
//!
//! Files are discovered in sorted path order, test files are skipped, each
//! file is parsed, and the results are grouped into [`SourcePackage`]s by
//! their `package` clause. The first file that fails to parse aborts loading.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info, trace};
use walkdir::{DirEntry, WalkDir};

use gouml_parser::ast::SourceFile;

use crate::{GoumlError, config::SourceConfig};

const GO_EXTENSION: &str = "go";

/// The parsed files of one Go package, in load order.
#[derive(Debug, Clone)]
pub struct SourcePackage {
    name: String,
    files: Vec<(PathBuf, SourceFile)>,
}

impl SourcePackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    /// The package name from the `package` clause.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[(PathBuf, SourceFile)] {
        &self.files
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, file: SourceFile) {
        self.files.push((path.into(), file));
    }
}

/// Returns `true` for hidden directories such as `.git`.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Find the Go source files under `dir`.
///
/// Only the top level is listed unless the configuration is recursive.
/// Hidden directories and directories named in the ignore list are skipped,
/// as are test files. The result is sorted by path.
///
/// # Errors
///
/// Returns [`GoumlError::Io`] if `dir` does not exist, is not a directory,
/// or cannot be walked.
pub fn discover(dir: &Path, config: &SourceConfig) -> Result<Vec<PathBuf>, GoumlError> {
    let metadata = fs::metadata(dir)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", dir.display()),
        )
        .into());
    }

    let max_depth = if config.recursive() { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && (is_hidden(entry)
                    || (entry.depth() > 0
                        && config.is_ignored_dir(&entry.file_name().to_string_lossy()))))
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != GO_EXTENSION) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if config.is_test_file(&file_name) {
            trace!(path = path.display().to_string(); "Skipping test file");
            continue;
        }

        paths.push(path.to_path_buf());
    }

    paths.sort();
    debug!(dir = dir.display().to_string(), files = paths.len(); "Discovered Go files");
    Ok(paths)
}

/// Group parsed files by package name, keeping first-seen package order.
#[derive(Debug, Default)]
struct PackageGrouper {
    packages: IndexMap<String, SourcePackage>,
}

impl PackageGrouper {
    fn add(&mut self, path: PathBuf, file: SourceFile) {
        debug!(
            path = path.display().to_string(),
            package = file.package.as_str(),
            decls = file.decls.len();
            "Parsed file"
        );
        self.packages
            .entry(file.package.clone())
            .or_insert_with_key(|name| SourcePackage::new(name.as_str()))
            .push(path, file);
    }

    fn finish(self) -> Vec<SourcePackage> {
        self.packages.into_values().collect()
    }
}

fn parse_source(path: &Path, source: &str) -> Result<SourceFile, GoumlError> {
    gouml_parser::parse(source).map_err(|err| GoumlError::new_parse_error(err, source, path))
}

/// Read and parse each file, grouping the results into packages.
///
/// # Errors
///
/// Returns [`GoumlError::Io`] for unreadable files and [`GoumlError::Parse`]
/// for the first file that does not parse. No packages are returned on error.
pub fn parse_files(paths: &[PathBuf]) -> Result<Vec<SourcePackage>, GoumlError> {
    let mut grouper = PackageGrouper::default();

    for path in paths {
        let source = fs::read_to_string(path).map_err(|err| {
            io::Error::new(err.kind(), format!("{}: {err}", path.display()))
        })?;
        let file = parse_source(path, &source)?;
        grouper.add(path.clone(), file);
    }

    let packages = grouper.finish();
    info!(files = paths.len(), packages = packages.len(); "Loaded Go sources");
    Ok(packages)
}

/// Parse in-memory `(path, source)` pairs as if they had been read from disk.
///
/// Test files are skipped according to `config`. Sources are taken in the
/// given order; the paths only name the files.
///
/// # Errors
///
/// Returns [`GoumlError::Parse`] for the first source that does not parse.
pub fn load_sources<'a, I, P>(
    sources: I,
    config: &SourceConfig,
) -> Result<Vec<SourcePackage>, GoumlError>
where
    I: IntoIterator<Item = (P, &'a str)>,
    P: Into<PathBuf>,
{
    let mut grouper = PackageGrouper::default();

    for (path, source) in sources {
        let path: PathBuf = path.into();
        let is_test = path
            .file_name()
            .is_some_and(|name| config.is_test_file(&name.to_string_lossy()));
        if is_test {
            trace!(path = path.display().to_string(); "Skipping test file");
            continue;
        }

        let file = parse_source(&path, source)?;
        grouper.add(path, file);
    }

    Ok(grouper.finish())
}
