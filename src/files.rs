use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};
use crate::language;

/// Decides which tracked files take part in the analysis.
///
/// Applied in order: extension/language filter, exclude globs, restrict-to
/// globs. Globs match the repository-relative path and `*` does not cross
/// a `/`.
#[derive(Debug, Default)]
pub struct FileFilter {
    extensions: HashSet<String>,
    filenames: HashSet<String>,
    exclude: Option<GlobSet>,
    restrict_to: Option<GlobSet>,
}

impl FileFilter {
    pub fn new(
        extensions: &[String],
        languages: &[String],
        exclude: &[String],
        restrict_to: &[String],
    ) -> Result<Self> {
        let mut filter = FileFilter {
            extensions: extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            filenames: HashSet::new(),
            exclude: build_globs(exclude)?,
            restrict_to: build_globs(restrict_to)?,
        };

        for name in languages {
            let spec = language::find(name).ok_or_else(|| Error::UnknownLanguage(name.clone()))?;
            filter
                .extensions
                .extend(spec.extensions.iter().map(|e| e.to_string()));
            filter
                .filenames
                .extend(spec.filenames.iter().map(|f| f.to_string()));
        }

        Ok(filter)
    }

    pub fn matches(&self, path: &Path) -> bool {
        if !self.extensions.is_empty() || !self.filenames.is_empty() {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            let by_ext = file_name
                .rfind('.')
                .is_some_and(|dot| self.extensions.contains(&file_name[dot + 1..]));
            if !by_ext && !self.filenames.contains(file_name) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude
            && exclude.is_match(path)
        {
            return false;
        }

        match &self.restrict_to {
            Some(restrict) => restrict.is_match(path),
            None => true,
        }
    }

    pub fn apply(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files.into_iter().filter(|f| self.matches(f)).collect()
    }
}

fn build_globs(patterns: &[String]) -> Result<Option<GlobSet>> {
    let patterns: Vec<&str> = patterns
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
    }
    Ok(Some(builder.build()?))
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
