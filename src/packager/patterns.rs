use crate::packager::PackagerError;
use regex::Regex;
use regex::RegexBuilder;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Compiled exclusion patterns matched against staged file paths.
#[derive(Clone, Debug, Default)]
pub struct ExclusionPatterns {
    patterns: Vec<Regex>,
}

impl ExclusionPatterns {
    /// Loads patterns from a file. A missing file yields no patterns.
    pub fn load(path: &Path) -> Result<Self, PackagerError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses one pattern per line, ignoring blank lines and `#` comments.
    /// A pattern ending in `/*` also implies the sibling `-*` pattern, so that
    /// `boto3/*` covers `boto3-1.20.0.dist-info/...` as well.
    pub fn parse(content: &str) -> Result<Self, PackagerError> {
        let mut sources: BTreeSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect();
        let siblings: Vec<String> = sources
            .iter()
            .filter_map(|source| source.strip_suffix("/*"))
            .map(|prefix| format!("{}-*", prefix))
            .collect();
        sources.extend(siblings);
        let patterns = sources
            .iter()
            .map(|source| compile(source))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if any pattern matches the whole relative path.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(relative_path))
    }

    /// Selects the paths that should be removed, preserving input order.
    pub fn select<'a>(&self, files: &'a [String]) -> Vec<&'a String> {
        files.iter().filter(|file| self.matches(file)).collect()
    }
}

/// `*` stands for any run of characters; everything else keeps its regex meaning.
fn compile(source: &str) -> Result<Regex, PackagerError> {
    let expression = format!("^{}$", source.replace('*', ".*"));
    RegexBuilder::new(&expression)
        .case_insensitive(true)
        .build()
        .map_err(|_| PackagerError::InvalidPattern(expression))
}
