use crate::error::ForgeError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::io;
use std::path::Path;

/// Name of the rules file read from the top of every root
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Ignore rules loaded from a `.gitignore`-formatted file
///
/// Rules are plain globs matched against the final path segment only. A directory
/// is also tested as `name/`, so a rule like `build/` matches the directory but
/// not a file called `build`. There is no negation, anchoring or `**` handling and
/// nested `.gitignore` files are not consulted.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    globs: GlobSet,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnoreRules {
    /// A rule set that matches nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
        }
    }

    /// Build rules from patterns in file order
    ///
    /// Patterns that are not valid globs are dropped with a warning, the rest are kept.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let pattern = pattern.into();
            match Glob::new(&pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    kept.push(pattern);
                }
                Err(e) => {
                    tracing::warn!("Skipping invalid ignore rule '{}': {}", pattern, e);
                }
            }
        }

        match builder.build() {
            Ok(globs) => Self {
                patterns: kept,
                globs,
            },
            Err(e) => {
                tracing::warn!("Failed to compile ignore rules, ignoring them: {}", e);
                Self::empty()
            }
        }
    }

    /// Parse rules from the contents of a rules file
    pub fn parse(content: &str) -> Self {
        Self::new(process_ignore_lines(content))
    }

    /// Read `.gitignore` from the top of `root`
    ///
    /// A missing file (or a root that is not a directory) yields the empty set.
    pub fn from_root(root: &Path) -> io::Result<Self> {
        let path = root.join(GITIGNORE_FILE);
        if !path.is_file() {
            return Ok(Self::empty());
        }
        let content = fs::read_to_string(&path)?;
        let rules = Self::parse(&content);
        tracing::debug!("Loaded {} ignore rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Rules in file order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check whether `path` is excluded, testing the directory form when it is a directory
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_empty() {
            return false;
        }
        let Some(name) = path.file_name() else {
            return false;
        };
        self.matches_name(&name.to_string_lossy(), path.is_dir())
    }

    /// Check a bare entry name, with the directory-suffix convention when `is_dir`
    pub fn matches_name(&self, name: &str, is_dir: bool) -> bool {
        if self.globs.is_match(name) {
            return true;
        }
        is_dir && self.globs.is_match(format!("{name}/"))
    }
}

/// Ad-hoc ignore globs given on the command line or in configuration
///
/// Matched against the bare entry name, never with the directory suffix.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
    globs: GlobSet,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
        }
    }
}

impl IgnorePatterns {
    /// Compile patterns, rejecting the whole set if any pattern is invalid
    pub fn new(patterns: &[String]) -> Result<Self, ForgeError> {
        let globs = compile_glob_patterns(patterns)?;
        Ok(Self {
            patterns: patterns.to_vec(),
            globs,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        !self.is_empty() && self.globs.is_match(name)
    }
}

/// Compile a list of glob patterns into a GlobSet
fn compile_glob_patterns(patterns: &[String]) -> Result<GlobSet, ForgeError> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            ForgeError::InvalidCriteria(format!("Invalid ignore pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| ForgeError::InvalidCriteria(format!("Failed to build ignore patterns: {e}")))
}

/// Extract rules from ignore-file content, skipping blank lines and comments
fn process_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_rules_match_nothing() {
        let rules = IgnoreRules::empty();
        assert!(!rules.matches_name("anything.txt", false));
        assert!(!rules.matches_name("dir", true));
        assert!(!rules.matches(Path::new("/tmp")));
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let rules = IgnoreRules::parse("# build output\n\ntarget/\n  *.log  \n#*.tmp\nsecret.env\n");
        assert_eq!(rules.patterns(), ["target/", "*.log", "secret.env"]);
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let rules = IgnoreRules::parse("b.txt\na.txt\nb.txt\n");
        assert_eq!(rules.patterns(), ["b.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_basename_matching() {
        let rules = IgnoreRules::parse("*.log\nignored.txt\n");
        assert!(rules.matches_name("debug.log", false));
        assert!(rules.matches_name("ignored.txt", false));
        assert!(!rules.matches_name("included.txt", false));
    }

    #[test]
    fn test_directory_suffix_convention() {
        let rules = IgnoreRules::parse("build/\n");
        assert!(rules.matches_name("build", true));
        assert!(!rules.matches_name("build", false));
    }

    #[test]
    fn test_full_path_patterns_are_not_supported() {
        // Rules only ever see the final segment, so anchored or nested patterns never match
        let rules = IgnoreRules::parse("src/generated.rs\n/root.txt\n**/deep.txt\n");
        assert!(!rules.matches_name("generated.rs", false));
        assert!(!rules.matches_name("root.txt", false));
        assert!(!rules.matches(Path::new("project/src/generated.rs")));
    }

    #[test]
    fn test_negation_is_not_supported() {
        let rules = IgnoreRules::parse("*.txt\n!keep.txt\n");
        assert!(rules.matches_name("keep.txt", false));
    }

    #[test]
    fn test_invalid_rule_is_skipped() {
        let rules = IgnoreRules::parse("[unclosed\nvalid.txt\n");
        assert_eq!(rules.patterns(), ["valid.txt"]);
        assert!(rules.matches_name("valid.txt", false));
    }

    #[test]
    fn test_matches_checks_filesystem_for_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("cache");
        fs::create_dir(&dir).unwrap();
        let file = temp_dir.path().join("cache.txt");
        fs::write(&file, "x").unwrap();

        let rules = IgnoreRules::parse("cache/\n");
        assert!(rules.matches(&dir));
        assert!(!rules.matches(&file));
    }

    #[test]
    fn test_from_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(IgnoreRules::from_root(temp_dir.path()).unwrap().is_empty());

        fs::write(temp_dir.path().join(GITIGNORE_FILE), "ignored.txt\n").unwrap();
        let rules = IgnoreRules::from_root(temp_dir.path()).unwrap();
        assert_eq!(rules.patterns(), ["ignored.txt"]);

        // A file root has no rules file beneath it
        let file = temp_dir.path().join("single.txt");
        fs::write(&file, "x").unwrap();
        assert!(IgnoreRules::from_root(&file).unwrap().is_empty());
    }

    #[test]
    fn test_ignore_patterns() {
        let patterns = IgnorePatterns::new(&["*.txt".to_string(), "node_modules".to_string()]).unwrap();
        assert!(patterns.matches_name("notes.txt"));
        assert!(patterns.matches_name("node_modules"));
        assert!(!patterns.matches_name("keep.py"));
        assert!(!IgnorePatterns::default().matches_name("anything"));
    }

    #[test]
    fn test_invalid_ignore_pattern_is_rejected() {
        let err = IgnorePatterns::new(&["[oops".to_string()]).unwrap_err();
        assert!(err.is_config_error());
    }
}
