use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettingsError;
use crate::renderer::{DependencyManager, Format, IgnorePattern, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    #[default]
    Lf,
    Crlf,
}

impl LineTerminator {
    pub fn as_str(self) -> &'static str {
        match self {
            LineTerminator::Lf => "\n",
            LineTerminator::Crlf => "\r\n",
        }
    }
}

/// User settings, read from `settings.toml`.
///
/// ```toml
/// indent = 2
/// line_terminator = "crlf"
/// max_depth = 64
/// ignore_packages = ["com.acme.generated"]
/// ignore_patterns = ['^org\.jooq\.impl\..*$']
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spaces per indentation level.
    pub indent: usize,
    pub line_terminator: LineTerminator,
    pub max_depth: usize,
    /// Packages whose direct members are never imported.
    pub ignore_packages: Vec<String>,
    /// Regular expressions matched against fully-qualified names.
    pub ignore_patterns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: 4,
            line_terminator: LineTerminator::Lf,
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_packages: Vec::new(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl Settings {
    /// `<config dir>/modelgen/settings.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("modelgen").join("settings.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given (it must exist), otherwise the default location
    /// if a file is there, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn format(&self) -> Format {
        Format::spaces(self.indent).with_line_terminator(self.line_terminator.as_str())
    }

    /// `base` followed by the configured packages and patterns.
    pub fn ignore(&self, base: Vec<IgnorePattern>) -> Result<Vec<IgnorePattern>, SettingsError> {
        let mut patterns = base;
        patterns.extend(self.ignore_packages.iter().map(IgnorePattern::members));
        for pattern in &self.ignore_patterns {
            patterns.push(IgnorePattern::regex(pattern)?);
        }
        Ok(patterns)
    }

    pub fn dependency_manager(
        &self,
        base: Vec<IgnorePattern>,
    ) -> Result<DependencyManager, SettingsError> {
        Ok(DependencyManager::new(self.ignore(base)?))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_settings(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let file = write_settings("indent = 2\n");
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.indent, 2);
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(settings.format(), Format::spaces(2));
    }

    #[test]
    fn crlf_and_ignores() {
        let file = write_settings(
            r#"
line_terminator = "crlf"
ignore_packages = ["com.acme.generated"]
ignore_patterns = ['^org\.jooq\..*$']
"#,
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.format().nl(), "\r\n");

        let deps = settings.dependency_manager(Vec::new()).unwrap();
        assert!(deps.is_ignored("com.acme.generated.Widget"));
        assert!(deps.is_ignored("org.jooq.Record"));
        assert!(!deps.is_ignored("com.acme.Widget"));
    }

    #[test]
    fn bad_files_are_reported() {
        let file = write_settings("indent = \"wide\"\n");
        assert!(matches!(
            Settings::load(file.path()),
            Err(SettingsError::Parse { .. })
        ));

        let file = write_settings("ignore_patterns = [\"(\"]\n");
        let settings = Settings::load(file.path()).unwrap();
        assert!(matches!(
            settings.ignore(Vec::new()),
            Err(SettingsError::Pattern { .. })
        ));

        let missing = Path::new("/nonexistent/modelgen/settings.toml");
        assert!(matches!(
            Settings::load_or_default(Some(missing)),
            Err(SettingsError::Io { .. })
        ));
    }
}
