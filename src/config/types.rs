use std::path::{Path, PathBuf};

/// Default fragment order: design tokens first, then base rules, then components
pub const DEFAULT_FRAGMENTS: [&str; 3] = ["tokens.css", "base.css", "components.css"];

/// Root configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Stylesheet aggregation settings
    pub build: BuildConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Stylesheet aggregation settings
///
/// The fragment list is ordered: later fragments override earlier ones under
/// normal cascade resolution, so it is never sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory relative paths were resolved against; status lines are
    /// printed relative to it
    pub root: PathBuf,
    /// Directory holding the source fragments
    pub source_dir: PathBuf,
    /// Directory receiving the generated stylesheets
    pub dist_dir: PathBuf,
    /// Fragment file names, in concatenation order
    pub fragments: Vec<String>,
    /// File name of the raw aggregate
    pub output_name: String,
    /// File name of the minified aggregate
    pub minified_name: String,
    /// Extension (without the dot) that triggers rebuilds in watch mode
    pub extension: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            source_dir: PathBuf::from("src"),
            dist_dir: PathBuf::from("dist"),
            fragments: DEFAULT_FRAGMENTS.iter().map(|f| f.to_string()).collect(),
            output_name: "void.css".to_string(),
            minified_name: "void.min.css".to_string(),
            extension: "css".to_string(),
        }
    }
}

impl BuildConfig {
    /// Rebase relative source and dist directories onto `root`
    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        if self.source_dir.is_relative() {
            self.source_dir = root.join(&self.source_dir);
        }
        if self.dist_dir.is_relative() {
            self.dist_dir = root.join(&self.dist_dir);
        }
        self
    }

    /// Full paths of every fragment, in declared order
    pub fn fragment_paths(&self) -> Vec<PathBuf> {
        self.fragments
            .iter()
            .map(|name| self.source_dir.join(name))
            .collect()
    }

    pub fn output_path(&self) -> PathBuf {
        self.dist_dir.join(&self.output_name)
    }

    pub fn minified_path(&self) -> PathBuf {
        self.dist_dir.join(&self.minified_name)
    }

    /// `path` relative to the root, or unchanged if it lies elsewhere
    pub fn display_path<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Whether a file name carries the watched stylesheet extension
    pub fn is_stylesheet(&self, file_name: &str) -> bool {
        file_name.ends_with(&format!(".{}", self.extension))
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level used when RUST_LOG is not set: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
