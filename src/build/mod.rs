//! Stylesheet aggregation
//!
//! A build reads every fragment in declared order, joins them with a blank
//! line, writes the aggregate as-is and writes a minified copy derived from
//! the aggregate. Every run regenerates both outputs in full.

mod error;
mod minify;

pub use error::BuildError;
pub use minify::minify;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;

/// Separator placed between consecutive fragments
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// A written output file and its size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Outcome of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub aggregate: Artifact,
    pub minified: Artifact,
}

impl BuildReport {
    /// Human-readable status lines, one per output, with paths shown
    /// relative to the config root
    pub fn summary_lines(&self, config: &BuildConfig) -> Vec<String> {
        [&self.aggregate, &self.minified]
            .iter()
            .map(|artifact| {
                format!(
                    "Built {} ({} KB)",
                    config.display_path(&artifact.path).display(),
                    format_kb(artifact.bytes)
                )
            })
            .collect()
    }
}

/// Format a byte count as kilobytes with one decimal place
pub fn format_kb(bytes: usize) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

/// Join fragment contents in order, separated by one blank line
pub fn concatenate(parts: &[String]) -> String {
    parts.join(FRAGMENT_SEPARATOR)
}

/// Builds the aggregate and minified stylesheets for one configuration
pub struct Aggregator {
    config: BuildConfig,
}

impl Aggregator {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run one complete build
    ///
    /// All fragments are read before anything touches the dist directory, so
    /// a missing fragment leaves earlier outputs untouched.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let parts = self.read_fragments()?;

        let css = concatenate(&parts);
        let min = minify(&css);

        let dist_dir = &self.config.dist_dir;
        fs::create_dir_all(dist_dir).map_err(|source| BuildError::CreateDir {
            path: dist_dir.clone(),
            source,
        })?;

        let aggregate_path = self.config.output_path();
        let minified_path = self.config.minified_path();
        write_outputs(&[(&aggregate_path, &css), (&minified_path, &min)])?;

        tracing::info!(
            fragments = parts.len(),
            bytes = css.len(),
            minified_bytes = min.len(),
            "Stylesheet build complete"
        );

        Ok(BuildReport {
            aggregate: Artifact {
                path: aggregate_path,
                bytes: css.len(),
            },
            minified: Artifact {
                path: minified_path,
                bytes: min.len(),
            },
        })
    }

    fn read_fragments(&self) -> Result<Vec<String>, BuildError> {
        self.config
            .fragment_paths()
            .into_iter()
            .map(|path| {
                tracing::debug!(path = %path.display(), "Reading fragment");
                fs::read_to_string(&path)
                    .map_err(|source| BuildError::ReadFragment { path, source })
            })
            .collect()
    }
}

/// Write every output to a temporary sibling, then move them all into place
///
/// If any temporary write fails, the temporaries are removed and the
/// existing outputs are left as they were.
fn write_outputs(outputs: &[(&PathBuf, &String)]) -> Result<(), BuildError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());

    for (path, contents) in outputs {
        let temp = temp_path(path);
        if let Err(source) = fs::write(&temp, contents.as_bytes()) {
            let _ = fs::remove_file(&temp);
            discard(&staged);
            return Err(BuildError::WriteOutput {
                path: (*path).clone(),
                source,
            });
        }
        staged.push((temp, path.as_path()));
    }

    for (index, (temp, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(temp, path) {
            discard(&staged[index..]);
            return Err(BuildError::WriteOutput {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp, _) in staged {
        let _ = fs::remove_file(temp);
    }
}

/// `dist/void.css` -> `dist/.void.css.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn Error>>;

    const TOKENS: &str = ":root {\n  --void: #0a0a0f;\n}\n";
    const BASE: &str = "/* reset */\nhtml { margin: 0; }\n";
    const COMPONENTS: &str = ".void-btn { color: var(--void); }";

    fn write_fragments(root: &Path, contents: [&str; 3]) -> Result<BuildConfig, Box<dyn Error>> {
        let config = BuildConfig::default().with_root(root);
        fs::create_dir_all(&config.source_dir)?;
        for (path, content) in config.fragment_paths().iter().zip(contents) {
            fs::write(path, content)?;
        }
        Ok(config)
    }

    #[test]
    fn test_concatenate_joins_with_blank_line() {
        let parts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(concatenate(&parts), "a\n\nb\n\nc");
        assert_eq!(concatenate(&["only".to_string()]), "only");
        assert_eq!(concatenate(&[]), "");
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0.0");
        assert_eq!(format_kb(1024), "1.0");
        assert_eq!(format_kb(1536), "1.5");
        assert_eq!(format_kb(100), "0.1");
    }

    #[test]
    fn test_build_writes_raw_concatenation_and_minified() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), [TOKENS, BASE, COMPONENTS])?;

        let report = Aggregator::new(config.clone()).build()?;

        let raw = fs::read_to_string(config.output_path())?;
        assert_eq!(raw, format!("{}\n\n{}\n\n{}", TOKENS, BASE, COMPONENTS));

        let min = fs::read_to_string(config.minified_path())?;
        assert_eq!(min, minify(&raw));
        assert_eq!(
            min,
            ":root{--void:#0a0a0f}html{margin:0}.void-btn{color:var(--void)}"
        );

        assert_eq!(report.aggregate.bytes, raw.len());
        assert_eq!(report.minified.bytes, min.len());
        assert_eq!(report.aggregate.path, config.output_path());
        Ok(())
    }

    #[test]
    fn test_fragment_order_is_preserved() -> TestResult {
        let temp = TempDir::new()?;
        let mut config = write_fragments(temp.path(), ["A", "B", "C"])?;
        config.fragments.reverse();

        Aggregator::new(config.clone()).build()?;

        assert_eq!(fs::read_to_string(config.output_path())?, "C\n\nB\n\nA");
        Ok(())
    }

    #[test]
    fn test_build_creates_missing_dist_dir() -> TestResult {
        let temp = TempDir::new()?;
        let mut config = write_fragments(temp.path(), [TOKENS, BASE, COMPONENTS])?;
        config.dist_dir = temp.path().join("nested").join("dist");

        Aggregator::new(config.clone()).build()?;
        // Second run with the directory already present
        Aggregator::new(config.clone()).build()?;

        assert!(config.output_path().is_file());
        assert!(config.minified_path().is_file());
        Ok(())
    }

    #[test]
    fn test_missing_fragment_aborts_without_writing() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), [TOKENS, BASE, COMPONENTS])?;
        fs::remove_file(config.source_dir.join("base.css"))?;

        let result = Aggregator::new(config.clone()).build();

        match result {
            Err(BuildError::ReadFragment { path, .. }) => {
                assert_eq!(path, config.source_dir.join("base.css"));
            }
            other => panic!("expected ReadFragment error, got {:?}", other),
        }
        assert!(!config.dist_dir.exists());
        Ok(())
    }

    #[test]
    fn test_failed_build_leaves_previous_outputs() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), [TOKENS, BASE, COMPONENTS])?;
        Aggregator::new(config.clone()).build()?;
        let raw_before = fs::read(config.output_path())?;
        let min_before = fs::read(config.minified_path())?;

        fs::write(config.source_dir.join("tokens.css"), ":root { --x: 1; }")?;
        fs::remove_file(config.source_dir.join("components.css"))?;
        assert!(Aggregator::new(config.clone()).build().is_err());

        assert_eq!(fs::read(config.output_path())?, raw_before);
        assert_eq!(fs::read(config.minified_path())?, min_before);
        Ok(())
    }

    #[test]
    fn test_outputs_are_overwritten_not_appended() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), ["a{}", "b{}", "c{}"])?;
        fs::create_dir_all(&config.dist_dir)?;
        fs::write(config.output_path(), "stale content that is much longer")?;

        Aggregator::new(config.clone()).build()?;

        assert_eq!(fs::read_to_string(config.output_path())?, "a{}\n\nb{}\n\nc{}");
        assert_eq!(fs::read_to_string(config.minified_path())?, "a{}b{}c{}");
        Ok(())
    }

    #[test]
    fn test_repeated_builds_are_byte_identical() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), [TOKENS, BASE, COMPONENTS])?;
        let aggregator = Aggregator::new(config.clone());

        aggregator.build()?;
        let first = (fs::read(config.output_path())?, fs::read(config.minified_path())?);
        aggregator.build()?;
        let second = (fs::read(config.output_path())?, fs::read(config.minified_path())?);

        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_no_temporary_files_left_behind() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), [TOKENS, BASE, COMPONENTS])?;
        Aggregator::new(config.clone()).build()?;

        let mut names: Vec<String> = fs::read_dir(&config.dist_dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_, _>>()?;
        names.sort();
        assert_eq!(names, vec!["void.css", "void.min.css"]);
        Ok(())
    }

    #[test]
    fn test_summary_lines() {
        let report = BuildReport {
            aggregate: Artifact {
                path: PathBuf::from("dist/void.css"),
                bytes: 2048,
            },
            minified: Artifact {
                path: PathBuf::from("dist/void.min.css"),
                bytes: 1200,
            },
        };
        assert_eq!(
            report.summary_lines(&BuildConfig::default()),
            vec![
                "Built dist/void.css (2.0 KB)".to_string(),
                "Built dist/void.min.css (1.2 KB)".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_lines_relative_to_root() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(temp.path(), ["a{}", "b{}", "c{}"])?;

        let report = Aggregator::new(config.clone()).build()?;

        assert_eq!(
            report.summary_lines(&config),
            vec![
                format!("Built {} (0.0 KB)", Path::new("dist").join("void.css").display()),
                format!("Built {} (0.0 KB)", Path::new("dist").join("void.min.css").display()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_byte_order_mark_in_fragment_is_stripped_from_minified() -> TestResult {
        let temp = TempDir::new()?;
        let config = write_fragments(
            temp.path(),
            ["a { x: y; }", "\u{FEFF}.b { c: d; }", "\u{FEFF}.c { e: f; }"],
        )?;

        Aggregator::new(config.clone()).build()?;

        assert_eq!(
            fs::read_to_string(config.output_path())?,
            "a { x: y; }\n\n\u{FEFF}.b { c: d; }\n\n\u{FEFF}.c { e: f; }"
        );
        assert_eq!(
            fs::read_to_string(config.minified_path())?,
            "a{x:y}.b{c:d}.c{e:f}"
        );
        Ok(())
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("dist/void.min.css")),
            PathBuf::from("dist/.void.min.css.tmp")
        );
    }
}
