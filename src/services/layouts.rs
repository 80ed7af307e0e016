//! Layout file I/O service.
//!
//! This module connects layout files on disk to the pure conversion
//! pipeline: it loads a KLE file into a positioned [`Layout`], and writes
//! the generated scripts next to it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::export::Scripts;
use crate::models::{Layout, Options, PartRegistry};
use crate::{parser, services::geometry};

/// File paths of the two generated scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    /// `<name>-schematic.scr`
    pub schematic: PathBuf,
    /// `<name>-board.scr`
    pub board: PathBuf,
}

/// Service for turning layout files into EAGLE scripts.
pub struct LayoutService;

impl LayoutService {
    /// Loads a KLE layout file and positions its keys.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the KLE JSON or raw data file
    /// * `options` - Part selection and centering options
    /// * `registry` - Part registry to resolve short names against
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use klepcb::models::{Options, PartRegistry};
    /// use klepcb::services::LayoutService;
    ///
    /// let layout = LayoutService::load(
    ///     Path::new("planck.json"),
    ///     &Options::default(),
    ///     &PartRegistry::eagle(),
    /// )?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path, options: &Options, registry: &PartRegistry) -> Result<Layout> {
        let keys = parser::parse_kle_file(path)?;
        debug!("Loaded {} keys from {}", keys.len(), path.display());

        let layout = geometry::build_layout(&keys, options, registry)
            .with_context(|| format!("Failed to convert layout {}", path.display()))?;

        info!(
            "Positioned {} keys in {} rows and {} columns",
            layout.keys().len(),
            layout.row_count(),
            layout.col_count()
        );
        Ok(layout)
    }

    /// Output paths for a layout file.
    ///
    /// Scripts are named after the input file stem and placed in `out_dir`,
    /// or next to the input when no directory is given.
    pub fn script_paths(input: &Path, out_dir: Option<&Path>) -> Result<ScriptPaths> {
        let stem = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("Layout path has no file name: {}", input.display()))?;

        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Ok(ScriptPaths {
            schematic: dir.join(format!("{stem}-schematic.scr")),
            board: dir.join(format!("{stem}-board.scr")),
        })
    }

    /// Writes both scripts, creating the output directory if needed.
    ///
    /// Each file is written to a temp file first and renamed into place, so
    /// a failed run never leaves a half-written script behind.
    pub fn write_scripts(scripts: &Scripts, paths: &ScriptPaths) -> Result<()> {
        if let Some(dir) = paths.schematic.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        }

        write_atomic(&paths.schematic, &scripts.schematic)?;
        write_atomic(&paths.board, &scripts.board)?;

        info!("Wrote {}", paths.schematic.display());
        info!("Wrote {}", paths.board.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("scr.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_script_paths_next_to_input() {
        let paths = LayoutService::script_paths(Path::new("boards/planck.json"), None).unwrap();
        assert_eq!(paths.schematic, PathBuf::from("boards/planck-schematic.scr"));
        assert_eq!(paths.board, PathBuf::from("boards/planck-board.scr"));
    }

    #[test]
    fn test_script_paths_out_dir() {
        let paths =
            LayoutService::script_paths(Path::new("planck.json"), Some(Path::new("out"))).unwrap();
        assert_eq!(paths.schematic, PathBuf::from("out/planck-schematic.scr"));
        assert_eq!(paths.board, PathBuf::from("out/planck-board.scr"));
    }

    #[test]
    fn test_script_paths_bare_file_name() {
        let paths = LayoutService::script_paths(Path::new("numpad.txt"), None).unwrap();
        assert_eq!(paths.schematic, PathBuf::from("numpad-schematic.scr"));
    }

    #[test]
    fn test_load_and_write() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("macro.json");
        fs::write(&input, r#"[["1", "2"], ["3", "4"]]"#)?;

        let layout = LayoutService::load(&input, &Options::default(), &PartRegistry::eagle())?;
        assert_eq!(layout.keys().len(), 4);
        assert_eq!(layout.row_count(), 2);

        let out_dir = temp_dir.path().join("scripts");
        let paths = LayoutService::script_paths(&input, Some(&out_dir))?;
        LayoutService::write_scripts(&Scripts::generate(&layout), &paths)?;

        let board = fs::read_to_string(&paths.board)?;
        assert!(board.contains("MOVE D4 (9.53 -17.05);"));
        assert!(paths.schematic.exists());
        assert!(!out_dir.join("macro-board.scr.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_load_empty_layout_fails() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("empty.json");
        fs::write(&input, "[]")?;

        let err = LayoutService::load(&input, &Options::default(), &PartRegistry::eagle())
            .unwrap_err();
        assert!(format!("{err:#}").contains("No keys on keyboard"));
        Ok(())
    }
}
