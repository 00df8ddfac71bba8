use gmlgen_build::{CodeBlock, CodeSnippet};
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Marker a hand-edited script carries to stop regeneration.
pub const OVERRIDE_MARKER: &str = "///@override";

///
/// WriteError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum WriteError {
    #[error("script '{script}' is targeted by more than one generated block")]
    DuplicateDestination { script: String },

    #[error("failed to access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("script asset '{script}' is missing '{}'", path.display())]
    ScaffoldingMissing { script: String, path: PathBuf },
}

///
/// ScriptAsset
/// The directory, logic unit and metadata unit of one script.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScriptAsset {
    pub name: String,
    pub dir: PathBuf,
    pub gml: PathBuf,
    pub yy: PathBuf,
}

impl ScriptAsset {
    #[must_use]
    pub fn new(scripts: &Path, name: &str) -> Self {
        let dir = scripts.join(name);

        Self {
            name: name.to_string(),
            gml: dir.join(format!("{name}.gml")),
            yy: dir.join(format!("{name}.yy")),
            dir,
        }
    }

    // check
    // every part of the scaffolding must already exist
    fn check(&self) -> Result<(), WriteError> {
        for path in [&self.dir, &self.gml, &self.yy] {
            if !path.exists() {
                return Err(WriteError::ScaffoldingMissing {
                    script: self.name.clone(),
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }
}

///
/// WriteReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

///
/// OutputWriter
///
/// Replaces the logic unit of existing script assets under
/// `<project>/scripts`. It never creates an asset, and every destination is
/// claimed at most once per writer.
///

#[derive(Debug)]
pub struct OutputWriter {
    scripts: PathBuf,
    claimed: BTreeSet<String>,
}

impl OutputWriter {
    #[must_use]
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            scripts: project_root.as_ref().join("scripts"),
            claimed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts
    }

    #[must_use]
    pub fn asset(&self, name: &str) -> ScriptAsset {
        ScriptAsset::new(&self.scripts, name)
    }

    /// Write every routed block of one entity.
    ///
    /// All destinations are checked before anything is written, so a failure
    /// leaves the entity's scripts untouched. Blocks without a destination
    /// are ignored.
    pub fn write(
        &mut self,
        entity: &str,
        snippets: &[CodeSnippet],
    ) -> Result<WriteReport, WriteError> {
        let blocks: Vec<(&str, &CodeBlock)> = snippets
            .iter()
            .flat_map(CodeSnippet::routed)
            .filter_map(|b| b.target().map(|t| (t, b)))
            .collect();

        // -------------------------
        // Resolve
        // -------------------------

        let mut seen = BTreeSet::new();
        let mut assets = Vec::with_capacity(blocks.len());
        for (target, block) in &blocks {
            if self.claimed.contains(*target) || !seen.insert(*target) {
                return Err(WriteError::DuplicateDestination {
                    script: (*target).to_string(),
                });
            }

            let asset = self.asset(target);
            asset.check()?;
            assets.push((asset, *block));
        }
        self.claimed.extend(seen.into_iter().map(ToString::to_string));

        // -------------------------
        // Write
        // -------------------------

        let mut report = WriteReport::default();
        for (asset, block) in assets {
            let current = fs::read_to_string(&asset.gml).map_err(|source| WriteError::Io {
                path: asset.gml.clone(),
                source,
            })?;

            if current.contains(OVERRIDE_MARKER) {
                log::warn!(
                    "{entity}: {}.gml couldn't be saved, {OVERRIDE_MARKER} exists",
                    asset.name
                );
                report.skipped.push(asset.name);
                continue;
            }

            fs::write(&asset.gml, block.text()).map_err(|source| WriteError::Io {
                path: asset.gml.clone(),
                source,
            })?;
            log::debug!("saved {}", asset.gml.display());
            report.written.push(asset.name);
        }

        Ok(report)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use gmlgen_build::SnippetKind;
    use tempfile::TempDir;

    fn scaffold(root: &Path, name: &str, gml: &str) {
        let dir = root.join("scripts").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.gml")), gml).unwrap();
        fs::write(dir.join(format!("{name}.yy")), "{}").unwrap();
    }

    fn snippet(targets: &[&str]) -> CodeSnippet {
        let blocks = targets
            .iter()
            .map(|t| CodeBlock::routed(*t, format!("///@function {t}()\n")))
            .collect();

        CodeSnippet::new(SnippetKind::Getters, blocks)
    }

    #[test]
    fn replaces_logic_unit_wholesale() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), "getMobHp", "old body");

        let mut writer = OutputWriter::new(tmp.path());
        let report = writer.write("Mob", &[snippet(&["getMobHp"])]).unwrap();

        assert_eq!(report.written, ["getMobHp"]);
        let gml = writer.asset("getMobHp").gml;
        assert_eq!(fs::read_to_string(gml).unwrap(), "///@function getMobHp()\n");
    }

    #[test]
    fn override_marker_skips_the_block() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), "getMobHp", "///@override\nreturn 1;");
        scaffold(tmp.path(), "getMobId", "");

        let mut writer = OutputWriter::new(tmp.path());
        let report = writer
            .write("Mob", &[snippet(&["getMobHp", "getMobId"])])
            .unwrap();

        assert_eq!(report.skipped, ["getMobHp"]);
        assert_eq!(report.written, ["getMobId"]);
        let kept = fs::read_to_string(writer.asset("getMobHp").gml).unwrap();
        assert_eq!(kept, "///@override\nreturn 1;");
    }

    #[test]
    fn missing_metadata_unit_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), "getMobHp", "old");
        let dir = tmp.path().join("scripts").join("getMobId");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("getMobId.gml"), "old").unwrap();

        let mut writer = OutputWriter::new(tmp.path());
        let err = writer
            .write("Mob", &[snippet(&["getMobHp", "getMobId"])])
            .unwrap_err();

        assert!(matches!(
            err,
            WriteError::ScaffoldingMissing { ref script, ref path }
                if script == "getMobId" && path.ends_with("getMobId.yy")
        ));
        let untouched = fs::read_to_string(writer.asset("getMobHp").gml).unwrap();
        assert_eq!(untouched, "old");
    }

    #[test]
    fn missing_directory_is_scaffolding_missing() {
        let tmp = TempDir::new().unwrap();

        let mut writer = OutputWriter::new(tmp.path());
        let err = writer.write("Mob", &[snippet(&["createMob"])]).unwrap_err();

        assert!(matches!(err, WriteError::ScaffoldingMissing { .. }));
    }

    #[test]
    fn destinations_are_claimed_once_per_run() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), "getMobHp", "");

        let mut writer = OutputWriter::new(tmp.path());
        let err = writer
            .write("Mob", &[snippet(&["getMobHp", "getMobHp"])])
            .unwrap_err();
        assert!(matches!(err, WriteError::DuplicateDestination { .. }));

        let mut writer = OutputWriter::new(tmp.path());
        writer.write("Mob", &[snippet(&["getMobHp"])]).unwrap();
        let err = writer.write("Boss", &[snippet(&["getMobHp"])]).unwrap_err();
        assert!(matches!(err, WriteError::DuplicateDestination { .. }));
    }

    #[test]
    fn unrouted_blocks_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let labels = CodeSnippet::single(SnippetKind::Labels, CodeBlock::unrouted("{}"));

        let mut writer = OutputWriter::new(tmp.path());
        let report = writer.write("Mob", &[labels]).unwrap();

        assert_eq!(report, WriteReport::default());
    }
}
