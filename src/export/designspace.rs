//! Master compilation
//!
//! Masters are written as UFO sources plus a designspace document describing
//! the axes and where each source sits. `fontc` can then build the variable
//! font from that document as an external process.

use crate::data::save_ufo_to_path;
use crate::masters::{AxisSet, Master};
use anyhow::{anyhow, bail, Context, Result};
use norad::designspace::{Axis, DesignSpaceDocument, Dimension, Source};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Turns a verified master set into a font artifact
pub trait MasterCompiler {
    /// Returns the path of the artifact
    fn compile(&self, masters: &[Master], axes: &AxisSet) -> Result<PathBuf>;
}

/// Writes `<family>.designspace` and one UFO per master under `masters/`
#[derive(Debug, Clone)]
pub struct DesignspaceWriter {
    output_dir: PathBuf,
    family_name: String,
    file_stem: String,
}

impl DesignspaceWriter {
    pub fn new(output_dir: impl Into<PathBuf>, family_name: impl Into<String>) -> Self {
        let family_name = family_name.into();
        Self {
            output_dir: output_dir.into(),
            file_stem: family_name.split_whitespace().collect(),
            family_name,
        }
    }

    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = file_stem.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File stem shared by every output, the family name without spaces
    /// unless overridden
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    pub fn designspace_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.designspace", self.file_stem()))
    }

    /// Master UFO path relative to the output directory
    pub fn master_filename(&self, master: &Master, axes: &AxisSet) -> String {
        format!(
            "masters/{}-{}.ufo",
            self.file_stem(),
            master.location.file_stem(axes)
        )
    }

    /// The designspace document for `masters`
    pub fn designspace_document(&self, masters: &[Master], axes: &AxisSet) -> DesignSpaceDocument {
        let axes_list = axes
            .axes()
            .into_iter()
            .map(|axis| Axis {
                name: axis.name.clone(),
                tag: axis.tag.clone(),
                minimum: Some(axis.minimum as f32),
                maximum: Some(axis.maximum as f32),
                default: axis.default as f32,
                ..Axis::default()
            })
            .collect();

        let sources = masters
            .iter()
            .map(|master| Source {
                filename: self.master_filename(master, axes),
                name: Some(format!("{} {}", self.family_name, master.font.info.style_name)),
                familyname: Some(self.family_name.clone()),
                stylename: Some(master.font.info.style_name.clone()),
                location: master
                    .location
                    .coordinates(axes)
                    .into_iter()
                    .map(|(axis, value)| Dimension {
                        name: axis.name.clone(),
                        xvalue: Some(value as f32),
                        ..Dimension::default()
                    })
                    .collect(),
                ..Source::default()
            })
            .collect();

        DesignSpaceDocument {
            format: 5.0,
            axes: axes_list,
            sources,
            ..DesignSpaceDocument::default()
        }
    }
}

impl MasterCompiler for DesignspaceWriter {
    fn compile(&self, masters: &[Master], axes: &AxisSet) -> Result<PathBuf> {
        if masters.is_empty() {
            bail!("No masters to write");
        }
        std::fs::create_dir_all(self.output_dir.join("masters")).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        masters.par_iter().try_for_each(|master| {
            let mut font = master.font.clone();
            font.info.family_name = self.family_name.clone();
            let path = self.output_dir.join(self.master_filename(master, axes));
            debug!("Writing master {}", master.location);
            save_ufo_to_path(&font, &path)
        })?;

        let path = self.designspace_path();
        self.designspace_document(masters, axes)
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} masters and {}", masters.len(), path.display());
        Ok(path)
    }
}

/// Writes the sources, then runs `fontc` on the designspace
#[derive(Debug, Clone)]
pub struct FontcCompiler {
    sources: DesignspaceWriter,
    executable: PathBuf,
}

impl FontcCompiler {
    pub fn new(sources: DesignspaceWriter) -> Self {
        Self {
            sources,
            executable: PathBuf::from("fontc"),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn font_path(&self) -> PathBuf {
        self.sources
            .output_dir()
            .join(format!("{}.ttf", self.sources.file_stem()))
    }

    fn compile_with_fontc(&self, designspace: &Path, output_path: &Path) -> Result<()> {
        let output = Command::new(&self.executable)
            .arg(designspace)
            .arg("--output-file")
            .arg(output_path)
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("fontc compilation failed: {}", stderr.trim()));
        }
        Ok(())
    }
}

impl MasterCompiler for FontcCompiler {
    fn compile(&self, masters: &[Master], axes: &AxisSet) -> Result<PathBuf> {
        let designspace = self.sources.compile(masters, axes)?;
        let font = self.font_path();
        info!("Compiling {} with fontc", designspace.display());
        self.compile_with_fontc(&designspace, &font)?;
        info!("Compiled {}", font.display());
        Ok(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{FontData, GlyphData};
    use crate::masters::MasterLocation;

    fn masters(axes: &AxisSet) -> Vec<Master> {
        axes.master_grid()
            .unwrap()
            .into_iter()
            .map(|location: MasterLocation| {
                let mut font = FontData::default();
                font.info.style_name = location.file_stem(axes);
                font.insert_glyph(GlyphData::new("space", 250.0));
                Master { location, font }
            })
            .collect()
    }

    #[test]
    fn designspace_lists_axes_and_sources() {
        let axes = AxisSet::default();
        let writer = DesignspaceWriter::new("/tmp/out", "Test Sans X-Ray");
        let document = writer.designspace_document(&masters(&axes), &axes);

        assert_eq!(document.format, 5.0);
        let outline = &document.axes[0];
        assert_eq!((outline.tag.as_str(), outline.name.as_str()), ("OTLN", "outline_width"));
        assert_eq!((outline.minimum, outline.maximum, outline.default), (Some(1.0), Some(20.0), 1.0));

        assert_eq!(document.sources.len(), 16);
        let first = &document.sources[0];
        assert_eq!(first.filename, "masters/TestSansX-Ray-OTLN1-LINE1-POIN10-HAND10.ufo");
        assert_eq!(first.familyname.as_deref(), Some("Test Sans X-Ray"));
        let last = &document.sources[15];
        assert_eq!(last.location[3].name, "handle_size");
        assert_eq!(last.location[3].xvalue, Some(40.0));
    }

    #[test]
    fn file_stem_can_be_overridden() {
        let axes = AxisSet::default();
        let writer = DesignspaceWriter::new("out", "Test Sans").with_file_stem("TestSans_x_rayed");
        assert_eq!(writer.designspace_path(), Path::new("out/TestSans_x_rayed.designspace"));
        let masters = masters(&axes);
        assert_eq!(
            writer.master_filename(&masters[0], &axes),
            "masters/TestSans_x_rayed-OTLN1-LINE1-POIN10-HAND10.ufo"
        );
        let compiler = FontcCompiler::new(writer);
        assert_eq!(compiler.font_path(), Path::new("out/TestSans_x_rayed.ttf"));
    }

    #[test]
    fn writer_saves_every_master() {
        let dir = tempfile::tempdir().unwrap();
        let mut axes = AxisSet::default();
        axes.line_width.maximum = axes.line_width.minimum;
        axes.point_size.maximum = axes.point_size.minimum;
        axes.handle_size.maximum = axes.handle_size.minimum;

        let writer = DesignspaceWriter::new(dir.path(), "Test");
        let path = writer.compile(&masters(&axes), &axes).unwrap();
        assert_eq!(path, dir.path().join("Test.designspace"));
        assert!(dir.path().join("masters/Test-OTLN1-LINE1-POIN10-HAND10.ufo").is_dir());
        assert!(dir.path().join("masters/Test-OTLN20-LINE1-POIN10-HAND10.ufo").is_dir());

        let document = DesignSpaceDocument::load(&path).unwrap();
        assert_eq!(document.axes.len(), 4);
        assert_eq!(document.sources.len(), 2);
        assert_eq!(document.sources[1].stylename.as_deref(), Some("OTLN20-LINE1-POIN10-HAND10"));
    }

    #[test]
    fn missing_fontc_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let axes = AxisSet::default();
        let compiler = FontcCompiler::new(DesignspaceWriter::new(dir.path(), "Test"))
            .with_executable(dir.path().join("no-such-fontc"));
        let error = compiler.compile(&masters(&axes), &axes).unwrap_err();
        assert!(error.to_string().contains("Failed to run"));
    }
}
