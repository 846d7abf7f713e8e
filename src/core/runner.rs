//! Application runner logic
//!
//! Drives one x-ray run: load the source, narrow and rescale it, generate
//! the masters, then hand them to the compiler and colorizer.

use crate::core::cli::CliArgs;
use crate::core::config_file::{ConfigFile, XRayOptions};
use crate::data::load_ufo_from_path;
use crate::export::{
    Colorizer, DesignspaceWriter, FontcCompiler, LayerPlanWriter, MasterCompiler,
};
use crate::font_source::scale::scale_font;
use crate::font_source::FontData;
use crate::logging;
use crate::masters::MasterGridGenerator;
use crate::rendering::MARKER_GLYPHS;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written by a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutputs {
    /// The designspace, or the compiled font when `fontc` ran
    pub artifact: PathBuf,
    pub layer_plan: PathBuf,
}

/// Create and run the application with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    let _log_guard = logging::init_logging(cli_args.verbose, cli_args.log_file)?;
    let options = XRayOptions::resolve(&cli_args, ConfigFile::load().as_ref())?;
    let source = cli_args
        .source
        .as_deref()
        .context("No UFO source given")?;

    let outputs = run_xray(
        source,
        &cli_args.output_dir(),
        &cli_args.glyphs,
        &options,
        cli_args.compile,
    )?;
    println!("{}", outputs.artifact.display());
    Ok(())
}

/// Run the whole pipeline for the UFO at `source`.
pub fn run_xray(
    source: &Path,
    output_dir: &Path,
    glyphs: &[String],
    options: &XRayOptions,
    compile: bool,
) -> Result<RunOutputs> {
    let font = load_ufo_from_path(source)?;
    let font = prepare_source(&font, glyphs, options.target_units_per_em)?;
    let glyph_names = base_glyph_names(&font);

    let generator = MasterGridGenerator::new(options.generator.clone());
    let masters = generator
        .generate(&font)
        .with_context(|| format!("Failed to x-ray {}", source.display()))?;

    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| font.info.family_name.clone());
    let writer = DesignspaceWriter::new(output_dir, format!("{} X-Ray", font.info.family_name))
        .with_file_stem(format!("{stem}_x_rayed"));

    let artifact = if compile {
        FontcCompiler::new(writer).compile(&masters, generator.axes())?
    } else {
        writer.compile(&masters, generator.axes())?
    };
    let layer_plan = LayerPlanWriter.colorize(&artifact, &glyph_names, &options.palette)?;

    info!("Done: {}", artifact.display());
    Ok(RunOutputs {
        artifact,
        layer_plan,
    })
}

/// Narrow `font` to `glyphs` (all glyphs when empty) and rescale it to
/// `target_units_per_em`.
pub fn prepare_source(
    font: &FontData,
    glyphs: &[String],
    target_units_per_em: f64,
) -> Result<FontData> {
    let units_per_em = font.info.units_per_em;
    if !(units_per_em.is_finite() && units_per_em > 0.0) {
        bail!("Source units per em must be positive, got {units_per_em}");
    }

    let mut font = if glyphs.is_empty() {
        font.clone()
    } else {
        let subset = font.subset(glyphs)?;
        info!(
            "Kept {} of {} glyphs",
            subset.glyphs.len(),
            font.glyphs.len()
        );
        subset
    };

    let factor = scale_font(&mut font, target_units_per_em);
    info!(
        "Scaled to {} units per em (factor {})",
        target_units_per_em, factor
    );
    Ok(font)
}

/// Names of the glyphs that get x-ray families
pub fn base_glyph_names(font: &FontData) -> Vec<String> {
    font.glyph_names()
        .into_iter()
        .filter(|name| !MARKER_GLYPHS.contains(&name.as_str()))
        .collect()
}
