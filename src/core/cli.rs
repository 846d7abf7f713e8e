//! Command line interface for glyph-xray
//!
//! Handles parsing command line arguments and validating them before any
//! work starts.

use clap::Parser;
use std::path::PathBuf;

/// glyph-xray CLI arguments
///
/// Examples:
///   glyph-xray MyFont.ufo                         # Write masters next to the source
///   glyph-xray MyFont.ufo -o build/               # Choose the output directory
///   glyph-xray MyFont.ufo --glyphs A,B,C          # Only a few glyphs
///   glyph-xray MyFont.ufo --compile               # Also build the variable font with fontc
///   glyph-xray MyFont.ufo --point-color '#FF8800' # Change a palette color
///   glyph-xray --new-config                       # Write ~/.config/glyph-xray/settings.json
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "glyph-xray",
    version,
    about = "Generate x-ray fonts that show outlines, points and handles",
    long_about = "glyph-xray turns a UFO font source into a set of variable font masters whose glyphs draw the source outlines, on-curve points, off-curve handles and the lines joining them. Axes control the outline width, line width, point size and handle size."
)]
pub struct CliArgs {
    /// Path to the UFO source
    #[clap(
        value_name = "UFO",
        required_unless_present = "new_config",
        help = "UFO font source to x-ray"
    )]
    pub source: Option<PathBuf>,

    /// Output directory for the designspace, masters and compiled font
    ///
    /// Defaults to the directory that contains the source.
    #[clap(long = "output", short = 'o', help = "Output directory")]
    pub output: Option<PathBuf>,

    /// Comma separated glyph names to keep
    #[clap(
        long = "glyphs",
        short = 'g',
        value_delimiter = ',',
        help = "Only process these glyphs (comma separated)",
        long_help = "Only process these glyphs. Composite glyphs pull in the glyphs they reference, so 'Aacute' also keeps 'A' and 'acute'."
    )]
    pub glyphs: Vec<String>,

    #[clap(long = "outline-color", help = "Outline color, #RRGGBB or #RRGGBBAA")]
    pub outline_color: Option<String>,

    #[clap(long = "line-color", help = "Handle line color, #RRGGBB or #RRGGBBAA")]
    pub line_color: Option<String>,

    #[clap(long = "point-color", help = "Point and handle color, #RRGGBB or #RRGGBBAA")]
    pub point_color: Option<String>,

    #[clap(
        long = "background-color",
        help = "Bounding box color, #RRGGBB or #RRGGBBAA"
    )]
    pub background_color: Option<String>,

    /// Draw point and handle markers as contours instead of components
    #[clap(
        long = "no-components",
        help = "Draw markers as contours instead of components"
    )]
    pub no_components: bool,

    /// Run fontc on the generated designspace
    #[clap(
        long = "compile",
        help = "Compile the masters into a variable font with fontc",
        long_help = "Compile the generated designspace into a variable TTF with fontc and write the color layer plan beside it. fontc must be on PATH."
    )]
    pub compile: bool,

    #[clap(long = "verbose", short = 'v', help = "Log debug messages")]
    pub verbose: bool,

    /// Also write logs to ~/.config/glyph-xray/logs/
    #[clap(long = "log-file", help = "Also write logs to the config directory")]
    pub log_file: bool,

    /// Initialize user configuration directory with settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/glyph-xray directory with a settings.json file holding the default palette and marker options. Values there are used whenever the matching command line option is absent."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Checks that the source is a UFO directory and that every color parses,
    /// so mistakes surface before any glyph is processed.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.source {
            if !path.exists() {
                return Err(format!(
                    "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
            if !path.is_dir() || !path.join("metainfo.plist").exists() {
                return Err(format!(
                    "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
                    path.display()
                ));
            }
        }

        if let Some(output) = &self.output {
            if output.is_file() {
                return Err(format!(
                    "Output path is a file: {}\nExpected a directory.",
                    output.display()
                ));
            }
        }

        for (option, value) in self.color_options() {
            if let Some(value) = value {
                if let Err(error) = value.parse::<crate::export::Color>() {
                    return Err(format!("Invalid --{option}: {error}"));
                }
            }
        }

        Ok(())
    }

    fn color_options(&self) -> [(&'static str, Option<&String>); 4] {
        [
            ("outline-color", self.outline_color.as_ref()),
            ("line-color", self.line_color.as_ref()),
            ("point-color", self.point_color.as_ref()),
            ("background-color", self.background_color.as_ref()),
        ]
    }

    /// Output directory, falling back to the source's parent
    pub fn output_dir(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        self.source
            .as_ref()
            .and_then(|source| source.parent())
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_list_splits_on_commas() {
        let args = CliArgs::parse_from(["glyph-xray", "Font.ufo", "--glyphs", "A,B,Aacute"]);
        assert_eq!(args.glyphs, vec!["A", "B", "Aacute"]);
        assert_eq!(args.source, Some(PathBuf::from("Font.ufo")));
    }

    #[test]
    fn source_is_optional_only_for_new_config() {
        assert!(CliArgs::try_parse_from(["glyph-xray"]).is_err());
        assert!(CliArgs::try_parse_from(["glyph-xray", "--new-config"]).is_ok());
    }

    #[test]
    fn missing_source_fails_validation() {
        let args = CliArgs::parse_from(["glyph-xray", "/no/such/Font.ufo"]);
        let error = args.validate().unwrap_err();
        assert!(error.starts_with("Font source does not exist"));
    }

    #[test]
    fn bad_colors_fail_validation() {
        let args = CliArgs {
            point_color: Some("red".to_string()),
            ..CliArgs::default()
        };
        assert!(args.validate().unwrap_err().contains("--point-color"));
    }

    #[test]
    fn output_defaults_to_source_directory() {
        let args = CliArgs::parse_from(["glyph-xray", "fonts/Font.ufo"]);
        assert_eq!(args.output_dir(), PathBuf::from("fonts"));
        let args = CliArgs::parse_from(["glyph-xray", "fonts/Font.ufo", "-o", "build"]);
        assert_eq!(args.output_dir(), PathBuf::from("build"));
    }
}
