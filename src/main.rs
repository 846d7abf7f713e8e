//! Generates x-ray fonts that show how glyphs are drawn.

use glyph_xray::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
