//! Process-level error handling

/// Print the error with its causes and exit with code 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("Error running glyph-xray:");
    eprintln!("{error}");
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse and validate the command line, exiting with a message on failure.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    let cli_args = crate::core::cli::CliArgs::parse();
    if let Err(message) = cli_args.validate() {
        handle_error(anyhow::anyhow!(message));
    }
    cli_args
}
