use discovery_catalog::error::CliError;

fn is_json_mode_args() -> bool {
    std::env::args().any(|arg| arg == "--json" || arg == "--robot")
}

fn report_and_exit(err: CliError) -> ! {
    if err.code == 0 {
        // --help / --version
        print!("{}", err.message);
        std::process::exit(0);
    }
    if is_json_mode_args() {
        let payload = serde_json::json!({ "error": err });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {}", err.message.trim_end());
        if let Some(hint) = &err.hint {
            eprintln!("Hint: {hint}");
        }
    }
    std::process::exit(err.code);
}

fn main() -> anyhow::Result<()> {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();

    let raw_args: Vec<String> = std::env::args().collect();
    let parsed = match discovery_catalog::parse_cli(raw_args) {
        Ok(parsed) => parsed,
        Err(err) => report_and_exit(err),
    };

    match discovery_catalog::run_with_parsed(parsed) {
        Ok(()) => Ok(()),
        Err(err) => report_and_exit(err),
    }
}
