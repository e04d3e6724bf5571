#![forbid(unsafe_code)]

//! mbrot binary entry point.

use mbrot::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref(), opts.log_json) {
        eprintln!("Failed to initialize: {e}");
        std::process::exit(1);
    }

    match app::App::new(&opts) {
        Ok(app) => {
            if let Err(e) = app.run() {
                tracing::error!(error = %e, "runtime error");
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal setup failed");
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}
