use std::process;

use loader::config::LoaderConfig;
use loader::pipeline;
use loader::report::print_report;

fn main() {
    let config = LoaderConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}. Exiting.");
        process::exit(1);
    });

    world_core::initialize_logger(log::LevelFilter::Info, config.log_file.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Failed to initialize logger: {e:#}. Exiting.");
            process::exit(1);
        });

    log::info!(
        "Loading {} into {}",
        config.database_path.display(),
        config.keydb_url
    );

    match pipeline::run(&config) {
        Ok(summary) => {
            log::info!(
                "Run complete: {} cities extracted, {} cache records written.",
                summary.extracted,
                summary.written
            );
            print_report(&summary.timings);
        }
        Err(e) => {
            log::error!("Run aborted: {e}");
            process::exit(1);
        }
    }
}
