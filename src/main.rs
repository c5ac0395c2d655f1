mod cli;
mod config;
mod dump;
mod error;
mod log;
mod notify;

use clap::Parser;
use console::style;
use dump::{DumpOrchestrator, MysqldumpRunner, EXIT_FAILURE, EXIT_SUCCESS};
use tracing::{debug, info};

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), err);
    std::process::exit(EXIT_FAILURE);
}

#[tokio::main]
async fn main() {
    log::init();
    let args = cli::Args::parse();

    let mut app_config = match config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(e),
    };
    if let Some(program) = args.dump_program {
        app_config.dump.program = program;
    }

    if args.init_config {
        let path = args.config.unwrap_or_else(config::config_path);
        if let Err(e) = config::save_to(&app_config, &path) {
            fail(e);
        }
        println!("Configuration written to {}", path.display());
        return;
    }

    let sinks = match notify::create_sinks(&app_config.notify) {
        Ok(s) => s,
        Err(e) => fail(e),
    };
    debug!("{} notification sink(s) configured", sinks.len());

    let runner = MysqldumpRunner::new(&app_config.dump);
    let orchestrator = DumpOrchestrator::new(app_config, Box::new(runner), sinks);

    let mut stdout = std::io::stdout();
    let code = orchestrator.run(args.path.as_deref(), &mut stdout).await;
    if code == EXIT_SUCCESS {
        info!("dump-database finished");
    }
    std::process::exit(code);
}
