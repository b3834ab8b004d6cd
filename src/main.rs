// src/main.rs

use ecs_deploy::errors::report_failure;
use ecs_deploy::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    let legacy = args.legacy_exit_status;

    if let Err(err) = run_main(args).await {
        let code = report_failure(&err, legacy, &mut std::io::stdout());
        std::process::exit(code);
    }
}

async fn run_main(args: cli::CliArgs) -> anyhow::Result<()> {
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
