// src/main.rs

use compose_deploy::{cli, logging, report_failure, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("compose-deploy error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        report_failure(&err);
        std::process::exit(err.exit_code());
    }
}
