// src/main.rs

use testwatch::errors::{ConfigError, EXIT_CONFIG, EXIT_FAILURE};
use testwatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("testwatch error: {err:?}");
        std::process::exit(EXIT_FAILURE);
    }

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("testwatch error: {err}");
            let code = if err.downcast_ref::<ConfigError>().is_some() {
                EXIT_CONFIG
            } else {
                EXIT_FAILURE
            };
            std::process::exit(code);
        }
    }
}
