use std::process::ExitCode;

use gtlab::{HarnessConfig, harness};
use log::error;

fn main() -> ExitCode {
    env_logger::init();

    let config = HarnessConfig::from_env();
    match harness::run(&config) {
        Ok(summary) => {
            println!("{}", summary.render(config.show_results));
            if summary.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
