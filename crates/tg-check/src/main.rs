use std::process::ExitCode;

use tg_check::{run, CheckConfig, CheckStatus};

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let config = CheckConfig::default();
    let status = match run(&config) {
        Ok(report) => report.status,
        Err(e) => {
            log::error!("check aborted: {e}");
            CheckStatus::Failed
        }
    };

    println!("{status}");
    ExitCode::from(status.exit_code())
}
