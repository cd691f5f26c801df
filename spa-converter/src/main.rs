mod cli;
mod decoder;

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli::cli() {
        Ok(_) => ExitCode::from(0),
        Err(err) => {
            log::error!("{err:?}");
            ExitCode::from(1)
        }
    }
}
