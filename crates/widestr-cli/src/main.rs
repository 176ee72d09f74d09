use std::process::ExitCode;

fn main() -> ExitCode {
    match widestr_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(widestr_cli::report(&err)),
    }
}
