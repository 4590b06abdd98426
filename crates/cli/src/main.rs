use std::process::ExitCode;

fn main() -> ExitCode {
    fleur_cli::run()
}
