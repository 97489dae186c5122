use billkeep::cli::run_cli;

fn main() {
    billkeep::init();

    if let Err(err) = run_cli() {
        billkeep::cli::output::error(format!("Fatal: {err}"));
        std::process::exit(1);
    }
}
