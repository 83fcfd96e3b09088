use clap::Parser;
use contextforge::error::{EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};
use contextforge::{Cli, ForgeError, Output};

fn main() {
    let cli = Cli::parse();

    let code = match cli.run() {
        Ok(summary) if summary.is_success() => EXIT_SUCCESS,
        Ok(_) => EXIT_PARTIAL_FAILURE,
        Err(e) => {
            Output::new(false, false).error(&format!("{e:#}"));
            e.downcast_ref::<ForgeError>()
                .map_or(EXIT_PARTIAL_FAILURE, ForgeError::exit_code)
        }
    };

    std::process::exit(code);
}
