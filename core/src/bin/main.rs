/// 8255 interpreter
///
/// Runs a source file: `8255 <filepath> [-d|--debug]`. The process exits with
/// the status handed to `ext`, or 0 when the program runs off its end.
use lang8255_core::cli;

fn main() {
    match cli::run_cli() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
