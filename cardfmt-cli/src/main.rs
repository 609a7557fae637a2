// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: the top-level error is reported on stderr.
// - exit: `std::process::exit()` signals failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

fn main() {
    match cardfmt_cli::cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
