//! Terminal output helpers

use colored::Colorize;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[token-lens]".red(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[token-lens]".yellow(), msg);
}

pub fn print_verbose(msg: &str, verbose: bool) {
    if verbose {
        eprintln!("{} {}", "[token-lens]".dimmed(), msg);
    }
}
