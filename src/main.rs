use colored::Colorize;

fn main() {
    if let Err(err) = charbinder::run() {
        eprintln!("{} {}", "✗".bright_red().bold(), err);
        std::process::exit(1);
    }
}
