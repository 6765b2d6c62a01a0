fn main() {
    if let Err(e) = rescat_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
