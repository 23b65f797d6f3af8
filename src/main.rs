fn main() {
    if let Err(e) = georow::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
