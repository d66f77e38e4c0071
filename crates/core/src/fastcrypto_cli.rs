fn main() {
    if let Err(err) = fastcrypto::run_cli() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
