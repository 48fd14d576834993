fn main() {
    if let Err(err) = remote_send::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
