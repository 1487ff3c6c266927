fn main() {
    if let Err(e) = game_storefront_lib::run() {
        log::error!("{}", e);
        eprintln!("game-storefront: {}", e);
        std::process::exit(1);
    }
}
