fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    camera::init();

    for info in camera::query_available_cameras() {
        log::info!("{}: {} ({})", info.index, info.name, info.description);
    }
}
