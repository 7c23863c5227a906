#[macroquad::main("Minimap")]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    minimap_web_lib::run().await;
}
