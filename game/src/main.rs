use macroquad::window::next_frame;

use gravswap::game_app::App;

#[macroquad::main("Gravswap")]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut app = App::new();
    while app.tick() {
        next_frame().await;
    }
}
