pub mod game_common;
pub mod main_menu;
pub mod manor_map;
pub mod manor_scene;

pub use main_menu::render_main_menu;
pub use manor_scene::render_game;
