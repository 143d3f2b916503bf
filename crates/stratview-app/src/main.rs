// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use stratview_app::config::load_config;
use stratview_app::ipc;
use stratview_app::logging::init_logging;
use stratview_app::state::AppState;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = load_config();

    tauri::Builder::default()
        .manage(AppState::new(config))
        .invoke_handler(tauri::generate_handler![
            ipc::start_playback_loop,
            ipc::send_control,
            ipc::fire_timer,
            ipc::get_snapshot,
            ipc::decode_blocks,
            ipc::list_strategies,
            ipc::load_strategy,
            ipc::save_strategy,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
