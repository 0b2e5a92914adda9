mod commands;
mod error;
mod models;
mod services;
mod settings;
mod state;

use commands::{
    action_commands, classification_commands, digitalization_commands, document_commands,
    recommendation_commands, shell_commands,
};
use settings::Settings;
use state::AppState;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("docudesk starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings = Settings::load(&app_data_dir.join("settings.json"));
                app.manage(AppState::new(settings));
                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            shell_commands::get_active_panel,
            shell_commands::select_panel,
            document_commands::get_documents,
            document_commands::set_document_search,
            document_commands::toggle_document_tag,
            document_commands::add_document,
            digitalization_commands::load_image,
            digitalization_commands::zoom_in,
            digitalization_commands::zoom_out,
            digitalization_commands::set_crop,
            digitalization_commands::digitalize,
            digitalization_commands::get_digitalization,
            classification_commands::classify_text,
            classification_commands::get_classification,
            recommendation_commands::get_recommendations,
            action_commands::get_actions,
            action_commands::add_action,
            action_commands::toggle_action,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
