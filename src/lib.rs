pub mod dashboard;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod seed;
pub mod simulate;
pub mod theme;
pub mod views;

use crate::dashboard::DashboardCore;
use crate::models::{
    AcceptedResponse, ActivityFeed, DashboardSettings, DashboardSnapshot, NotificationState,
    ProfileField, ProfileState, SaveProfilePayload, Theme, View, ViewContent,
};
use crate::theme::FileThemeStore;
use std::path::Path;
use std::sync::Arc;
use tauri::Manager;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

#[derive(Clone)]
struct AppState {
    dashboard: DashboardCore,
}

#[tauri::command]
fn dashboard_snapshot(state: tauri::State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(state.dashboard.snapshot())
}

#[tauri::command]
fn view_content(state: tauri::State<'_, AppState>) -> Result<ViewContent, String> {
    Ok(state.dashboard.view_content())
}

#[tauri::command]
fn set_active_view(state: tauri::State<'_, AppState>, view: View) -> Result<View, String> {
    Ok(state.dashboard.set_active_view(view))
}

#[tauri::command]
fn open_profile(state: tauri::State<'_, AppState>) -> Result<View, String> {
    Ok(state.dashboard.open_profile())
}

#[tauri::command]
fn set_search_query(
    state: tauri::State<'_, AppState>,
    query: String,
) -> Result<ActivityFeed, String> {
    Ok(state.dashboard.set_search_query(query))
}

#[tauri::command]
async fn submit_search(state: tauri::State<'_, AppState>) -> Result<ActivityFeed, String> {
    Ok(state.dashboard.submit_search().await)
}

#[tauri::command]
fn clear_search(state: tauri::State<'_, AppState>) -> Result<ActivityFeed, String> {
    Ok(state.dashboard.clear_search())
}

#[tauri::command]
fn activity_feed(state: tauri::State<'_, AppState>) -> Result<ActivityFeed, String> {
    Ok(state.dashboard.activity_feed())
}

#[tauri::command]
async fn toggle_notifications(
    state: tauri::State<'_, AppState>,
) -> Result<NotificationState, String> {
    Ok(state.dashboard.toggle_notifications().await)
}

#[tauri::command]
fn notification_state(state: tauri::State<'_, AppState>) -> Result<NotificationState, String> {
    Ok(state.dashboard.notification_state())
}

#[tauri::command]
fn set_profile_field(
    state: tauri::State<'_, AppState>,
    field: ProfileField,
    value: String,
) -> Result<ProfileState, String> {
    Ok(state.dashboard.set_profile_field(field, value))
}

#[tauri::command]
async fn save_profile(
    state: tauri::State<'_, AppState>,
    payload: SaveProfilePayload,
) -> Result<AcceptedResponse, String> {
    state.dashboard.save_profile(payload).await.map_err(to_client_error)
}

#[tauri::command]
fn get_theme(state: tauri::State<'_, AppState>) -> Result<Theme, String> {
    Ok(state.dashboard.get_theme())
}

#[tauri::command]
fn set_theme(state: tauri::State<'_, AppState>, theme: Theme) -> Result<Theme, String> {
    state.dashboard.set_theme(theme).map_err(to_client_error)
}

#[tauri::command]
fn toggle_theme(state: tauri::State<'_, AppState>) -> Result<Theme, String> {
    state.dashboard.toggle_theme().map_err(to_client_error)
}

#[tauri::command]
fn get_settings(state: tauri::State<'_, AppState>) -> Result<DashboardSettings, String> {
    Ok(state.dashboard.get_settings())
}

#[tauri::command]
fn update_settings(
    state: tauri::State<'_, AppState>,
    settings: DashboardSettings,
) -> Result<DashboardSettings, String> {
    Ok(state.dashboard.update_settings(settings))
}

pub fn run() {
    let app = tauri::Builder::default()
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir().map_err(|error| error.to_string())?;
            std::fs::create_dir_all(&app_data_dir).map_err(|error| error.to_string())?;
            init_tracing(&app_data_dir).map_err(|error| error.to_string())?;

            let theme_store = Arc::new(FileThemeStore::new(&app_data_dir));
            let dashboard = DashboardCore::new(theme_store, DashboardSettings::default());
            let handle = app.handle().clone();

            tauri::async_runtime::spawn({
                let dashboard = dashboard.clone();
                async move {
                    dashboard.attach_app_handle(handle).await;
                }
            });

            tauri::async_runtime::spawn({
                let dashboard = dashboard.clone();
                async move {
                    dashboard.start_ticker();
                }
            });

            app.manage(AppState { dashboard });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            dashboard_snapshot,
            view_content,
            set_active_view,
            open_profile,
            set_search_query,
            submit_search,
            clear_search,
            activity_feed,
            toggle_notifications,
            notification_state,
            set_profile_field,
            save_profile,
            get_theme,
            set_theme,
            toggle_theme,
            get_settings,
            update_settings
        ])
        .build(tauri::generate_context!())
        .expect("failed to build tauri app");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            let state: tauri::State<'_, AppState> = app_handle.state();
            state.dashboard.shutdown();
        }
    });
}

fn init_tracing(app_data_dir: &Path) -> Result<(), String> {
    let log_dir = app_data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "pulseboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}

fn to_client_error(error: impl std::fmt::Display) -> String {
    error.to_string()
}
