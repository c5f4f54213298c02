/**
 * egui Native Desktop App - Main Entry Point
 *
 * Loads the configuration, picks the backend adapter, starts the session
 * driver on a tokio runtime and hands the window to eframe.
 */
use std::sync::Arc;

use eframe::egui;
use eventboard::client::{drive_session, Backend, HttpBackend, MemoryBackend, NoticeLog, SessionHandle, Store};
use eventboard::egui_app::theme::styles;
use eventboard::egui_app::{views, AppState, Config};
use eventboard::shared::config::BackendKind;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;

    match config.backend() {
        BackendKind::Http => {
            tracing::info!("Using backend at {}", config.server_url());
            run(runtime, HttpBackend::from_config(config.app()))
        }
        BackendKind::Memory => {
            tracing::info!("Using in-memory backend, nothing will be saved");
            run(runtime, MemoryBackend::new())
        }
    }
}

fn run<B: Backend>(runtime: tokio::runtime::Runtime, backend: B) -> Result<(), Box<dyn std::error::Error>> {
    let notices = NoticeLog::new();
    let store = Arc::new(Store::new(backend, Arc::new(notices.clone())));
    let session = SessionHandle::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EventBoard",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);

            let ctx = cc.egui_ctx.clone();
            let mount_store = store.clone();
            let mount_ctx = ctx.clone();
            let on_mount = move || {
                tokio::spawn(async move {
                    let _ = mount_store.get_events().await;
                    mount_ctx.request_repaint();
                });
            };

            let driver_ctx = ctx.clone();
            let driver = drive_session(store.clone(), session.clone(), on_mount);
            runtime.spawn(async move {
                driver.await;
                driver_ctx.request_repaint();
            });

            let state = AppState::new(store, session, notices, runtime.handle().clone(), ctx);
            Ok(Box::new(EventBoardApp { state, _runtime: runtime }))
        }),
    )?;
    Ok(())
}

struct EventBoardApp<B: Backend> {
    state: AppState<B>,
    // keeps spawned actions alive for the lifetime of the window
    _runtime: tokio::runtime::Runtime,
}

impl<B: Backend> eframe::App for EventBoardApp<B> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(next_expiry) = self.state.poll_notices(std::time::Instant::now()) {
            ctx.request_repaint_after(next_expiry);
        }

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_toasts(ctx, &mut self.state);
    }
}
