#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use clap::Parser;
use fltk::app;

use cherry_pad::app::services::instance;
use cherry_pad::app::{AppOptions, ApplicationController, DocumentWindow};
use cherry_pad::cli::Cli;
use cherry_pad::ui::main_window::MainWindow;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let launch = cli.launch_event();

    let server = match instance::acquire(&instance::default_socket_path(), &launch) {
        Ok(Some(server)) => Some(server),
        Ok(None) => {
            log::info!("Handed launch over to the running instance");
            return;
        }
        Err(e) => {
            log::warn!("Single-instance check failed, running standalone: {}", e);
            None
        }
    };

    let fltk_app = app::App::default();
    let mut controller: ApplicationController<MainWindow> =
        match ApplicationController::new(AppOptions::default()) {
            Ok(controller) => controller,
            Err(e) => {
                log::error!("Failed to start: {}", e);
                eprintln!("cherrypad: {}", e);
                std::process::exit(1);
            }
        };

    let _instance_guard = server.and_then(|server| {
        server
            .serve(controller.event_sender(), app::awake)
            .map_err(|e| log::warn!("Cannot accept forwarded launches: {}", e))
            .ok()
    });

    controller.dispatch(launch);

    while fltk_app.wait() {
        controller.process_pending();
        if controller.quit_requested() {
            for window in controller.windows_mut() {
                window.close();
            }
            controller.process_pending();
            break;
        }
    }

    // Windows closed during the final wait
    controller.process_pending();
    log::debug!("Event loop finished");
}
