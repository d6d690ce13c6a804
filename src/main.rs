#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_helpers;
mod app_runtime;
mod app_types;
mod asset_paths;
mod backend_launch;
mod desktop_bridge_commands;
mod exit_events;
mod logging;
mod main_window;
mod menu_actions;
mod menu_handler;
mod menu_setup;
mod process_control;
mod runtime_paths;
mod shell_config;
mod splash_window;
mod startup_flow;
mod startup_task;
mod window_actions;
mod window_state;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{
    append_backend_log, append_desktop_log, append_shutdown_log, append_startup_log,
};
pub(crate) use app_types::{AtomicFlagGuard, BridgeResult, LaunchPlan, ShellState};

fn main() {
    app_runtime::run();
}
