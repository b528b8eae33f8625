//! rgbshot desktop application
//!
//! A small image viewer and editor built with Slint. Images come from disk or
//! from a camera snapshot, and can be cropped, brightened and annotated with
//! lines while the red, green and blue channels are toggled for display.

slint::include_modules!();

use slint::ComponentHandle;

#[macro_use]
extern crate derivative;

mod config;
mod logic;

/// Installs the logger with a `[time level file line] message` format.
pub fn init_logger() {
    use std::io::Write;

    env_logger::builder()
        .filter_module("nokhwa", log::LevelFilter::Warn)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = cutil::time::local_now("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn ui_before() {
    init_logger();
    config::init();
    camera::init();

    #[cfg(target_os = "linux")]
    {
        _ = slint::set_xdg_app_id("rgbshot".to_string());
    }
}

fn ui_after(ui: &AppWindow) {
    let preference = config::all().preference;
    ui.window().set_size(slint::LogicalSize::new(
        preference.win_width as f32,
        preference.win_height as f32,
    ));

    logic::init(ui);
}

/// Main entry point for the desktop application.
pub fn desktop_main() -> anyhow::Result<()> {
    log::debug!("start...");

    ui_before();
    let ui = AppWindow::new()?;
    ui_after(&ui);

    ui.run()?;

    log::debug!("exit...");
    Ok(())
}
