use camera::{CameraConfig, CameraResult, CaptureLoop, DEFAULT_CAPTURE_INTERVAL};
use std::thread;

fn main() -> CameraResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CameraConfig::default()
        .with_width(1280)
        .with_height(720)
        .with_fps(25);

    let mut capture = CaptureLoop::open(0, config, DEFAULT_CAPTURE_INTERVAL)?;
    std::fs::create_dir_all("tmp")?;

    let mut frame_count = 0;
    for _ in 0..50 {
        thread::sleep(capture.interval());

        if let Some(frame) = capture.tick() {
            if frame_count % 10 == 0 {
                log::info!("Frame #{frame_count}: {}x{}", frame.width(), frame.height());
                frame.save(format!("tmp/camera-{frame_count}.png"))?;
            }
            frame_count += 1;
        }
    }

    if let Some(frame) = capture.snapshot_and_stop() {
        frame.save("tmp/camera-snapshot.png")?;
    }

    log::info!(
        "Captured {frame_count} frames, {} skipped ticks",
        capture.skipped_ticks()
    );
    Ok(())
}
