use nokhwa::{
    CallbackCamera,
    pixel_format::RgbFormat,
    query,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
};

#[derive(Debug, Clone)]
pub struct CameraInfo {
    pub index: String,
    pub name: String,
    pub description: String,
}

/// Devices that can actually open a stream.
pub fn query_available_cameras() -> Vec<CameraInfo> {
    let cameras = match query(ApiBackend::Auto) {
        Ok(cameras) => cameras,
        Err(e) => {
            log::warn!("query cameras failed: {e}");
            return Vec::new();
        }
    };

    cameras
        .into_iter()
        .filter(|camera| verify_camera(camera.index().clone()))
        .map(|camera| CameraInfo {
            index: camera.index().to_string(),
            name: camera.human_name(),
            description: camera.description().to_string(),
        })
        .collect()
}

fn verify_camera(index: CameraIndex) -> bool {
    let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

    match CallbackCamera::new(index, format, |_| {}) {
        Ok(mut camera) => match camera.open_stream() {
            Ok(_) => {
                _ = camera.stop_stream();
                true
            }
            Err(_) => false,
        },
        Err(_) => false,
    }
}
