//! Camera device enumeration.

use nokhwa::query;
use nokhwa::utils::ApiBackend;

use super::types::{CameraError, CameraInfo};

/// List all available camera devices on the system.
///
/// No cameras is an empty list, not an error.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;

    let cameras: Vec<CameraInfo> = devices
        .into_iter()
        .enumerate()
        .map(|(i, d)| CameraInfo {
            index: d.index().as_index().unwrap_or(i as u32),
            name: d.human_name(),
            description: d.description().to_string(),
        })
        .collect();

    log::debug!("Found {} camera(s)", cameras.len());
    Ok(cameras)
}
