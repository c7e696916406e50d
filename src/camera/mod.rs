//! Camera capture: the frame source for the tracking loop.
//!
//! - Device enumeration via [`list_devices`]
//! - Webcam capture via [`CameraCapture`]
//! - Camera-less playback via [`SyntheticFrames`]
//!
//! Both capture types implement [`FrameSource`].

mod capture;
mod capture_loop;
mod device;
mod frame_utils;
mod source;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use frame_utils::mirror_horizontal;
pub use source::{FrameSource, SyntheticFrames};
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution};
