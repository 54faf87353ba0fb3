//! AMEP Application
//!
//! Application root: owns the session, the collaboration workspace, the task
//! board and the optional content service.

mod app;

pub use app::{App, AppConfig, AppError, AppResult};
