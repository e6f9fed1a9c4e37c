//! Error types for viewer startup.
//!
//! Only the window/GPU bring-up can fail. Picking misses and malformed
//! command-line input are normal control flow and never surface here.

use thiserror::Error;

/// Errors that can occur while creating the window and GPU context.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("bind group '{label}' has {provided} resources for {expected} layout bindings")]
    BindGroup {
        label: String,
        expected: usize,
        provided: usize,
    },

    #[error("pipeline '{pipeline}': {reason}")]
    Pipeline { pipeline: String, reason: String },
}
