//! Error types for voidfield.
//!
//! The per-frame pipeline never fails; malformed inputs degrade to fallback
//! visuals instead. Errors only arise at the edges: parsing names and colors,
//! loading configuration files, and bringing up the GPU and window.

use thiserror::Error;

/// Unrecognized formation name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown formation '{0}'")]
pub struct UnknownFormation(pub String);

/// Errors from color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Not a `#rrggbb` string.
    #[error("invalid hex color '{0}', expected #rrggbb")]
    InvalidHex(String),
    /// Unknown temperature name.
    #[error("unknown color temperature '{0}'")]
    UnknownTemp(String),
}

/// Errors from loading or saving scene configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the file.
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or wrong field types.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// No preset with this name.
    #[error("unknown scene preset '{0}'")]
    UnknownPreset(String),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a WebGPU/Vulkan/Metal/DX12 capable GPU is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable formats.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
    /// The device ran out of memory while presenting a frame.
    #[error("GPU out of memory")]
    OutOfMemory,
}

/// Errors that can occur when running the windowed void.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create event loop or run it.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
