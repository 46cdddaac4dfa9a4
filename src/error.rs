use crate::{Region, WindowHandle};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone)]
pub enum Error {
  /// The graphics subsystem is unavailable or reports no display adapter.
  #[error("no display adapter available")]
  Initialization,

  #[error("failed to create a device on adapter {adapter} for window {handle}")]
  DeviceCreation {
    adapter: u32,
    handle: WindowHandle,
    #[source]
    source: Box<Error>,
  },

  #[error("front buffer readback of {region} failed on adapter {adapter}")]
  CaptureReadback {
    adapter: u32,
    region: Region,
    #[source]
    source: Box<Error>,
  },

  #[error("invalid region {region}: {reason}")]
  InvalidRegion {
    region: Region,
    reason: &'static str,
  },

  #[error("failed to resolve the client area of window {handle}")]
  WindowGeometry {
    handle: WindowHandle,
    #[source]
    source: Box<Error>,
  },

  /// An error reported by a backend that is not backed by a Windows API.
  #[error("{api}: {message}")]
  Backend { api: &'static str, message: String },

  /// A Windows error.
  #[cfg(windows)]
  #[error("{api}: {err}")]
  Windows {
    api: &'static str,
    err: windows::core::Error,
  },
}

impl Error {
  #[inline]
  pub(crate) const fn invalid_region(region: Region, reason: &'static str) -> Self {
    Self::InvalidRegion { region, reason }
  }

  /// Return an error mapper that wraps a backend error as a [`Error::DeviceCreation`].
  #[inline]
  pub(crate) fn device_creation(adapter: u32, handle: WindowHandle) -> impl FnOnce(Error) -> Self {
    move |e| Self::DeviceCreation {
      adapter,
      handle,
      source: Box::new(e),
    }
  }

  /// Return an error mapper that wraps a backend error as a [`Error::CaptureReadback`].
  #[inline]
  pub(crate) fn readback(adapter: u32, region: Region) -> impl FnOnce(Error) -> Self {
    move |e| Self::CaptureReadback {
      adapter,
      region,
      source: Box::new(e),
    }
  }

  /// Return an error mapper that wraps a geometry provider error as a [`Error::WindowGeometry`].
  #[inline]
  pub(crate) fn window_geometry(handle: WindowHandle) -> impl FnOnce(Error) -> Self {
    move |e| match e {
      // already carries the handle
      Self::WindowGeometry { .. } => e,
      e => Self::WindowGeometry {
        handle,
        source: Box::new(e),
      },
    }
  }

  /// Create a new Windows error.
  #[cfg(windows)]
  #[inline]
  const fn windows(api: &'static str, err: windows::core::Error) -> Self {
    Self::Windows { api, err }
  }

  /// Create a new Windows error from `GetLastError`.
  #[cfg(windows)]
  #[inline]
  pub(crate) fn last_win_err(api: &'static str) -> Self {
    Self::windows(api, windows::core::Error::from_win32())
  }

  /// Return an error mapper to convert a Windows error to an [`Error`].
  #[cfg(windows)]
  #[inline]
  pub(crate) fn from_win_err(api: &'static str) -> impl FnOnce(windows::core::Error) -> Self {
    move |e| Self::windows(api, e)
  }
}
