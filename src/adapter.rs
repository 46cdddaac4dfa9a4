use crate::{Backend, Error, Result};

/// Only the primary adapter is used for capture.
pub const PRIMARY_ADAPTER: u32 = 0;

/// A pixel format code, numerically equal to the matching `D3DFORMAT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelFormat(pub u32);

impl PixelFormat {
  /// 32-bit with alpha, stored in memory as BGRA. Offscreen surfaces use this format.
  pub const A8R8G8B8: Self = Self(21);
  /// 32-bit without alpha, stored in memory as BGRX. The usual desktop format.
  pub const X8R8G8B8: Self = Self(22);
}

/// The current display mode of an adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayMode {
  pub width: u32,
  pub height: u32,
  pub refresh_rate: u32,
  pub format: PixelFormat,
}

/// Identity and current display mode of a physical display adapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdapterDescriptor {
  /// Ordinal of the adapter in the graphics subsystem.
  pub index: u32,
  pub description: String,
  pub vendor_id: u32,
  pub device_id: u32,
  pub mode: DisplayMode,
}

/// Return the descriptor of the primary adapter (index 0).
///
/// The identity does not change for the life of the process, a [`Capturer`](crate::Capturer)
/// queries it once and only re-reads the display mode with [`Backend::display_mode`].
/// Return [`Error::Initialization`] if the backend reports no adapter.
pub fn primary_adapter<B: Backend>(backend: &B) -> Result<AdapterDescriptor> {
  if backend.adapter_count() == 0 {
    return Err(Error::Initialization);
  }
  backend.adapter(PRIMARY_ADAPTER)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mock::MockBackend;

  #[test]
  fn selects_first_adapter() {
    let backend = MockBackend::with_adapters(vec![
      MockBackend::adapter_descriptor(0, 1920, 1080),
      MockBackend::adapter_descriptor(1, 2560, 1440),
    ]);
    let adapter = primary_adapter(&backend).unwrap();
    assert_eq!(adapter.index, 0);
    assert_eq!(adapter.mode.width, 1920);
    assert_eq!(adapter.mode.height, 1080);
    assert_eq!(adapter.mode.format, PixelFormat::X8R8G8B8);
  }

  #[test]
  fn no_adapter() {
    let backend = MockBackend::with_adapters(Vec::new());
    assert!(matches!(
      primary_adapter(&backend),
      Err(Error::Initialization)
    ));
  }
}
