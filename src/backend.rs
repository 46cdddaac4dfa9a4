use crate::{AdapterDescriptor, DisplayMode, PixelFormat, Region, Result, WindowHandle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VertexProcessing {
  /// Works on every driver.
  #[default]
  Software,
  Hardware,
  Mixed,
}

/// Parameters used to create a rendering device bound to a window.
///
/// Devices are always windowed, without multisampling, discard their back buffer
/// on present and wait for the vertical retrace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceParams {
  pub window: WindowHandle,
  pub back_buffer_width: u32,
  pub back_buffer_height: u32,
  pub back_buffer_format: PixelFormat,
  pub vertex_processing: VertexProcessing,
}

impl DeviceParams {
  /// Parameters with a back buffer as large as `client_rect` in the current display format.
  pub fn for_window(
    window: WindowHandle,
    client_rect: &Region,
    mode: &DisplayMode,
    vertex_processing: VertexProcessing,
  ) -> Self {
    Self {
      window,
      back_buffer_width: client_rect.width(),
      back_buffer_height: client_rect.height(),
      back_buffer_format: mode.format,
      vertex_processing,
    }
  }
}

/// Locked CPU view of a [`Surface`].
/// Pixels are 32-bit BGRA and each row starts `pitch` bytes after the previous one.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
  pub bits: &'a [u8],
  pub pitch: usize,
  pub width: u32,
  pub height: u32,
}

/// A CPU-readable offscreen surface. Dropping it releases the surface.
pub trait Surface {
  /// Lock the surface for reading, pass the locked view to `f`, then unlock it.
  fn read<R>(&mut self, f: impl FnOnce(SurfaceView<'_>) -> R) -> Result<R>;
}

/// The graphics primitives the capture pipeline is built on.
pub trait Backend {
  type Device;
  type Surface: Surface;

  fn adapter_count(&self) -> u32;

  /// Identity and current display mode of the adapter at `index`.
  fn adapter(&self, index: u32) -> Result<AdapterDescriptor>;

  /// Current display mode of the adapter at `index`, without its identity.
  fn display_mode(&self, index: u32) -> Result<DisplayMode>;

  /// Create a hardware device on `adapter` bound to `params.window`.
  fn create_device(&self, adapter: u32, params: &DeviceParams) -> Result<Self::Device>;

  /// Create a 32-bit BGRA surface in system memory.
  fn create_offscreen_surface(
    &self,
    device: &Self::Device,
    width: u32,
    height: u32,
  ) -> Result<Self::Surface>;

  /// Copy the front buffer of `swap_chain` into `surface`. Blocks until the copy is done.
  fn front_buffer_data(
    &self,
    device: &Self::Device,
    swap_chain: u32,
    surface: &mut Self::Surface,
  ) -> Result<()>;
}
