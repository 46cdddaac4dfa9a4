use crate::{
  primary_adapter, AdapterDescriptor, Backend, CaptureEngine, CaptureOptions, CapturedImage,
  DeviceCache, DisplayMode, Error, Region, Result, WindowGeometry, WindowHandle,
};
use log::debug;

/// Captures windows by reading back the front buffer of a per-window device.
///
/// Devices are cached per window handle, see [`DeviceCache`].
/// The adapter is selected once on creation, only its display mode is re-read per capture.
/// # Examples
/// ```no_run
/// # #[cfg(windows)]
/// # {
/// use d3d_window_capture::{Capturer, WindowHandle};
///
/// let capturer = Capturer::direct3d().unwrap();
/// let image = capturer.capture_window(WindowHandle::from_raw(0x10010)).unwrap();
/// println!("{}x{}", image.width(), image.height());
/// # }
/// ```
#[derive(Debug)]
pub struct Capturer<B: Backend, G> {
  backend: B,
  geometry: G,
  adapter: AdapterDescriptor,
  cache: DeviceCache<B::Device>,
  options: CaptureOptions,
}

impl<B: Backend, G: WindowGeometry> Capturer<B, G> {
  /// Return [`Error::Initialization`] if `backend` has no adapter.
  #[inline]
  pub fn new(backend: B, geometry: G) -> Result<Self> {
    Self::with_options(backend, geometry, CaptureOptions::default())
  }

  /// Return [`Error::Initialization`] if `backend` has no adapter.
  pub fn with_options(backend: B, geometry: G, options: CaptureOptions) -> Result<Self> {
    let adapter = primary_adapter(&backend)?;
    debug!(
      "capturing through adapter {} ({}), display mode {}x{}",
      adapter.index, adapter.description, adapter.mode.width, adapter.mode.height
    );

    Ok(Self {
      backend,
      geometry,
      adapter,
      cache: DeviceCache::from_options(&options),
      options,
    })
  }

  /// Capture the whole client area of a window.
  pub fn capture_window(&self, handle: WindowHandle) -> Result<CapturedImage> {
    let client_rect = self.client_rect(handle)?;
    self.capture_with_client_rect(handle, &client_rect, client_rect)
  }

  /// Capture `region` (in screen coordinates) through the device of `handle`.
  pub fn capture_region(&self, handle: WindowHandle, region: Region) -> Result<CapturedImage> {
    region.validate()?;
    let client_rect = self.client_rect(handle)?;
    self.capture_with_client_rect(handle, &client_rect, region)
  }

  fn capture_with_client_rect(
    &self,
    handle: WindowHandle,
    client_rect: &Region,
    region: Region,
  ) -> Result<CapturedImage> {
    // the resolution may have changed since the last capture
    let mode = self.display_mode()?;
    let adapter = self.adapter.index;
    let device = self
      .cache
      .get_or_create(&self.backend, adapter, &mode, handle, client_rect)?;
    CaptureEngine::new(&self.backend, &self.options).capture(&device, adapter, &mode, region)
  }

  #[inline]
  fn client_rect(&self, handle: WindowHandle) -> Result<Region> {
    self
      .geometry
      .absolute_client_rect(handle)
      .map_err(Error::window_geometry(handle))
  }

  /// Release the cached device of `handle`.
  /// Return `false` if no device was cached.
  #[inline]
  pub fn invalidate(&self, handle: WindowHandle) -> bool {
    self.cache.invalidate(handle)
  }

  /// Release every cached device.
  #[inline]
  pub fn release_all(&self) {
    self.cache.clear()
  }

  /// The adapter selected on creation.
  /// Its `mode` is the display mode at that time, see [`Self::display_mode`] for the current one.
  #[inline]
  pub const fn adapter(&self) -> &AdapterDescriptor {
    &self.adapter
  }

  #[inline]
  pub fn display_mode(&self) -> Result<DisplayMode> {
    self.backend.display_mode(self.adapter.index)
  }

  #[inline]
  pub const fn device_cache(&self) -> &DeviceCache<B::Device> {
    &self.cache
  }

  #[inline]
  pub const fn backend(&self) -> &B {
    &self.backend
  }

  #[inline]
  pub const fn geometry(&self) -> &G {
    &self.geometry
  }

  #[inline]
  pub const fn options(&self) -> &CaptureOptions {
    &self.options
  }
}

#[cfg(windows)]
impl Capturer<crate::Direct3D9, crate::ClientAreaGeometry> {
  /// Create a capturer on the primary Direct3D 9 adapter with default options.
  pub fn direct3d() -> Result<Self> {
    Self::new(crate::Direct3D9::new()?, crate::ClientAreaGeometry)
  }
}
