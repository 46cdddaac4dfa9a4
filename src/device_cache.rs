use crate::{
  Backend, CaptureOptions, DeviceParams, DisplayMode, Error, Region, Result, VertexProcessing,
  WindowHandle,
};
use log::debug;
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

#[derive(Debug)]
struct CachedDevice<Device> {
  device: Arc<Device>,
  /// The client rect the device's back buffer was sized from.
  client_rect: Region,
}

/// Rendering devices keyed by window.
///
/// Creating a device is expensive, so the first capture of a window creates one
/// and later captures reuse it. Lookup, creation and insertion happen under one lock,
/// so a window never gets two devices.
#[derive(Debug)]
pub struct DeviceCache<Device> {
  devices: Mutex<HashMap<WindowHandle, CachedDevice<Device>>>,
  recreate_on_resize: bool,
  vertex_processing: VertexProcessing,
}

impl<Device> Default for DeviceCache<Device> {
  fn default() -> Self {
    Self::from_options(&CaptureOptions::default())
  }
}

impl<Device> DeviceCache<Device> {
  pub fn from_options(options: &CaptureOptions) -> Self {
    Self {
      devices: Mutex::new(HashMap::new()),
      recreate_on_resize: options.recreate_on_resize,
      vertex_processing: options.vertex_processing,
    }
  }

  /// Return the cached device of `handle`, or create one on `adapter` with a back buffer
  /// as large as `client_rect` in the format of `mode` and cache it.
  ///
  /// If the cache was built with `recreate_on_resize`, a cached device whose creation
  /// size differs from `client_rect` is dropped and recreated. Otherwise `client_rect`
  /// is ignored on a cache hit.
  pub fn get_or_create<B>(
    &self,
    backend: &B,
    adapter: u32,
    mode: &DisplayMode,
    handle: WindowHandle,
    client_rect: &Region,
  ) -> Result<Arc<Device>>
  where
    B: Backend<Device = Device>,
  {
    let mut devices = self.devices.lock();

    if let Some(cached) = devices.get(&handle) {
      if !self.recreate_on_resize || same_size(&cached.client_rect, client_rect) {
        debug!("reusing device of window {handle}");
        return Ok(cached.device.clone());
      }
      debug!(
        "client area of window {handle} changed from {} to {}, recreating device",
        cached.client_rect, client_rect
      );
      devices.remove(&handle);
    }

    let device = Arc::new(self.create_device(backend, adapter, mode, handle, client_rect)?);
    devices.insert(
      handle,
      CachedDevice {
        device: device.clone(),
        client_rect: *client_rect,
      },
    );
    Ok(device)
  }

  fn create_device<B>(
    &self,
    backend: &B,
    adapter: u32,
    mode: &DisplayMode,
    handle: WindowHandle,
    client_rect: &Region,
  ) -> Result<Device>
  where
    B: Backend<Device = Device>,
  {
    let map_err = || Error::device_creation(adapter, handle);

    client_rect.validate().map_err(map_err())?;
    if client_rect.is_empty() {
      return Err(map_err()(Error::invalid_region(
        *client_rect,
        "client area is empty",
      )));
    }

    let params = DeviceParams::for_window(handle, client_rect, mode, self.vertex_processing);
    debug!(
      "creating device on adapter {adapter} for window {handle}, back buffer {}x{}",
      params.back_buffer_width, params.back_buffer_height
    );
    backend
      .create_device(adapter, &params)
      .map_err(map_err())
  }

  /// Drop the cached device of `handle`.
  /// The device is released once every [`Arc`] handed out for it is dropped.
  ///
  /// Return `false` if no device was cached for `handle`.
  pub fn invalidate(&self, handle: WindowHandle) -> bool {
    let removed = self.devices.lock().remove(&handle).is_some();
    if removed {
      debug!("invalidated device of window {handle}");
    }
    removed
  }

  /// Drop every cached device.
  pub fn clear(&self) {
    let mut devices = self.devices.lock();
    debug!("releasing {} cached devices", devices.len());
    devices.clear();
  }

  #[inline]
  pub fn contains(&self, handle: WindowHandle) -> bool {
    self.devices.lock().contains_key(&handle)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.devices.lock().len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.devices.lock().is_empty()
  }
}

#[inline]
fn same_size(a: &Region, b: &Region) -> bool {
  a.width() == b.width() && a.height() == b.height()
}
