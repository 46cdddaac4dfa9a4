//! In-memory backend and geometry provider for tests.

use crate::{
  AdapterDescriptor, Backend, DeviceParams, DisplayMode, Error, PixelFormat, Region, Result,
  Surface, SurfaceView, WindowGeometry, WindowHandle,
};
use std::{
  cell::{Cell, RefCell},
  collections::HashMap,
  rc::Rc,
};

/// The BGRA value the mock front buffer holds at `(x, y)`.
pub(crate) fn mock_pixel(x: u32, y: u32) -> [u8; 4] {
  [x as u8, y as u8, ((x >> 8) | ((y >> 8) << 4)) as u8, 0xff]
}

#[derive(Debug)]
pub(crate) struct MockDevice {
  pub id: usize,
  pub adapter: u32,
  pub params: DeviceParams,
}

#[derive(Debug)]
pub(crate) struct MockSurface {
  width: u32,
  height: u32,
  pitch: usize,
  data: Vec<u8>,
  live: Rc<Cell<usize>>,
}

impl Surface for MockSurface {
  fn read<R>(&mut self, f: impl FnOnce(SurfaceView<'_>) -> R) -> Result<R> {
    Ok(f(SurfaceView {
      bits: &self.data,
      pitch: self.pitch,
      width: self.width,
      height: self.height,
    }))
  }
}

impl Drop for MockSurface {
  fn drop(&mut self) {
    self.live.set(self.live.get() - 1);
  }
}

#[derive(Debug, Default)]
pub(crate) struct MockBackend {
  adapters: RefCell<Vec<AdapterDescriptor>>,
  /// Extra bytes at the end of every surface row.
  row_padding: usize,
  pub fail_device_creation: Cell<bool>,
  pub fail_readback: Cell<bool>,
  adapter_queries: Cell<usize>,
  devices_created: Cell<usize>,
  surfaces_allocated: Cell<usize>,
  live_surfaces: Rc<Cell<usize>>,
}

impl MockBackend {
  pub fn new(width: u32, height: u32) -> Self {
    Self::with_adapters(vec![Self::adapter_descriptor(0, width, height)])
  }

  pub fn with_adapters(adapters: Vec<AdapterDescriptor>) -> Self {
    Self {
      adapters: RefCell::new(adapters),
      ..Default::default()
    }
  }

  pub fn with_row_padding(mut self, row_padding: usize) -> Self {
    self.row_padding = row_padding;
    self
  }

  pub fn adapter_descriptor(index: u32, width: u32, height: u32) -> AdapterDescriptor {
    AdapterDescriptor {
      index,
      description: format!("Mock Adapter {index}"),
      vendor_id: 0x1234,
      device_id: 0x5678 + index,
      mode: DisplayMode {
        width,
        height,
        refresh_rate: 60,
        format: PixelFormat::X8R8G8B8,
      },
    }
  }

  /// Change the display mode of adapter `index`, as a resolution switch would.
  pub fn set_display_size(&self, index: u32, width: u32, height: u32) {
    let mut adapters = self.adapters.borrow_mut();
    let mode = &mut adapters[index as usize].mode;
    mode.width = width;
    mode.height = height;
  }

  /// How many times the adapter identity was looked up.
  pub fn adapter_queries(&self) -> usize {
    self.adapter_queries.get()
  }

  pub fn devices_created(&self) -> usize {
    self.devices_created.get()
  }

  pub fn surfaces_allocated(&self) -> usize {
    self.surfaces_allocated.get()
  }

  pub fn live_surfaces(&self) -> usize {
    self.live_surfaces.get()
  }
}

impl Backend for MockBackend {
  type Device = MockDevice;
  type Surface = MockSurface;

  fn adapter_count(&self) -> u32 {
    self.adapters.borrow().len() as u32
  }

  fn adapter(&self, index: u32) -> Result<AdapterDescriptor> {
    self.adapter_queries.set(self.adapter_queries.get() + 1);
    self
      .adapters
      .borrow()
      .get(index as usize)
      .cloned()
      .ok_or_else(|| Error::Backend {
        api: "adapter",
        message: format!("no adapter at index {index}"),
      })
  }

  fn display_mode(&self, index: u32) -> Result<DisplayMode> {
    self
      .adapters
      .borrow()
      .get(index as usize)
      .map(|adapter| adapter.mode)
      .ok_or_else(|| Error::Backend {
        api: "display_mode",
        message: format!("no adapter at index {index}"),
      })
  }

  fn create_device(&self, adapter: u32, params: &DeviceParams) -> Result<MockDevice> {
    if self.fail_device_creation.get() || params.window.is_null() {
      return Err(Error::Backend {
        api: "create_device",
        message: "driver failure".to_string(),
      });
    }
    let id = self.devices_created.get();
    self.devices_created.set(id + 1);
    Ok(MockDevice {
      id,
      adapter,
      params: *params,
    })
  }

  fn create_offscreen_surface(
    &self,
    _device: &MockDevice,
    width: u32,
    height: u32,
  ) -> Result<MockSurface> {
    self.surfaces_allocated.set(self.surfaces_allocated.get() + 1);
    self.live_surfaces.set(self.live_surfaces.get() + 1);
    let pitch = width as usize * 4 + self.row_padding;
    Ok(MockSurface {
      width,
      height,
      pitch,
      data: vec![0; pitch * height as usize],
      live: self.live_surfaces.clone(),
    })
  }

  fn front_buffer_data(
    &self,
    _device: &MockDevice,
    _swap_chain: u32,
    surface: &mut MockSurface,
  ) -> Result<()> {
    if self.fail_readback.get() {
      return Err(Error::Backend {
        api: "front_buffer_data",
        message: "device lost".to_string(),
      });
    }
    for y in 0..surface.height {
      for x in 0..surface.width {
        let offset = y as usize * surface.pitch + x as usize * 4;
        surface.data[offset..offset + 4].copy_from_slice(&mock_pixel(x, y));
      }
    }
    Ok(())
  }
}

/// Client rects keyed by window, adjustable during a test.
#[derive(Debug, Default)]
pub(crate) struct MockGeometry {
  rects: RefCell<HashMap<WindowHandle, Region>>,
}

impl MockGeometry {
  pub fn set(&self, handle: WindowHandle, client_rect: Region) {
    self.rects.borrow_mut().insert(handle, client_rect);
  }
}

impl WindowGeometry for MockGeometry {
  fn absolute_client_rect(&self, handle: WindowHandle) -> Result<Region> {
    self
      .rects
      .borrow()
      .get(&handle)
      .copied()
      .ok_or_else(|| Error::Backend {
        api: "absolute_client_rect",
        message: "invalid window handle".to_string(),
      })
  }
}
