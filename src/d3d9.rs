use crate::{
  AdapterDescriptor, Backend, DeviceParams, DisplayMode, Error, PixelFormat, Result, Surface,
  SurfaceView, VertexProcessing,
};
use std::{ptr, slice};
use windows::Win32::{
  Foundation::HWND,
  Graphics::Direct3D9::{
    Direct3DCreate9, IDirect3D9, IDirect3DDevice9, IDirect3DSurface9, D3DADAPTER_IDENTIFIER9,
    D3DCREATE_HARDWARE_VERTEXPROCESSING, D3DCREATE_MIXED_VERTEXPROCESSING,
    D3DCREATE_SOFTWARE_VERTEXPROCESSING, D3DDEVTYPE_HAL, D3DDISPLAYMODE, D3DFORMAT,
    D3DLOCKED_RECT, D3DLOCK_READONLY, D3DMULTISAMPLE_NONE, D3DPOOL_SYSTEMMEM,
    D3DPRESENT_INTERVAL_DEFAULT, D3DPRESENT_PARAMETERS, D3DSWAPEFFECT_DISCARD, D3D_SDK_VERSION,
  },
};

/// [`Backend`] on top of Direct3D 9.
///
/// Devices and surfaces are not thread safe, use them from the thread that created them.
/// # Examples
/// ```no_run
/// use d3d_window_capture::{primary_adapter, Direct3D9};
///
/// let d3d = Direct3D9::new().unwrap();
/// let adapter = primary_adapter(&d3d).unwrap();
/// println!("{}x{}", adapter.mode.width, adapter.mode.height);
/// ```
#[derive(Debug, Clone)]
pub struct Direct3D9 {
  d3d: IDirect3D9,
}

impl Direct3D9 {
  /// Return [`Error::Initialization`] if Direct3D 9 is unavailable.
  pub fn new() -> Result<Self> {
    let d3d = unsafe { Direct3DCreate9(D3D_SDK_VERSION) }.ok_or(Error::Initialization)?;
    Ok(Self { d3d })
  }

  fn identifier(&self, index: u32) -> Result<D3DADAPTER_IDENTIFIER9> {
    let mut identifier = D3DADAPTER_IDENTIFIER9::default();
    unsafe { self.d3d.GetAdapterIdentifier(index, 0, &mut identifier) }.map_err(
      Error::from_win_err(stringify!(IDirect3D9.GetAdapterIdentifier)),
    )?;
    Ok(identifier)
  }
}

impl Backend for Direct3D9 {
  type Device = IDirect3DDevice9;
  type Surface = Direct3D9Surface;

  #[inline]
  fn adapter_count(&self) -> u32 {
    unsafe { self.d3d.GetAdapterCount() }
  }

  fn adapter(&self, index: u32) -> Result<AdapterDescriptor> {
    let identifier = self.identifier(index)?;

    // copy out of the packed struct before iterating
    let description = identifier.Description;
    let description = description
      .iter()
      .take_while(|c| **c != 0)
      .map(|c| *c as u8 as char)
      .collect();

    Ok(AdapterDescriptor {
      index,
      description,
      vendor_id: identifier.VendorId,
      device_id: identifier.DeviceId,
      mode: self.display_mode(index)?,
    })
  }

  fn display_mode(&self, index: u32) -> Result<DisplayMode> {
    let mut mode = D3DDISPLAYMODE::default();
    unsafe { self.d3d.GetAdapterDisplayMode(index, &mut mode) }.map_err(Error::from_win_err(
      stringify!(IDirect3D9.GetAdapterDisplayMode),
    ))?;
    Ok(DisplayMode {
      width: mode.Width,
      height: mode.Height,
      refresh_rate: mode.RefreshRate,
      format: PixelFormat(mode.Format.0 as u32),
    })
  }

  fn create_device(&self, adapter: u32, params: &DeviceParams) -> Result<IDirect3DDevice9> {
    let hwnd: HWND = params.window.into();
    let mut present_params = D3DPRESENT_PARAMETERS {
      BackBufferWidth: params.back_buffer_width,
      BackBufferHeight: params.back_buffer_height,
      BackBufferFormat: D3DFORMAT(params.back_buffer_format.0 as _),
      MultiSampleType: D3DMULTISAMPLE_NONE,
      SwapEffect: D3DSWAPEFFECT_DISCARD,
      hDeviceWindow: hwnd,
      Windowed: true.into(),
      FullScreen_RefreshRateInHz: 0,
      PresentationInterval: D3DPRESENT_INTERVAL_DEFAULT as u32,
      ..Default::default()
    };
    let behavior = match params.vertex_processing {
      VertexProcessing::Software => D3DCREATE_SOFTWARE_VERTEXPROCESSING as u32,
      VertexProcessing::Hardware => D3DCREATE_HARDWARE_VERTEXPROCESSING as u32,
      VertexProcessing::Mixed => D3DCREATE_MIXED_VERTEXPROCESSING as u32,
    };

    let mut device: Option<IDirect3DDevice9> = None;
    unsafe {
      self.d3d.CreateDevice(
        adapter,
        D3DDEVTYPE_HAL,
        hwnd,
        behavior,
        &mut present_params,
        &mut device,
      )
    }
    .map_err(Error::from_win_err(stringify!(IDirect3D9.CreateDevice)))?;

    device.ok_or(Error::Backend {
      api: stringify!(IDirect3D9.CreateDevice),
      message: "no device returned".to_string(),
    })
  }

  fn create_offscreen_surface(
    &self,
    device: &IDirect3DDevice9,
    width: u32,
    height: u32,
  ) -> Result<Direct3D9Surface> {
    let mut surface: Option<IDirect3DSurface9> = None;
    unsafe {
      device.CreateOffscreenPlainSurface(
        width,
        height,
        D3DFORMAT(PixelFormat::A8R8G8B8.0 as _),
        D3DPOOL_SYSTEMMEM,
        &mut surface,
        ptr::null_mut(),
      )
    }
    .map_err(Error::from_win_err(stringify!(
      IDirect3DDevice9.CreateOffscreenPlainSurface
    )))?;

    let surface = surface.ok_or(Error::Backend {
      api: stringify!(IDirect3DDevice9.CreateOffscreenPlainSurface),
      message: "no surface returned".to_string(),
    })?;
    Ok(Direct3D9Surface {
      surface,
      width,
      height,
    })
  }

  fn front_buffer_data(
    &self,
    device: &IDirect3DDevice9,
    swap_chain: u32,
    surface: &mut Direct3D9Surface,
  ) -> Result<()> {
    unsafe { device.GetFrontBufferData(swap_chain, &surface.surface) }.map_err(
      Error::from_win_err(stringify!(IDirect3DDevice9.GetFrontBufferData)),
    )
  }
}

/// A 32-bit BGRA offscreen surface in system memory.
/// The surface is released when dropped.
#[derive(Debug)]
pub struct Direct3D9Surface {
  surface: IDirect3DSurface9,
  width: u32,
  height: u32,
}

impl Surface for Direct3D9Surface {
  fn read<R>(&mut self, f: impl FnOnce(SurfaceView<'_>) -> R) -> Result<R> {
    let mut locked = D3DLOCKED_RECT::default();
    unsafe {
      self
        .surface
        .LockRect(&mut locked, ptr::null(), D3DLOCK_READONLY as u32)
    }
    .map_err(Error::from_win_err(stringify!(IDirect3DSurface9.LockRect)))?;
    let guard = LockGuard(Some(&self.surface));

    if locked.Pitch <= 0 || locked.pBits.is_null() {
      return Err(Error::Backend {
        api: stringify!(IDirect3DSurface9.LockRect),
        message: format!("unexpected pitch {}", locked.Pitch),
      });
    }
    let pitch = locked.Pitch as usize;

    // SAFETY: the surface stays locked until `guard` is dropped,
    // and a locked surface holds `pitch` bytes for each of its rows.
    let bits = unsafe { slice::from_raw_parts(locked.pBits as *const u8, pitch * self.height as usize) };
    let result = f(SurfaceView {
      bits,
      pitch,
      width: self.width,
      height: self.height,
    });

    guard.unlock()?;
    Ok(result)
  }
}

/// Unlocks a locked surface when dropped.
struct LockGuard<'a>(Option<&'a IDirect3DSurface9>);

impl LockGuard<'_> {
  fn unlock(mut self) -> Result<()> {
    match self.0.take() {
      Some(surface) => unsafe { surface.UnlockRect() }
        .map_err(Error::from_win_err(stringify!(IDirect3DSurface9.UnlockRect))),
      None => Ok(()),
    }
  }
}

impl Drop for LockGuard<'_> {
  fn drop(&mut self) {
    if let Some(surface) = self.0.take() {
      let _ = unsafe { surface.UnlockRect() };
    }
  }
}
