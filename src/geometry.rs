use crate::{Region, Result, WindowHandle};

/// Resolves a window's client area in screen coordinates.
pub trait WindowGeometry {
  fn absolute_client_rect(&self, handle: WindowHandle) -> Result<Region>;
}

impl<F> WindowGeometry for F
where
  F: Fn(WindowHandle) -> Result<Region>,
{
  #[inline]
  fn absolute_client_rect(&self, handle: WindowHandle) -> Result<Region> {
    self(handle)
  }
}

#[cfg(windows)]
pub use win32::ClientAreaGeometry;

#[cfg(windows)]
mod win32 {
  use super::WindowGeometry;
  use crate::{Error, Region, Result, WindowHandle};
  use windows::Win32::{
    Foundation::{HWND, POINT, RECT},
    Graphics::Gdi::ClientToScreen,
    UI::WindowsAndMessaging::GetClientRect,
  };

  /// Client area of a window through `GetClientRect` and `ClientToScreen`.
  #[derive(Debug, Clone, Copy, Default)]
  pub struct ClientAreaGeometry;

  impl WindowGeometry for ClientAreaGeometry {
    fn absolute_client_rect(&self, handle: WindowHandle) -> Result<Region> {
      let hwnd: HWND = handle.into();

      let mut client_rect = RECT::default();
      unsafe { GetClientRect(hwnd, &mut client_rect) }
        .map_err(Error::from_win_err(stringify!(GetClientRect)))?;

      // client rect is relative to the client area, its origin is always (0, 0)
      let mut origin = POINT { x: 0, y: 0 };
      if !unsafe { ClientToScreen(hwnd, &mut origin) }.as_bool() {
        return Err(Error::last_win_err(stringify!(ClientToScreen)));
      }

      Ok(Region::new(
        origin.x,
        origin.y,
        origin.x + (client_rect.right - client_rect.left),
        origin.y + (client_rect.bottom - client_rect.top),
      ))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn closure_geometry() {
    let geometry = |handle: WindowHandle| {
      if handle.is_null() {
        Err(Error::Backend {
          api: "absolute_client_rect",
          message: "null window".to_string(),
        })
      } else {
        Ok(Region::new(100, 100, 500, 400))
      }
    };
    assert_eq!(
      geometry
        .absolute_client_rect(WindowHandle::from_raw(1))
        .unwrap(),
      Region::new(100, 100, 500, 400)
    );
    assert!(geometry
      .absolute_client_rect(WindowHandle::from_raw(0))
      .is_err());
  }
}
