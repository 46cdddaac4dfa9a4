use std::fmt;

/// Opaque platform window handle (`HWND` on Windows).
///
/// Used as the key of the [`DeviceCache`](crate::DeviceCache).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
  #[inline]
  pub const fn from_raw(raw_handle: isize) -> Self {
    Self(raw_handle)
  }

  #[inline]
  pub const fn raw(&self) -> isize {
    self.0
  }

  #[inline]
  pub const fn is_null(&self) -> bool {
    self.0 == 0
  }
}

impl fmt::Display for WindowHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:#x}", self.0 as usize)
  }
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::HWND> for WindowHandle {
  #[inline]
  fn from(hwnd: windows::Win32::Foundation::HWND) -> Self {
    Self(hwnd.0 as isize)
  }
}

#[cfg(windows)]
impl From<WindowHandle> for windows::Win32::Foundation::HWND {
  #[inline]
  fn from(handle: WindowHandle) -> Self {
    Self(handle.0 as *mut _)
  }
}
