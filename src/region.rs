use crate::{Error, Result};
use std::fmt;

/// A rectangle in screen coordinates.
///
/// `right` and `bottom` are exclusive, so a region of `(100, 100)-(500, 400)`
/// is 400 pixels wide and 300 pixels high.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
  pub left: i32,
  pub top: i32,
  pub right: i32,
  pub bottom: i32,
}

impl Region {
  /// Create a region from its edges. The edges are not validated,
  /// use [`Self::validate`] before relying on the size.
  #[inline]
  pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  /// Create a region at `(0, 0)` with the provided size.
  #[inline]
  pub const fn from_size(width: u32, height: u32) -> Self {
    Self::new(0, 0, width as i32, height as i32)
  }

  /// Width in pixels, `0` if the region is inverted horizontally.
  #[inline]
  pub const fn width(&self) -> u32 {
    if self.right > self.left {
      self.right.abs_diff(self.left)
    } else {
      0
    }
  }

  /// Height in pixels, `0` if the region is inverted vertically.
  #[inline]
  pub const fn height(&self) -> u32 {
    if self.bottom > self.top {
      self.bottom.abs_diff(self.top)
    } else {
      0
    }
  }

  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.width() == 0 || self.height() == 0
  }

  /// Return [`Error::InvalidRegion`] if `left > right` or `top > bottom`.
  pub fn validate(&self) -> Result<()> {
    if self.left > self.right {
      Err(Error::invalid_region(*self, "left is greater than right"))
    } else if self.top > self.bottom {
      Err(Error::invalid_region(*self, "top is greater than bottom"))
    } else {
      Ok(())
    }
  }

  /// Whether the region lies inside `(0, 0)-(width, height)`.
  pub fn fits_within(&self, width: u32, height: u32) -> bool {
    self.left >= 0
      && self.top >= 0
      && i64::from(self.right) <= i64::from(width)
      && i64::from(self.bottom) <= i64::from(height)
  }

  /// Intersect the region with `(0, 0)-(width, height)`.
  /// The result may be empty if the region is outside of the bounds.
  pub fn clamp_to(&self, width: u32, height: u32) -> Self {
    let max_x = width.min(i32::MAX as u32) as i32;
    let max_y = height.min(i32::MAX as u32) as i32;
    let left = self.left.clamp(0, max_x);
    let top = self.top.clamp(0, max_y);
    Self {
      left,
      top,
      right: self.right.clamp(left, max_x),
      bottom: self.bottom.clamp(top, max_y),
    }
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "({}, {})-({}, {})",
      self.left, self.top, self.right, self.bottom
    )
  }
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::RECT> for Region {
  #[inline]
  fn from(rect: windows::Win32::Foundation::RECT) -> Self {
    Self::new(rect.left, rect.top, rect.right, rect.bottom)
  }
}
