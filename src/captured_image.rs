use crate::{Region, SurfaceView};

/// Bytes per pixel of a [`CapturedImage`].
pub const BYTES_PER_PIXEL: usize = 4;

/// A captured region, owned by the caller.
/// Rows are tightly packed and pixels are stored in BGRA32 format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedImage {
  width: u32,
  height: u32,
  data: Vec<u8>,
}

impl CapturedImage {
  /// Return [`None`] if `data` is not exactly `width * height * 4` bytes.
  pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
    (data.len() == width as usize * height as usize * BYTES_PER_PIXEL).then_some(Self {
      width,
      height,
      data,
    })
  }

  /// An image without pixels, `width` or `height` is `0`.
  #[inline]
  pub(crate) const fn empty(width: u32, height: u32) -> Self {
    Self {
      width,
      height,
      data: Vec::new(),
    }
  }

  /// Copy `region` out of a locked surface row by row, skipping the row padding.
  /// Return [`None`] if the surface data ends before the region does.
  ///
  /// The caller must ensure `region` is valid and lies inside the surface.
  pub(crate) fn crop(view: SurfaceView<'_>, region: &Region) -> Option<Self> {
    let width = region.width();
    let height = region.height();
    let line_bytes = width as usize * BYTES_PER_PIXEL;
    let left_bytes = region.left as usize * BYTES_PER_PIXEL;

    let mut data = Vec::with_capacity(line_bytes * height as usize);
    for y in region.top as usize..region.bottom as usize {
      let start = y * view.pitch + left_bytes;
      data.extend_from_slice(view.bits.get(start..start + line_bytes)?);
    }

    Some(Self {
      width,
      height,
      data,
    })
  }

  #[inline]
  pub const fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Bytes per row.
  #[inline]
  pub const fn stride(&self) -> usize {
    self.width as usize * BYTES_PER_PIXEL
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  #[inline]
  pub fn into_bytes(self) -> Vec<u8> {
    self.data
  }

  /// The BGRA value at `(x, y)`, [`None`] if out of bounds.
  pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= self.width || y >= self.height {
      return None;
    }
    let offset = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
    let mut pixel = [0u8; 4];
    pixel.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
    Some(pixel)
  }
}
