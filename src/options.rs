use crate::VertexProcessing;

/// What to do with a region that exceeds the current display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
  /// Fail with [`Error::InvalidRegion`](crate::Error::InvalidRegion) before any surface is allocated.
  #[default]
  Reject,
  /// Capture the part of the region that is on screen.
  Clamp,
}

/// Options of a [`Capturer`](crate::Capturer).
/// # Examples
/// ```
/// use d3d_window_capture::{BoundsPolicy, CaptureOptions};
///
/// let options = CaptureOptions::default()
///   .with_bounds(BoundsPolicy::Clamp)
///   .with_recreate_on_resize(false);
/// assert_eq!(options.bounds, BoundsPolicy::Clamp);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureOptions {
  /// By default regions outside of the display are rejected.
  pub bounds: BoundsPolicy,
  /// Recreate a cached device when the window's client size no longer matches
  /// the size the device was created with. By default it is `true`.
  pub recreate_on_resize: bool,
  pub vertex_processing: VertexProcessing,
  /// Swap chain to read the front buffer from. By default it is `0`.
  pub swap_chain: u32,
}

impl Default for CaptureOptions {
  fn default() -> Self {
    Self {
      bounds: BoundsPolicy::default(),
      recreate_on_resize: true,
      vertex_processing: VertexProcessing::default(),
      swap_chain: 0,
    }
  }
}

impl CaptureOptions {
  #[inline]
  pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
    self.bounds = bounds;
    self
  }

  #[inline]
  pub fn with_recreate_on_resize(mut self, recreate_on_resize: bool) -> Self {
    self.recreate_on_resize = recreate_on_resize;
    self
  }

  #[inline]
  pub fn with_vertex_processing(mut self, vertex_processing: VertexProcessing) -> Self {
    self.vertex_processing = vertex_processing;
    self
  }

  #[inline]
  pub fn with_swap_chain(mut self, swap_chain: u32) -> Self {
    self.swap_chain = swap_chain;
    self
  }
}
