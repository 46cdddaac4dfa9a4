use crate::{
  Backend, BoundsPolicy, CaptureOptions, CapturedImage, DisplayMode, Error, Region, Result,
  Surface,
};
use log::{trace, warn};

/// Reads the front buffer back through a device and crops it to a region.
#[derive(Debug)]
pub struct CaptureEngine<'a, B> {
  backend: &'a B,
  bounds: BoundsPolicy,
  swap_chain: u32,
}

impl<'a, B: Backend> CaptureEngine<'a, B> {
  pub fn new(backend: &'a B, options: &CaptureOptions) -> Self {
    Self {
      backend,
      bounds: options.bounds,
      swap_chain: options.swap_chain,
    }
  }

  /// Capture `region` (in screen coordinates) of the front buffer.
  ///
  /// The readback always copies the whole front buffer, so a surface as large as
  /// `mode`, the current display mode of `adapter`, is allocated for the duration of the call.
  /// The region is checked before anything is allocated.
  pub fn capture(
    &self,
    device: &B::Device,
    adapter: u32,
    mode: &DisplayMode,
    region: Region,
  ) -> Result<CapturedImage> {
    region.validate()?;
    let region = self.resolve_bounds(region, mode)?;

    if region.is_empty() {
      return Ok(CapturedImage::empty(region.width(), region.height()));
    }

    let readback_err = || Error::readback(adapter, region);

    trace!(
      "allocating {}x{} offscreen surface for {region}",
      mode.width,
      mode.height
    );
    // released when dropped, on every path out of this function
    let mut surface = self
      .backend
      .create_offscreen_surface(device, mode.width, mode.height)
      .map_err(readback_err())?;

    self
      .backend
      .front_buffer_data(device, self.swap_chain, &mut surface)
      .map_err(readback_err())?;

    let image = surface
      .read(|view| {
        if !region.fits_within(view.width, view.height) {
          return Err(Error::invalid_region(
            region,
            "region exceeds the captured surface",
          ));
        }
        CapturedImage::crop(view, &region).ok_or_else(|| {
          readback_err()(Error::Backend {
            api: "Surface::read",
            message: "locked surface is smaller than its pitch and height".to_string(),
          })
        })
      })
      .map_err(readback_err())??;

    drop(surface);
    trace!("released offscreen surface");

    Ok(image)
  }

  fn resolve_bounds(&self, region: Region, mode: &DisplayMode) -> Result<Region> {
    if region.fits_within(mode.width, mode.height) {
      return Ok(region);
    }

    match self.bounds {
      BoundsPolicy::Reject => Err(Error::invalid_region(
        region,
        "region exceeds the display bounds",
      )),
      BoundsPolicy::Clamp => {
        let clamped = region.clamp_to(mode.width, mode.height);
        if clamped.is_empty() && !region.is_empty() {
          return Err(Error::invalid_region(region, "region is outside of the display"));
        }
        warn!(
          "{region} exceeds the {}x{} display, clamped to {clamped}",
          mode.width, mode.height
        );
        Ok(clamped)
      }
    }
  }
}
