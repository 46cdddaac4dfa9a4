//! Capture a window and save it as `window.png`.
//!
//! Usage: `cargo run --example png -- <hwnd>` with the window handle in hex or decimal.
//! Without an argument the foreground window is captured.

#[cfg(windows)]
fn main() {
  use d3d_window_capture::{Capturer, WindowHandle};
  use image::{ImageBuffer, RgbaImage};
  use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;

  env_logger::init();

  let handle = match std::env::args().nth(1) {
    Some(arg) => {
      let raw = match arg.strip_prefix("0x") {
        Some(hex) => isize::from_str_radix(hex, 16).unwrap(),
        None => arg.parse().unwrap(),
      };
      WindowHandle::from_raw(raw)
    }
    None => unsafe { GetForegroundWindow() }.into(),
  };

  let capturer = Capturer::direct3d().unwrap();
  let captured = capturer.capture_window(handle).unwrap();
  let (width, height) = (captured.width(), captured.height());

  // convert BGRA32 to RGBA32
  let mut buffer = captured.into_bytes();
  for pixel in buffer.chunks_exact_mut(4) {
    pixel.swap(0, 2);
  }

  let img: RgbaImage = ImageBuffer::from_raw(width, height, buffer).unwrap();
  img.save("window.png").unwrap();
  println!("saved {width}x{height} capture of window {handle}");
}

#[cfg(not(windows))]
fn main() {
  eprintln!("this demo only runs on Windows");
}
