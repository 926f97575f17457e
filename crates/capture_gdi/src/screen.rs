//! Live framebuffer rasterization using GDI

use crate::{CaptureError, CaptureResult, Rect};
use image::RgbaImage;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};

/// Copy exactly `rect.width x rect.height` pixels of live screen content
/// starting at the rectangle's absolute desktop origin.
///
/// Sources from the screen DC, so any overlay window must already be gone
/// or hidden by the time this runs.
pub fn copy_screen_rect(rect: Rect) -> CaptureResult<RgbaImage> {
    if rect.is_empty() {
        return Err(CaptureError::ScreenCopy("Empty capture rectangle".into()));
    }

    let width = rect.width as i32;
    let height = rect.height as i32;

    unsafe {
        let screen_dc = GetDC(None);
        if screen_dc.is_invalid() {
            return Err(CaptureError::ScreenCopy("Failed to get screen DC".into()));
        }

        let mem_dc = CreateCompatibleDC(screen_dc);
        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        let old_bitmap = SelectObject(mem_dc, bitmap);

        let blt = BitBlt(mem_dc, 0, 0, width, height, screen_dc, rect.x, rect.y, SRCCOPY);

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // Top-down DIB
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                biSizeImage: 0,
                biXPelsPerMeter: 0,
                biYPelsPerMeter: 0,
                biClrUsed: 0,
                biClrImportant: 0,
            },
            bmiColors: [Default::default()],
        };

        let mut data = vec![0u8; (width * height * 4) as usize];
        let copied = GetDIBits(
            mem_dc,
            bitmap,
            0,
            height as u32,
            Some(data.as_mut_ptr() as *mut _),
            &mut bmi,
            DIB_RGB_COLORS,
        );

        SelectObject(mem_dc, old_bitmap);
        let _ = DeleteObject(bitmap);
        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);

        blt?;
        if copied == 0 {
            return Err(CaptureError::ScreenCopy("GetDIBits returned no scanlines".into()));
        }

        // GDI hands back BGRA with an undefined alpha channel
        for px in data.chunks_exact_mut(4) {
            px.swap(0, 2);
            px[3] = 0xFF;
        }

        RgbaImage::from_raw(rect.width, rect.height, data)
            .ok_or_else(|| CaptureError::ScreenCopy("Pixel buffer size mismatch".into()))
    }
}
