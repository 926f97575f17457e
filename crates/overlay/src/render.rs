//! GDI painting for the overlay

use crate::state::Phase;
use capture_gdi::Rect;
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreatePen, CreateSolidBrush, DeleteObject, EndPaint, FillRect, GetStockObject,
    Rectangle, SelectObject, SetBkMode, SetTextColor, TextOutW, HDC, NULL_BRUSH, PAINTSTRUCT,
    PS_SOLID, TRANSPARENT,
};

const COLOR_BACKDROP: COLORREF = COLORREF(0x00000000);
const COLOR_ACCENT: COLORREF = COLORREF(0x0000FF00); // Lime, 0x00BBGGRR
const COLOR_TEXT: COLORREF = COLORREF(0x00FFFFFF);

/// Paint one frame: dim backdrop, prompt text, live selection.
///
/// The window is layered with whole-window alpha, so solid GDI fills come
/// out translucent on screen.
pub(crate) fn paint(hwnd: HWND, phase: &Phase, prompt: &[u16], surface: Rect) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        draw_backdrop(hdc, surface);
        draw_prompt(hdc, prompt);

        if let Some(rect) = phase.selection() {
            if !rect.is_empty() {
                draw_selection(hdc, rect);
            }
        }

        let _ = EndPaint(hwnd, &ps);
    }
}

unsafe fn draw_backdrop(hdc: HDC, surface: Rect) {
    let brush = CreateSolidBrush(COLOR_BACKDROP);
    let full = RECT {
        left: 0,
        top: 0,
        right: surface.width as i32,
        bottom: surface.height as i32,
    };
    FillRect(hdc, &full, brush);
    let _ = DeleteObject(brush);
}

unsafe fn draw_prompt(hdc: HDC, prompt: &[u16]) {
    if prompt.is_empty() {
        return;
    }
    SetBkMode(hdc, TRANSPARENT);
    SetTextColor(hdc, COLOR_TEXT);
    let _ = TextOutW(hdc, 20, 20, prompt);
}

unsafe fn draw_selection(hdc: HDC, rect: Rect) {
    // Translucent fill
    let fill = CreateSolidBrush(COLOR_ACCENT);
    let area = RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    };
    FillRect(hdc, &area, fill);
    let _ = DeleteObject(fill);

    // Outline
    let pen = CreatePen(PS_SOLID, 2, COLOR_ACCENT);
    let old_pen = SelectObject(hdc, pen);
    let old_brush = SelectObject(hdc, GetStockObject(NULL_BRUSH));

    let _ = Rectangle(hdc, area.left, area.top, area.right, area.bottom);

    SelectObject(hdc, old_brush);
    SelectObject(hdc, old_pen);
    let _ = DeleteObject(pen);

    // Dimensions readout under the selection
    let size_text: Vec<u16> = format!("{}x{}", rect.width, rect.height)
        .encode_utf16()
        .collect();

    SetBkMode(hdc, TRANSPARENT);
    SetTextColor(hdc, COLOR_TEXT);
    let _ = TextOutW(hdc, rect.x + 4, rect.bottom() + 4, &size_text);
}
