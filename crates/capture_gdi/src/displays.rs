//! Win32 display enumeration

use crate::{DisplayDescriptor, DisplayProvider, Rect};
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};

/// Attached monitors as reported by the window manager
pub struct Win32Displays;

impl DisplayProvider for Win32Displays {
    fn displays(&self) -> Vec<DisplayDescriptor> {
        let mut rects: Vec<Rect> = Vec::new();

        unsafe {
            let _ = EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_callback),
                LPARAM(&mut rects as *mut Vec<Rect> as isize),
            );
        }

        rects
            .into_iter()
            .enumerate()
            .map(|(index, bounds)| DisplayDescriptor { index, bounds })
            .collect()
    }
}

unsafe extern "system" fn monitor_enum_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let rects = &mut *(lparam.0 as *mut Vec<Rect>);

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
        let r = info.rcMonitor;
        rects.push(Rect::new(
            r.left,
            r.top,
            (r.right - r.left) as u32,
            (r.bottom - r.top) as u32,
        ));
    }

    BOOL(1) // Continue enumeration
}
