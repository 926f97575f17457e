//! Win32 overlay window shell
//!
//! Owns the native window and message loop; every pointer/key message is
//! translated into an `OverlayEvent` and fed to the state machine. The
//! loop ends on the first terminal outcome.

use crate::render;
use crate::state::{step, Outcome, OverlayEvent, Phase};
use crate::{OverlayError, OverlayResult};
use capture_gdi::{virtual_desktop_bounds, DisplayProvider, Point, Rect, Win32Displays};
use std::cell::RefCell;
use tracing::debug;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, LoadCursorW,
    RegisterClassExW, SetForegroundWindow, SetLayeredWindowAttributes, ShowWindow,
    TranslateMessage, CS_HREDRAW, CS_VREDRAW, IDC_CROSS, LWA_ALPHA, MSG, SW_SHOW, WM_CLOSE,
    WM_DESTROY, WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_PAINT, WNDCLASSEXW,
    WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};

thread_local! {
    static OVERLAY_STATE: RefCell<Option<Box<OverlayState>>> = RefCell::new(None);
}

struct OverlayState {
    phase: Phase,
    outcome: Option<Outcome>,
    /// Overlay rectangle in its own coordinate space: (0, 0, w, h)
    surface: Rect,
    prompt: Vec<u16>,
}

/// Modal selection overlay
pub struct OverlayWindow;

impl OverlayWindow {
    const CLASS_NAME: PCWSTR = w!("SnipServeOverlay");
    /// Whole-window alpha of the dimmed backdrop (~25%)
    const BACKDROP_ALPHA: u8 = 64;

    /// Show the overlay and run it to a terminal outcome.
    ///
    /// Returns the outcome together with the virtual desktop bounds the
    /// overlay covered, for local-to-absolute mapping.
    pub fn run(prompt: &str) -> OverlayResult<(Outcome, Rect)> {
        let desktop = virtual_desktop_bounds(&Win32Displays.displays());
        if desktop.is_empty() {
            return Err(OverlayError::NoDisplay);
        }
        debug!(?desktop, "overlay spanning virtual desktop");

        let state = Box::new(OverlayState {
            phase: Phase::Idle,
            outcome: None,
            surface: Rect::new(0, 0, desktop.width, desktop.height),
            prompt: prompt.encode_utf16().collect(),
        });

        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                hCursor: LoadCursorW(None, IDC_CROSS)?,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };

            RegisterClassExW(&wc);

            OVERLAY_STATE.with(|s| {
                *s.borrow_mut() = Some(state);
            });

            let hwnd = CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_LAYERED,
                Self::CLASS_NAME,
                w!("SnipServe Selection"),
                WS_POPUP,
                desktop.x,
                desktop.y,
                desktop.width as i32,
                desktop.height as i32,
                None,
                None,
                hinstance,
                None,
            )?;

            SetLayeredWindowAttributes(hwnd, COLORREF(0), Self::BACKDROP_ALPHA, LWA_ALPHA)?;

            ShowWindow(hwnd, SW_SHOW);
            let _ = SetForegroundWindow(hwnd);
            let _ = UpdateWindow(hwnd);

            let mut msg = MSG::default();
            loop {
                let ret = GetMessageW(&mut msg, None, 0, 0);
                if !ret.as_bool() {
                    break;
                }
                TranslateMessage(&msg);
                DispatchMessageW(&msg);

                let done = OVERLAY_STATE.with(|s| {
                    s.borrow().as_ref().map(|state| state.outcome.is_some()).unwrap_or(true)
                });
                if done {
                    break;
                }
            }

            let _ = DestroyWindow(hwnd);

            let outcome = OVERLAY_STATE.with(|s| {
                s.borrow_mut().take().and_then(|state| state.outcome)
            });

            // A torn-down loop without an outcome counts as cancellation
            Ok((outcome.unwrap_or(Outcome::Cancelled), desktop))
        }
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_PAINT => {
                OVERLAY_STATE.with(|s| {
                    if let Some(ref state) = *s.borrow() {
                        render::paint(hwnd, &state.phase, &state.prompt, state.surface);
                    }
                });
                LRESULT(0)
            }

            WM_LBUTTONDOWN => {
                SetCapture(hwnd);
                Self::dispatch(hwnd, OverlayEvent::ButtonDown(point_from_lparam(lparam)));
                LRESULT(0)
            }

            WM_MOUSEMOVE => {
                Self::dispatch(hwnd, OverlayEvent::PointerMove(point_from_lparam(lparam)));
                LRESULT(0)
            }

            WM_LBUTTONUP => {
                let _ = ReleaseCapture();
                Self::dispatch(hwnd, OverlayEvent::ButtonUp(point_from_lparam(lparam)));
                LRESULT(0)
            }

            WM_KEYDOWN => {
                const VK_ESCAPE: usize = 0x1B;
                if wparam.0 == VK_ESCAPE {
                    Self::dispatch(hwnd, OverlayEvent::Escape);
                }
                LRESULT(0)
            }

            WM_CLOSE => {
                OVERLAY_STATE.with(|s| {
                    if let Some(ref mut state) = *s.borrow_mut() {
                        if state.outcome.is_none() {
                            state.outcome = Some(Outcome::Cancelled);
                        }
                    }
                });
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }

            WM_DESTROY => LRESULT(0),

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    fn dispatch(hwnd: HWND, event: OverlayEvent) {
        let redraw = OVERLAY_STATE.with(|s| {
            let mut borrow = s.borrow_mut();
            let Some(ref mut state) = *borrow else {
                return false;
            };

            let next = step(state.phase, event, state.surface);
            state.phase = next.phase;
            if let Some(outcome) = next.outcome {
                debug!(?outcome, "overlay reached terminal outcome");
                state.outcome = Some(outcome);
            }
            next.redraw
        });

        if redraw {
            unsafe {
                let _ = InvalidateRect(hwnd, None, false);
            }
        }
    }
}

fn point_from_lparam(lparam: LPARAM) -> Point {
    // Signed 16-bit coordinates; negative while the pointer is captured
    // past the top/left edge
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    Point::new(x, y)
}
