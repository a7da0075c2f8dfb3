//! Clock window module
//! The always-on-top label window, its tooltip and the Win32 side of the event loop

use std::cell::RefCell;
use std::ffi::c_void;
use std::mem::{size_of, zeroed};
use windows::{
    core::{w, PCWSTR, PWSTR},
    Win32::{
        Foundation::{COLORREF, HMODULE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{
            BeginPaint, CreateFontW, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint,
            FillRect, InvalidateRect, SelectObject, SetBkMode, SetTextColor, DT_CENTER,
            DT_NOPREFIX, DT_SINGLELINE, DT_VCENTER, FW_BOLD, PAINTSTRUCT, TRANSPARENT,
        },
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{
                InitCommonControlsEx, ICC_WIN95_CLASSES, INITCOMMONCONTROLSEX, TOOLINFOW,
                TOOLTIPS_CLASSW, TTF_IDISHWND, TTF_SUBCLASS, TTM_ACTIVATE, TTM_ADDTOOLW,
                TTM_UPDATETIPTEXTW, TTS_ALWAYSTIP,
            },
            Input::KeyboardAndMouse::ReleaseCapture,
            WindowsAndMessaging::*,
        },
    },
};

use tracing::{debug, error, info, warn};

use crate::app::{ClockApp, ClockEvent, Key, Moment, Surface};
use crate::constants::*;
use crate::display::DisplayMode;
use crate::dpi::scale;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size};
use crate::help::help_view;
use crate::help_window::{create_help_window, register_help_class, HelpWindow};
use crate::settings::{ClockSettings, SettingsStore};

/// Everything the clock window procedure needs between messages
struct ClockState {
    app: ClockApp<HelpWindow>,
    surface: Win32Surface,
    settings: SettingsStore,
}

thread_local! {
    static STATE: RefCell<Option<ClockState>> = const { RefCell::new(None) };
}

/// `Surface` backed by the real clock window
pub struct Win32Surface {
    hwnd: HWND,
    tooltip: HWND,
    label: String,
    mode: DisplayMode,
    tooltip_text: Option<String>,
}

impl Win32Surface {
    fn new(hwnd: HWND, tooltip: HWND) -> Self {
        Self {
            hwnd,
            tooltip,
            label: String::new(),
            mode: DisplayMode::Clock,
            tooltip_text: None,
        }
    }

    unsafe fn update_tooltip(&mut self, tooltip: Option<&str>) {
        if self.tooltip.0.is_null() || self.tooltip_text.as_deref() == tooltip {
            return;
        }

        match tooltip {
            Some(text) => {
                let mut wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
                let ti = tool_info(self.hwnd, PWSTR(wide.as_mut_ptr()));
                SendMessageW(
                    self.tooltip,
                    TTM_UPDATETIPTEXTW,
                    WPARAM(0),
                    LPARAM(&ti as *const TOOLINFOW as isize),
                );
                SendMessageW(self.tooltip, TTM_ACTIVATE, WPARAM(1), LPARAM(0));
            }
            None => {
                SendMessageW(self.tooltip, TTM_ACTIVATE, WPARAM(0), LPARAM(0));
            }
        }
        self.tooltip_text = tooltip.map(str::to_string);
    }
}

impl Surface for Win32Surface {
    type Help = HelpWindow;

    fn work_area(&self) -> Rect {
        let mut rect = RECT::default();
        unsafe {
            let found = SystemParametersInfoW(
                SPI_GETWORKAREA,
                0,
                Some(&mut rect as *mut RECT as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            );
            if let Err(e) = found {
                warn!(error = %e, "work area unavailable, using full screen");
                rect = RECT {
                    left: 0,
                    top: 0,
                    right: GetSystemMetrics(SM_CXSCREEN),
                    bottom: GetSystemMetrics(SM_CYSCREEN),
                };
            }
        }
        to_rect(rect)
    }

    fn main_bounds(&self) -> Rect {
        window_rect(self.hwnd)
    }

    fn move_main(&mut self, to: Point) {
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                HWND::default(),
                to.x.round() as i32,
                to.y.round() as i32,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    fn set_label(&mut self, text: &str, tooltip: Option<&str>, mode: DisplayMode) {
        if self.label != text || self.mode != mode {
            self.label = text.to_string();
            self.mode = mode;
            unsafe {
                let _ = InvalidateRect(self.hwnd, None, true);
            }
        }
        unsafe { self.update_tooltip(tooltip) };
    }

    fn set_topmost(&mut self, topmost: bool) {
        let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        unsafe {
            if let Err(e) = SetWindowPos(
                self.hwnd,
                insert_after,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            ) {
                warn!(error = %e, topmost, "failed to change z-order");
            }
        }
    }

    fn open_help(&mut self, text: &str) -> HelpWindow {
        match unsafe { create_help_window(self.hwnd, &help_view(text)) } {
            Ok(help) => help,
            Err(e) => {
                error!(error = %e, "failed to open help");
                HelpWindow(HWND::default())
            }
        }
    }

    fn help_size(&self, help: &HelpWindow) -> Size {
        window_rect(help.0).size()
    }

    fn move_help(&mut self, help: &HelpWindow, to: Point) {
        if help.0 .0.is_null() {
            return;
        }
        unsafe {
            let _ = SetWindowPos(
                help.0,
                HWND::default(),
                to.x.round() as i32,
                to.y.round() as i32,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_SHOWWINDOW,
            );
        }
    }

    fn close_help(&mut self, help: HelpWindow) {
        if help.0 .0.is_null() {
            return;
        }
        unsafe {
            let _ = DestroyWindow(help.0);
        }
    }
}

fn to_rect(rect: RECT) -> Rect {
    Rect::from_edges(
        rect.left as f64,
        rect.top as f64,
        rect.right as f64,
        rect.bottom as f64,
    )
}

fn window_rect(hwnd: HWND) -> Rect {
    let mut rect = RECT::default();
    unsafe {
        if let Err(e) = GetWindowRect(hwnd, &mut rect) {
            warn!(error = %e, "failed to read window bounds");
        }
    }
    to_rect(rect)
}

unsafe fn tool_info(owner: HWND, text: PWSTR) -> TOOLINFOW {
    let mut ti: TOOLINFOW = zeroed();
    ti.cbSize = size_of::<TOOLINFOW>() as u32;
    ti.uFlags = TTF_IDISHWND | TTF_SUBCLASS;
    ti.hwnd = owner;
    ti.uId = owner.0 as usize;
    ti.lpszText = text;
    ti
}

/// Feed one event to the app, persisting the topmost flag if it changed
fn dispatch(event: ClockEvent) {
    STATE.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            debug!(?event, "clock busy, dropping event");
            return;
        };
        let Some(state) = guard.as_mut() else {
            return;
        };

        let was_topmost = state.app.topmost();
        state.app.dispatch(event, Moment::now(), &mut state.surface);

        let topmost = state.app.topmost();
        if topmost != was_topmost {
            if let Err(e) = state.settings.save_topmost(topmost) {
                warn!(error = %e, "failed to save topmost setting");
            }
        }
    });
}

fn forget_help(help: HelpWindow) {
    STATE.with(|cell| {
        if let Ok(mut guard) = cell.try_borrow_mut() {
            if let Some(state) = guard.as_mut() {
                state.app.help_closed(&help);
            }
        }
    });
}

unsafe fn paint_clock(hwnd: HWND) {
    let mut ps: PAINTSTRUCT = zeroed();
    let hdc = BeginPaint(hwnd, &mut ps);

    let mut rect = RECT::default();
    GetClientRect(hwnd, &mut rect).ok();

    let (text, mode) = STATE.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|guard| {
                guard
                    .as_ref()
                    .map(|state| (state.surface.label.clone(), state.surface.mode))
            })
            .unwrap_or_default()
    });

    let (bg_color, text_color) = match mode {
        DisplayMode::Clock => (COLOR_CLOCK_BG, COLOR_TEXT_WHITE),
        DisplayMode::Stopwatch => (COLOR_STOPWATCH_BG, COLOR_STOPWATCH_TEXT),
    };

    let bg_brush = CreateSolidBrush(COLORREF(bg_color));
    FillRect(hdc, &rect, bg_brush);
    let _ = DeleteObject(bg_brush);

    let hfont = CreateFontW(
        scale(CLOCK_FONT_SIZE), 0, 0, 0,
        FW_BOLD.0 as i32,
        0, 0, 0, 0, 0, 0, 0, 0,
        w!("Consolas"),
    );

    let old_font = SelectObject(hdc, hfont);
    SetTextColor(hdc, COLORREF(text_color));
    SetBkMode(hdc, TRANSPARENT);

    let mut wide_text: Vec<u16> = text.encode_utf16().collect();
    DrawTextW(
        hdc,
        &mut wide_text,
        &mut rect,
        DT_CENTER | DT_VCENTER | DT_SINGLELINE | DT_NOPREFIX,
    );

    SelectObject(hdc, old_font);
    let _ = DeleteObject(hfont);

    let _ = EndPaint(hwnd, &ps);
}

/// Window procedure for the clock
pub unsafe extern "system" fn clock_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            paint_clock(hwnd);
            LRESULT(0)
        }
        WM_TIMER => {
            if wparam.0 == TIMER_CLOCK_TICK {
                dispatch(ClockEvent::TimerTick);
            }
            LRESULT(0)
        }
        WM_LBUTTONDOWN => {
            // Let the user drag the borderless window around
            let _ = ReleaseCapture();
            SendMessageW(hwnd, WM_NCLBUTTONDOWN, WPARAM(HTCAPTION as usize), LPARAM(0));
            LRESULT(0)
        }
        WM_LBUTTONDBLCLK => {
            dispatch(ClockEvent::DoubleClick);
            LRESULT(0)
        }
        WM_RBUTTONDOWN => {
            dispatch(ClockEvent::RightClick);
            LRESULT(0)
        }
        WM_KEYDOWN => {
            dispatch(ClockEvent::KeyDown(Key::from_virtual_key(wparam.0 as u32)));
            LRESULT(0)
        }
        WM_HELP_CLOSED => {
            forget_help(HelpWindow(HWND(wparam.0 as *mut c_void)));
            LRESULT(0)
        }
        WM_DESTROY => {
            let _ = KillTimer(hwnd, TIMER_CLOCK_TICK);
            STATE.with(|cell| {
                if let Ok(mut guard) = cell.try_borrow_mut() {
                    guard.take();
                }
            });
            info!("clock window closed");
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Register the clock window class
unsafe fn register_clock_class(hinstance: HMODULE) -> Result<()> {
    let wnd_class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW | CS_DBLCLKS,
        lpfnWndProc: Some(clock_window_proc),
        hInstance: hinstance.into(),
        lpszClassName: w!("SimpleClockWindowClass"),
        hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
        ..zeroed()
    };

    if RegisterClassW(&wnd_class) == 0 {
        return Err(Error::Window("failed to register clock window class".into()));
    }
    Ok(())
}

unsafe fn create_clock_window(hinstance: HMODULE) -> Result<HWND> {
    CreateWindowExW(
        WS_EX_TOOLWINDOW,
        w!("SimpleClockWindowClass"),
        w!("SimpleClock"),
        WS_POPUP | WS_BORDER,
        0,
        0,
        scale(CLOCK_WIDTH),
        scale(CLOCK_HEIGHT),
        None,
        None,
        hinstance,
        None,
    )
    .map_err(|e| Error::Window(format!("failed to create clock window: {e}")))
}

/// Create the tooltip control attached to the whole clock window
unsafe fn create_tooltip(hinstance: HMODULE, owner: HWND) -> Result<HWND> {
    let icc = INITCOMMONCONTROLSEX {
        dwSize: size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_WIN95_CLASSES,
    };
    let _ = InitCommonControlsEx(&icc);

    let tooltip = CreateWindowExW(
        WS_EX_TOPMOST,
        TOOLTIPS_CLASSW,
        PCWSTR::null(),
        WS_POPUP | WINDOW_STYLE(TTS_ALWAYSTIP),
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        owner,
        None,
        hinstance,
        None,
    )
    .map_err(|e| Error::Window(format!("failed to create tooltip: {e}")))?;

    let mut empty = [0u16; 1];
    let ti = tool_info(owner, PWSTR(empty.as_mut_ptr()));
    SendMessageW(
        tooltip,
        TTM_ADDTOOLW,
        WPARAM(0),
        LPARAM(&ti as *const TOOLINFOW as isize),
    );
    Ok(tooltip)
}

/// Create the clock, run the message loop until it is closed
pub fn run(settings: SettingsStore, config: &ClockSettings) -> Result<()> {
    unsafe {
        let hinstance = GetModuleHandleW(None)
            .map_err(|e| Error::Window(format!("failed to get module handle: {e}")))?;

        register_clock_class(hinstance)?;
        register_help_class(hinstance)?;

        let hwnd = create_clock_window(hinstance)?;
        let tooltip = create_tooltip(hinstance, hwnd).unwrap_or_else(|e| {
            warn!(error = %e, "running without date tooltip");
            HWND::default()
        });

        STATE.with(|cell| {
            *cell.borrow_mut() = Some(ClockState {
                app: ClockApp::new(config.topmost),
                surface: Win32Surface::new(hwnd, tooltip),
                settings,
            });
        });

        dispatch(ClockEvent::Loaded);
        let _ = ShowWindow(hwnd, SW_SHOW);

        if SetTimer(hwnd, TIMER_CLOCK_TICK, config.tick_interval_ms, None) == 0 {
            return Err(Error::Window("failed to start clock timer".into()));
        }
        info!(interval_ms = config.tick_interval_ms, "clock running");

        // Message loop
        let mut msg: MSG = zeroed();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
    Ok(())
}
