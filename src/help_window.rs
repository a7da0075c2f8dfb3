//! Help window module
//! Small owned tool window showing the feature list, sized to its text

use std::cell::RefCell;
use std::mem::zeroed;
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{BOOL, COLORREF, HMODULE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{
            BeginPaint, CreateFontW, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint,
            FillRect, GetDC, ReleaseDC, SelectObject, SetBkMode, SetTextColor, DT_CALCRECT,
            DT_LEFT, DT_NOPREFIX, FW_NORMAL, HDC, HFONT, PAINTSTRUCT, TRANSPARENT,
        },
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::*,
    },
};

use tracing::debug;

use crate::constants::*;
use crate::dpi::scale;
use crate::error::{Error, Result};
use crate::help::HelpView;

/// Handle to an open help popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpWindow(pub HWND);

thread_local! {
    // Body text and margin of the live popup, read back on paint
    static HELP_CONTENT: RefCell<Option<(Vec<u16>, i32)>> = const { RefCell::new(None) };
}

const HELP_STYLE: WINDOW_STYLE = WINDOW_STYLE(WS_POPUP.0 | WS_CAPTION.0 | WS_SYSMENU.0);

unsafe fn help_font() -> HFONT {
    CreateFontW(
        scale(HELP_FONT_SIZE), 0, 0, 0,
        FW_NORMAL.0 as i32,
        0, 0, 0, 0, 0, 0, 0, 0,
        w!("Segoe UI"),
    )
}

/// Measure `text` as it will be drawn
unsafe fn measure_text(hdc: HDC, text: &mut [u16]) -> RECT {
    let hfont = help_font();
    let old_font = SelectObject(hdc, hfont);

    let mut rect = RECT::default();
    DrawTextW(hdc, text, &mut rect, DT_CALCRECT | DT_LEFT | DT_NOPREFIX);

    SelectObject(hdc, old_font);
    let _ = DeleteObject(hfont);
    rect
}

/// Create the help popup, hidden and sized to fit `view`, owned by `owner`
pub unsafe fn create_help_window(owner: HWND, view: &HelpView) -> Result<HelpWindow> {
    let hinstance = GetModuleHandleW(None)
        .map_err(|e| Error::Window(format!("failed to get module handle: {e}")))?;

    let mut body: Vec<u16> = view.body.encode_utf16().collect();
    let margin = scale(view.margin);

    let hdc = GetDC(None);
    let text_rect = measure_text(hdc, &mut body);
    ReleaseDC(None, hdc);

    let mut frame = RECT {
        left: 0,
        top: 0,
        right: text_rect.right + margin * 2,
        bottom: text_rect.bottom + margin * 2,
    };
    AdjustWindowRectEx(&mut frame, HELP_STYLE, BOOL::from(false), WS_EX_TOOLWINDOW)
        .map_err(|e| Error::Window(format!("failed to size help window: {e}")))?;

    HELP_CONTENT.with(|cell| *cell.borrow_mut() = Some((body, margin)));

    let title: Vec<u16> = view.title.encode_utf16().chain(std::iter::once(0)).collect();
    let hwnd = CreateWindowExW(
        WS_EX_TOOLWINDOW,
        w!("SimpleClockHelpClass"),
        PCWSTR(title.as_ptr()),
        HELP_STYLE,
        0,
        0,
        frame.right - frame.left,
        frame.bottom - frame.top,
        owner,
        None,
        hinstance,
        None,
    )
    .map_err(|e| Error::Window(format!("failed to create help window: {e}")))?;

    debug!(
        width = frame.right - frame.left,
        height = frame.bottom - frame.top,
        "help window created"
    );
    Ok(HelpWindow(hwnd))
}

unsafe fn paint_help(hwnd: HWND) {
    let mut ps: PAINTSTRUCT = zeroed();
    let hdc = BeginPaint(hwnd, &mut ps);

    let mut rect = RECT::default();
    GetClientRect(hwnd, &mut rect).ok();

    let bg_brush = CreateSolidBrush(COLORREF(COLOR_HELP_BG));
    FillRect(hdc, &rect, bg_brush);
    let _ = DeleteObject(bg_brush);

    HELP_CONTENT.with(|cell| {
        if let Some((body, margin)) = cell.borrow().as_ref() {
            let hfont = help_font();
            let old_font = SelectObject(hdc, hfont);
            SetTextColor(hdc, COLORREF(COLOR_HELP_TEXT));
            SetBkMode(hdc, TRANSPARENT);

            let mut text_rect = RECT {
                left: rect.left + margin,
                top: rect.top + margin,
                right: rect.right - margin,
                bottom: rect.bottom - margin,
            };
            DrawTextW(hdc, &mut body.clone(), &mut text_rect, DT_LEFT | DT_NOPREFIX);

            SelectObject(hdc, old_font);
            let _ = DeleteObject(hfont);
        }
    });

    let _ = EndPaint(hwnd, &ps);
}

/// Window procedure for the help popup
pub unsafe extern "system" fn help_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            paint_help(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            // The clock may be mid-update, so report the close asynchronously
            if let Ok(owner) = GetWindow(hwnd, GW_OWNER) {
                let _ = PostMessageW(owner, WM_HELP_CLOSED, WPARAM(hwnd.0 as usize), LPARAM(0));
            }
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Register the help window class
pub unsafe fn register_help_class(hinstance: HMODULE) -> Result<()> {
    let wnd_class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(help_window_proc),
        hInstance: hinstance.into(),
        lpszClassName: w!("SimpleClockHelpClass"),
        hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
        hbrBackground: CreateSolidBrush(COLORREF(COLOR_HELP_BG)),
        ..zeroed()
    };

    if RegisterClassW(&wnd_class) == 0 {
        return Err(Error::Window("failed to register help window class".into()));
    }
    Ok(())
}
