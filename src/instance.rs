//! Single-instance guard for SimpleClock

use windows::{
    core::PCWSTR,
    Win32::Foundation::{CloseHandle, GetLastError, BOOL, ERROR_ALREADY_EXISTS, HANDLE},
    Win32::System::Threading::CreateMutexW,
};

use crate::constants::MUTEX_NAME;

/// Holds the named mutex for the lifetime of the process
pub struct InstanceGuard(HANDLE);

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Claim the instance mutex; `None` if another clock is already running
pub fn acquire() -> Option<InstanceGuard> {
    let mutex_name: Vec<u16> = MUTEX_NAME.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        let handle = CreateMutexW(None, BOOL::from(true), PCWSTR(mutex_name.as_ptr())).ok()?;
        if GetLastError() == ERROR_ALREADY_EXISTS {
            let _ = CloseHandle(handle);
            None
        } else {
            Some(InstanceGuard(handle))
        }
    }
}
