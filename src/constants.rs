//! Constants module for SimpleClock
//! Contains all shared constants used across the application

// Posted to the clock window when the help popup has been destroyed
pub const WM_HELP_CLOSED: u32 = 0x8001;

// Timer ID for the clock tick
pub const TIMER_CLOCK_TICK: usize = 1;

// Virtual key codes the clock reacts to
pub const VK_F1: u32 = 0x70;
pub const VK_F2: u32 = 0x71;

// Mutex name for single instance
pub const MUTEX_NAME: &str = "Global\\SimpleClock_SingleInstance_4C81D07A";

// Clock window size before DPI scaling
pub const CLOCK_WIDTH: i32 = 180;
pub const CLOCK_HEIGHT: i32 = 40;
pub const CLOCK_FONT_SIZE: i32 = 26;
pub const HELP_FONT_SIZE: i32 = 16;

// Colors (BGR format)
pub const COLOR_CLOCK_BG: u32 = 0x00222222;
pub const COLOR_STOPWATCH_BG: u32 = 0x00332200;   // Brownish while timing
pub const COLOR_TEXT_WHITE: u32 = 0x00FFFFFF;
pub const COLOR_STOPWATCH_TEXT: u32 = 0x0066CCFF;
pub const COLOR_HELP_BG: u32 = 0x00F0F0F0;
pub const COLOR_HELP_TEXT: u32 = 0x00333333;
