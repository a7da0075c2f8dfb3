//! Help module for SimpleClock
//! Text and layout data for the F1 help popup

/// Feature list shown in the help popup
pub const HELP_TEXT: &str = "SimpleClock Features:\n\n\
    \u{2022} Right Click: Toggle Stopwatch Mode\n\
    \u{2022} Double Click: Reset Window Position\n\
    \u{2022} F1 key: Show Help\n\
    \u{2022} F2 key: Toggle Topmost";

/// Title bar text of the help popup
pub const HELP_TITLE: &str = "Help";

/// Padding around the help text, in unscaled pixels
pub const HELP_MARGIN: i32 = 10;

/// Everything the window layer needs to build the help popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpView {
    pub title: String,
    pub body: String,
    pub margin: i32,
}

pub fn help_view(text: &str) -> HelpView {
    HelpView {
        title: HELP_TITLE.to_string(),
        body: text.to_string(),
        margin: HELP_MARGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_text_lists_every_binding() {
        for binding in ["Right Click", "Double Click", "F1", "F2"] {
            assert!(HELP_TEXT.contains(binding), "missing {}", binding);
        }
        assert_eq!(HELP_TEXT.lines().count(), 6);
    }

    #[test]
    fn test_help_view() {
        let view = help_view("hello");
        assert_eq!(view.title, "Help");
        assert_eq!(view.body, "hello");
        assert_eq!(view.margin, 10);
    }
}
