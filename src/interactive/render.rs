//! Terminal rendering of answer text.

use termimad::MadSkin;

/// Render markdown for the terminal, or return it untouched when `styled`
/// is false.
pub fn render_markdown(text: &str, styled: bool) -> String {
    if !styled {
        return text.to_string();
    }
    let skin = MadSkin::default();
    skin.term_text(text).to_string().trim_end().to_string()
}
