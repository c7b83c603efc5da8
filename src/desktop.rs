use crate::error::{PilotError, Result};

/// Open a URL in the default browser
pub fn open_in_browser(url: &str) -> Result<()> {
    open::that(url)?;
    Ok(())
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| PilotError::Io(std::io::Error::other(e)))?;
    clipboard
        .set_text(text)
        .map_err(|e| PilotError::Io(std::io::Error::other(e)))
}
