use arboard::Clipboard;

/// Write-only clipboard access.
pub trait ClipboardWriter {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The system clipboard. The handle is kept alive after the first copy since
/// X11 drops the contents when the owning handle goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new()?);
        }
        if let Some(cb) = self.inner.as_mut() {
            cb.set_text(text.to_string())?;
        }
        Ok(())
    }
}
