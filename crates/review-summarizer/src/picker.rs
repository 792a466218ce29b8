//! File selection for file mode without an explicit path.

use camino::Utf8PathBuf;
use review_summarizer_core::{FilePicker, NoDialog};

/// Native "open file" dialog filtered to the supported review formats.
#[cfg(feature = "dialog")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogPicker;

#[cfg(feature = "dialog")]
impl FilePicker for DialogPicker {
    fn pick_file(&self) -> Option<Utf8PathBuf> {
        use review_summarizer_core::InputFormat;

        let mut dialog = rfd::FileDialog::new().set_title("Select a file");
        for format in InputFormat::ALL {
            dialog = dialog.add_filter(format.label(), &[format.extension()]);
        }
        let picked = dialog.add_filter("All files", &["*"]).pick_file()?;
        match Utf8PathBuf::from_path_buf(picked) {
            Ok(path) => Some(path),
            Err(path) => {
                tracing::warn!(path = %path.display(), "selected path is not valid UTF-8");
                None
            }
        }
    }
}

/// The picker to use for this run.
///
/// `allow_dialog` comes from the `file_dialog` config setting.
#[cfg(feature = "dialog")]
pub fn select_picker(allow_dialog: bool) -> Box<dyn FilePicker> {
    if allow_dialog {
        Box::new(DialogPicker)
    } else {
        Box::new(NoDialog)
    }
}

/// The picker to use for this run. Builds without the `dialog` feature never
/// open one.
#[cfg(not(feature = "dialog"))]
pub fn select_picker(_allow_dialog: bool) -> Box<dyn FilePicker> {
    Box::new(NoDialog)
}
