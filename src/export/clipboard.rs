//! Clipboard integration for copying captures.

use super::{ExportError, encode_png};
use crate::image::Pixmap;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, Source};

/// Copies a flattened capture to the Wayland clipboard as PNG.
///
/// Prefers the wl-copy CLI (it keeps serving the clipboard after this
/// process exits), falling back to wl-clipboard-rs when the command is
/// missing.
pub fn copy_to_clipboard(pixmap: &Pixmap) -> Result<(), ExportError> {
    let image_data = encode_png(pixmap)?;
    log::debug!("Copying capture to clipboard ({} bytes)", image_data.len());

    match copy_via_command(&image_data) {
        Ok(()) => {
            log::info!("Copied to clipboard via wl-copy");
            Ok(())
        }
        Err(cmd_err) => {
            log::warn!("wl-copy failed ({cmd_err}), falling back to wl-clipboard-rs");
            match copy_via_library(&image_data) {
                Ok(()) => {
                    log::info!("Copied to clipboard via wl-clipboard-rs");
                    Ok(())
                }
                Err(lib_err) => Err(ExportError::Clipboard(format!(
                    "wl-copy failed: {cmd_err} ; wl-clipboard-rs failed: {lib_err}"
                ))),
            }
        }
    }
}

fn copy_via_library(image_data: &[u8]) -> Result<(), String> {
    use wl_clipboard_rs::copy::ServeRequests;

    let mut opts = Options::new();
    // Serve one paste then exit; the data stays available until replaced.
    opts.serve_requests(ServeRequests::Only(1));

    opts.copy(
        Source::Bytes(image_data.into()),
        MimeType::Specific("image/png".to_string()),
    )
    .map_err(|e| e.to_string())
}

fn copy_via_command(image_data: &[u8]) -> Result<(), String> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg("image/png")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to spawn wl-copy (is it installed?): {e}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(image_data)
            .map_err(|e| format!("failed to write to wl-copy stdin: {e}"))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("failed to wait for wl-copy: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("wl-copy exited with an error: {stderr}"));
    }

    Ok(())
}

/// Checks whether the wl-copy command is available.
pub fn is_clipboard_available() -> bool {
    Command::new("wl-copy")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_check_does_not_panic() {
        let _available = is_clipboard_available();
    }
}
