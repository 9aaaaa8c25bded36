use fltk::dialog;

/// Ask for one document to open. `filter` uses FLTK's multi-line
/// "Description\tPattern" format.
pub fn native_open_dialog(filter: &str) -> Option<String> {
    let mut chooser = dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
    chooser.set_title("Open Document");
    chooser.set_filter(filter);
    if let Err(e) = chooser.try_show() {
        log::warn!("Native file chooser unavailable: {:?}", e);
        return dialog::file_chooser("Open Document", "*.{ctd,ctb,ctz,ctx}", ".", false);
    }
    let path = chooser.filename();
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path.to_string_lossy().into_owned())
    }
}
