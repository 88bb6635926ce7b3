use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

pub fn pick_workbooks() -> Option<Vec<PathBuf>> {
    FileDialog::new()
        .set_title("Select Excel files")
        .add_filter("Excel Files", &["xlsx", "xls"])
        .add_filter("All Files", &["*"])
        .pick_files()
}

/// Reports success and asks whether to open the output folder.
pub fn confirm_open_output(script_path: &Path) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Done")
        .set_description(format!(
            "SQL script created.\nPath: {}\n\nOpen the output folder?",
            script_path.display()
        ))
        .set_buttons(MessageButtons::YesNo)
        .show();
    answer == MessageDialogResult::Yes
}

pub fn show_error(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
