use cloudbox_core::{Favorites, FileListing, FolderListing, Session};
use serde_json::Value;

pub fn listing(folders: &FolderListing, files: &FileListing) {
    if folders.folders.is_empty() && files.files.is_empty() {
        println!("empty folder");
        return;
    }

    for folder in &folders.folders {
        println!(
            "{:>10}  {:>6}  {}/",
            "<dir>",
            id(folder, "folder_id"),
            text(folder, "folder_name")
        );
    }
    for file in &files.files {
        let size = file
            .get("file_size")
            .and_then(Value::as_u64)
            .map(format_size)
            .unwrap_or_else(|| "?".to_string());
        println!("{:>10}  {:>6}  {}", size, id(file, "file_id"), text(file, "file_name"));
    }
}

pub fn favorites(favorites: &Favorites) {
    if favorites.files.is_empty() && favorites.folders.is_empty() {
        println!("no favorites");
        return;
    }
    let folders = FolderListing {
        folders: favorites.folders.clone(),
    };
    let files = FileListing {
        files: favorites.files.clone(),
    };
    listing(&folders, &files);
}

pub fn session(session: &Session) {
    match &session.email {
        Some(email) if session.logged_in() => println!("user: {}", email),
        _ => println!("user: not logged in"),
    }
    println!("language: {:?}", session.preferences.language);
    println!("theme: {:?}", session.preferences.theme);
}

fn id(entry: &Value, field: &str) -> String {
    entry
        .get(field)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn text<'a>(entry: &'a Value, field: &str) -> &'a str {
    entry.get(field).and_then(Value::as_str).unwrap_or("<unnamed>")
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
