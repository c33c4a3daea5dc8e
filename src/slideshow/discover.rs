use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{KenBurnsError, KenBurnsResult};

/// File extensions (lowercase) accepted as slideshow images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// List image files directly inside `dir`, sorted by path.
pub fn discover_images(dir: &Path) -> KenBurnsResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(KenBurnsError::invalid_configuration(format!(
            "image folder '{}' does not exist or is not a directory",
            dir.display()
        )));
    }

    let mut images = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read image folder '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_image_path(&path) {
            images.push(path);
        }
    }
    images.sort();

    if images.is_empty() {
        return Err(KenBurnsError::invalid_configuration(format!(
            "no images found in '{}'",
            dir.display()
        )));
    }
    tracing::debug!(count = images.len(), dir = %dir.display(), "discovered images");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_image_path(Path::new("a/b.PNG")));
        assert!(is_image_path(Path::new("x.jpeg")));
        assert!(is_image_path(Path::new("x.webp")));
        assert!(!is_image_path(Path::new("x.gif")));
        assert!(!is_image_path(Path::new("x")));
        assert!(!is_image_path(Path::new("notes.txt")));
    }

    #[test]
    fn lists_sorted_images_only() {
        let dir = PathBuf::from("target").join("discover_images_unit");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("nested.png")).unwrap();
        for name in ["b.jpg", "a.png", "c.txt", "d.BMP"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let found = discover_images(&dir).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg", "d.BMP"]);
    }

    #[test]
    fn missing_or_empty_folder_is_an_error() {
        assert!(discover_images(Path::new("target/no_such_folder_here")).is_err());

        let dir = PathBuf::from("target").join("discover_images_empty");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let err = discover_images(&dir).unwrap_err();
        assert!(err.to_string().contains("no images found"));
    }
}
