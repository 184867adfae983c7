use eframe::egui;
use egui_extras::RetainedImage;
use image::imageops::FilterType;
use log::warn;
use std::collections::HashMap;
use std::path::PathBuf;

/// Edge length of class, perk and weapon icons, in pixels.
pub const ICON_SIZE: u32 = 24;

/// Loads `<dir>/<name>.png` icons once and keeps them. Names without a
/// usable file get a flat grey square.
pub struct IconCache {
    dir: PathBuf,
    icons: HashMap<String, Option<RetainedImage>>,
    placeholder: RetainedImage,
}

impl IconCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let side = ICON_SIZE as usize;
        let grey = egui::ColorImage::new(
            [side, side],
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 255),
        );

        Self {
            dir: dir.into(),
            icons: HashMap::new(),
            placeholder: RetainedImage::from_color_image("icon_placeholder", grey),
        }
    }

    pub fn icon(&mut self, name: &str) -> &RetainedImage {
        if !self.icons.contains_key(name) {
            let loaded = self.load(name);
            self.icons.insert(name.to_string(), loaded);
        }

        match self.icons.get(name) {
            Some(Some(icon)) => icon,
            _ => &self.placeholder,
        }
    }

    fn load(&self, name: &str) -> Option<RetainedImage> {
        let path = self.dir.join(format!("{name}.png"));
        if !path.exists() {
            return None;
        }

        match image::open(&path) {
            Ok(img) => {
                let rgba = img
                    .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
                    .to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                Some(RetainedImage::from_color_image(name, pixels))
            }
            Err(e) => {
                warn!("Error loading image for {}: {}", name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_icon_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = IconCache::new(dir.path());

        assert_eq!(cache.icon("Soldat").size(), [24, 24]);
        assert!(matches!(cache.icons.get("Soldat"), Some(None)));
    }

    #[test]
    fn broken_icon_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Volk.png"), b"not a png").unwrap();
        let mut cache = IconCache::new(dir.path());

        cache.icon("Volk");
        assert!(matches!(cache.icons.get("Volk"), Some(None)));
    }

    #[test]
    fn icons_are_resized_and_cached() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(64, 40, image::Rgba([200, 10, 10, 255]))
            .save(dir.path().join("Veteran.png"))
            .unwrap();
        let mut cache = IconCache::new(dir.path());

        assert_eq!(cache.icon("Veteran").size(), [24, 24]);
        assert!(matches!(cache.icons.get("Veteran"), Some(Some(_))));

        std::fs::remove_file(dir.path().join("Veteran.png")).unwrap();
        assert!(matches!(cache.icons.get("Veteran"), Some(Some(_))));
        assert_eq!(cache.icon("Veteran").size(), [24, 24]);
    }
}
