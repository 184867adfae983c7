use eframe::egui;
use env_logger::Env;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use loadout_core::{check_builtin_catalog, generate_loadout, Catalog, Loadout};

mod icons;

use icons::{IconCache, ICON_SIZE};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GuiConfig {
    /// Folder holding `<name>.png` icons. Empty means the working directory.
    #[serde(default)]
    icon_dir: String,
}

fn config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir().or_else(|| dirs::data_dir())?;
    base.push("LoadoutRandomizer");
    base.push("gui_config.json");
    Some(base)
}

fn load_config_from(path: &Path) -> Option<GuiConfig> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str::<GuiConfig>(&data).ok()
}

fn save_config_to(path: &Path, cfg: &GuiConfig) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(data) = serde_json::to_string_pretty(cfg) {
        if let Err(e) = fs::write(path, data) {
            log::warn!("Could not save {}: {}", path.display(), e);
        }
    }
}

/// Reads the config, writing the defaults out first when there is no file
/// yet so it can be edited by hand.
fn load_config() -> GuiConfig {
    let Some(path) = config_path() else {
        return GuiConfig::default();
    };

    if !path.exists() {
        let cfg = GuiConfig::default();
        save_config_to(&path, &cfg);
        return cfg;
    }

    load_config_from(&path).unwrap_or_default()
}

fn icon_dir_path(icon_dir: &str) -> PathBuf {
    let trimmed = icon_dir.trim();
    if trimmed.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(trimmed)
    }
}

fn footer_lines(seed: u64, icon_dir: &str) -> [String; 2] {
    [
        format!("Seed: {seed}"),
        format!("Icons: {}", icon_dir_path(icon_dir).display()),
    ]
}

struct LoadoutApp {
    seed: u64,
    rng: StdRng,
    loadout: Loadout,
    icon_dir: String,
    icons: IconCache,
}

impl Default for LoadoutApp {
    fn default() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        let mut rng = StdRng::seed_from_u64(seed);
        let loadout = generate_loadout(&mut rng);
        let cfg = load_config();

        Self {
            seed,
            rng,
            loadout,
            icons: IconCache::new(icon_dir_path(&cfg.icon_dir)),
            icon_dir: cfg.icon_dir,
        }
    }
}

impl LoadoutApp {
    fn regenerate(&mut self) {
        self.loadout = generate_loadout(&mut self.rng);
        info!(
            "{} / {} / {:?}",
            self.loadout.class, self.loadout.perk, self.loadout.items
        );
    }

    fn icon_row(&mut self, ui: &mut egui::Ui, header: &str, name: &str) {
        ui.horizontal(|ui| {
            ui.strong(header);
            let side = ICON_SIZE as f32;
            self.icons.icon(name).show_size(ui, egui::vec2(side, side));
            ui.label(name);
        });
    }
}

impl eframe::App for LoadoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            for line in footer_lines(self.seed, &self.icon_dir) {
                ui.label(line);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Your Random Loadout");
            });
            ui.add_space(20.0);

            let class = self.loadout.class;
            let perk = self.loadout.perk;
            self.icon_row(ui, "Class:", class);
            self.icon_row(ui, "Perk:", perk);

            ui.horizontal(|ui| {
                ui.strong("Max Weight:");
                ui.label(self.loadout.max_weight.to_string());
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            ui.strong("Weapons:");
            ui.add_space(5.0);
            let rows = self.loadout.rows(Catalog::builtin());
            if rows.is_empty() {
                ui.horizontal(|ui| {
                    ui.add_space(10.0);
                    ui.label("- None");
                });
            }
            for row in rows {
                ui.horizontal(|ui| {
                    ui.add_space(10.0);
                    ui.label(row.to_string());
                });
            }

            ui.add_space(15.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(self.loadout.total_weight_line()).italics());
            });
            ui.add_space(20.0);

            let button = egui::Button::new(
                egui::RichText::new("Generate New Loadout").strong().size(16.0),
            );
            if ui.add_sized([ui.available_width(), 40.0], button).clicked() {
                self.regenerate();
            }
        });
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = check_builtin_catalog() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([450.0, 500.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Loadout Randomizer",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());

            let mut style = (*cc.egui_ctx.style()).clone();
            style.visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
            style.visuals.panel_fill = egui::Color32::from_rgb(0x2e, 0x2e, 0x2e);
            cc.egui_ctx.set_style(style);

            Box::new(LoadoutApp::default())
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_icon_dir_means_working_directory() {
        assert_eq!(icon_dir_path(""), PathBuf::from("."));
        assert_eq!(icon_dir_path("  "), PathBuf::from("."));
        assert_eq!(icon_dir_path(" icons "), PathBuf::from("icons"));
    }

    #[test]
    fn footer_shows_seed_and_icon_folder() {
        assert_eq!(
            footer_lines(42, ""),
            ["Seed: 42".to_string(), "Icons: .".to_string()]
        );
        assert_eq!(footer_lines(7, "icons")[1], "Icons: icons");
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gui_config.json");
        assert!(load_config_from(&path).is_none());

        save_config_to(
            &path,
            &GuiConfig {
                icon_dir: "art/icons".to_string(),
            },
        );
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.icon_dir, "art/icons");

        fs::write(&path, "not json").unwrap();
        assert!(load_config_from(&path).is_none());
    }

    #[test]
    fn config_tolerates_missing_fields() {
        let cfg: GuiConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.icon_dir.is_empty());

        let cfg: GuiConfig = serde_json::from_str(r#"{"icon_dir": "/tmp/icons"}"#).unwrap();
        assert_eq!(cfg.icon_dir, "/tmp/icons");
    }
}
