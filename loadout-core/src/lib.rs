use thiserror::Error;

pub mod catalog;
pub mod draws;
mod generator;
mod loadout;

pub use catalog::{Catalog, CatalogError, ClassDefinition, Weapon, WeaponCategory, SURVIVALIST};
pub use draws::{Draw, RecordingDraws, RngDraws, ScriptedDraws};
pub use generator::{generate_loadout, generate_loadout_with, generate_seeded, LOADOUT_SIZE};
pub use loadout::{Loadout, LoadoutRow, LoadoutText};

#[derive(Debug, Error)]
pub enum LoadoutError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoadoutError>;

/// Validates the built-in catalog. Front ends call this once before
/// generating anything.
pub fn check_builtin_catalog() -> Result<()> {
    let catalog = Catalog::builtin();
    catalog.validate()?;
    log::debug!(
        "catalog ok: {} classes, {} perks, {} primaries, {} secondaries",
        catalog.classes.len(),
        catalog.perks.len(),
        catalog.primaries.len(),
        catalog.secondaries.len()
    );
    Ok(())
}
