use std::fmt;

use serde::Serialize;

use crate::catalog::{Catalog, WeaponCategory};
use crate::Result;

/// One generated loadout. Field names on the wire follow the record the
/// randomizer has always printed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Loadout {
    pub class: &'static str,
    pub perk: &'static str,
    pub max_weight: u8,
    /// Auto-equipped items first, then the random picks.
    #[serde(rename = "loadout")]
    pub items: Vec<&'static str>,
    pub total_weight: u8,
}

/// A weapon line as the front ends show it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadoutRow {
    pub name: &'static str,
    pub category: WeaponCategory,
}

impl fmt::Display for LoadoutRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} ({})", self.name, self.category.label())
    }
}

impl Loadout {
    pub fn remaining_weight(&self) -> u8 {
        self.max_weight.saturating_sub(self.total_weight)
    }

    /// Labels each item by looking it up in `catalog`. Anything not found
    /// in the primary pool is shown as a secondary.
    pub fn rows(&self, catalog: &Catalog) -> Vec<LoadoutRow> {
        self.items
            .iter()
            .map(|&name| LoadoutRow {
                name,
                category: catalog
                    .weapon_category(name)
                    .unwrap_or(WeaponCategory::Secondary),
            })
            .collect()
    }

    pub fn total_weight_line(&self) -> String {
        format!(
            "Total Weight Used: {} / {}",
            self.total_weight, self.max_weight
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Text block with weapon rows labelled from `catalog`. Use this for
    /// loadouts generated from anything other than the built-in catalog.
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> LoadoutText<'a> {
        LoadoutText {
            loadout: self,
            catalog,
        }
    }
}

/// Borrowed text rendering of a [`Loadout`], see [`Loadout::display`].
pub struct LoadoutText<'a> {
    loadout: &'a Loadout,
    catalog: &'a Catalog,
}

impl fmt::Display for LoadoutText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loadout = self.loadout;
        writeln!(f, "Class: {}", loadout.class)?;
        writeln!(f, "Perk: {}", loadout.perk)?;
        writeln!(f, "Max Weight: {}", loadout.max_weight)?;
        writeln!(f, "Weapons:")?;

        let rows = loadout.rows(self.catalog);
        if rows.is_empty() {
            writeln!(f, "  - None")?;
        }
        for row in rows {
            writeln!(f, "  {row}")?;
        }

        write!(f, "{}", loadout.total_weight_line())
    }
}

/// Labels weapons against [`Catalog::builtin`].
impl fmt::Display for Loadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Catalog::builtin()), f)
    }
}
