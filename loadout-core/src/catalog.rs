use std::collections::HashSet;

use thiserror::Error;

/// Perk that raises a class's carrying capacity by one.
pub const SURVIVALIST: &str = "Survivalist";

/// Highest number of items a class may have pre-installed.
pub const MAX_AUTO_EQUIP: usize = 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WeaponCategory {
    Primary,
    Secondary,
}

impl WeaponCategory {
    /// Weight a weapon of this category takes out of the class budget.
    pub fn cost(self) -> u8 {
        match self {
            WeaponCategory::Primary => 2,
            WeaponCategory::Secondary => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeaponCategory::Primary => "Primary",
            WeaponCategory::Secondary => "Secondary",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClassDefinition {
    pub name: &'static str,
    pub base_weight: u8,
    pub auto_equip: &'static [&'static str],
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Weapon {
    pub name: &'static str,
    pub category: WeaponCategory,
    /// Only this class may carry the weapon.
    pub restricted_to: Option<&'static str>,
}

impl Weapon {
    const fn primary(name: &'static str) -> Self {
        Self {
            name,
            category: WeaponCategory::Primary,
            restricted_to: None,
        }
    }

    const fn secondary(name: &'static str) -> Self {
        Self {
            name,
            category: WeaponCategory::Secondary,
            restricted_to: None,
        }
    }

    const fn only_for(self, class: &'static str) -> Self {
        Self {
            restricted_to: Some(class),
            ..self
        }
    }

    pub fn cost(&self) -> u8 {
        self.category.cost()
    }

    pub fn usable_by(&self, class: &str) -> bool {
        match self.restricted_to {
            Some(owner) => owner == class,
            None => true,
        }
    }
}

pub(crate) const CLASSES: &[ClassDefinition] = &[
    ClassDefinition {
        name: "Soldat",
        base_weight: 3,
        auto_equip: &[],
    },
    ClassDefinition {
        name: "Rook",
        base_weight: 2,
        auto_equip: &[],
    },
    ClassDefinition {
        name: "Mortician",
        base_weight: 2,
        auto_equip: &[],
    },
    ClassDefinition {
        name: "Officer",
        base_weight: 2,
        auto_equip: &[],
    },
    ClassDefinition {
        name: "Lancer",
        base_weight: 2,
        auto_equip: &["Heavy Lance"],
    },
    ClassDefinition {
        name: "Vanguard",
        base_weight: 2,
        auto_equip: &["Shield"],
    },
];

pub(crate) const PERKS: &[&str] = &[
    SURVIVALIST,
    "Greyhound",
    "Hippocratic",
    "Apparition",
    "Butcher",
    "Chemist",
    "Tunnel Rat",
    "Ambidextrous",
    "Leatherneck",
    "Marksman",
    "Snake Eyes",
    "Devil Dog",
    "Veteran",
    "Black Hand",
];

pub(crate) const PRIMARY_WEAPONS: &[Weapon] = &[
    Weapon::primary("Prince"),
    Weapon::primary("Adjudicator"),
    Weapon::primary("Kingslayer"),
    Weapon::primary("Whisper"),
    Weapon::primary("Flyboy Whisper"),
    Weapon::primary("Volk"),
    Weapon::primary("Frontline Volk"),
    Weapon::primary("Judgement"),
    Weapon::primary("Incendiary Judgement"),
    Weapon::primary("Equine"),
    Weapon::primary("Sawn-Off Equine"),
    Weapon::primary("Crestfall"),
    Weapon::primary("Ranger Crestfall"),
    Weapon::primary("Hellion"),
    Weapon::primary("Heavy Hellion"),
    Weapon::primary("Jesse"),
    Weapon::primary("Precision Jesse"),
    Weapon::primary("Stocked Union"),
    Weapon::primary("Cavalry Talon"),
    Weapon::primary("Heavy Lance").only_for("Lancer"),
];

pub(crate) const SECONDARY_WEAPONS: &[Weapon] = &[
    Weapon::secondary("Grace"),
    Weapon::secondary("Honour"),
    Weapon::secondary("Talon"),
    Weapon::secondary("Cavalry Sword"),
    Weapon::secondary("Negotiator"),
    Weapon::secondary("Knell"),
    Weapon::secondary("Bandit Knell"),
    Weapon::secondary("Hope"),
    Weapon::secondary("Union"),
    Weapon::secondary("Auclair"),
    Weapon::secondary("Shield").only_for("Vanguard"),
];

static BUILTIN: Catalog = Catalog {
    classes: CLASSES,
    perks: PERKS,
    primaries: PRIMARY_WEAPONS,
    secondaries: SECONDARY_WEAPONS,
};

/// Capacity bonus granted by a perk.
pub fn perk_weight_bonus(perk: &str) -> u8 {
    if perk == SURVIVALIST {
        1
    } else {
        0
    }
}

/// Problems found by [`Catalog::validate`]. All of them are data mistakes
/// made when editing the tables above, never something a player can cause.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no classes")]
    NoClasses,

    #[error("catalog has no perks")]
    NoPerks,

    #[error("{category:?} weapon pool is empty")]
    EmptyPool { category: WeaponCategory },

    #[error("duplicate name '{name}' in catalog")]
    DuplicateName { name: &'static str },

    #[error("class '{class}' has a base weight of zero")]
    ZeroBaseWeight { class: &'static str },

    #[error("class '{class}' base weight {base_weight} plus a perk bonus of {bonus} does not fit in a u8")]
    CapacityOverflow {
        class: &'static str,
        base_weight: u8,
        bonus: u8,
    },

    #[error("weapon '{weapon}' is tagged {category:?} but listed in the other pool")]
    MisplacedWeapon {
        weapon: &'static str,
        category: WeaponCategory,
    },

    #[error("class '{class}' auto-equips {count} items, at most one allowed")]
    TooManyAutoEquip { class: &'static str, count: usize },

    #[error("class '{class}' auto-equips unknown item '{item}'")]
    UnknownAutoEquip {
        class: &'static str,
        item: &'static str,
    },

    #[error("class '{class}' auto-equips '{item}', which is restricted to '{owner}'")]
    ForeignAutoEquip {
        class: &'static str,
        item: &'static str,
        owner: &'static str,
    },

    #[error("class '{class}' auto-equips {weight} weight but only carries {base_weight}")]
    AutoEquipOverCapacity {
        class: &'static str,
        weight: u8,
        base_weight: u8,
    },

    #[error("weapon '{weapon}' is restricted to unknown class '{class}'")]
    UnknownRestriction {
        weapon: &'static str,
        class: &'static str,
    },
}

/// Read-only view over the class, perk and weapon tables.
#[derive(Copy, Clone, Debug)]
pub struct Catalog {
    pub classes: &'static [ClassDefinition],
    pub perks: &'static [&'static str],
    pub primaries: &'static [Weapon],
    pub secondaries: &'static [Weapon],
}

impl Catalog {
    /// The fixed game catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn class(&self, name: &str) -> Option<&'static ClassDefinition> {
        self.classes.iter().find(|class| class.name == name)
    }

    pub fn weapons(&self) -> impl Iterator<Item = &'static Weapon> {
        self.primaries.iter().chain(self.secondaries.iter())
    }

    pub fn weapon(&self, name: &str) -> Option<&'static Weapon> {
        self.weapons().find(|weapon| weapon.name == name)
    }

    /// Whether `name` is a primary or secondary weapon. `None` for
    /// anything that is not in either pool.
    pub fn weapon_category(&self, name: &str) -> Option<WeaponCategory> {
        self.weapon(name).map(|weapon| weapon.category)
    }

    pub fn pool(&self, category: WeaponCategory) -> &'static [Weapon] {
        match category {
            WeaponCategory::Primary => self.primaries,
            WeaponCategory::Secondary => self.secondaries,
        }
    }

    pub fn max_weight(&self, class: &ClassDefinition, perk: &str) -> u8 {
        class.base_weight + perk_weight_bonus(perk)
    }

    /// Checks the tables for the mistakes the generator cannot cope with.
    /// Binaries run this once at startup.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.classes.is_empty() {
            return Err(CatalogError::NoClasses);
        }
        if self.perks.is_empty() {
            return Err(CatalogError::NoPerks);
        }
        for category in [WeaponCategory::Primary, WeaponCategory::Secondary] {
            let pool = self.pool(category);
            if pool.is_empty() {
                return Err(CatalogError::EmptyPool { category });
            }
            if let Some(weapon) = pool.iter().find(|w| w.category != category) {
                return Err(CatalogError::MisplacedWeapon {
                    weapon: weapon.name,
                    category: weapon.category,
                });
            }
        }

        let mut seen = HashSet::new();
        let names = self
            .classes
            .iter()
            .map(|class| class.name)
            .chain(self.perks.iter().copied())
            .chain(self.weapons().map(|weapon| weapon.name));
        for name in names {
            if !seen.insert(name) {
                return Err(CatalogError::DuplicateName { name });
            }
        }

        for weapon in self.weapons() {
            if let Some(owner) = weapon.restricted_to {
                if self.class(owner).is_none() {
                    return Err(CatalogError::UnknownRestriction {
                        weapon: weapon.name,
                        class: owner,
                    });
                }
            }
        }

        let max_bonus = self
            .perks
            .iter()
            .map(|perk| perk_weight_bonus(perk))
            .max()
            .unwrap_or(0);

        for class in self.classes {
            if class.base_weight == 0 {
                return Err(CatalogError::ZeroBaseWeight { class: class.name });
            }
            if class.base_weight.checked_add(max_bonus).is_none() {
                return Err(CatalogError::CapacityOverflow {
                    class: class.name,
                    base_weight: class.base_weight,
                    bonus: max_bonus,
                });
            }
            if class.auto_equip.len() > MAX_AUTO_EQUIP {
                return Err(CatalogError::TooManyAutoEquip {
                    class: class.name,
                    count: class.auto_equip.len(),
                });
            }

            let mut weight = 0u8;
            for &item in class.auto_equip {
                let weapon = self.weapon(item).ok_or(CatalogError::UnknownAutoEquip {
                    class: class.name,
                    item,
                })?;
                if let Some(owner) = weapon.restricted_to {
                    if owner != class.name {
                        return Err(CatalogError::ForeignAutoEquip {
                            class: class.name,
                            item,
                            owner,
                        });
                    }
                }
                weight += weapon.cost();
            }

            if weight > class.base_weight {
                return Err(CatalogError::AutoEquipOverCapacity {
                    class: class.name,
                    weight,
                    base_weight: class.base_weight,
                });
            }
        }

        Ok(())
    }
}
