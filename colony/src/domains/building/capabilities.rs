use crate::building::{Building, Role};

/// Static table of what each building role can do.
pub struct Capabilities {
    pub schematic: &'static str,
    pub max_level: u8,
    pub administrative: bool,
    pub workplace: bool,
    pub inhabitants_per_level: usize,
    pub achievements: &'static [(u8, &'static str)],
}

const TOWN_HALL: Capabilities = Capabilities {
    schematic: "townhall",
    max_level: 5,
    administrative: true,
    workplace: false,
    inhabitants_per_level: 0,
    achievements: &[(1, "achievement.building.townhall")],
};

const HOME: Capabilities = Capabilities {
    schematic: "citizen",
    max_level: 5,
    administrative: false,
    workplace: false,
    inhabitants_per_level: 1,
    achievements: &[
        (1, "achievement.building.home"),
        (5, "achievement.upgrade.home.max"),
    ],
};

const BUILDER: Capabilities = Capabilities {
    schematic: "builder",
    max_level: 5,
    administrative: false,
    workplace: true,
    inhabitants_per_level: 0,
    achievements: &[(1, "achievement.building.builder")],
};

const WORKSHOP: Capabilities = Capabilities {
    schematic: "workshop",
    max_level: 3,
    administrative: false,
    workplace: false,
    inhabitants_per_level: 0,
    achievements: &[],
};

impl Role {
    pub fn capabilities(&self) -> &'static Capabilities {
        match self {
            Role::TownHall => &TOWN_HALL,
            Role::Home { .. } => &HOME,
            Role::Builder => &BUILDER,
            Role::Workshop { .. } => &WORKSHOP,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::TownHall => "townhall",
            Role::Home { .. } => "home",
            Role::Builder => "builder",
            Role::Workshop { .. } => "workshop",
        }
    }
}

/// Side effects of level change, applied by the owning colony.
#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeEffect {
    RecalculateMaxCitizens,
    Achievement(&'static str),
}

impl Building {
    pub fn schematic(&self) -> &str {
        match &self.role {
            Role::Workshop { schematic } => schematic,
            role => role.capabilities().schematic,
        }
    }

    #[inline]
    pub fn max_level(&self) -> u8 {
        self.role.capabilities().max_level
    }

    #[inline]
    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level()
    }

    #[inline]
    pub fn is_administrative(&self) -> bool {
        self.role.capabilities().administrative
    }

    pub fn max_inhabitants(&self) -> usize {
        self.level as usize * self.role.capabilities().inhabitants_per_level
    }

    pub fn upgrade_effects(&self, level: u8) -> Vec<UpgradeEffect> {
        let capabilities = self.role.capabilities();
        let mut effects = vec![];
        if capabilities.inhabitants_per_level > 0 {
            effects.push(UpgradeEffect::RecalculateMaxCitizens);
        }
        for (threshold, achievement) in capabilities.achievements {
            if *threshold == level {
                effects.push(UpgradeEffect::Achievement(achievement));
            }
        }
        effects
    }
}
