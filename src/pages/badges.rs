//! Badge showcase backed by a static catalog.
//!
//! The earned flags and progress counters are sample data until the badges
//! endpoints report per-user progress.

#[cfg(test)]
#[path = "badges_test.rs"]
mod badges_test;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogBadge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub criteria: &'static str,
    pub rarity: Rarity,
    pub earned: bool,
    pub progress: u32,
    pub max_progress: u32,
}

impl CatalogBadge {
    /// Progress toward the badge, capped at 100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.max_progress == 0 {
            return 0.0;
        }
        (f64::from(self.progress) * 100.0 / f64::from(self.max_progress)).min(100.0)
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.progress, self.max_progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub badges: &'static [CatalogBadge],
}

macro_rules! badge {
    ($id:literal, $name:literal, $icon:literal, $rarity:ident, $earned:literal, $progress:literal / $max:literal,
     $description:literal, $criteria:literal) => {
        CatalogBadge {
            id: $id,
            name: $name,
            description: $description,
            icon: $icon,
            criteria: $criteria,
            rarity: Rarity::$rarity,
            earned: $earned,
            progress: $progress,
            max_progress: $max,
        }
    };
}

pub static CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        name: "Adoption & Care",
        description: "Badges for helping pets find homes and providing care",
        badges: &[
            badge!("pet-guardian", "Pet Guardian", "🏠", Common, true, 1 / 1,
                "For users who successfully adopt pets through the platform",
                "Successfully adopt a pet through PawsConnect"),
            badge!("super-helper", "Super Helper", "⭐", Rare, false, 2 / 5,
                "For users who assist with multiple adoptions",
                "Help facilitate 5+ successful adoptions"),
            badge!("first-responder", "First Responder", "🚨", Uncommon, false, 1 / 3,
                "For users who quickly respond to urgent adoption needs",
                "Respond to 3+ urgent adoption posts within 24 hours"),
        ],
    },
    CatalogCategory {
        name: "Community Engagement",
        description: "Badges for active participation in the community",
        badges: &[
            badge!("big-fan", "Big Fan", "❤️", Common, true, 50 / 50,
                "For users who frequently engage with posts and show support",
                "Like and interact with 50+ posts"),
            badge!("community-leader", "Community Leader", "👑", Rare, false, 2 / 5,
                "For users who create helpful blog posts and guide others",
                "Publish 5+ helpful blog posts or guides"),
            badge!("loyal-supporter", "Loyal Supporter", "🏆", Uncommon, true, 6 / 6,
                "For users who have been active for 6+ months",
                "Maintain active account for 6+ months"),
        ],
    },
    CatalogCategory {
        name: "Donations & Support",
        description: "Badges for financial and material contributions",
        badges: &[
            badge!("generous-donor", "Generous Donor", "💰", Rare, false, 150 / 500,
                "For users who make significant monetary contributions",
                "Donate $500+ to pet medical care"),
            badge!("item-supporter", "Item Supporter", "🎁", Common, false, 4 / 10,
                "For users who donate food, toys, and supplies",
                "Donate 10+ items (food, toys, supplies)"),
            badge!("emergency-aid", "Emergency Aid", "🚑", Uncommon, false, 1 / 3,
                "For users who help with medical emergency posts",
                "Contribute to 3+ emergency medical fundraisers"),
        ],
    },
    CatalogCategory {
        name: "Volunteer & Advocacy",
        description: "Badges for hands-on help and advocacy work",
        badges: &[
            badge!("volunteer", "Volunteer", "🤝", Common, false, 1 / 3,
                "For users who actively help with pet care and adoption events",
                "Participate in 3+ volunteer events or activities"),
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeSummary {
    pub total: usize,
    pub earned: usize,
    /// Earned share of the catalog, rounded to a whole percent.
    pub completion_percent: u32,
    pub rare: usize,
}

#[must_use]
pub fn summarize(catalog: &[CatalogCategory]) -> BadgeSummary {
    let badges = || catalog.iter().flat_map(|category| category.badges.iter());
    let total = badges().count();
    let earned = badges().filter(|badge| badge.earned).count();
    let rare = badges().filter(|badge| badge.rarity == Rarity::Rare).count();
    BadgeSummary { total, earned, completion_percent: percent_of(earned, total), rare }
}

fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(100)
}

#[must_use]
pub fn find(catalog: &[CatalogCategory], id: &str) -> Option<&'static CatalogBadge> {
    catalog.iter().flat_map(|category| category.badges.iter()).find(|badge| badge.id == id)
}
