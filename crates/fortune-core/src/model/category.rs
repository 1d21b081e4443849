use serde::{Deserialize, Serialize};

/// Puzzle category. Categories shift how predictable the remaining letters
/// are (entropy) and how recognizable a partly revealed answer is (solve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Phrase,
    Person,
    Place,
    Thing,
    Event,
    Occupation,
    FoodAndDrink,
    LivingThing,
    Quotation,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Phrase,
        Category::Person,
        Category::Place,
        Category::Thing,
        Category::Event,
        Category::Occupation,
        Category::FoodAndDrink,
        Category::LivingThing,
        Category::Quotation,
    ];

    /// Parse a free-form label from a puzzle corpus.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "PHRASE" => Some(Category::Phrase),
            "PERSON" => Some(Category::Person),
            "PLACE" => Some(Category::Place),
            "THING" => Some(Category::Thing),
            "EVENT" => Some(Category::Event),
            "OCCUPATION" => Some(Category::Occupation),
            "FOOD & DRINK" | "FOOD AND DRINK" => Some(Category::FoodAndDrink),
            "LIVING THING" => Some(Category::LivingThing),
            "QUOTATION" => Some(Category::Quotation),
            _ => None,
        }
    }

    /// Multiplier on the per-blank entropy estimate. Stock phrases and
    /// quotations run more predictable than average; proper names and
    /// occupations less so.
    pub fn entropy_modifier(self) -> f64 {
        match self {
            Category::Quotation => 0.8,
            Category::Phrase | Category::FoodAndDrink => 0.9,
            Category::Event => 0.95,
            Category::Thing | Category::LivingThing => 1.0,
            Category::Place => 1.05,
            Category::Person | Category::Occupation => 1.1,
        }
    }

    /// Multiplier on the estimated solve probability.
    pub fn solve_modifier(self) -> f64 {
        match self {
            Category::Quotation => 1.3,
            Category::Phrase => 1.2,
            Category::FoodAndDrink => 1.15,
            Category::Event => 1.1,
            Category::Thing | Category::LivingThing => 1.0,
            Category::Place => 0.9,
            Category::Occupation => 0.85,
            Category::Person => 0.8,
        }
    }
}
