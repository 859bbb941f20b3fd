//! Static food taxonomies
//!
//! Two tables exist: the base set is always available, the advanced set is
//! unlocked at higher levels for older players. Category order is stable.

use crate::consts::FALLBACK_GLYPH;

/// Which taxonomy a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Base,
    Advanced,
}

/// A food category: display glyph plus its ordered member items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub glyph: &'static str,
    pub items: &'static [&'static str],
}

pub static BASE_CATEGORIES: &[Category] = &[
    Category {
        name: "Fruits",
        glyph: "🍎",
        items: &[
            "Apple", "Banana", "Orange", "Grapes", "Strawberry", "Watermelon", "Pineapple",
            "Mango", "Blueberries", "Peach", "Pear", "Kiwi",
        ],
    },
    Category {
        name: "Vegetables",
        glyph: "🥕",
        items: &[
            "Carrot", "Broccoli", "Spinach", "Tomato", "Cucumber", "Lettuce", "Potato", "Corn",
            "Peas", "Bell Pepper", "Onion", "Celery",
        ],
    },
    Category {
        name: "Dairy",
        glyph: "🥛",
        items: &[
            "Milk", "Cheese", "Yogurt", "Butter", "Ice Cream", "Cream", "Cottage Cheese",
            "Chocolate Milk", "Milkshake",
        ],
    },
    Category {
        name: "Grains",
        glyph: "🍞",
        items: &[
            "Bread", "Rice", "Pasta", "Cereal", "Oatmeal", "Crackers", "Bagel", "Tortilla",
            "Pancake", "Waffle",
        ],
    },
    Category {
        name: "Protein",
        glyph: "🥩",
        items: &[
            "Chicken", "Eggs", "Fish", "Beans", "Nuts", "Turkey", "Tofu", "Peanut Butter", "Tuna",
        ],
    },
];

pub static ADVANCED_CATEGORIES: &[Category] = &[
    Category {
        name: "Sweets",
        glyph: "🍬",
        items: &[
            "Candy", "Chocolate", "Cake", "Cookies", "Donut", "Lollipop", "Cupcake",
            "Gummy Bears", "Jelly Beans",
        ],
    },
    Category {
        name: "Drinks",
        glyph: "🥤",
        items: &[
            "Water", "Juice", "Soda", "Lemonade", "Tea", "Coffee", "Smoothie", "Hot Chocolate",
        ],
    },
    Category {
        name: "Snacks",
        glyph: "🍿",
        items: &[
            "Popcorn", "Chips", "Pretzels", "Granola Bar", "Trail Mix", "Fruit Snacks",
            "Cheese Sticks",
        ],
    },
];

/// Per-item emoji, keyed by lowercase item name
static ITEM_GLYPHS: &[(&str, &str)] = &[
    ("apple", "🍎"),
    ("banana", "🍌"),
    ("orange", "🍊"),
    ("grapes", "🍇"),
    ("strawberry", "🍓"),
    ("watermelon", "🍉"),
    ("pineapple", "🍍"),
    ("mango", "🥭"),
    ("blueberries", "🫐"),
    ("peach", "🍑"),
    ("pear", "🍐"),
    ("kiwi", "🥝"),
    ("carrot", "🥕"),
    ("broccoli", "🥦"),
    ("tomato", "🍅"),
    ("cucumber", "🥒"),
    ("potato", "🥔"),
    ("corn", "🌽"),
    ("onion", "🧅"),
    ("milk", "🥛"),
    ("cheese", "🧀"),
    ("ice cream", "🍦"),
    ("bread", "🍞"),
    ("rice", "🍚"),
    ("pasta", "🍝"),
    ("pancake", "🥞"),
    ("waffle", "🧇"),
    ("chicken", "🍗"),
    ("eggs", "🥚"),
    ("fish", "🐟"),
    ("candy", "🍬"),
    ("chocolate", "🍫"),
    ("cake", "🎂"),
    ("cookies", "🍪"),
    ("donut", "🍩"),
    ("cupcake", "🧁"),
    ("water", "💧"),
    ("juice", "🧃"),
    ("soda", "🥤"),
    ("coffee", "☕"),
    ("popcorn", "🍿"),
    ("chips", "🍟"),
];

impl Tier {
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Tier::Base => BASE_CATEGORIES,
            Tier::Advanced => ADVANCED_CATEGORIES,
        }
    }
}

/// Look up a category by exact name in either taxonomy
pub fn find(name: &str) -> Option<&'static Category> {
    BASE_CATEGORIES
        .iter()
        .chain(ADVANCED_CATEGORIES)
        .find(|c| c.name == name)
}

/// Which taxonomy a category name belongs to
pub fn tier_of(name: &str) -> Option<Tier> {
    if BASE_CATEGORIES.iter().any(|c| c.name == name) {
        Some(Tier::Base)
    } else if ADVANCED_CATEGORIES.iter().any(|c| c.name == name) {
        Some(Tier::Advanced)
    } else {
        None
    }
}

/// Display glyph for an item: its own emoji, else the category glyph, else a plate
pub fn glyph_for_item(category: &str, item_name: &str) -> &'static str {
    let lower = item_name.to_lowercase();
    if let Some((_, glyph)) = ITEM_GLYPHS.iter().find(|(name, _)| *name == lower) {
        return *glyph;
    }
    find(category).map(|c| c.glyph).unwrap_or(FALLBACK_GLYPH)
}
