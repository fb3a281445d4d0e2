use serde::{Deserialize, Serialize};

/// One dish on the printed menu.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub highlight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddr_original: Option<bool>,
}

/// Query params for GET /api/menu.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// "winter" or "summer"; anything else returns both seasons.
    pub season: Option<String>,
}

const fn item(
    name: &'static str,
    price: &'static str,
    description: &'static str,
    highlight: bool,
    ddr_original: Option<bool>,
) -> MenuItem {
    MenuItem {
        name,
        price,
        description,
        highlight,
        ddr_original,
    }
}

pub const WINTER_MENU: &[MenuItem] = &[
    item(
        "Soljanka 'Original'",
        "6,50 €",
        "Nach Originalrezept mit saurer Sahne, Zitrone & Toast",
        true,
        Some(true),
    ),
    item(
        "Wurstgulasch",
        "6,50 €",
        "Der Schulküchen-Klassiker: Jagdwurst, Tomatensauce, Spirelli",
        false,
        Some(true),
    ),
    item(
        "Panierte Jägerschnitzel",
        "7,00 €",
        "Mit Nudeln und Tomatensauce – wie früher",
        true,
        Some(true),
    ),
    item(
        "Tote Oma",
        "9,50 €",
        "Grützwurst auf Sauerkraut mit Salzkartoffeln",
        false,
        Some(true),
    ),
    item(
        "Kesselgulasch",
        "9,50 €",
        "Deftiges Gulasch aus dem Kessel",
        false,
        Some(true),
    ),
    item(
        "Senfeier",
        "6,00 €",
        "Klassisch mit Salzkartoffeln in feiner Senfsauce",
        false,
        Some(true),
    ),
    item(
        "Glühwein (0,2l)",
        "3,50 €",
        "Ohne Schuss. Mit Amaretto oder Rum: 4,50 €",
        false,
        Some(false),
    ),
];

pub const SUMMER_MENU: &[MenuItem] = &[
    item("Pommes Frites", "3,50 €", "Goldgelb & knusprig, rot/weiß", false, None),
    item(
        "Currywurst Spezial",
        "4,50 €",
        "Mit unserer geheimen Currysauce & Bäckerbrötchen",
        true,
        None,
    ),
    item("Chicken Nuggets", "4,90 €", "6 Stück im Knuspermantel mit Dip", false, None),
    item("Thüringer Bratwurst", "3,50 €", "Frisch vom Grill im Brötchen", false, None),
    item("Eiskaffee", "4,50 €", "Große Kugel Vanilleeis mit Sahne", false, None),
];

/// Menu of a single season, if the key names one.
pub fn season_items(season: &str) -> Option<&'static [MenuItem]> {
    match season {
        "winter" => Some(WINTER_MENU),
        "summer" => Some(SUMMER_MENU),
        _ => None,
    }
}
