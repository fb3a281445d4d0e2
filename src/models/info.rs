use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: &'static str,
    pub postal_code: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub phone: &'static str,
    pub email: &'static str,
}

/// Contact and address data served by GET /api/info.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantInfo {
    pub name: &'static str,
    pub address: Address,
    pub coordinates: Coordinates,
    pub contact: Contact,
    pub features: &'static [&'static str],
    pub website: &'static str,
}

pub const RESTAURANT_INFO: RestaurantInfo = RestaurantInfo {
    name: "Strandstübchen Neue Mühle",
    address: Address {
        street: "Küchenmeisterallee 33b",
        postal_code: "15711",
        city: "Königs Wusterhausen",
        country: "Deutschland",
    },
    coordinates: Coordinates {
        latitude: 52.297,
        longitude: 13.645,
    },
    contact: Contact {
        phone: "+49 123 456789",
        email: "info@strandstuebchen-neuemuehle.de",
    },
    features: &["Parkplätze", "Barrierefrei"],
    website: "https://strandstuebchen-neuemuehle.de",
};
