//! Las Vegas / Henderson survey sites.
//!
//! Coordinates sourced from OpenStreetMap.

/// A named survey site.
#[derive(Debug, Clone)]
pub struct Site {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Site {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> waypoint_router::Point {
        waypoint_router::Point::new(self.lat, self.lng)
    }
}

/// Field office; every survey day starts and ends here.
pub const FIELD_OFFICE: Site = Site::new("Wynn Las Vegas", 36.1263781, -115.1658180);

pub const SURVEY_SITES: &[Site] = &[
    Site::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Site::new("Sinatra", 36.1300035, -115.1654850),
    Site::new("Public House", 36.1219193, -115.1689317),
    Site::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Site::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Site::new("Spago", 36.1139368, -115.1741462),
    Site::new("Bacchanal Buffet", 36.1159581, -115.1762929),
    Site::new("Il Fornaio", 36.1024474, -115.1740110),
    Site::new("Charlie Palmer Steak", 36.0910624, -115.1743364),
    Site::new("Green Valley Ranch", 36.0308, -115.0825),
    Site::new("Sunset Station", 36.0614, -115.0631),
    Site::new("Naga", 36.0137634, -114.9928676),
    Site::new("RibCage", 35.9949754, -115.0999810),
    Site::new("Longhorn Casino", 36.1070664, -115.0591256),
];

/// The field office followed by every survey site.
pub fn survey_day() -> Vec<waypoint_router::Point> {
    std::iter::once(&FIELD_OFFICE)
        .chain(SURVEY_SITES.iter())
        .map(Site::point)
        .collect()
}
