/// City names offered as input hints. Not an allow-list: any text may be looked up.
pub const CITY_SUGGESTIONS: &[&str] = &[
    "Lahore",
    "Karachi",
    "Islamabad",
    "Peshawar",
    "Quetta",
    "Multan",
    "Faisalabad",
    "Rawalpindi",
    "Sahiwal",
];

/// Suggestions starting with `prefix`, ignoring case. An empty prefix yields the whole table.
pub fn suggest(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    CITY_SUGGESTIONS
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().starts_with(&prefix))
        .collect()
}
