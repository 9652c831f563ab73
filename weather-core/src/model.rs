use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a snapshot was taken, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Human-readable description, e.g. "Sunny".
    pub text: String,
    /// Icon URL; WeatherAPI.com returns these scheme-relative (`//cdn...`).
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub condition: Condition,
}

/// Current conditions for one location at one point in time.
///
/// Only the fields the widget renders are kept; everything else in the
/// provider payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: Current,
}

impl WeatherSnapshot {
    /// Build a snapshot from a parsed `current.json` body.
    ///
    /// Returns `None` unless both `location` and `current` are present as
    /// objects and carry every consumed field. Provider error bodies
    /// (`{"error": {...}}`) and any other shape collapse to `None`; a partial
    /// snapshot is never produced.
    pub fn from_body(body: &Value) -> Option<Self> {
        let location = body.get("location").filter(|v| v.is_object())?;
        let current = body.get("current").filter(|v| v.is_object())?;

        Some(Self {
            location: Location::deserialize(location).ok()?,
            current: Current::deserialize(current).ok()?,
        })
    }

    /// Icon URL with scheme-relative values resolved to https.
    pub fn icon_url(&self) -> String {
        let icon = &self.current.condition.icon;
        if icon.starts_with("//") { format!("https:{icon}") } else { icon.clone() }
    }

    /// "name, region, country"
    pub fn location_label(&self) -> String {
        format!("{}, {}, {}", self.location.name, self.location.region, self.location.country)
    }

    /// Temperature in Celsius, integral values printed without a fraction ("31°C").
    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.current.temp_c)
    }
}
