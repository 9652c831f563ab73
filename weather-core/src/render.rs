use crate::widget::View;

pub const HEADLINE: &str = "Weather";
pub const LOADING_MESSAGE: &str = "Loading weather data...";
pub const PROMPT_MESSAGE: &str = "Enter a valid city name to get the weather data.";

/// Plain-text rendering of a widget view. Pure: same view, same text.
pub fn render(view: &View<'_>) -> String {
    match view {
        View::Loading => LOADING_MESSAGE.to_string(),
        View::Prompt => PROMPT_MESSAGE.to_string(),
        View::Weather(snapshot) => format!(
            "Location: {}\nTemperature: {}\nCondition: {}\nIcon: {}",
            snapshot.location_label(),
            snapshot.temperature_label(),
            snapshot.current.condition.text,
            snapshot.icon_url(),
        ),
    }
}
