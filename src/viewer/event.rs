use crate::interaction::{SelectionEvent, SelectionState, Trigger};

use serde::Deserialize;

/// A UI event as posted by the page: the dropdown value, the last click on
/// each chart, and the id of the control that fired.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    pub year: Option<i32>,
    pub map_click: Option<ClickData>,
    pub bar_click: Option<ClickData>,
    pub triggered: Option<String>,
}

/// Plotly `clickData`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClickData {
    pub points: Vec<ClickPoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClickPoint {
    /// Set on choropleth clicks.
    pub location: Option<String>,
    /// Category of a clicked bar.
    pub x: Option<String>,
}

fn trigger(id: &str) -> Trigger {
    // accept both "map-graph" and "map-graph.clickData"
    match id.split('.').next().unwrap_or_default() {
        "year-dropdown" => Trigger::YearChanged,
        "map-graph" => Trigger::MapClicked,
        "bar-graph" => Trigger::BarClicked,
        _ => Trigger::Other,
    }
}

impl RawEvent {
    pub fn into_selection(self, default_year: i32) -> SelectionEvent {
        let first = |click: Option<ClickData>| click.and_then(|c| c.points.into_iter().next());

        SelectionEvent {
            state: SelectionState {
                selected_year: self.year.unwrap_or(default_year),
                selected_country_from_map: first(self.map_click).and_then(|p| p.location),
                selected_country_from_bar: first(self.bar_click).and_then(|p| p.x),
            },
            trigger: self.triggered.as_deref().map(trigger).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> SelectionEvent {
        serde_json::from_str::<RawEvent>(json)
            .expect("failed to parse event")
            .into_selection(2019)
    }

    #[test]
    fn empty_event_defaults() {
        let event = decode("{}");
        assert_eq!(event.trigger, Trigger::Other);
        assert_eq!(event.state, SelectionState::year(2019));
    }

    #[test]
    fn year_dropdown() {
        let event = decode(r#"{"year": 2005, "triggered": "year-dropdown"}"#);
        assert_eq!(event, SelectionEvent::year_changed(2005));
    }

    #[test]
    fn map_click_reads_location() {
        let event = decode(
            r#"{
                "year": 2019,
                "triggered": "map-graph.clickData",
                "map_click": {"points": [{"location": "India", "pointIndex": 3, "z": 9500}]}
            }"#,
        );
        assert_eq!(event, SelectionEvent::map_clicked(2019, "India"));
    }

    #[test]
    fn bar_click_reads_category() {
        let event = decode(
            r#"{
                "triggered": "bar-graph",
                "bar_click": {"points": [{"x": "China", "y": 12000, "curveNumber": 0}]}
            }"#,
        );
        assert_eq!(event, SelectionEvent::bar_clicked(2019, "China"));
    }

    #[test]
    fn stale_clicks_are_kept_but_trigger_decides() {
        let event = decode(
            r#"{
                "year": 2018,
                "triggered": "year-dropdown",
                "map_click": {"points": [{"location": "Japan"}]},
                "bar_click": {"points": [{"x": "Iran"}]}
            }"#,
        );
        assert_eq!(event.trigger, Trigger::YearChanged);
        assert_eq!(event.state.selected_country_from_map.as_deref(), Some("Japan"));
        assert_eq!(event.state.selected_country_from_bar.as_deref(), Some("Iran"));
    }

    #[test]
    fn click_without_points() {
        let event = decode(r#"{"triggered": "map-graph", "map_click": {"points": []}}"#);
        assert_eq!(event.trigger, Trigger::MapClicked);
        assert!(event.state.selected_country_from_map.is_none());
    }

    #[test]
    fn unknown_control() {
        assert_eq!(decode(r#"{"triggered": "scatter"}"#).trigger, Trigger::Other);
    }
}
