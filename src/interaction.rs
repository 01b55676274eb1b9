//! Recomputes every figure for a UI event and applies the cross-chart
//! highlight for whichever control fired.

use crate::dataset::Dataset;
use crate::error::Error;
use crate::figure::{self, FigureSpec};

use ringlog::*;
use serde::{Serialize, Serializer};

/// Which control produced the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trigger {
    YearChanged,
    MapClicked,
    BarClicked,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_year: i32,
    pub selected_country_from_map: Option<String>,
    pub selected_country_from_bar: Option<String>,
}

impl SelectionState {
    pub fn year(selected_year: i32) -> Self {
        Self {
            selected_year,
            selected_country_from_map: None,
            selected_country_from_bar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub state: SelectionState,
    pub trigger: Trigger,
}

impl SelectionEvent {
    pub fn year_changed(year: i32) -> Self {
        Self {
            state: SelectionState::year(year),
            trigger: Trigger::YearChanged,
        }
    }

    pub fn map_clicked(year: i32, country: impl Into<String>) -> Self {
        let mut state = SelectionState::year(year);
        state.selected_country_from_map = Some(country.into());
        Self {
            state,
            trigger: Trigger::MapClicked,
        }
    }

    pub fn bar_clicked(year: i32, country: impl Into<String>) -> Self {
        let mut state = SelectionState::year(year);
        state.selected_country_from_bar = Some(country.into());
        Self {
            state,
            trigger: Trigger::BarClicked,
        }
    }
}

/// The six dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Figures {
    pub map: FigureSpec,
    pub bar: FigureSpec,
    pub area: FigureSpec,
    pub pie: FigureSpec,
    pub scatter: FigureSpec,
    pub grouped_bar: FigureSpec,
}

impl Serialize for Figures {
    /// Serialized as an array, in the order the page binds them to its
    /// graph elements.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq([
            &self.map,
            &self.bar,
            &self.area,
            &self.pie,
            &self.scatter,
            &self.grouped_bar,
        ])
    }
}

/// Build all six figures for `event`. Only the map and the bar chart ever
/// carry highlight state.
pub fn compute_all_figures(dataset: &Dataset, event: &SelectionEvent) -> Result<Figures, Error> {
    let year = event.state.selected_year;

    let mut map = figure::map::figure(dataset, year)?;
    let mut bar = figure::bar::figure(dataset, year)?;

    match event.trigger {
        Trigger::MapClicked => {
            if let Some(country) = &event.state.selected_country_from_map {
                debug!("highlighting {country} on the emissions chart");
                figure::bar::highlight_country(&mut bar, country);
            }
        }
        Trigger::BarClicked => {
            if let Some(country) = &event.state.selected_country_from_bar {
                let index = figure::map::countries_for_year(dataset, year)
                    .iter()
                    .position(|r| &r.country == country)
                    .ok_or_else(|| Error::InvalidClickTarget(country.clone()))?;
                debug!("selecting {country} (point {index}) on the map");
                figure::map::select_point(&mut map, index);
            }
        }
        Trigger::YearChanged | Trigger::Other => {}
    }

    Ok(Figures {
        map,
        bar,
        area: figure::area::figure(dataset),
        pie: figure::pie::figure(dataset, year)?,
        scatter: figure::scatter::figure(dataset)?,
        grouped_bar: figure::grouped::figure(dataset, year)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixture;
    use crate::figure::{Trace, GRAY, OLIVE, RED};

    fn bar_colors(figures: &Figures) -> Vec<(String, String)> {
        figures
            .bar
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Bar(bar) => (bar.name.clone(), bar.marker.color.clone()),
                other => panic!("expected bar, got {other:?}"),
            })
            .collect()
    }

    fn selected_points(figures: &Figures) -> Option<Vec<usize>> {
        match &figures.map.data[0] {
            Trace::Choropleth(map) => map.selectedpoints.clone(),
            other => panic!("expected choropleth, got {other:?}"),
        }
    }

    #[test]
    fn year_change_has_no_highlight() {
        let figures = compute_all_figures(&fixture::dataset(), &SelectionEvent::year_changed(2019))
            .expect("figures failed");

        assert!(selected_points(&figures).is_none());
        let colors = bar_colors(&figures);
        assert!(colors[..3].iter().all(|(_, c)| c == OLIVE));
        assert!(colors[3..].iter().all(|(_, c)| c == GRAY));
    }

    #[test]
    fn map_click_highlights_bar() {
        let event = SelectionEvent::map_clicked(2019, "Russia");
        let figures = compute_all_figures(&fixture::dataset(), &event).expect("figures failed");

        for (country, color) in bar_colors(&figures) {
            let expected = if country == "Russia" { RED } else { GRAY };
            assert_eq!(color, expected, "bar {country}");
        }
        assert!(selected_points(&figures).is_none());
    }

    #[test]
    fn bar_click_selects_map_point() {
        let dataset = fixture::dataset();
        let event = SelectionEvent::bar_clicked(2019, "India");
        let figures = compute_all_figures(&dataset, &event).expect("figures failed");

        let index = figure::map::countries_for_year(&dataset, 2019)
            .iter()
            .position(|r| r.country == "India")
            .expect("India in the map rows");
        assert_eq!(index, 3);
        assert_eq!(selected_points(&figures), Some(vec![index]));

        // bar colors are left alone
        assert_eq!(bar_colors(&figures)[0].1, OLIVE);
    }

    #[test]
    fn bar_click_outside_map_rows() {
        let event = SelectionEvent::bar_clicked(2019, "World");
        assert!(matches!(
            compute_all_figures(&fixture::dataset(), &event),
            Err(Error::InvalidClickTarget(country)) if country == "World"
        ));
    }

    #[test]
    fn click_trigger_without_data_is_plain() {
        let event = SelectionEvent {
            state: SelectionState::year(2019),
            trigger: Trigger::MapClicked,
        };
        let dataset = fixture::dataset();
        let clicked = compute_all_figures(&dataset, &event).expect("figures failed");
        let plain = compute_all_figures(&dataset, &SelectionEvent::year_changed(2019))
            .expect("figures failed");
        assert_eq!(clicked, plain);
    }

    #[test]
    fn serialized_in_page_order() {
        let figures = compute_all_figures(&fixture::dataset(), &SelectionEvent::year_changed(2019))
            .expect("figures failed");
        let value = serde_json::to_value(&figures).expect("serialize failed");
        let array = value.as_array().expect("array");

        assert_eq!(array.len(), 6);
        assert_eq!(array[0]["data"][0]["type"], "choropleth");
        assert_eq!(array[1]["data"][0]["type"], "bar");
        assert_eq!(array[2]["data"][0]["fill"], "tozeroy");
        assert_eq!(array[3]["data"][0]["type"], "pie");
        assert_eq!(array[4]["data"][1]["name"], "Trendline");
        assert_eq!(array[5]["layout"]["barmode"], "stack");
    }

    #[test]
    fn identical_events_identical_output() {
        let dataset = fixture::dataset();
        for event in [
            SelectionEvent::year_changed(2018),
            SelectionEvent::map_clicked(2020, "China"),
            SelectionEvent::bar_clicked(2019, "Japan"),
        ] {
            let first = serde_json::to_string(&compute_all_figures(&dataset, &event).expect("figures failed"))
                .expect("serialize failed");
            let second = serde_json::to_string(&compute_all_figures(&dataset, &event).expect("figures failed"))
                .expect("serialize failed");
            assert_eq!(first, second);
        }
    }
}
