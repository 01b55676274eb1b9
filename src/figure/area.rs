use super::*;
use crate::dataset::{Dataset, Metric};

/// First year shown on the area chart.
pub const START_YEAR: i32 = 1985;

/// Fill color for each electricity source.
pub fn source_color(metric: Metric) -> &'static str {
    match metric {
        Metric::FossilElectricity => FOSSIL,
        Metric::RenewablesElectricity => RENEWABLES,
        Metric::NuclearElectricity => NUCLEAR,
        Metric::OtherRenewableElectricity => OTHER_RENEWABLE,
        _ => GRAY,
    }
}

/// Worldwide electricity generation by source since `START_YEAR`. The chart
/// does not depend on the selected year.
pub fn figure(dataset: &Dataset) -> FigureSpec {
    let world: Vec<_> = dataset
        .country(WORLD)
        .filter(|r| r.year >= START_YEAR)
        .collect();

    let years: Vec<f64> = world.iter().map(|r| r.year as f64).collect();

    let data = Metric::ELECTRICITY
        .iter()
        .map(|metric| {
            Trace::Scatter(ScatterTrace {
                name: metric.title(),
                x: years.clone(),
                y: world.iter().map(|r| r.get(*metric)).collect(),
                mode: "none".to_string(),
                fill: Some("tozeroy".to_string()),
                fillcolor: Some(source_color(*metric).to_string()),
                marker: None,
                line: None,
            })
        })
        .collect();

    FigureSpec {
        data,
        layout: Layout {
            title: Title::new(headline(
                "World Electricity Generation and Sources",
                "Increase of Energy Consumption and its Sources in terawatt-hours from 1985 to 2022. Fossil Electricity leading Energy Source",
            ))
            .with_size(TITLE_FONT_SIZE),
            xaxis: Some(Axis::titled("Year")),
            yaxis: Some(Axis::titled("Electricity Generation (TWh)")),
            ..Default::default()
        },
    }
}
