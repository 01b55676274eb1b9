use super::*;
use crate::aggregate::{linear_fit, pearson_correlation};
use crate::dataset::Dataset;
use crate::error::Error;

/// Worldwide primary energy consumption against GDP across every year, with
/// a least-squares trendline. Years missing either value are left out.
pub fn figure(dataset: &Dataset) -> Result<FigureSpec, Error> {
    let points: Vec<(f64, f64)> = dataset
        .country(WORLD)
        .filter_map(|r| Some((r.primary_energy_consumption?, r.gdp?)))
        .collect();

    let pairs = || points.iter().map(|(x, y)| (Some(*x), Some(*y)));
    let fit = linear_fit(pairs())?;
    let r = pearson_correlation(pairs());

    let x: Vec<f64> = points.iter().map(|(x, _)| *x).collect();

    let markers = ScatterTrace {
        name: "Data Points".to_string(),
        x: x.clone(),
        y: points.iter().map(|(_, y)| Some(*y)).collect(),
        mode: "markers".to_string(),
        fill: None,
        fillcolor: None,
        marker: Some(Marker {
            color: "blue".to_string(),
        }),
        line: None,
    };

    let trendline = ScatterTrace {
        name: "Trendline".to_string(),
        y: x.iter().map(|x| Some(fit.predict(*x))).collect(),
        x,
        mode: "lines".to_string(),
        fill: None,
        fillcolor: None,
        marker: None,
        line: Some(Line {
            color: "red".to_string(),
            width: 2.0,
        }),
    };

    Ok(FigureSpec {
        data: vec![Trace::Scatter(markers), Trace::Scatter(trendline)],
        layout: Layout {
            title: Title::new(headline(
                "Scatter Plot of Primary Energy Consumption compared to Gross Domestic Product (GDP)",
                &format!(
                    "With a correlation coefficient of {r:.2}, there is an almost complete correlation between GDP and Energy consumption"
                ),
            )),
            xaxis: Some(Axis::titled("Energy Consumption (TWh)")),
            yaxis: Some(Axis::titled("GDP")),
            showlegend: Some(true),
            ..Default::default()
        },
    })
}
