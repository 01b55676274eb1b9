use super::*;
use crate::aggregate::top_n;
use crate::dataset::{Dataset, Metric};
use crate::error::Error;

/// Number of bars shown.
pub const TOP_COUNT: usize = 10;

/// Bars drawn in the accent color.
pub const HIGHLIGHT_COUNT: usize = 3;

/// Top emitters for the year, one bar trace per country so every country
/// gets its own legend entry and color.
pub fn figure(dataset: &Dataset, year: i32) -> Result<FigureSpec, Error> {
    let countries = map::countries_for_year(dataset, year);
    let top = top_n(&countries, Metric::GreenhouseGasEmissions, TOP_COUNT);

    let leaders: Vec<&str> = top
        .iter()
        .take(HIGHLIGHT_COUNT)
        .map(|r| r.country.as_str())
        .collect();
    if leaders.len() < HIGHLIGHT_COUNT {
        return Err(Error::EmptyFilterResult(format!(
            "fewer than {HIGHLIGHT_COUNT} countries in {year}"
        )));
    }

    let data = top
        .iter()
        .enumerate()
        .map(|(rank, record)| {
            Trace::Bar(BarTrace {
                name: record.country.clone(),
                x: vec![record.country.clone()],
                y: vec![record.greenhouse_gas_emissions],
                marker: Marker {
                    color: if rank < HIGHLIGHT_COUNT { OLIVE } else { GRAY }.to_string(),
                },
                text: None,
                textposition: None,
            })
        })
        .collect();

    Ok(FigureSpec {
        data,
        layout: Layout {
            title: Title::new(headline(
                &format!(
                    "Top 10 Countries with the Highest Greenhouse Gas Emissions ({year})"
                ),
                &format!(
                    "{} are the Top 3 countries with the Highest C02 Emissions",
                    leaders.join(", ")
                ),
            ))
            .with_size(TITLE_FONT_SIZE),
            xaxis: Some(Axis::titled("country")),
            yaxis: Some(Axis::titled("Greenhouse Gas Emissions (Metric tons CO2)")),
            showlegend: Some(true),
            ..Default::default()
        },
    })
}

/// Paint the bar for `country` red and every other bar gray.
pub fn highlight_country(figure: &mut FigureSpec, country: &str) {
    for trace in figure.data.iter_mut() {
        if let Trace::Bar(bar) = trace {
            let selected = bar.x.iter().any(|x| x == country);
            bar.marker.color = if selected { RED } else { GRAY }.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixture;

    fn bars(figure: &FigureSpec) -> Vec<&BarTrace> {
        figure
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Bar(bar) => bar,
                other => panic!("expected bar, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn top_ten_descending_with_three_accented() {
        let figure = figure(&fixture::dataset(), 2019).expect("bar failed");
        let bars = bars(&figure);

        assert_eq!(bars.len(), TOP_COUNT);
        assert_eq!(bars[0].name, "China");
        assert_eq!(bars[1].name, "United States");
        assert_eq!(bars[2].name, "India");
        for pair in bars.windows(2) {
            assert!(pair[0].y[0] >= pair[1].y[0]);
        }

        let colors: Vec<&str> = bars.iter().map(|b| b.marker.color.as_str()).collect();
        assert_eq!(&colors[..3], &[OLIVE; 3]);
        assert!(colors[3..].iter().all(|c| *c == GRAY));

        assert!(!bars.iter().any(|b| b.name == "World" || b.name == "USSR"));
    }

    #[test]
    fn title_names_top_three() {
        let figure = figure(&fixture::dataset(), 2019).expect("bar failed");
        assert!(figure.layout.title.text.contains(
            "China, United States, India are the Top 3 countries with the Highest C02 Emissions"
        ));
        assert_eq!(figure.layout.title.font, Some(Font { size: 18 }));
    }

    #[test]
    fn highlight_paints_one_bar_red() {
        let mut figure = figure(&fixture::dataset(), 2019).expect("bar failed");
        highlight_country(&mut figure, "India");

        for bar in bars(&figure) {
            let expected = if bar.name == "India" { RED } else { GRAY };
            assert_eq!(bar.marker.color, expected, "bar {}", bar.name);
        }
    }

    #[test]
    fn highlight_unknown_country_grays_everything() {
        let mut figure = figure(&fixture::dataset(), 2019).expect("bar failed");
        highlight_country(&mut figure, "Atlantis");
        assert!(bars(&figure).iter().all(|b| b.marker.color == GRAY));
    }
}
