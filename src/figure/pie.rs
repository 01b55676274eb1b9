use super::*;
use crate::aggregate::percentage_shares;
use crate::dataset::{Dataset, Metric};
use crate::error::Error;

const SLICES: [(&str, Metric); 4] = [
    ("Fossil", Metric::FossilElectricity),
    ("Renewables", Metric::RenewablesElectricity),
    ("Nuclear", Metric::NuclearElectricity),
    ("Other Renewable", Metric::OtherRenewableElectricity),
];

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Share of worldwide electricity generation by source for one year.
pub fn figure(dataset: &Dataset, year: i32) -> Result<FigureSpec, Error> {
    let world = dataset
        .country(WORLD)
        .find(|r| r.year == year)
        .ok_or_else(|| Error::EmptyFilterResult(format!("no {WORLD} row for {year}")))?;

    // missing sources propagate as NaN, the same as an all-zero total
    let amounts: Vec<(&str, f64)> = SLICES
        .iter()
        .map(|(label, metric)| (*label, world.get(*metric).unwrap_or(f64::NAN)))
        .collect();
    let shares = percentage_shares(&amounts);

    let share = |label: &str| {
        shares
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, p)| *p)
            .unwrap_or(f64::NAN)
    };

    let fossil = round1(share("Fossil"));
    let renewable = round1(share("Renewables")) + round1(share("Other Renewable"));

    let trace = PieTrace {
        labels: shares.iter().map(|(label, _)| label.to_string()).collect(),
        values: shares.iter().map(|(_, p)| *p).collect(),
        marker: PieMarker {
            colors: SLICES
                .iter()
                .map(|(_, metric)| area::source_color(*metric).to_string())
                .collect(),
        },
        hovertemplate: "%{label}<br><extra></extra>".to_string(),
    };

    Ok(FigureSpec {
        data: vec![Trace::Pie(trace)],
        layout: Layout {
            // the subtitle span is left open, as the page has always rendered it
            title: Title::new(format!(
                "<b>Share of World Electricity Sources</b><br><span style='font-size: 12px'>In {year}, {fossil:.1}% of the Worlds Energy Supply comes from Fossil Fuels and {renewable:.1}% is Renewable"
            ))
            .with_size(TITLE_FONT_SIZE),
            autosize: Some(false),
            width: Some(600),
            height: Some(600),
            margin: Some(Margin {
                l: 0,
                r: 150,
                b: 150,
                t: 150,
            }),
            ..Default::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixture;
    use crate::dataset::EnergyRecord;

    fn pie(figure: &FigureSpec) -> &PieTrace {
        match &figure.data[0] {
            Trace::Pie(pie) => pie,
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn shares_and_title() {
        let figure = figure(&fixture::dataset(), 2019).expect("pie failed");
        let pie = pie(&figure);

        assert_eq!(pie.labels, vec!["Fossil", "Renewables", "Nuclear", "Other Renewable"]);
        let total: f64 = pie.values.iter().sum();
        assert!((total - 100.0).abs() < 1e-6);

        // 16500 / 26900 = 61.338..%, 7000 / 26900 = 26.022..%, 700 / 26900 = 2.602..%
        assert!(figure.layout.title.text.contains(
            "In 2019, 61.3% of the Worlds Energy Supply comes from Fossil Fuels and 28.6% is Renewable"
        ));
        assert_eq!(pie.marker.colors[0], FOSSIL);
    }

    #[test]
    fn missing_world_row() {
        assert!(matches!(
            figure(&fixture::dataset(), 1900),
            Err(Error::EmptyFilterResult(_))
        ));
    }

    #[test]
    fn zero_generation_propagates_nan() {
        let mut world = EnergyRecord::new("World", 2000);
        for metric in Metric::ELECTRICITY {
            world.set(metric, Some(0.0));
        }
        let dataset = Dataset::from_records(vec![world]);

        let figure = figure(&dataset, 2000).expect("pie failed");
        assert!(pie(&figure).values.iter().all(|v| v.is_nan()));
        assert!(figure.layout.title.text.contains("NaN% of the Worlds"));
    }
}
