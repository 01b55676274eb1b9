use super::*;
use crate::aggregate::{exclude_aggregate_regions, filter_by_year, top_n, EXCLUDED_REGIONS};
use crate::dataset::{Dataset, EnergyRecord, Metric};
use crate::error::Error;

/// Fixed color domain of the choropleth, in TWh.
pub const COLOR_RANGE: (f64, f64) = (0.0, 45000.0);

/// Countries (aggregate regions removed) for one year, in dataset order.
/// Point indices on the choropleth refer to positions in this list.
pub fn countries_for_year(dataset: &Dataset, year: i32) -> Vec<&EnergyRecord> {
    exclude_aggregate_regions(filter_by_year(dataset.records(), year), &EXCLUDED_REGIONS)
}

/// Choropleth of primary energy consumption per country.
pub fn figure(dataset: &Dataset, year: i32) -> Result<FigureSpec, Error> {
    let countries = countries_for_year(dataset, year);

    let top: Vec<&str> = top_n(&countries, Metric::PrimaryEnergyConsumption, 2)
        .into_iter()
        .filter(|r| r.primary_energy_consumption.is_some())
        .map(|r| r.country.as_str())
        .collect();

    let (first, second) = match top.as_slice() {
        [first, second] => (*first, *second),
        _ => {
            return Err(Error::EmptyFilterResult(format!(
                "fewer than two countries report energy consumption in {year}"
            )))
        }
    };

    let locations: Vec<String> = countries.iter().map(|r| r.country.clone()).collect();

    let trace = ChoroplethTrace {
        hovertext: locations.clone(),
        locations,
        z: countries
            .iter()
            .map(|r| r.primary_energy_consumption)
            .collect(),
        locationmode: "country names".to_string(),
        zmin: COLOR_RANGE.0,
        zmax: COLOR_RANGE.1,
        colorscale: vec![(0.0, GRAY.to_string()), (1.0, YELLOW.to_string())],
        colorbar: ColorBar {
            title: Title::new("Energy Consumption (TWh)"),
        },
        selectedpoints: None,
    };

    Ok(FigureSpec {
        data: vec![Trace::Choropleth(trace)],
        layout: Layout {
            title: Title::new(headline(
                &format!("Energy Consumption Disparities ({year})"),
                &format!(
                    "{first} and {second} have the Highest Energy Consumption in {year}"
                ),
            )),
            geo: Some(Geo {
                projection: Projection {
                    kind: "natural earth".to_string(),
                },
            }),
            ..Default::default()
        },
    })
}

/// Mark one location of the choropleth as the selected point.
pub fn select_point(figure: &mut FigureSpec, index: usize) {
    for trace in figure.data.iter_mut() {
        if let Trace::Choropleth(choropleth) = trace {
            choropleth.selectedpoints = Some(vec![index]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixture;

    fn choropleth(figure: &FigureSpec) -> &ChoroplethTrace {
        match &figure.data[0] {
            Trace::Choropleth(trace) => trace,
            other => panic!("expected choropleth, got {other:?}"),
        }
    }

    #[test]
    fn title_names_top_two_largest_first() {
        let figure = figure(&fixture::dataset(), 2019).expect("map failed");
        assert!(figure.layout.title.text.contains(
            "China and United States have the Highest Energy Consumption in 2019"
        ));
        assert!(figure
            .layout
            .title
            .text
            .starts_with("<b>Energy Consumption Disparities (2019)</b>"));
    }

    #[test]
    fn excludes_aggregates_and_keeps_order() {
        let dataset = fixture::dataset();
        let figure = figure(&dataset, 2019).expect("map failed");
        let trace = choropleth(&figure);

        assert!(!trace.locations.iter().any(|l| l == "World" || l == "Asia"));
        assert_eq!(trace.locations[0], "Brazil");
        assert_eq!(trace.locations.len(), trace.z.len());
        assert_eq!(trace.zmin, 0.0);
        assert_eq!(trace.zmax, 45000.0);
        assert!(trace.selectedpoints.is_none());

        let expected: Vec<String> = countries_for_year(&dataset, 2019)
            .iter()
            .map(|r| r.country.clone())
            .collect();
        assert_eq!(trace.locations, expected);
    }

    #[test]
    fn unknown_year_is_an_error() {
        assert!(matches!(
            figure(&fixture::dataset(), 1900),
            Err(Error::EmptyFilterResult(_))
        ));
    }

    #[test]
    fn select_point_sets_index() {
        let mut figure = figure(&fixture::dataset(), 2019).expect("map failed");
        select_point(&mut figure, 3);
        assert_eq!(choropleth(&figure).selectedpoints, Some(vec![3]));
    }
}
