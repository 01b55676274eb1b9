use super::*;
use crate::aggregate::{filter_by_year, group_sums, normalized_group_shares};
use crate::dataset::{Dataset, EnergyRecord, Metric};
use crate::error::Error;

use std::collections::BTreeMap;

pub const CONTINENTS: [&str; 6] = [
    "Asia",
    "Europe",
    "North America",
    "South America",
    "Africa",
    "Australia",
];

/// Stacking order, bottom to top.
const STACK: [(Metric, &str, &str); 4] = [
    (Metric::FossilElectricity, "Fossil Electricity", GRAY),
    (Metric::NuclearElectricity, "Nuclear Electricity", GRAY),
    (Metric::RenewablesElectricity, "Renewable Electricity", RENEWABLES),
    (
        Metric::OtherRenewableElectricity,
        "Other Renewable Electricity",
        OTHER_RENEWABLE,
    ),
];

fn continent(record: &EnergyRecord) -> &str {
    &record.country
}

fn renewable_share(shares: &BTreeMap<Metric, f64>) -> f64 {
    let share = |metric| shares.get(&metric).copied().unwrap_or(f64::NAN);
    share(Metric::RenewablesElectricity) + share(Metric::OtherRenewableElectricity)
}

/// Stacked, proportional bars of each continent's electricity mix, continents
/// ordered by primary energy consumption.
pub fn figure(dataset: &Dataset, year: i32) -> Result<FigureSpec, Error> {
    let rows: Vec<_> = filter_by_year(dataset.records(), year)
        .into_iter()
        .filter(|r| CONTINENTS.contains(&r.country.as_str()))
        .collect();

    let shares = normalized_group_shares(rows.iter().copied(), continent, &Metric::ELECTRICITY);
    let energy = group_sums(rows.iter().copied(), continent, Metric::PrimaryEnergyConsumption);

    let mut continents: Vec<(&String, &BTreeMap<Metric, f64>)> = shares.iter().collect();
    continents.sort_by(|a, b| {
        let ea = energy.get(a.0).copied().unwrap_or(0.0);
        let eb = energy.get(b.0).copied().unwrap_or(0.0);
        eb.total_cmp(&ea)
    });

    let mut leader: Option<(&str, f64)> = None;
    for (name, shares) in &continents {
        let share = renewable_share(shares);
        if share.is_finite() && leader.map_or(true, |(_, best)| share > best) {
            leader = Some((name.as_str(), share));
        }
    }
    let (leader, leader_share) = leader.ok_or_else(|| {
        Error::EmptyFilterResult(format!("no continent electricity data for {year}"))
    })?;

    let names: Vec<String> = continents.iter().map(|(c, _)| c.to_string()).collect();

    let data = STACK
        .iter()
        .map(|(metric, name, color)| {
            let text = (*metric == Metric::RenewablesElectricity).then(|| {
                continents
                    .iter()
                    .map(|(_, shares)| format!("{:.2}%", renewable_share(shares) * 100.0))
                    .collect()
            });

            Trace::Bar(BarTrace {
                name: name.to_string(),
                x: names.clone(),
                y: continents
                    .iter()
                    .map(|(_, shares)| shares.get(metric).copied())
                    .collect(),
                marker: Marker {
                    color: color.to_string(),
                },
                text,
                textposition: Some("inside".to_string()),
            })
        })
        .collect();

    Ok(FigureSpec {
        data,
        layout: Layout {
            title: Title::new(headline(
                &format!(
                    "Share of Electricity Sources by Continent in {year} sorted by Energy Consumption"
                ),
                &format!(
                    "{leader} has the highest share of Renewable Energy in {year} with {:.2}%",
                    leader_share * 100.0
                ),
            )),
            xaxis: Some(Axis::titled("Country")),
            yaxis: Some(Axis::titled("Proportion of Electricity Source")),
            barmode: Some("stack".to_string()),
            showlegend: Some(true),
            ..Default::default()
        },
    })
}
