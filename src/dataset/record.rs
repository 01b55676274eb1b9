use serde::{Deserialize, Serialize};

/// One row of the dataset: a country (or aggregate region) in a given year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub country: String,
    pub year: i32,
    /// TWh
    pub primary_energy_consumption: Option<f64>,
    pub greenhouse_gas_emissions: Option<f64>,
    pub gdp: Option<f64>,
    /// TWh
    pub fossil_electricity: Option<f64>,
    /// TWh
    pub renewables_electricity: Option<f64>,
    /// TWh
    pub nuclear_electricity: Option<f64>,
    /// TWh
    pub other_renewable_electricity: Option<f64>,
}

impl EnergyRecord {
    /// A record with no metric values.
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
            primary_energy_consumption: None,
            greenhouse_gas_emissions: None,
            gdp: None,
            fossil_electricity: None,
            renewables_electricity: None,
            nuclear_electricity: None,
            other_renewable_electricity: None,
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::PrimaryEnergyConsumption => self.primary_energy_consumption,
            Metric::GreenhouseGasEmissions => self.greenhouse_gas_emissions,
            Metric::Gdp => self.gdp,
            Metric::FossilElectricity => self.fossil_electricity,
            Metric::RenewablesElectricity => self.renewables_electricity,
            Metric::NuclearElectricity => self.nuclear_electricity,
            Metric::OtherRenewableElectricity => self.other_renewable_electricity,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::PrimaryEnergyConsumption => &mut self.primary_energy_consumption,
            Metric::GreenhouseGasEmissions => &mut self.greenhouse_gas_emissions,
            Metric::Gdp => &mut self.gdp,
            Metric::FossilElectricity => &mut self.fossil_electricity,
            Metric::RenewablesElectricity => &mut self.renewables_electricity,
            Metric::NuclearElectricity => &mut self.nuclear_electricity,
            Metric::OtherRenewableElectricity => &mut self.other_renewable_electricity,
        };
        *slot = value;
    }
}

/// Numeric columns of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PrimaryEnergyConsumption,
    GreenhouseGasEmissions,
    Gdp,
    FossilElectricity,
    RenewablesElectricity,
    NuclearElectricity,
    OtherRenewableElectricity,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::PrimaryEnergyConsumption,
        Metric::GreenhouseGasEmissions,
        Metric::Gdp,
        Metric::FossilElectricity,
        Metric::RenewablesElectricity,
        Metric::NuclearElectricity,
        Metric::OtherRenewableElectricity,
    ];

    /// The four electricity sources, in column order.
    pub const ELECTRICITY: [Metric; 4] = [
        Metric::FossilElectricity,
        Metric::RenewablesElectricity,
        Metric::NuclearElectricity,
        Metric::OtherRenewableElectricity,
    ];

    /// Column name in the dataset file.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::PrimaryEnergyConsumption => "primary_energy_consumption",
            Metric::GreenhouseGasEmissions => "greenhouse_gas_emissions",
            Metric::Gdp => "gdp",
            Metric::FossilElectricity => "fossil_electricity",
            Metric::RenewablesElectricity => "renewables_electricity",
            Metric::NuclearElectricity => "nuclear_electricity",
            Metric::OtherRenewableElectricity => "other_renewable_electricity",
        }
    }

    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column() == name)
    }

    /// Column name with underscores replaced and each word capitalized,
    /// e.g. `Fossil Electricity`.
    pub fn title(&self) -> String {
        self.column()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}
