//! Seed files - The opening state of a campaign
//!
//! ```json
//! { "houses": [ { "name": "Atreides", "planetaryFief": "Caladan",
//!                 "spice": 500, "solaris": 1000,
//!                 "income": 100, "expenses": 50 } ] }
//! ```

use std::path::Path;

use landsraad_domain::model::house::{EconomyState, House, NewHouse};
use landsraad_domain::repository::error::RepositoryError;
use landsraad_domain::repository::house_repository::HouseRepository;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSeed {
    pub name: String,
    pub planetary_fief: String,
    #[serde(default)]
    pub spice: f64,
    #[serde(default)]
    pub solaris: f64,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub political_standing: i32,
}

impl HouseSeed {
    fn to_new_house(&self) -> NewHouse {
        NewHouse {
            name: self.name.clone(),
            planetary_fief: self.planetary_fief.clone(),
            economy: EconomyState::new(self.spice, self.solaris, self.income, self.expenses),
            political_standing: self.political_standing,
        }
    }

    fn has_negative_ledger(&self) -> bool {
        [self.spice, self.solaris, self.income, self.expenses]
            .iter()
            .any(|v| *v < 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerSeed {
    pub houses: Vec<HouseSeed>,
}

impl LedgerSeed {
    /// Load a seed from a JSON or YAML file
    pub fn from_file(path: &Path) -> shared::Result<Self> {
        let seed: Self = shared::load_structured(path)?;
        if let Some(bad) = seed.houses.iter().find(|h| h.has_negative_ledger()) {
            return Err(shared::LandsraadError::Config(format!(
                "House '{}' starts with a negative ledger",
                bad.name
            )));
        }
        Ok(seed)
    }

    /// Create every seeded house in `repo`, in file order
    pub fn plant<R: HouseRepository>(&self, repo: &mut R) -> Result<Vec<House>, RepositoryError> {
        self.houses
            .iter()
            .map(|seed| repo.create(seed.to_new_house()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::in_memory::InMemoryHouseRepository;
    use std::io::Write;

    #[test]
    fn test_plant_from_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "houses": [
                {{ "name": "Atreides", "planetaryFief": "Caladan", "spice": 500, "solaris": 1000, "income": 100, "expenses": 50 }},
                {{ "name": "Harkonnen", "planetaryFief": "Giedi Prime", "spice": 800 }}
            ] }}"#
        )
        .unwrap();

        let seed = LedgerSeed::from_file(file.path()).unwrap();
        let mut repo = InMemoryHouseRepository::new();
        let houses = seed.plant(&mut repo).unwrap();

        assert_eq!(houses.len(), 2);
        assert_eq!(houses[0].economy.net_income(), 50.0);
        assert_eq!(houses[1].economy.solari_balance, 0.0);
        assert_eq!(repo.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_negative_ledger() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "houses:\n  - name: Moritani\n    planetaryFief: Grumman\n    solaris: -5"
        )
        .unwrap();

        assert!(LedgerSeed::from_file(file.path()).is_err());
    }
}
