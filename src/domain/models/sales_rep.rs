#[cfg(test)]
#[path = "sales_rep_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DealOutcome {
    Won,
    Pending,
    Lost,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub client: String,
    pub value: f64,
    pub status: String,
}

impl Deal {
    pub fn outcome(&self) -> DealOutcome {
        match self.status.as_str() {
            "Closed Won" => return DealOutcome::Won,
            "In Progress" => return DealOutcome::Pending,
            _ => return DealOutcome::Lost,
        }
    }

    pub fn format(&self) -> String {
        return format!("{} - ${} ({})", self.client, self.value, self.status);
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default)]
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRep {
    #[serde(default)]
    pub id: serde_json::Value,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub clients: Vec<Client>,
}

impl SalesRep {
    pub fn headline(&self) -> String {
        if let Some(region) = &self.region {
            return format!("{} - {} ({region})", self.name, self.role);
        }

        return format!("{} - {}", self.name, self.role);
    }

    pub fn won_value(&self) -> f64 {
        return self
            .deals
            .iter()
            .filter(|deal| return deal.outcome() == DealOutcome::Won)
            .map(|deal| return deal.value)
            .sum();
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRepsResponse {
    #[serde(rename = "salesReps", default)]
    pub sales_reps: Vec<SalesRep>,
}
