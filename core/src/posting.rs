use crate::skills::parse_skills;
use serde::{Deserialize, Serialize};

/// One job listing. Field names on the wire follow the dataset columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(rename = "job_id")]
    pub id: String,
    #[serde(rename = "job_title")]
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// Raw delimited skills field, e.g. `"Python, SQL; Communication"`.
    pub skills: String,
}

impl Posting {
    /// Non-empty text fields joined by a space, in title/company/location/description/skills order.
    pub fn full_text(&self) -> String {
        [&self.title, &self.company, &self.location, &self.description, &self.skills]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn skill_list(&self) -> Vec<String> { parse_skills(&self.skills) }
}
