use serde::{Deserialize, Serialize};

use super::{present, Document};

/// A job posting from the jobs dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "職位", default)]
    pub title: Option<String>,
    #[serde(rename = "擅長工具", default)]
    pub tools: Option<String>,
    #[serde(rename = "工作技能", default)]
    pub skills: Option<String>,
    #[serde(rename = "學歷要求", default)]
    pub education: Option<String>,
    #[serde(rename = "工作經歷", default)]
    pub experience: Option<String>,
}

impl Document for Job {
    const OVER_FETCH_FACTOR: usize = 10;

    fn dedupe_key(&self) -> &str {
        present(&self.title).unwrap_or_default()
    }

    /// Title, tools and skills joined by a single space.
    fn lexical_text(&self) -> String {
        [&self.title, &self.tools, &self.skills]
            .iter()
            .map(|f| f.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
