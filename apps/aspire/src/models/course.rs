use serde::{Deserialize, Serialize};

use super::{present, Document};

/// A course listing from the course catalogue dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "nameEn", default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
}

impl Document for Course {
    const OVER_FETCH_FACTOR: usize = 3;

    fn dedupe_key(&self) -> &str {
        present(&self.name).unwrap_or_default()
    }

    fn lexical_text(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_accepts_null_columns() {
        let json = r#"{
            "name": "資料結構",
            "nameEn": "Data Structures",
            "teacher": null,
            "objective": "",
            "syllabus": "https://example.edu/syllabus"
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.name.as_deref(), Some("資料結構"));
        assert_eq!(course.name_en.as_deref(), Some("Data Structures"));
        assert!(course.teacher.is_none());
        assert_eq!(course.objective.as_deref(), Some(""));
    }

    #[test]
    fn test_lexical_text_is_name_only() {
        let course = Course {
            name: Some("Machine Learning".to_string()),
            objective: Some("neural networks".to_string()),
            ..Course::default()
        };
        assert_eq!(course.lexical_text(), "Machine Learning");
        assert_eq!(course.dedupe_key(), "Machine Learning");
    }
}
