//! Summary Formatter — renders ranked records into a fixed-format block for
//! prompt injection.
//!
//! Layout per entry: `"{n}. {headline}\n"` followed by `"   {label}：{value}\n"`
//! for each detail field, then a blank line. Field values are copied verbatim.
//! Missing or blank fields render a fixed placeholder. Empty input renders the
//! header followed by a fixed sentinel, so every block stays labelled.

use crate::models::{present, Course, Job};

const JOBS_HEADER: &str = "[職缺摘要]";
pub const NO_JOBS_SENTINEL: &str = "暫無相關職位信息";
const TITLE_PLACEHOLDER: &str = "職位未指定";
const SKILL_PLACEHOLDER: &str = "依面試能力決定";
const BACKGROUND_PLACEHOLDER: &str = "依實際經驗能力面議";

const COURSES_HEADER: &str = "[課程推薦]";
pub const NO_COURSES_SENTINEL: &str = "暫無相關課程信息";
const COURSE_PLACEHOLDER: &str = "N/A";

/// One field line of a summary entry.
pub struct SummaryField<'a> {
    pub label: &'static str,
    pub value: Option<&'a str>,
    pub placeholder: &'static str,
}

/// A record kind with a canonical summary layout.
pub trait SummaryFormat {
    const HEADER: &'static str;
    const EMPTY_SENTINEL: &'static str;

    /// First-line value and its placeholder.
    fn headline(&self) -> (Option<&str>, &'static str);

    /// Detail lines in fixed order.
    fn details(&self) -> Vec<SummaryField<'_>>;
}

impl SummaryFormat for Job {
    const HEADER: &'static str = JOBS_HEADER;
    const EMPTY_SENTINEL: &'static str = NO_JOBS_SENTINEL;

    fn headline(&self) -> (Option<&str>, &'static str) {
        (present(&self.title), TITLE_PLACEHOLDER)
    }

    fn details(&self) -> Vec<SummaryField<'_>> {
        vec![
            SummaryField {
                label: "技能要求",
                value: present(&self.tools),
                placeholder: SKILL_PLACEHOLDER,
            },
            SummaryField {
                label: "工作技能",
                value: present(&self.skills),
                placeholder: SKILL_PLACEHOLDER,
            },
            SummaryField {
                label: "學歷要求",
                value: present(&self.education),
                placeholder: BACKGROUND_PLACEHOLDER,
            },
            SummaryField {
                label: "工作經驗",
                value: present(&self.experience),
                placeholder: BACKGROUND_PLACEHOLDER,
            },
        ]
    }
}

impl SummaryFormat for Course {
    const HEADER: &'static str = COURSES_HEADER;
    const EMPTY_SENTINEL: &'static str = NO_COURSES_SENTINEL;

    fn headline(&self) -> (Option<&str>, &'static str) {
        (present(&self.name), COURSE_PLACEHOLDER)
    }

    fn details(&self) -> Vec<SummaryField<'_>> {
        vec![
            SummaryField {
                label: "英文名稱",
                value: present(&self.name_en),
                placeholder: COURSE_PLACEHOLDER,
            },
            SummaryField {
                label: "授課教師",
                value: present(&self.teacher),
                placeholder: COURSE_PLACEHOLDER,
            },
            SummaryField {
                label: "課程內容",
                value: present(&self.objective),
                placeholder: COURSE_PLACEHOLDER,
            },
        ]
    }
}

/// Renders `records` in order, numbered from 1.
pub fn format_summary<T: SummaryFormat>(records: &[&T]) -> String {
    let mut summary = format!("{}\n\n", T::HEADER);
    if records.is_empty() {
        summary.push_str(T::EMPTY_SENTINEL);
        return summary;
    }

    for (i, record) in records.iter().enumerate() {
        let (headline, placeholder) = record.headline();
        summary.push_str(&format!(
            "{}. {}\n",
            i + 1,
            headline.unwrap_or(placeholder)
        ));
        for field in record.details() {
            summary.push_str(&format!(
                "   {}：{}\n",
                field.label,
                field.value.unwrap_or(field.placeholder)
            ));
        }
        summary.push('\n');
    }
    summary
}
