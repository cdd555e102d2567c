// Prompt constants for the Advice module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{fill_template, PLAIN_TEXT_INSTRUCTION};

/// System context for advice generation. Replace `{rules}`, `{query}`,
/// `{jobs_summary}` and `{courses_summary}` via [`system_prompt`].
const ADVICE_SYSTEM_TEMPLATE: &str = "\
你是一位資深的職涯顧問，擅長分析產業趨勢和職涯規劃。
你擅長使用年輕人的語調去構築你的語句，善加利用表情符號語言文字，來體現你的親和力。
你也擅長使用古典的名言佳句來增強自己的說服力道。
分析職涯規劃之餘，你也會提供一些實用的人生歷練。
請根據以下資訊，為學生提供專業建議。

請注意：
{rules}

學生想了解的方向：{query}

請依照以下格式提供建議:

[產業現況分析]
請分析目前產業概況、發展趨勢和市場需求

[職涯發展路徑]
列出3-4個具體的職位發展方向,並說明:
- 職位名稱
- 工作內容
- 所需技能
- 發展前景

[技能培養規劃]
根據上述職缺要求,具體說明:
- 必備的核心技能
- 建議的學習順序
- 如何透過課程培養這些技能

[實務建議]
提供一篇長文:
- 真心的建議
- 實際的經驗分享

參考資料(RAG data)：

{jobs_summary}

{courses_summary}
";

/// User turn sent alongside the system context.
const USER_TURN_TEMPLATE: &str = "有關於學校課程/未來職缺，我想要了解{query}有那些選擇。";

/// Builds the system context. Each slot is filled exactly once and inserted
/// text is never re-scanned.
pub fn system_prompt(query: &str, jobs_summary: &str, courses_summary: &str) -> String {
    fill_template(
        ADVICE_SYSTEM_TEMPLATE,
        &[
            ("rules", PLAIN_TEXT_INSTRUCTION),
            ("query", query),
            ("jobs_summary", jobs_summary),
            ("courses_summary", courses_summary),
        ],
    )
}

pub fn user_turn(query: &str) -> String {
    fill_template(USER_TURN_TEMPLATE, &[("query", query)])
}
