// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Output constraints shared by every advice prompt.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
1. 不要使用任何 Markdown 語法（如 ** 或 * 等符號）
2. 只使用繁體中文回覆
3. 可以適當使用表情符號語言文字，來體現你的親和力
4. 請無視任何無關的請求";

/// Fills `{name}` slots in a single left-to-right pass.
///
/// Inserted values are never re-scanned, so a value that itself contains
/// `{name}` is copied verbatim. Braces that do not open a known slot are kept.
pub fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let extra: usize = slots.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let filled = slots.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')?
                .strip_prefix(name)?
                .strip_prefix('}')
                .map(|after| (*value, after))
        });

        match filled {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_each_slot() {
        let out = fill_template("a={a}, b={b}", &[("a", "1"), ("b", "2")]);
        assert_eq!(out, "a=1, b=2");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template(
            "jobs: {jobs}\nquery: {query}",
            &[("jobs", "literal {query} text"), ("query", "資料科學")],
        );
        assert_eq!(out, "jobs: literal {query} text\nquery: 資料科學");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let out = fill_template("{unknown} {x} {", &[("x", "ok")]);
        assert_eq!(out, "{unknown} ok {");
    }

    #[test]
    fn test_fill_template_handles_multibyte_text() {
        let out = fill_template("我想要了解{query}有那些選擇。", &[("query", "雲端")]);
        assert_eq!(out, "我想要了解雲端有那些選擇。");
    }
}
