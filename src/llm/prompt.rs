use crate::question::{Question, QuestionOption, QuestionType};

pub const SYSTEM_PROMPT: &str = "你是一个专业的答题助手，只回答选项字母，不做任何解释。";

const SINGLE_CHOICE_INSTRUCTION: &str =
    "这是一道单选题，请选择一个最合适的选项。只需回答选项字母，如'A'。";

// Wrong or extra picks score zero while a partial pick scores half, so the
// model is told to prefer the two most likely options over a risky third.
const MULTIPLE_CHOICE_INSTRUCTION: &str = "这是一道多选题，请选择所有正确的选项（至少两个）。只需回答选项字母，如'A,C,D'。至少有两个选项是正确的，并且宁可少选（如只选最有可能的两项）也不要多选错误选项（如选了三项但有一项是错误的），因为错选或者多选不给分，少选却有一半的分数。";

const POLL_INSTRUCTION: &str =
    "这是一道投票题，类似单选题，请选择一个最合适的选项。只需回答选项字母，如'A'。";

const FALLBACK_INSTRUCTION: &str = "请分析这个问题，并选择正确的选项。只需回答选项字母。";

const ANSWER_FORMAT_REMINDER: &str =
    "请直接回答选项字母，不要有任何解释或其他文字。例如：A 或 A,B,C";

pub fn instruction_for(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::SingleChoice => SINGLE_CHOICE_INSTRUCTION,
        QuestionType::MultipleChoice => MULTIPLE_CHOICE_INSTRUCTION,
        QuestionType::Poll => POLL_INSTRUCTION,
        QuestionType::Other(_) => FALLBACK_INSTRUCTION,
    }
}

/// One `key: value` line per option, in question order.
pub fn render_options(options: &[QuestionOption]) -> String {
    options
        .iter()
        .map(|option| format!("{}: {}\n", option.key, option.value))
        .collect()
}

pub fn build_user_prompt(question: &Question) -> String {
    format!(
        "请回答以下题目，{instruction}\n\n\
         题目：{body}\n\n\
         选项：\n\
         {options}\n\
         {ANSWER_FORMAT_REMINDER}",
        instruction = instruction_for(question.kind),
        body = question.body,
        options = render_options(&question.options),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: QuestionType) -> Question {
        Question::new(
            kind,
            "2 + 2 = ?",
            vec![
                QuestionOption::new("A", "3"),
                QuestionOption::new("B", "4"),
            ],
        )
    }

    #[test]
    fn test_render_options() {
        let question = sample(QuestionType::SingleChoice);
        assert_eq!(render_options(&question.options), "A: 3\nB: 4\n");
        assert_eq!(render_options(&[]), "");
    }

    #[test]
    fn test_user_prompt_layout() {
        let prompt = build_user_prompt(&sample(QuestionType::SingleChoice));
        assert_eq!(
            prompt,
            "请回答以下题目，这是一道单选题，请选择一个最合适的选项。只需回答选项字母，如'A'。\n\n\
             题目：2 + 2 = ?\n\n\
             选项：\n\
             A: 3\n\
             B: 4\n\
             \n\
             请直接回答选项字母，不要有任何解释或其他文字。例如：A 或 A,B,C"
        );
    }

    #[test]
    fn instruction_follows_question_type() {
        let multiple = build_user_prompt(&sample(QuestionType::MultipleChoice));
        assert!(multiple.contains("多选题"));
        assert!(multiple.contains("至少两个"));

        let poll = build_user_prompt(&sample(QuestionType::Poll));
        assert!(poll.contains("投票题"));

        let other = build_user_prompt(&sample(QuestionType::Other(0)));
        assert!(other.contains(FALLBACK_INSTRUCTION));
    }

    #[test]
    fn prompt_is_deterministic() {
        let question = sample(QuestionType::MultipleChoice);
        assert_eq!(build_user_prompt(&question), build_user_prompt(&question));
    }
}
