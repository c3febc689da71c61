use anyhow::Result;

use crate::{
    config::ConfigStore,
    llm::answer_question,
    palette::Palette,
    question::{Question, QuestionOption, QuestionType},
};

/// Sample questions covering every question type.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new(
            QuestionType::MultipleChoice,
            "以下哪些学说或发现是马克思恩格斯创立他们学说的自然科学基础:",
            vec![
                QuestionOption::new("A", "细胞学说"),
                QuestionOption::new("B", "自然辩证法"),
                QuestionOption::new("C", "分子进化学说"),
                QuestionOption::new("D", "日心说"),
                QuestionOption::new("E", "生物进化论"),
                QuestionOption::new("F", "能量守恒与转化定律"),
            ],
        ),
        Question::new(
            QuestionType::SingleChoice,
            "马克思、恩格斯出生前的德国总体上来说是落后的、黑暗的、反动的，但是莱茵地区却已经成为了德国甚至是欧洲资本主义工业先进地区。",
            vec![
                QuestionOption::new("A", "正确"),
                QuestionOption::new("B", "错误"),
            ],
        ),
        Question::new(
            QuestionType::Poll,
            "马克思主义是什么？",
            vec![
                QuestionOption::new("A", "马克思和恩格斯的思想"),
                QuestionOption::new("B", "列宁的思想"),
                QuestionOption::new("C", "关于无产阶级和人类解放的学说"),
                QuestionOption::new("D", "中国特色社会主义"),
            ],
        ),
    ]
}

pub async fn run(store: &ConfigStore) -> Result<()> {
    for question in sample_questions() {
        println!(
            "\n{} {}",
            Palette::paint(Palette::INFO, format!("[{}]", question.kind.description())),
            question.body
        );
        for option in &question.options {
            println!("  {}", Palette::dim(format!("{}: {}", option.key, option.value)));
        }

        let answer = answer_question(store, &question).await;
        if answer.is_empty() {
            println!("{}", Palette::paint(Palette::DANGER, "No answer"));
        } else {
            println!("Answer: {}", Palette::paint(Palette::SUCCESS, &answer));
        }
    }
    Ok(())
}
