use std::collections::BTreeMap;

use super::{align, marker};
use crate::error::RenderError;
use crate::family::{QuestionProps, QuestionView};

#[derive(Debug, Clone, Copy)]
pub struct QuestionLedger;

impl QuestionView for QuestionLedger {
    fn render(&self, props: &QuestionProps<'_>) -> Result<String, RenderError> {
        let rows: Vec<Vec<String>> = props
            .questions
            .iter()
            .map(|q| {
                let outcome = match (q.question.answered, q.question.correct) {
                    (false, _) => "skipped",
                    (true, true) => "correct",
                    (true, false) => "wrong",
                };
                let topic = if q.question.subtopic.is_empty() {
                    q.question.topic.clone()
                } else {
                    format!("{} / {}", q.question.topic, q.question.subtopic)
                };
                vec![
                    marker(props.base.is_selected(q.set_id)).to_owned(),
                    format!("{}:{}", q.set_id, q.question.id),
                    q.set_subject.to_string(),
                    topic,
                    q.question.difficulty.to_string(),
                    outcome.to_owned(),
                    format!("{}s", q.question.time_spent),
                ]
            })
            .collect();
        if rows.is_empty() {
            return Ok(String::new());
        }
        Ok(align(
            &["", "QUESTION", "SUBJECT", "TOPIC", "DIFF", "RESULT", "TIME"],
            &rows,
        ))
    }
}

/// Correct over answered per topic.
#[derive(Debug, Clone, Copy)]
pub struct TopicBreakdown;

impl QuestionView for TopicBreakdown {
    fn render(&self, props: &QuestionProps<'_>) -> Result<String, RenderError> {
        let mut tally: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
        for q in props.questions {
            let (correct, answered, total) = tally.entry(q.question.topic.as_str()).or_default();
            *total += 1;
            if q.question.answered {
                *answered += 1;
                if q.question.correct {
                    *correct += 1;
                }
            }
        }
        if tally.is_empty() {
            return Ok(String::new());
        }
        let rows: Vec<Vec<String>> = tally
            .into_iter()
            .map(|(topic, (correct, answered, total))| {
                let rate = if answered == 0 {
                    "-".to_owned()
                } else {
                    format!("{}%", correct * 100 / answered)
                };
                vec![
                    topic.to_owned(),
                    format!("{correct}/{answered}"),
                    total.to_string(),
                    rate,
                ]
            })
            .collect();
        Ok(align(&["TOPIC", "CORRECT", "TOTAL", "RATE"], &rows))
    }
}
