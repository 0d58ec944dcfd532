//! Plain-text rendering for console output
//!
//! Sample lists, the statistics table and the fixed console questions.

use crate::executor::{Aggregator, ColumnStatistics, ExecutorResult, Extreme, Query};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::Column;
use crate::storage::{WineCellar, WineSample, WineType};

use super::session::SessionView;

/// Questions answered by `answer_questions`, in order
pub const QUESTIONS: [&str; 10] = [
    "How many wine samples are there?",
    "How many red wine samples are there?",
    "How many white wine samples are there?",
    "Which wine samples were graded with the best quality?",
    "Which wine samples were graded with the worst quality?",
    "Which wine samples have the highest PH?",
    "Which wine samples have the lowest PH?",
    "What is the highest value of alcohol grade for the whole sample of red wines?",
    "What is the lowest value of citric acid for the whole sample of white wines?",
    "What is the average value of alcohol grade for the whole sample of white wines?",
];

/// One answered console question
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionAnswer {
    pub question: &'static str,
    pub answer: String,
}

/// Formats a measurement with at least one decimal place (`5.0`, `0.9978`)
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

/// One `Sample #id: TYPE wine, label: value, ...` line
pub fn render_sample(sample: &WineSample) -> String {
    let fields: Vec<String> = Column::ALL
        .iter()
        .map(|c| format!("{}: {}", c.short_label(), format_value(sample.get(*c))))
        .collect();
    format!(
        "Sample #{}: {} wine, {}",
        sample.id(),
        sample.wine_type(),
        fields.join(", ")
    )
}

/// Match count line followed by one line per sample
pub fn render_sample_list(samples: &[&WineSample]) -> String {
    let n = samples.len();
    let mut lines = Vec::with_capacity(n + 1);
    lines.push(if n == 1 {
        "1 wine sample matches your query.".to_string()
    } else {
        format!("{} wine samples match your query.", n)
    });
    lines.extend(samples.iter().map(|s| render_sample(s)));
    lines.join("\n")
}

/// Tab-separated statistics table and the shown/total footer.
///
/// Values are rounded to two decimal places. An empty view renders the
/// header and footer only.
pub fn render_statistics(view: &SessionView<'_>) -> String {
    let header: Vec<&str> = Column::ALL.iter().map(|c| c.display_name()).collect();
    let mut lines = vec![format!("\t{}\t", header.join("\t"))];

    if let Some(stats) = &view.statistics {
        let row = |label: &str, pick: fn(&ColumnStatistics) -> f64| {
            let cells: Vec<String> = stats.iter().map(|s| format!("{:.2}", pick(s))).collect();
            format!("{}\t{}", label, cells.join("\t"))
        };
        lines.push(row("Maximum", |s| s.maximum));
        lines.push(row("Minimum", |s| s.minimum));
        lines.push(row("Average", |s| s.average));
    }

    lines.push(String::new());
    lines.push(format!("Showing {} out of {} samples.", view.shown, view.total));
    lines.join("\n")
}

/// Answers the ten console questions against `cellar`.
///
/// An aggregate or extremum over an empty partition is answered with the
/// error text, never with a number or an empty listing.
pub fn answer_questions(cellar: &WineCellar) -> Vec<QuestionAnswer> {
    let all = Query::new(cellar.samples(WineType::All), Vec::new(), WineType::All).solve();
    let red = Query::new(cellar.samples(WineType::Red), Vec::new(), WineType::Red).solve();
    let white = Query::new(cellar.samples(WineType::White), Vec::new(), WineType::White).solve();

    let all_agg = Aggregator::new(&all);
    let red_agg = Aggregator::new(&red);
    let white_agg = Aggregator::new(&white);

    let extreme = |column, which| {
        let bound = match which {
            Extreme::Max => all_agg.maximum(column),
            Extreme::Min => all_agg.minimum(column),
        };
        render_answer(bound.map(|_| render_sample_list(&all_agg.records_at_extreme(column, which))))
    };

    let answers = [
        all_agg.count().to_string(),
        red_agg.count().to_string(),
        white_agg.count().to_string(),
        extreme(Column::Quality, Extreme::Max),
        extreme(Column::Quality, Extreme::Min),
        extreme(Column::PH, Extreme::Max),
        extreme(Column::PH, Extreme::Min),
        render_answer(red_agg.maximum(Column::Alcohol).map(format_value)),
        render_answer(white_agg.minimum(Column::CitricAcid).map(format_value)),
        render_answer(white_agg.average(Column::Alcohol).map(format_value)),
    ];

    QUESTIONS
        .into_iter()
        .zip(answers)
        .map(|(question, answer)| QuestionAnswer { question, answer })
        .collect()
}

/// Console layout with numbered question banners
pub fn render_questions(answers: &[QuestionAnswer]) -> String {
    let mut out = String::new();
    for (i, qa) in answers.iter().enumerate() {
        out.push_str(&format!(
            "----------------------- QUESTION #{} ------------------------\n",
            i + 1
        ));
        out.push_str(qa.question);
        out.push('\n');
        out.push_str(&qa.answer);
        out.push('\n');
    }
    out.push_str("------------------------------------------------------------");
    out
}

fn render_answer(result: ExecutorResult<String>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => {
            log_event_with_fields(Event::AggregateEmpty, &[("message", err.message())]);
            err.to_string()
        }
    }
}
