//! Quiz question generation.
//!
//! Group quizzes turn (point, example) pairs into fill-in-the-blank
//! questions whose distractors are the other patterns in the same group.
//! The option pool is never widened beyond the group: wrong answers must
//! be patterns the learner actually confuses with the right one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::types::{GrammarGroup, GrammarPoint, Question, BLANK};

/// Generate one question per (point, example) pair in the group whose
/// example sentence literally contains the point's bare pattern.
///
/// Examples that do not contain their own pattern are skipped silently;
/// a rephrased gloss sentence is expected data, not a fault. An empty
/// result is valid, and the caller falls back to a stored question bank.
pub fn generate_group_quiz(
    points: &[GrammarPoint],
    group_id: &str,
) -> Result<Vec<Question>, QuizError> {
    let members: Vec<&GrammarPoint> = points
        .iter()
        .filter(|p| p.group_id.as_deref() == Some(group_id))
        .collect();

    if members.len() < 2 {
        return Err(QuizError::InsufficientGroupSize {
            group_id: group_id.to_string(),
            size: members.len(),
        });
    }

    // Options in catalog order; one entry per member.
    let options: Vec<String> = members.iter().map(|p| p.bare_pattern()).collect();

    for (i, pattern) in options.iter().enumerate() {
        if options[..i].contains(pattern) {
            return Err(QuizError::DuplicatePattern {
                group_id: group_id.to_string(),
                pattern: pattern.clone(),
            });
        }
    }

    let mut questions = Vec::new();
    for (correct_index, point) in members.iter().enumerate() {
        let pattern = &options[correct_index];
        if pattern.is_empty() {
            continue;
        }
        for (example_index, example) in point.examples.iter().enumerate() {
            let Some(pos) = example.jp.find(pattern.as_str()) else {
                continue;
            };
            let blanked = format!(
                "{}{}{}",
                &example.jp[..pos],
                BLANK,
                &example.jp[pos + pattern.len()..]
            );
            questions.push(Question {
                id: format!("{}-{}", point.id, example_index),
                prompt: format!("{}\n{}", blanked, example.en),
                options: options.clone(),
                correct_index,
                grammar_title: point.title.clone(),
                group_id: Some(group_id.to_string()),
            });
        }
    }

    Ok(questions)
}

/// Generate a mixed quiz: the union of every group's questions in a
/// uniformly random order.
///
/// Groups too small to quiz are skipped; a duplicate pattern anywhere is
/// still a catalog-integrity fault and aborts generation.
pub fn generate_mixed_quiz<R: Rng>(
    points: &[GrammarPoint],
    groups: &[GrammarGroup],
    rng: &mut R,
) -> Result<Vec<Question>, QuizError> {
    let mut questions = Vec::new();
    for group in groups {
        match generate_group_quiz(points, &group.id) {
            Ok(qs) => questions.extend(qs),
            Err(QuizError::InsufficientGroupSize { .. }) => continue,
            Err(err) => return Err(err),
        }
    }
    questions.shuffle(rng);
    Ok(questions)
}
