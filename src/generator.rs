use rand::Rng;
use std::ops::RangeInclusive;

/// Question patterns. `{a}` and `{b}` are replaced by the drawn operands.
pub const QUESTION_TEMPLATES: [&str; 3] = [
    "What is {a} + {b}?",
    "What is {a} * {b}?",
    "What is {a} - {b}?",
];

pub const OPERAND_RANGE: RangeInclusive<i64> = 1..=12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    /// `None` when the template carries no known operator.
    pub correct_answer: Option<i64>,
}

impl Question {
    pub fn from_template(template: &str, a: i64, b: i64) -> Self {
        Question {
            text: template.replace("{a}", &a.to_string()).replace("{b}", &b.to_string()),
            correct_answer: evaluate(template, a, b),
        }
    }
}

/// Draws a template, then `a`, then `b` from `rng`.
pub fn generate_question<R: Rng + ?Sized>(rng: &mut R) -> Question {
    let template = QUESTION_TEMPLATES[rng.gen_range(0..QUESTION_TEMPLATES.len())];
    let a = rng.gen_range(OPERAND_RANGE);
    let b = rng.gen_range(OPERAND_RANGE);

    Question::from_template(template, a, b)
}

pub fn evaluate(template: &str, a: i64, b: i64) -> Option<i64> {
    if template.contains('+') {
        Some(a + b)
    } else if template.contains('*') {
        Some(a * b)
    } else if template.contains('-') {
        Some(a - b)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse_operands(text: &str) -> (i64, char, i64) {
        let body = text
            .strip_prefix("What is ")
            .and_then(|s| s.strip_suffix('?'))
            .expect("unexpected question shape");
        let parts: Vec<&str> = body.split(' ').collect();
        assert_eq!(parts.len(), 3, "unexpected question body: {}", body);
        let a = parts[0].parse().expect("left operand");
        let op = parts[1].chars().next().expect("operator");
        let b = parts[2].parse().expect("right operand");
        (a, op, b)
    }

    #[test]
    fn generated_questions_stay_in_range_and_match_their_answer() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let question = generate_question(&mut rng);
            let (a, op, b) = parse_operands(&question.text);

            assert!(OPERAND_RANGE.contains(&a));
            assert!(OPERAND_RANGE.contains(&b));

            let expected = match op {
                '+' => a + b,
                '*' => a * b,
                '-' => a - b,
                other => panic!("unexpected operator {}", other),
            };
            assert_eq!(question.correct_answer, Some(expected));
        }
    }

    #[test]
    fn every_template_is_eventually_drawn() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let (_, op, _) = parse_operands(&generate_question(&mut rng).text);
            match op {
                '+' => seen[0] = true,
                '*' => seen[1] = true,
                '-' => seen[2] = true,
                _ => unreachable!(),
            }
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn same_seed_gives_same_question() {
        let first = generate_question(&mut StdRng::seed_from_u64(99));
        let second = generate_question(&mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn zero_rng_picks_lowest_template_and_operands() {
        let question = generate_question(&mut StepRng::new(0, 0));
        assert_eq!(question.text, "What is 1 + 1?");
        assert_eq!(question.correct_answer, Some(2));
    }

    #[test]
    fn subtraction_is_not_clamped() {
        let question = Question::from_template(QUESTION_TEMPLATES[2], 3, 11);
        assert_eq!(question.text, "What is 3 - 11?");
        assert_eq!(question.correct_answer, Some(-8));

        let zero = Question::from_template(QUESTION_TEMPLATES[2], 5, 5);
        assert_eq!(zero.correct_answer, Some(0));
    }

    #[test]
    fn from_template_substitutes_both_operands() {
        let question = Question::from_template(QUESTION_TEMPLATES[0], 3, 5);
        assert_eq!(question.text, "What is 3 + 5?");
        assert_eq!(question.correct_answer, Some(8));

        let product = Question::from_template(QUESTION_TEMPLATES[1], 12, 12);
        assert_eq!(product.text, "What is 12 * 12?");
        assert_eq!(product.correct_answer, Some(144));
    }

    #[test]
    fn unknown_operator_has_no_answer() {
        let question = Question::from_template("What is {a} / {b}?", 6, 3);
        assert_eq!(question.text, "What is 6 / 3?");
        assert_eq!(question.correct_answer, None);
    }
}
