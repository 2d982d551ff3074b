use formstep::{FormDefinition, Question};

/// Feedback form with the rating-style field types, all optional except the score.
pub fn product_feedback() -> FormDefinition {
    FormDefinition::new(
        "Product feedback",
        vec![
            Question::new(1, "opinion-scale", "How likely are you to recommend us?")
                .required()
                .with_order(1)
                .with_choices((0..=10).map(|n| n.to_string())),
            Question::new(2, "multi-select", "What do you use us for?")
                .with_order(2)
                .with_choices(["Surveys", "Registrations", "Quizzes", "Other"]),
            Question::new(3, "ranking", "Rank these features")
                .with_order(3)
                .with_choices(["Speed", "Design", "Price"]),
            Question::new(4, "yesno", "May we contact you about your answers?")
                .with_order(4)
                .with_choices(["Yes", "No"]),
            Question::new(5, "email", "Where should we reach you?").with_order(5),
        ],
    )
}
