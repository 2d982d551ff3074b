use formstep::{FormDefinition, Question};

/// A simple contact form: name, email, website, message.
pub fn contact_form() -> FormDefinition {
    FormDefinition::new(
        "Contact us",
        vec![
            Question::new(1, "short-text", "What is your name?")
                .required()
                .with_order(1)
                .with_placeholder("Jane Doe"),
            Question::new(2, "email", "What is your email?")
                .required()
                .with_order(2),
            Question::new(3, "url", "Do you have a website?")
                .with_order(3)
                .with_description("Optional, but we like to take a look."),
            Question::new(4, "long-text", "How can we help?")
                .required()
                .with_order(4),
        ],
    )
    .with_description("We usually reply within a day.")
}
