use formstep::{FormDefinition, Question, SubInput, SubInputType};

/// Event registration: demonstrates choices and a multi-input question.
///
/// Orders are deliberately sparse; the step sequence follows them, not the
/// order the questions are listed in.
pub fn event_registration() -> FormDefinition {
    FormDefinition::new(
        "RustConf meetup registration",
        vec![
            Question::new("details", "multi-input", "Personal details")
                .required()
                .with_order(10)
                .with_sub_inputs(vec![
                    SubInput::new("name", SubInputType::Text, "Full Name").required(),
                    SubInput::new("email", SubInputType::Email, "Email").required(),
                    SubInput::new("site", SubInputType::Url, "Homepage"),
                    SubInput::new("phone", SubInputType::Phone, "Phone")
                        .with_placeholder("+1 555 0100"),
                ]),
            Question::new("ticket", "radio", "Which ticket?")
                .required()
                .with_order(20)
                .with_choices(["Student", "Regular", "Supporter"]),
            Question::new("sessions", "checkbox", "Which sessions will you attend?")
                .with_order(30)
                .with_choices(["Keynote", "Workshops", "Lightning talks", "Social"]),
            Question::new("dietary", "short-text", "Any dietary requirements?").with_order(40),
            Question::new("terms", "legal", "I accept the code of conduct")
                .required()
                .with_order(50),
        ],
    )
}
