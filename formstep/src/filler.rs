use formstep_types::{Answers, FormDefinition};

/// Trait for backend implementations that collect answers for a form.
///
/// Backends receive a `FormDefinition` and return `Answers`. They decide how
/// to present the form (one question at a time, all at once, scripted) and
/// are expected to gate progress on the validator, so answers returned from a
/// successful `fill` pass a submission check.
pub trait FormFiller {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Collect answers for a form.
    ///
    /// # Returns
    /// * `Ok(answers)` once the user asked to submit
    /// * `Err` on cancellation or backend failure
    fn fill(&self, form: &FormDefinition) -> Result<Answers, Self::Error>;
}
