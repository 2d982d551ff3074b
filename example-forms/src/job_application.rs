use formstep::FormDefinition;

const JOB_APPLICATION: &str = include_str!("../forms/job_application.json");

/// A job application form loaded from its JSON definition, the format form
/// builders export.
pub fn job_application() -> anyhow::Result<FormDefinition> {
    Ok(FormDefinition::from_json(JOB_APPLICATION)?)
}
