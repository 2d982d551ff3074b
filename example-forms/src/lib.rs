pub mod contact;
pub mod event_registration;
pub mod job_application;
pub mod product_feedback;

pub use contact::contact_form;
pub use event_registration::event_registration;
pub use job_application::job_application;
pub use product_feedback::product_feedback;
