//! # formstep-wizard-ratatui
//!
//! Ratatui backend for formstep. Shows one question per screen with a
//! progress bar and advances only past answers that validate.
//!
//! ```rust,no_run
//! use formstep::{FormDefinition, FormFiller, Question};
//! use formstep_wizard_ratatui::RatatuiFiller;
//!
//! let form = FormDefinition::new(
//!     "Contact",
//!     vec![Question::new(1, "email", "Your email").required()],
//! );
//! let answers = RatatuiFiller::new().fill(&form)?;
//! println!("{} answers", answers.len());
//! # Ok::<(), formstep_wizard_ratatui::WizardError>(())
//! ```

mod backend;
mod state;

pub use backend::{RatatuiFiller, Theme, WizardError};
