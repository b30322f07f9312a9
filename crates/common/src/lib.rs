//! Cross-cutting helpers shared by the organization crates:
//! tracing setup and the translation catalog used for user-facing messages.

pub mod i18n;
pub mod utils;

pub use i18n::Translator;
