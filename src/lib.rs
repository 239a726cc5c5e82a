// Forgery - locale-aware fake data from directive templates
//
// This library expands templates such as "#{Name.first_name} #{Name.last_name}"
// against per-locale data, with numerify/bothify/regexify pattern expanders.

// Re-export core functionality
pub use forgery_core::*;

// Re-export the logging facade
pub use forgery_log;

// Re-export for building locale data from JSON values
pub use serde_json;

// Prelude for common imports
pub mod prelude {
    pub use forgery_core::prelude::*;
}
