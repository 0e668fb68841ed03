pub mod gemini;
pub mod settings;
