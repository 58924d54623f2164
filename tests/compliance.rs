#[path = "compliance/rules.rs"]
mod rules;
