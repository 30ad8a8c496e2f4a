//! Intake stages — the fixed sequence every conversation walks through.
//!
//! The enum replaces string-keyed handler lookup: dispatch is an exhaustive
//! `match`, so a stage without a handler does not compile.

/// Current step of the intake sequence. Advances forward only; the early-exit
/// paths (duplicate email, persistence failure) jump straight to `Done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Greeting,
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
    TechnicalQuestions,
    Done,
}

impl Stage {
    /// Snake-case stage identifier used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::Name => "name",
            Stage::Email => "email",
            Stage::Phone => "phone",
            Stage::Experience => "experience",
            Stage::Position => "position",
            Stage::Location => "location",
            Stage::TechStack => "tech_stack",
            Stage::TechnicalQuestions => "technical_questions",
            Stage::Done => "done",
        }
    }
}
