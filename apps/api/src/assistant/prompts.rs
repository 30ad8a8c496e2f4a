// All LLM prompt constants for the assistant module.

/// System prompt sent with every question-generation call — the recruiting
/// assistant persona.
pub const QUESTION_SYSTEM: &str =
    "You are an intelligent Hiring Assistant for TalentScout, a recruitment agency \
    specializing in technology placements. Your role is to gather candidate information \
    and assess their technical skills. Be professional, friendly, and focused on \
    recruitment. Only ask one question at a time and wait for the user's response.";

/// Question generation prompt template. Replace `{tech}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate exactly one technical interview question for {tech} that:
- Is relevant to the candidate's experience
- Should be medium level question
- Theoretical or conceptual
- Is specific and clear
- Should be in 1-2 lines
- Must be different from other questions
- Return only the question without any additional text"#;
