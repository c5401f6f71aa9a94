//! Prompt text for the sports-coaching vision analysis.
//!
//! The instruction block embeds the exact JSON shape of
//! [`crate::report::AnalysisReport`]; the reply parser depends on the model
//! honoring it, with the fallback report covering the cases where it does
//! not.

/// System message framing the model's persona.
pub const SYSTEM_PROMPT: &str = "You are an expert sports coach and biomechanics analyst. \
Analyze sports performance and provide detailed, actionable coaching feedback. \
Focus on technique, form, strengths, and areas for improvement.";

/// User-facing instruction block sent ahead of the frame images.
pub const ANALYSIS_INSTRUCTION: &str = r#"Analyze the following sports video as a coach with a focus on technique and performance. Provide a comprehensive and detailed feedback report in JSON format, including the following sections:

{
  "sport": "Name of the sport being played in the video",
  "confidence": 0.95,

  "technique_analysis": [
    "A detailed, point-by-point breakdown of the player's technique and form, highlighting strengths and weaknesses.",
    "Consider positioning, body movements, coordination, and any sport-specific techniques relevant to the video."
  ],

  "improvement_suggestions": [
    "Specific actionable feedback on how the player can improve their technique, form, or approach during the activity.",
    "Suggestions should be clear, practical, and aimed at enhancing overall performance."
  ],

  "positive_highlights": [
    "Notable strengths in the player's performance, such as effective movement, precision, or technique that stands out positively.",
    "Focus on moments where the player demonstrated superior skills or decision-making."
  ],

  "areas_of_concern": [
    "Potential issues or areas that need attention, such as improper form, risky movements, or missed opportunities for improvement.",
    "Be specific about what went wrong and how it might impact performance or safety."
  ]
}

Make sure to provide your analysis in a structured and well-organized manner, adhering to the provided JSON format."#;
