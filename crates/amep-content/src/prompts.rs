//! Prompt and response-schema construction.

use crate::types::{ContentRequest, ContentType, ModelTier};
use serde_json::json;

/// Practice set for a student's mastery gaps.
pub fn adaptive_practice(student_name: &str, subject: &str, gaps: &[String]) -> ContentRequest {
    let prompt = format!(
        "Generate a personalized 5-question practice set for {student_name} in {subject}.\n\
         Focus on these specific conceptual gaps: {}.\n\
         Ensure the difficulty is slightly above their current competency.",
        gaps.join(", ")
    );
    let schema = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctAnswer": { "type": "STRING" },
                "explanation": { "type": "STRING" }
            },
            "required": ["question", "options", "correctAnswer", "explanation"]
        }
    });
    ContentRequest { tier: ModelTier::Pro, prompt, schema }
}

/// Engagement index and takeaways from classroom observation notes.
pub fn engagement_summary(notes: &str) -> ContentRequest {
    let prompt = format!(
        "Analyze the following classroom observation notes and provide an 'Engagement Index' (0-100) \
         and three key actionable takeaways for the teacher:\n\n{notes}"
    );
    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "index": { "type": "NUMBER" },
            "takeaways": { "type": "ARRAY", "items": { "type": "STRING" } },
            "sentiment": { "type": "STRING" }
        },
        "required": ["index", "takeaways", "sentiment"]
    });
    ContentRequest { tier: ModelTier::Flash, prompt, schema }
}

/// Library content (quiz, summary or problem set) about a topic.
pub fn topic_content(topic: &str, content_type: ContentType) -> ContentRequest {
    let prompt = format!(
        "As an expert educator, create a high-quality {content_type} about the topic: \"{topic}\".\n\
         Format the output as a clean, structured JSON object suitable for a modern educational app."
    );
    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING", "description": "The main body of the content or summary." },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "answer": { "type": "STRING" },
                        "hint": { "type": "STRING" }
                    }
                },
                "description": "List of quiz questions or practice problems if applicable."
            }
        },
        "required": ["title", "content"]
    });
    ContentRequest { tier: ModelTier::Pro, prompt, schema }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_prompt() {
        let gaps = vec!["Integration by parts".to_string(), "Limits".to_string()];
        let request = adaptive_practice("Alex", "Calculus", &gaps);
        assert_eq!(request.tier, ModelTier::Pro);
        assert!(request.prompt.contains("for Alex in Calculus"));
        assert!(request.prompt.contains("Integration by parts, Limits"));
        assert_eq!(request.schema["type"], "ARRAY");
        assert_eq!(request.schema["items"]["required"][2], "correctAnswer");
    }

    #[test]
    fn test_summary_uses_flash() {
        let request = engagement_summary("Students debated energy storage.");
        assert_eq!(request.tier, ModelTier::Flash);
        assert!(request.prompt.ends_with("Students debated energy storage."));
    }

    #[test]
    fn test_topic_prompt() {
        let request = topic_content("Thermodynamics", ContentType::Problems);
        assert!(request.prompt.contains("high-quality problems about the topic: \"Thermodynamics\""));
        assert_eq!(request.schema["required"], json!(["title", "content"]));
    }
}
