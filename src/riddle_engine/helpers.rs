//! Shared text builders for the hosted backend and the front ends.
//!
//! Prompt wording lives here so `hosted.rs` only deals with HTTP.

use crate::error::{Result, RiddleError};
use crate::riddle_engine::{
    companion::ChatPrompt,
    models::{Language, Riddle},
};

/// Join conversation turns one per line.
pub fn format_history(history: &[String]) -> String {
    history.join("\n")
}

/// Instruction-style prompt for a text-generation model.
pub fn chat_prompt_text(prompt: &ChatPrompt) -> String {
    let mut out = format!(
        "You are {persona}, a cheerful riddle helper for children. \
         Keep replies short, kind and suitable for kids. \
         Never reveal the answer to the current riddle; give gentle clues instead. \
         End your reply with {emoji}.\n\
         Current riddle: {riddle}\n",
        persona = prompt.persona,
        emoji = prompt.persona.emoji(),
        riddle = prompt.riddle_text(),
    );
    if !prompt.history.is_empty() {
        out.push_str("Conversation so far:\n");
        out.push_str(&format_history(&prompt.history));
        out.push('\n');
    }
    out.push_str(&format!("User: {}\nAI:", prompt.message.trim()));
    out
}

pub fn translation_prompt(riddle: &Riddle, language: Language) -> String {
    format!(
        "Translate this children's riddle and its answer into {language}. \
         Reply with exactly two lines, the first starting with \"Question:\" \
         and the second starting with \"Answer:\".\n\
         Question: {}\nAnswer: {}\n",
        riddle.question, riddle.answer,
    )
}

/// Pull the `Question:` / `Answer:` lines out of a model reply.
pub fn parse_translation(reply: &str) -> Result<Riddle> {
    let mut question = None;
    let mut answer = None;
    for line in reply.lines().map(str::trim) {
        if let Some(q) = line.strip_prefix("Question:") {
            question.get_or_insert_with(|| q.trim().to_string());
        } else if let Some(a) = line.strip_prefix("Answer:") {
            answer.get_or_insert_with(|| a.trim().to_string());
        }
    }
    match (question, answer) {
        (Some(q), Some(a)) if !q.is_empty() && !a.is_empty() => Ok(Riddle::new(q, a)),
        _ => Err(RiddleError::Translation(format!(
            "reply did not contain a question and an answer: {reply:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riddle_engine::models::Persona;

    #[test]
    fn chat_prompt_includes_history_and_message() {
        let p = ChatPrompt {
            message: "  is it a towel? ".to_string(),
            riddle: Some("What gets wetter the more it dries?".to_string()),
            history: vec!["User: hi".to_string(), "AI: hello!".to_string()],
            persona: Persona::BrainyBuddy,
        };
        let text = chat_prompt_text(&p);
        assert!(text.starts_with("You are Brainy Buddy"));
        assert!(text.contains("Current riddle: What gets wetter the more it dries?"));
        assert!(text.contains("User: hi\nAI: hello!\n"));
        assert!(text.ends_with("User: is it a towel?\nAI:"));
    }

    #[test]
    fn translation_reply_is_parsed() {
        let reply = "Sure!\nQuestion: ¿Qué tiene manos pero no aplaude?\nAnswer: un reloj\n";
        let r = parse_translation(reply).unwrap();
        assert_eq!(r.question, "¿Qué tiene manos pero no aplaude?");
        assert_eq!(r.answer, "un reloj");
    }

    #[test]
    fn translation_without_answer_fails() {
        assert!(matches!(
            parse_translation("Question: only half"),
            Err(RiddleError::Translation(_))
        ));
    }
}
