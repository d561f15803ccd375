use crate::riddle_engine::models::Riddle;

/// True when the guess matches the expected answer, ignoring case and
/// surrounding whitespace. Articles are significant: "clock" is not "a clock".
pub fn evaluate_answer(user_input: &str, correct_answer: &str) -> bool {
    user_input.trim().to_lowercase() == correct_answer.trim().to_lowercase()
}

/// The stock hint: point the player back at the riddle's own words.
pub fn hint_for(riddle: &Riddle) -> String {
    format!("Think carefully about the words in the riddle: {}!", riddle.question)
}
