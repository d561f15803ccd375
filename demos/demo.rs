//! Scripted walk through every play mode.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **One-off riddles**: `generate_riddle` with fixed seeds, one per level.
//! 2. **A session**: new riddle, a wrong guess, a hint, the right answer,
//!    help from the AI, stumping the AI, and a short chat.
//!
//! Everything runs offline on `Backends::local()`.

use riddle_me_this::{
    generate_riddle, Backends, GameSession, Level, RiddleRequest, SessionSettings,
};

fn rule() {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

#[tokio::main]
async fn main() -> riddle_me_this::Result<()> {
    println!();
    println!("══ One-off riddles ══");
    println!();
    for (level, seed) in [(Level::Easy, 1), (Level::Medium, 2), (Level::Hard, 3)] {
        let card = generate_riddle(RiddleRequest { level, rng_seed: Some(seed) });
        println!("  [{}] {:<6} Q: {}", card.riddle_id, card.level, card.riddle.question);
        println!("                  A: {}", card.riddle.answer);
    }

    println!();
    println!("══ A game session ══");
    println!();
    let backends = Backends::local();
    let mut session = GameSession::new(SessionSettings {
        rng_seed: Some(42),
        ..SessionSettings::default()
    });

    rule();
    let card = session.new_riddle(Level::Medium, &backends).await?.clone();
    println!("  🧩 {}", card.riddle.question);
    rule();

    let wrong = session.submit_answer("a banana")?;
    println!("  > a banana\n  {}  [{}]", wrong.message, wrong.sound.url());
    println!("  {}", session.hint()?);

    let help = session.ask_for_help("can I get a clue?", &backends).await?;
    println!("  AI says: {help}");

    let right = session.submit_answer(&card.riddle.answer)?;
    println!("  > {}\n  {}  [{}]", card.riddle.answer, right.message, right.sound.url());
    println!("  📈 {}", session.progress());

    println!();
    let stumped = session
        .stump("What has four wheels and flies? A garbage truck!", &backends)
        .await?;
    println!("  AI thinks: {stumped}");

    println!();
    for message in ["hi there!", "why is this so hard?", "you're awesome"] {
        session.chat(message, &backends).await?;
    }
    for line in session.history() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
