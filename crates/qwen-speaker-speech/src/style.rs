//! Style instruction inference
//!
//! When a caller does not say how a line should sound, the tone is guessed from the text
//! itself. Rules are checked in order and the first category with a matching keyword wins;
//! keywords match as plain substrings of the lowercased text, so "win" also fires on
//! "window".

pub const URGENT_TONE: &str = "clear, serious, urgent tone";
pub const COMFORTING_TONE: &str = "soft, caring, comforting tone";
pub const SLEEPY_TONE: &str = "gentle, soothing, sleepy tone";
pub const ENERGETIC_TONE: &str = "energetic, upbeat, playful tone";
pub const PLAYFUL_TONE: &str = "playful, excited tone";
pub const DEFAULT_TONE: &str = "warm, natural conversational tone";

/// Ordered (keywords, tone) table. Order is priority.
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (
        &["urgent", "warning", "alert", "asap", "immediately"],
        URGENT_TONE,
    ),
    (
        &["sorry", "apolog", "sad", "miss you", "feel better", "sick"],
        COMFORTING_TONE,
    ),
    (
        &["sleep", "goodnight", "breathe", "relax", "calm"],
        SLEEPY_TONE,
    ),
    (
        &["hype", "let's go", "lets go", "excited", "win", "party"],
        ENERGETIC_TONE,
    ),
];

/// Exclamation marks needed before plain text reads as excited
const EXCLAMATION_THRESHOLD: usize = 2;

/// Derive a style instruction for `text`. Always returns one of the six tone constants.
pub fn infer_instruct(text: &str) -> &'static str {
    let lowered = text.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(_, tone)| *tone)
        .unwrap_or_else(|| {
            if text.matches('!').count() >= EXCLAMATION_THRESHOLD {
                PLAYFUL_TONE
            } else {
                DEFAULT_TONE
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category() {
        assert_eq!(infer_instruct("Server is down, fix ASAP"), URGENT_TONE);
        assert_eq!(infer_instruct("I'm so sorry about yesterday"), COMFORTING_TONE);
        assert_eq!(infer_instruct("Time to sleep now"), SLEEPY_TONE);
        assert_eq!(infer_instruct("Party at my place tonight"), ENERGETIC_TONE);
        assert_eq!(infer_instruct("We did it!! Amazing!"), PLAYFUL_TONE);
        assert_eq!(infer_instruct("The meeting is at three."), DEFAULT_TONE);
    }

    #[test]
    fn test_priority_order() {
        // urgent beats comfort, calm and excitement
        assert_eq!(
            infer_instruct("Sorry, urgent: relax and let's go"),
            URGENT_TONE
        );
        // comfort beats calm
        assert_eq!(infer_instruct("Sad you can't sleep"), COMFORTING_TONE);
        // calm beats excitement
        assert_eq!(infer_instruct("Stay calm, we will win"), SLEEPY_TONE);
        // any keyword beats exclamations
        assert_eq!(infer_instruct("Warning!!!"), URGENT_TONE);
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(infer_instruct("Close the window please"), ENERGETIC_TONE);
        assert_eq!(infer_instruct("We apologize for the delay"), COMFORTING_TONE);
        assert_eq!(infer_instruct("Lets go home"), ENERGETIC_TONE);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(infer_instruct("GOODNIGHT everyone"), SLEEPY_TONE);
        assert_eq!(infer_instruct("ALERT"), URGENT_TONE);
    }

    #[test]
    fn test_exclamation_threshold() {
        assert_eq!(infer_instruct("Hello!"), DEFAULT_TONE);
        assert_eq!(infer_instruct("Hello!!"), PLAYFUL_TONE);
        assert_eq!(infer_instruct("Hi! Hey!"), PLAYFUL_TONE);
        assert_eq!(infer_instruct(""), DEFAULT_TONE);
    }

    #[test]
    fn test_miss_you_scenario() {
        assert_eq!(
            infer_instruct("Please come home, I miss you so much"),
            COMFORTING_TONE
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Let's go team!!!";
        assert_eq!(infer_instruct(text), infer_instruct(text));
        assert_eq!(infer_instruct(text), ENERGETIC_TONE);
    }
}
