//! Display strings and color semantics for console output.

use colored::Color;

use crate::simulation::{Sentiment, WarOutcome};

pub fn sentiment_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Positive",
        Sentiment::Neutral => "Neutral",
        Sentiment::Negative => "Negative",
    }
}

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::BrightGreen,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::BrightRed,
    }
}

pub fn category_color(category: &str) -> Color {
    match category {
        "World" => Color::BrightWhite,
        "War" => Color::Red,
        "Peace" => Color::BrightGreen,
        "Geoeconomics" => Color::BrightCyan,
        "Policy" => Color::Yellow,
        _ => Color::White,
    }
}

pub fn outcome_color(outcome: WarOutcome) -> Color {
    match outcome {
        WarOutcome::AttackersVictory => Color::BrightRed,
        WarOutcome::DefendersVictory => Color::BrightBlue,
        WarOutcome::WhitePeace => Color::White,
    }
}

pub fn format_number_commas(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
