//! Lexicon-based headline sentiment using VADER
//!
//! Scores are VADER compound polarity values in [-1, 1]: negative headlines score
//! below zero, positive ones above.

use pulse_data::Article;
use vader_sentiment::SentimentIntensityAnalyzer;

/// A scored headline
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub title: String,
    pub source: Option<String>,
    pub score: f64,
}

/// Fixed-lexicon polarity scorer
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Polarity of `text` in [-1, 1]; empty text scores 0.
    pub fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .filter(|score| score.is_finite())
            .map(|score| score.clamp(-1.0, 1.0))
            .unwrap_or(0.0)
    }

    /// Score each article title
    pub fn score_headlines(&self, articles: impl IntoIterator<Item = Article>) -> Vec<Headline> {
        articles
            .into_iter()
            .map(|article| Headline {
                score: self.polarity(&article.title),
                title: article.title,
                source: article.source,
            })
            .collect()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
