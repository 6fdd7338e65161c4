//! Heading detection from font sizes and text shape.

use regex::Regex;

use crate::model::{HeadingLevel, Section, Span};

use super::font_stats::FontStatistics;
use super::options::LayoutOptions;

/// Which rule classified a span as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    /// Font size is one of the mapped heading tiers
    FontSize,
    /// Short all-caps line
    AllCaps,
    /// Decimal ("3.") or roman numeral ("IV.") prefix
    Numbered,
}

/// Detects section headings in one document's spans.
pub struct LayoutClassifier {
    options: LayoutOptions,
    all_caps_regex: Regex,
    numbered_regex: Regex,
}

impl LayoutClassifier {
    /// Create a classifier with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            all_caps_regex: Regex::new(r"^[A-Z][A-Z\s\d\-\.]+$").unwrap(),
            numbered_regex: Regex::new(r"^(?:\d+\.|[IVX]+\.)").unwrap(),
        }
    }

    /// Get the classifier options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Compute font statistics for a document.
    pub fn font_statistics(&self, spans: &[Span]) -> FontStatistics {
        let mut stats = FontStatistics::new();
        for span in spans {
            stats.add_size(span.font_size);
        }
        stats.analyze(self.options.exclude_body_size);
        stats
    }

    /// Detect headings in a document's spans.
    ///
    /// Spans are visited in page order (stable, so reading order within a page
    /// is kept). Each retained span yields exactly one section whose body is
    /// the heading text itself.
    pub fn classify(&self, spans: &[Span]) -> Vec<Section> {
        if spans.is_empty() {
            return Vec::new();
        }

        let stats = self.font_statistics(spans);
        log::debug!(
            "Font statistics: body={:?}, heading tiers={:?}",
            stats.body_size,
            stats.heading_sizes
        );

        let mut ordered: Vec<&Span> = spans.iter().collect();
        ordered.sort_by_key(|s| s.page_number);

        ordered
            .into_iter()
            .filter_map(|span| {
                let title = span.text.trim();
                let (level, _rule) = self.detect(title, span.font_size, &stats)?;
                Some(Section::heading(title, level, span.page_number))
            })
            .collect()
    }

    /// Decide whether trimmed text at a given size is a heading, and at which
    /// level. Rules are tried in priority order.
    pub fn detect(
        &self,
        title: &str,
        font_size: f32,
        stats: &FontStatistics,
    ) -> Option<(HeadingLevel, HeadingRule)> {
        if title.chars().count() < self.options.min_title_chars {
            return None;
        }

        if let Some(level) = stats.level_for(font_size) {
            return Some((level, HeadingRule::FontSize));
        }

        if self.is_all_caps_title(title) {
            return Some((HeadingLevel::H2, HeadingRule::AllCaps));
        }

        if self.numbered_regex.is_match(title) {
            return Some((HeadingLevel::H3, HeadingRule::Numbered));
        }

        None
    }

    fn is_all_caps_title(&self, title: &str) -> bool {
        self.all_caps_regex.is_match(title)
            && title.split_whitespace().count() < self.options.max_caps_words
    }
}

impl Default for LayoutClassifier {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(spans: &[Span]) -> Vec<Section> {
        LayoutClassifier::default().classify(spans)
    }

    #[test]
    fn test_empty_document() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn test_largest_size_is_h1() {
        let spans = vec![
            Span::new("INTRODUCTION", 18.0, 1),
            Span::new("This is the intro text.", 10.0, 1),
        ];
        let sections = classify(&spans);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "INTRODUCTION");
        assert_eq!(sections[0].level, HeadingLevel::H1);
        assert_eq!(sections[0].page_number, 1);
        assert_eq!(sections[0].text, "INTRODUCTION");
    }

    #[test]
    fn test_three_heading_tiers() {
        let spans = vec![
            Span::new("Guide to the South", 24.0, 1),
            Span::new("Coastal Towns", 18.0, 1),
            Span::new("Nice", 14.0, 2),
            Span::new("Body text about towns.", 10.0, 2),
            Span::new("More body text here.", 10.0, 2),
            Span::new("Footnote in small print", 8.0, 3),
        ];
        let sections = classify(&spans);

        let levels: Vec<_> = sections.iter().map(|s| (s.title.as_str(), s.level)).collect();
        assert_eq!(
            levels,
            vec![
                ("Guide to the South", HeadingLevel::H1),
                ("Coastal Towns", HeadingLevel::H2),
                ("Nice", HeadingLevel::H3),
            ]
        );
    }

    #[test]
    fn test_short_spans_dropped() {
        let spans = vec![
            Span::new("  IV ", 24.0, 1),
            Span::new("Ok", 24.0, 1),
            Span::new("body text", 10.0, 1),
            Span::new("body text", 10.0, 1),
        ];
        assert!(classify(&spans).is_empty());
    }

    #[test]
    fn test_all_caps_fallback_is_h2() {
        let spans = vec![
            Span::new("PACKING LIST", 11.0, 2),
            Span::new("bring sunscreen and a hat", 11.0, 2),
        ];
        let sections = classify(&spans);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "PACKING LIST");
        assert_eq!(sections[0].level, HeadingLevel::H2);
    }

    #[test]
    fn test_all_caps_word_limit() {
        let long = "ONE TWO THREE FOUR FIVE SIX SEVEN EIGHT NINE TEN";
        let spans = vec![Span::new(long, 11.0, 1)];
        assert!(classify(&spans).is_empty());

        let nine = "ONE TWO THREE FOUR FIVE SIX SEVEN EIGHT NINE";
        let spans = vec![Span::new(nine, 11.0, 1)];
        assert_eq!(classify(&spans).len(), 1);
    }

    #[test]
    fn test_numbered_prefixes_are_h3() {
        let spans = vec![
            Span::new("3. Getting around", 11.0, 1),
            Span::new("IV. Local cuisine", 11.0, 1),
            Span::new("a regular sentence", 11.0, 1),
        ];
        let sections = classify(&spans);

        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| s.level == HeadingLevel::H3));
        assert_eq!(sections[1].title, "IV. Local cuisine");
    }

    #[test]
    fn test_size_rule_takes_priority_over_shape() {
        let spans = vec![
            Span::new("1. OVERVIEW", 20.0, 1),
            Span::new("body", 10.0, 1),
            Span::new("body again", 10.0, 1),
        ];
        let sections = classify(&spans);
        assert_eq!(sections[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_single_font_size_never_uses_size_rule() {
        let classifier = LayoutClassifier::default();
        let spans = vec![
            Span::new("Plain sentence one.", 12.0, 1),
            Span::new("SHOUTED TITLE", 12.0, 1),
        ];
        let stats = classifier.font_statistics(&spans);
        for span in &spans {
            let detected = classifier.detect(span.text.trim(), span.font_size, &stats);
            assert_ne!(detected.map(|(_, rule)| rule), Some(HeadingRule::FontSize));
        }
        assert_eq!(classifier.classify(&spans).len(), 1);
    }

    #[test]
    fn test_include_body_size_maps_every_tier() {
        let classifier = LayoutClassifier::new(LayoutOptions::new().include_body_size());
        let spans = vec![
            Span::new("INTRODUCTION", 18.0, 1),
            Span::new("This is the intro text.", 10.0, 1),
        ];
        let sections = classifier.classify(&spans);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].level, HeadingLevel::H2);
    }

    #[test]
    fn test_page_order_is_stable() {
        let spans = vec![
            Span::new("Second Page Title", 20.0, 2),
            Span::new("First Page A", 20.0, 1),
            Span::new("First Page B", 20.0, 1),
            Span::new("filler", 9.0, 1),
            Span::new("filler", 9.0, 1),
            Span::new("filler", 9.0, 2),
            Span::new("filler", 9.0, 2),
        ];
        let titles: Vec<_> = classify(&spans).into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["First Page A", "First Page B", "Second Page Title"]
        );
    }

    #[test]
    fn test_titles_are_trimmed() {
        let spans = vec![
            Span::new("   Overview   ", 16.0, 1),
            Span::new("text", 10.0, 1),
            Span::new("text", 10.0, 1),
        ];
        let sections = classify(&spans);
        assert_eq!(sections[0].title, "Overview");
    }
}
