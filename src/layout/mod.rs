//! Layout classification: turns a document's styled spans into headed
//! sections.
//!
//! Heading-ness is decided without semantic tags. Distinct font sizes larger
//! than the body text are ranked into H1/H2/H3 tiers; spans at other sizes can
//! still qualify through text-shape rules (short all-caps lines become H2,
//! numbered or roman-numeral lines become H3).

mod classifier;
mod font_stats;
mod options;

pub use classifier::{HeadingRule, LayoutClassifier};
pub use font_stats::FontStatistics;
pub use options::LayoutOptions;
