mod keyword_classifier;

pub use keyword_classifier::KeywordClassifier;
