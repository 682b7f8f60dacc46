//! Canned feedback, hint authors and concept ids emitted by the cascade.

/// Student-facing feedback templates.
pub mod strings {
    /// Capitalization differs from a model answer
    pub const CASE_ERROR: &str = "Proofread your work. There may be a capitalization error.";
    /// Punctuation differs from a model answer
    pub const PUNCTUATION_ERROR: &str =
        "There may be an error. How could you update the punctuation?";
    /// Both punctuation and capitalization differ
    pub const PUNCTUATION_AND_CASE_ERROR: &str =
        "There may be an error. How could you update the punctuation and capitalization?";
    /// One word replaced
    pub const MODIFIED_WORD_ERROR: &str = "Revise your work. You may have mixed up a word.";
    /// One word added
    pub const ADDITIONAL_WORD_ERROR: &str = "Revise your work. You may have added an extra word.";
    /// One word dropped
    pub const MISSING_WORD_ERROR: &str =
        "Revise your work. You may have left out an important word.";
    /// Spacing differs
    pub const WHITESPACE_ERROR: &str =
        "There may be an error. You may have forgotten a space between two words.";
    /// Far shorter than every model answer
    pub const MIN_LENGTH_ERROR: &str =
        "Revise your work. Do you have all of the information from the prompt?";
    /// Far longer than every model answer
    pub const MAX_LENGTH_ERROR: &str =
        "Revise your work. How could this sentence be shorter and more concise?";
}

/// Author labels identifying which hint produced a draft.
pub mod authors {
    pub const FOCUS_POINT: &str = "Focus Point Hint";
    pub const CAPITALIZATION: &str = "Capitalization Hint";
    pub const PUNCTUATION: &str = "Punctuation Hint";
    pub const PUNCTUATION_AND_CASE: &str = "Punctuation and Case Hint";
    pub const MODIFIED_WORD: &str = "Modified Word Hint";
    pub const ADDITIONAL_WORD: &str = "Additional Word Hint";
    pub const MISSING_WORD: &str = "Missing Word Hint";
    pub const FLEXIBLE_MODIFIED_WORD: &str = "Flexible Modified Word Hint";
    pub const FLEXIBLE_ADDITIONAL_WORD: &str = "Flexible Additional Word Hint";
    pub const FLEXIBLE_MISSING_WORD: &str = "Flexible Missing Word Hint";
    pub const WHITESPACE: &str = "Whitespace Hint";
    pub const REQUIRED_WORDS: &str = "Required Words Hint";
    pub const MISSING_DETAILS: &str = "Missing Details Hint";
    pub const NOT_CONCISE: &str = "Not Concise Hint";
    pub const PUNCTUATION_END: &str = "Punctuation End Hint";
}

/// Concept ids consumed by mastery analytics.
pub mod concepts {
    pub const CAPITALIZATION: &str = "66upe3S5uvqxuHoHOt4PcQ";
    pub const PUNCTUATION: &str = "mdFUuuNR7N352bbMw4Mj9Q";
    pub const MODIFIED_WORD: &str = "H-2lrblngQAQ8_s-ctye4g";
    pub const ADDITIONAL_WORD: &str = "QYHg1tpDghy5AHWpsIodAg";
    /// Also used for required words and minimum length
    pub const MISSING_WORD: &str = "N5VXCdTAs91gP46gATuvPQ";
    pub const WHITESPACE: &str = "5Yv4-kNHwwCO2p8HI90oqQ";
    pub const CAPITALIZATION_START: &str = "S76ceOpAWR-5m-k47nu6KQ";
    pub const PUNCTUATION_END: &str = "JVJhNIHGZLbHF6LYw605XA";
}
