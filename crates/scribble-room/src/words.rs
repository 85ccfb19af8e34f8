//! Word provider: the category → word table rounds draw from.

use std::collections::HashMap;

use rand::seq::IndexedRandom;

use crate::RoomError;

/// A source of secret words, injectable so tests can pin the word.
pub trait WordSource: Send + 'static {
    /// Returns `true` if `category` is a known key.
    fn has_category(&self, category: &str) -> bool;

    /// Picks a word from `category`, or from the default category when
    /// the key is unknown. `None` only if there is nothing to pick from.
    fn pick(&self, category: &str) -> Option<String>;
}

/// The built-in table.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "food",
        &["사과", "바나나", "김치", "라면", "피자", "떡볶이", "햄버거", "수박", "김밥", "아이스크림"],
    ),
    (
        "animal",
        &["고양이", "강아지", "호랑이", "코끼리", "기린", "토끼", "펭귄", "원숭이", "거북이", "사자"],
    ),
    (
        "object",
        &["의자", "시계", "우산", "안경", "연필", "자전거", "냉장고", "가방", "컴퓨터", "책상"],
    ),
    ("job", &["의사", "경찰", "요리사", "소방관", "선생님", "가수", "화가", "우주비행사"]),
    ("sports", &["축구", "야구", "농구", "수영", "테니스", "배드민턴", "스키", "태권도"]),
];

const BUILTIN_DEFAULT: &str = "food";

/// An in-memory word table with a fallback category.
///
/// Every category holds at least one word and the fallback category
/// always exists; both are checked on construction.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: HashMap<String, Vec<String>>,
    fallback: String,
}

impl WordBank {
    /// Builds a table from `(category, words)` pairs.
    ///
    /// # Errors
    /// [`RoomError::InvalidConfig`] if a category has no words or
    /// `fallback` is not one of the categories.
    pub fn new<C, W>(
        fallback: &str,
        categories: impl IntoIterator<Item = (C, Vec<W>)>,
    ) -> Result<Self, RoomError>
    where
        C: Into<String>,
        W: Into<String>,
    {
        let categories: HashMap<String, Vec<String>> = categories
            .into_iter()
            .map(|(name, words)| (name.into(), words.into_iter().map(Into::into).collect()))
            .collect();

        if let Some((name, _)) = categories.iter().find(|(_, words)| words.is_empty()) {
            return Err(RoomError::InvalidConfig(format!("category {name} has no words")));
        }
        if !categories.contains_key(fallback) {
            return Err(RoomError::InvalidConfig(format!(
                "default category {fallback} is missing"
            )));
        }

        Ok(Self {
            categories,
            fallback: fallback.to_string(),
        })
    }

    /// Parses a JSON object of `category → [words]`, e.g.
    /// `{"food": ["사과", "피자"], "animal": ["고양이"]}`.
    ///
    /// # Errors
    /// [`RoomError::InvalidConfig`] on malformed JSON or an unusable table.
    pub fn from_json(fallback: &str, raw: &str) -> Result<Self, RoomError> {
        let categories: HashMap<String, Vec<String>> = serde_json::from_str(raw)
            .map_err(|e| RoomError::InvalidConfig(format!("word table: {e}")))?;
        Self::new(fallback, categories)
    }

    /// The category used for unknown keys.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// All category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The words of one category, if it exists.
    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }
}

impl Default for WordBank {
    fn default() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, words)| (name.to_string(), words.iter().map(|w| w.to_string()).collect()))
            .collect();
        Self {
            categories,
            fallback: BUILTIN_DEFAULT.to_string(),
        }
    }
}

impl WordSource for WordBank {
    fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    fn pick(&self, category: &str) -> Option<String> {
        let words = self
            .categories
            .get(category)
            .or_else(|| self.categories.get(&self.fallback))?;
        words.choose(&mut rand::rng()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> WordBank {
        WordBank::new("food", [("food", vec!["사과"]), ("animal", vec!["고양이", "강아지"])]).unwrap()
    }

    #[test]
    fn test_pick_returns_word_from_category() {
        let bank = animals();
        for _ in 0..20 {
            let word = bank.pick("animal").unwrap();
            assert!(word == "고양이" || word == "강아지", "unexpected word {word}");
        }
    }

    #[test]
    fn test_pick_unknown_category_falls_back_to_default() {
        let bank = animals();
        assert_eq!(bank.pick("spaceships").as_deref(), Some("사과"));
    }

    #[test]
    fn test_pick_eventually_covers_every_word() {
        let bank = animals();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(bank.pick("animal").unwrap());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_new_rejects_empty_category() {
        let result = WordBank::new("food", [("food", vec!["사과"]), ("empty", Vec::<&str>::new())]);
        assert!(matches!(result, Err(RoomError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_rejects_missing_fallback() {
        let result = WordBank::new("food", [("animal", vec!["고양이"])]);
        assert!(matches!(result, Err(RoomError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_parses_table() {
        let bank = WordBank::from_json("food", r#"{"food": ["피자"], "job": ["의사", "가수"]}"#).unwrap();
        assert_eq!(bank.categories(), vec!["food", "job"]);
        assert_eq!(bank.words("job").unwrap().len(), 2);
        assert!(bank.has_category("job"));
        assert!(!bank.has_category("animal"));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = WordBank::from_json("food", r#"{"food": "not a list"}"#);
        assert!(matches!(result, Err(RoomError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_bank_has_builtin_categories() {
        let bank = WordBank::default();
        assert_eq!(bank.fallback(), "food");
        for name in ["food", "animal", "object", "job", "sports"] {
            assert!(bank.has_category(name), "missing {name}");
            assert!(!bank.words(name).unwrap().is_empty());
        }
    }
}
