/// Shared data structures for the application state
///
/// These structs mirror the JSON payloads exchanged with the analysis
/// backend. The client reads them leniently: missing or null fields fall
/// back to empty values instead of failing the whole response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::links;

/// Deserialize a field that may be absent *or* explicitly `null`
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Same as `nullable`, but an empty string also counts as "not provided"
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Full analysis of one room photo, as returned by `POST /api/analyze`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// Short summary of the space
    #[serde(default, deserialize_with = "nullable")]
    pub overall_impression: String,
    /// Thematic groups of tips, rendered in the order given
    #[serde(default, deserialize_with = "nullable")]
    pub categories: Vec<Category>,
    /// Extra picks, only present after a recommendation refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    /// Anything else the backend sends along; kept untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Whether the room anthem can be offered for this result
    pub fn has_impression(&self) -> bool {
        !self.overall_impression.trim().is_empty()
    }
}

/// One thematic group of design tips
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Category {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub icon: CategoryIcon,
    #[serde(default, deserialize_with = "nullable")]
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// Icon key of a category
///
/// Unknown, missing or malformed keys all land on `Sparkles`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryIcon {
    Palette,
    Sofa,
    Lightbulb,
    #[default]
    Sparkles,
}

impl CategoryIcon {
    /// Resolve an icon key sent by the backend
    pub fn from_key(key: &str) -> Self {
        match key {
            "palette" => CategoryIcon::Palette,
            "sofa" => CategoryIcon::Sofa,
            "lightbulb" => CategoryIcon::Lightbulb,
            _ => CategoryIcon::Sparkles,
        }
    }

    /// Glyph used in place of an icon asset
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Palette => "🎨",
            CategoryIcon::Sofa => "🛋",
            CategoryIcon::Lightbulb => "💡",
            CategoryIcon::Sparkles => "✨",
        }
    }
}

impl<'de> Deserialize<'de> for CategoryIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(CategoryIcon::from_key)
            .unwrap_or_default())
    }
}

/// A suggested product; only used to build a shopping link
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Product {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
}

impl Product {
    /// Google Shopping search for this product (query falls back to the name)
    pub fn shop_url(&self) -> String {
        let query = self.search_query.as_deref().unwrap_or(&self.name);
        links::shop_url(query)
    }
}

/// Body of `POST /api/recommendations`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RecommendationsResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub products: Vec<Product>,
}

/// Quiz question identifiers, in the order they are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionId {
    Vibe,
    Priority,
    Budget,
}

/// Answers accumulated across the style quiz
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl QuizAnswers {
    pub fn set(&mut self, question: QuestionId, option: impl Into<String>) {
        let slot = match question {
            QuestionId::Vibe => &mut self.vibe,
            QuestionId::Priority => &mut self.priority,
            QuestionId::Budget => &mut self.budget,
        };
        *slot = Some(option.into());
    }

    pub fn is_empty(&self) -> bool {
        self.vibe.is_none() && self.priority.is_none() && self.budget.is_none()
    }
}

/// Body of `POST /api/quiz`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct QuizResponse {
    #[serde(default, deserialize_with = "non_empty")]
    pub style_tag: Option<String>,
}

/// What the user told us through the quiz, if anything
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleProfile {
    pub style_tag: Option<String>,
    pub answers: Option<QuizAnswers>,
}

impl StyleProfile {
    pub fn is_empty(&self) -> bool {
        self.style_tag.is_none() && self.answers.as_ref().map_or(true, QuizAnswers::is_empty)
    }

    /// Query parameters that tailor analysis and recommendations
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(answers) = &self.answers {
            let fields = [
                ("vibe", &answers.vibe),
                ("priority", &answers.priority),
                ("budget", &answers.budget),
            ];
            for (key, value) in fields {
                if let Some(value) = value {
                    pairs.push((key, value.clone()));
                }
            }
        }
        if let Some(tag) = &self.style_tag {
            pairs.push(("style_tag", tag.clone()));
        }
        pairs
    }
}

/// Body sent to `POST /api/vibe-song`
#[derive(Serialize, Debug)]
pub struct VibeSongRequest<'a> {
    pub overall_impression: &'a str,
    pub categories: &'a [Category],
}

/// Body returned by `POST /api/vibe-song`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SongResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub lyrics: String,
    pub audio_base64: String,
    #[serde(default, deserialize_with = "nullable")]
    pub format: String,
}

/// Body returned by `GET /api/health`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default)]
    pub openai_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_example_payload() {
        let json = r#"{
            "overall_impression": "Bright, airy space",
            "categories": [{
                "name": "Lighting",
                "icon": "lightbulb",
                "tips": ["Add a floor lamp"],
                "product": {"name": "Arc Lamp", "search_query": "arc floor lamp"}
            }]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.overall_impression, "Bright, airy space");
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].icon, CategoryIcon::Lightbulb);
        assert_eq!(result.categories[0].tips, vec!["Add a floor lamp"]);
        assert!(result.products.is_none());
    }

    #[test]
    fn test_unknown_icon_falls_back_to_sparkles() {
        let json = r#"[
            {"name": "A", "icon": "rocket"},
            {"name": "B"},
            {"name": "C", "icon": null},
            {"name": "D", "icon": 7},
            {"name": "E", "icon": "sofa"}
        ]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        let icons: Vec<_> = categories.iter().map(|c| c.icon).collect();
        assert_eq!(
            icons,
            vec![
                CategoryIcon::Sparkles,
                CategoryIcon::Sparkles,
                CategoryIcon::Sparkles,
                CategoryIcon::Sparkles,
                CategoryIcon::Sofa,
            ]
        );
    }

    #[test]
    fn test_null_fields_are_tolerated() {
        let json = r#"{"overall_impression": null, "categories": null, "mood": "calm"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.overall_impression.is_empty());
        assert!(result.categories.is_empty());
        assert!(!result.has_impression());
        assert_eq!(result.extra.get("mood"), Some(&Value::from("calm")));
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let json = r#"{"overall_impression": "x", "categories": [], "room_type": "bedroom"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["room_type"], "bedroom");
    }

    #[test]
    fn test_shop_url_prefers_search_query() {
        let product = Product {
            name: "Arc Lamp".to_string(),
            search_query: Some("arc floor lamp".to_string()),
            why: None,
        };
        assert_eq!(
            product.shop_url(),
            "https://www.google.com/search?tbm=shop&q=arc%20floor%20lamp"
        );
    }

    #[test]
    fn test_shop_url_falls_back_to_name() {
        let product: Product =
            serde_json::from_str(r#"{"name": "Linen Throw", "search_query": ""}"#).unwrap();
        assert!(product.search_query.is_none());
        assert_eq!(
            product.shop_url(),
            "https://www.google.com/search?tbm=shop&q=Linen%20Throw"
        );
    }

    #[test]
    fn test_style_profile_query_pairs() {
        let mut answers = QuizAnswers::default();
        answers.set(QuestionId::Vibe, "Cozy");
        answers.set(QuestionId::Budget, "Mid-range");
        let profile = StyleProfile {
            style_tag: Some("Hygge Haven".to_string()),
            answers: Some(answers),
        };

        assert_eq!(
            profile.query_pairs(),
            vec![
                ("vibe", "Cozy".to_string()),
                ("budget", "Mid-range".to_string()),
                ("style_tag", "Hygge Haven".to_string()),
            ]
        );
        assert!(StyleProfile::default().query_pairs().is_empty());
        assert!(StyleProfile::default().is_empty());
    }

    #[test]
    fn test_quiz_answers_serialize_as_mapping() {
        let mut answers = QuizAnswers::default();
        answers.set(QuestionId::Vibe, "Boho");
        answers.set(QuestionId::Priority, "Function");
        answers.set(QuestionId::Budget, "Splurge-worthy");
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"vibe": "Boho", "priority": "Function", "budget": "Splurge-worthy"})
        );
    }

    #[test]
    fn test_empty_style_tag_is_none() {
        let response: QuizResponse = serde_json::from_str(r#"{"style_tag": ""}"#).unwrap();
        assert!(response.style_tag.is_none());
        let response: QuizResponse = serde_json::from_str(r#"{"saved": true}"#).unwrap();
        assert!(response.style_tag.is_none());
    }
}
