use serde::{Deserialize, Serialize};

/// A value inside a knowledge category: either a single descriptive text
/// or an ordered list of fact strings. Only lists are searchable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Text(String),
    List(Vec<String>),
}

/// One topic category: a named, ordered set of entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub entries: Vec<(String, FactValue)>,
}

impl Category {
    pub fn new(name: &str, entries: Vec<(String, FactValue)>) -> Self {
        Self {
            name: name.to_string(),
            entries,
        }
    }
}

/// The static fact corpus about the palace, grouped by topic.
/// Built once at startup and injected into the response engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    categories: Vec<Category>,
}

fn text(key: &str, value: &str) -> (String, FactValue) {
    (key.to_string(), FactValue::Text(value.to_string()))
}

fn list(key: &str, values: &[&str]) -> (String, FactValue) {
    (
        key.to_string(),
        FactValue::List(values.iter().map(|v| v.to_string()).collect()),
    )
}

impl KnowledgeBase {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The built-in corpus about Rajvant Palace, Rajpipla.
    pub fn palace_default() -> Self {
        Self::new(vec![
            Category::new(
                "history",
                vec![
                    text(
                        "overview",
                        "Rajvant Palace stands in Rajpipla, Gujarat, seat of the Gohil Rajput dynasty for over six centuries.",
                    ),
                    list(
                        "milestones",
                        &[
                            "Rajvant Palace was built in 1915 by Maharana Chhatra Singhji of the Gohil dynasty.",
                            "The Gohil Rajputs ruled the princely state of Rajpipla from the fourteenth century until Indian independence in 1947.",
                            "Maharaja Vijaysinhji, the last ruling maharaja, owned Windsor Lad, the racehorse that won the 1934 Epsom Derby.",
                            "Vijaysinhji remains the only Indian owner ever to win the Epsom Derby, a victory still celebrated in Rajpipla.",
                            "The palace hosted viceroys, visiting princes and film crews through the twentieth century.",
                        ],
                    ),
                ],
            ),
            Category::new(
                "architecture",
                vec![
                    text(
                        "overview",
                        "The palace is a European classical building rare for this part of Gujarat.",
                    ),
                    list(
                        "features",
                        &[
                            "The facade blends Corinthian columns, Gothic arches and a grand Romanesque dome.",
                            "Victorian furniture, Belgian cut-glass chandeliers and Italian marble floors furnish the state rooms.",
                            "The durbar hall has a gilded ceiling, stained-glass windows and the original royal throne.",
                            "Sprawling lawns and a riverside garden on the Karjan river surround the building.",
                        ],
                    ),
                ],
            ),
            Category::new(
                "culture",
                vec![
                    text(
                        "overview",
                        "Rajpipla's court culture mixed Rajput tradition with a cosmopolitan royal household.",
                    ),
                    list(
                        "traditions",
                        &[
                            "Holi and Navratri were celebrated at the palace with processions through Rajpipla town.",
                            "The royal kitchen was known for Kathiawadi cuisine served at state banquets.",
                            "Court musicians performed dhrupad and folk garba in the durbar hall on festival evenings.",
                        ],
                    ),
                ],
            ),
            Category::new(
                "daily_life",
                vec![
                    text(
                        "overview",
                        "Royal daily life at Rajvant Palace followed a rhythm of audiences, sport and ceremony.",
                    ),
                    list(
                        "royal_routine",
                        &[
                            "Mornings began with a public audience where townspeople could petition the maharaja directly.",
                            "The royal stables kept polo ponies and thoroughbreds, and afternoons were given to riding.",
                            "Evenings brought formal banquets in the dining hall, with the household staff numbering over a hundred.",
                        ],
                    ),
                ],
            ),
            Category::new(
                "current_status",
                vec![
                    text(
                        "overview",
                        "The palace remains with the royal family and is open to visitors year round.",
                    ),
                    list(
                        "today",
                        &[
                            "The palace operates today as the Rajvant Palace Resort, a heritage hotel run by the royal family.",
                            "It is a sought-after film shooting location and has appeared in many Hindi films and television serials.",
                            "Rajpipla is a gateway to the Statue of Unity, about an hour's drive from the palace gates.",
                        ],
                    ),
                ],
            ),
            Category::new(
                "site_features",
                vec![
                    text(
                        "overview",
                        "On-site services help visitors explore the palace at their own pace.",
                    ),
                    list(
                        "visitor_services",
                        &[
                            "The audio tour offers narration in English, Hindi and Gujarati through every wing of the palace.",
                            "The virtual tour provides a 360-degree walkthrough of the durbar hall and galleries.",
                            "The photo archive preserves restored photographs from the royal collection, including the 1934 Derby celebrations.",
                            "Guided visits run daily from 9 am to 6 pm, with the last entry an hour before closing.",
                        ],
                    ),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_corpus_has_all_topic_categories() {
        let kb = KnowledgeBase::palace_default();
        for name in [
            "history",
            "architecture",
            "culture",
            "daily_life",
            "current_status",
            "site_features",
        ] {
            assert!(kb.category(name).is_some(), "missing category {name}");
        }
    }

    #[test]
    fn categories_keep_declaration_order() {
        let kb = KnowledgeBase::palace_default();
        let names: Vec<&str> = kb.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names[0], "history");
        assert_eq!(names[names.len() - 1], "site_features");
    }

    #[test]
    fn unknown_category_is_none() {
        let kb = KnowledgeBase::palace_default();
        assert!(kb.category("astronomy").is_none());
    }
}
