use serde::Serialize;

use crate::knowledge::KnowledgeBase;
use crate::matcher::find_matches;

/// Reply produced for a single query: a message plus up to six curated
/// follow-up suggestions. Transient, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatbotResponse {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// One entry of the curated conversation-topic taxonomy shown to visitors.
#[derive(Debug, Clone, Serialize)]
pub struct TopicGroup {
    pub category: &'static str,
    pub topics: &'static [&'static str],
    pub color_tag: &'static str,
}

type Handler = fn(&str, &KnowledgeBase) -> ChatbotResponse;

/// A guard in the decision list: the rule fires when the lowercased query
/// contains any trigger phrase as a literal substring.
struct Rule {
    name: &'static str,
    triggers: &'static [&'static str],
    handler: Handler,
}

/// First-match-wins decision list over keyword guards.
///
/// Rules are evaluated strictly in declaration order; the first guard whose
/// trigger appears in the query selects the handler, even when a later
/// guard would also match. Reordering the table changes behavior for
/// queries containing several trigger phrases.
pub struct ResponseEngine {
    knowledge: KnowledgeBase,
    rules: Vec<Rule>,
}

const QUICK_QUESTIONS: &[&str] = &[
    "What is the audio tour?",
    "How was the palace built?",
    "Who won the 1934 Epsom Derby?",
    "Can I stay at the palace?",
    "What are the visiting hours?",
    "How do I reach Rajpipla?",
];

impl ResponseEngine {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            rules: rule_table(),
        }
    }

    /// Selects the reply for a free-text query. Stateless: nothing from
    /// earlier turns influences the match.
    pub fn get_response(&self, query: &str) -> ChatbotResponse {
        let lowered = query.to_lowercase();
        for rule in &self.rules {
            if rule.triggers.iter().any(|t| lowered.contains(t)) {
                log::debug!("query matched rule '{}'", rule.name);
                return (rule.handler)(query, &self.knowledge);
            }
        }
        log::debug!("query matched no rule, using default response");
        Self::default_response()
    }

    pub fn quick_questions() -> &'static [&'static str] {
        QUICK_QUESTIONS
    }

    pub fn conversation_topics() -> Vec<TopicGroup> {
        vec![
            TopicGroup {
                category: "History & Heritage",
                topics: &[
                    "The Gohil dynasty",
                    "Building of the palace in 1915",
                    "Windsor Lad and the 1934 Epsom Derby",
                ],
                color_tag: "amber",
            },
            TopicGroup {
                category: "Architecture",
                topics: &[
                    "European classical facade",
                    "The durbar hall",
                    "Gardens on the Karjan river",
                ],
                color_tag: "stone",
            },
            TopicGroup {
                category: "Culture & Festivals",
                topics: &["Holi and Navratri at court", "Kathiawadi royal cuisine"],
                color_tag: "rose",
            },
            TopicGroup {
                category: "Royal Daily Life",
                topics: &["Morning audiences", "The royal stables"],
                color_tag: "emerald",
            },
            TopicGroup {
                category: "The Palace Today",
                topics: &[
                    "Heritage resort",
                    "Film shooting location",
                    "Statue of Unity nearby",
                ],
                color_tag: "sky",
            },
            TopicGroup {
                category: "Plan Your Visit",
                topics: &["Audio and virtual tours", "Timings and entry", "Reaching Rajpipla"],
                color_tag: "indigo",
            },
        ]
    }

    pub fn default_response() -> ChatbotResponse {
        reply(
            "I can tell you about the palace's history, architecture, royal culture and \
             visitor facilities. Try asking about the audio tour, the Gohil dynasty or \
             the 1934 Epsom Derby."
                .to_string(),
            &[
                "What is the audio tour?",
                "Tell me about the palace history",
                "Who were the Gohil dynasty?",
                "Can I stay at the palace?",
            ],
        )
    }
}

fn reply(message: String, suggestions: &[&str]) -> ChatbotResponse {
    ChatbotResponse {
        message,
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

/// First matched fact of a category for this query, if any.
fn first_fact<'a>(query: &str, kb: &'a KnowledgeBase, category: &str) -> Option<&'a str> {
    kb.category(category)
        .and_then(|c| find_matches(query, c).first().copied())
}

/// The ordered guard table. Declaration order is load-bearing: "audio tour"
/// must fire before "architecture" for a query containing both, so keep
/// specific visitor-service rules ahead of the broad topic rules.
fn rule_table() -> Vec<Rule> {
    vec![
        Rule {
            name: "greeting",
            triggers: &["hello", "namaste", "greetings", "good morning", "good afternoon"],
            handler: greet,
        },
        Rule {
            name: "audio_tour",
            triggers: &["audio tour", "audio guide", "narration", "headphones"],
            handler: audio_tour,
        },
        Rule {
            name: "virtual_tour",
            triggers: &["virtual tour", "virtual", "360"],
            handler: virtual_tour,
        },
        Rule {
            name: "photo_archive",
            triggers: &["photo", "gallery", "picture", "image", "archive"],
            handler: photo_archive,
        },
        Rule {
            name: "epsom_derby",
            triggers: &["epsom", "derby", "windsor lad", "racehorse", "horse"],
            handler: epsom_derby,
        },
        Rule {
            name: "gohil_dynasty",
            triggers: &["gohil", "dynasty", "rajput"],
            handler: gohil_dynasty,
        },
        Rule {
            name: "maharaja",
            triggers: &["vijaysinhji", "maharaja", "maharana", "chhatra singhji"],
            handler: maharaja,
        },
        Rule {
            name: "history",
            triggers: &["history", "built", "founded", "past", "origin"],
            handler: history,
        },
        Rule {
            name: "architecture",
            triggers: &["architecture", "design", "dome", "column", "arch", "marble", "chandelier"],
            handler: architecture,
        },
        Rule {
            name: "culture",
            triggers: &["culture", "festival", "tradition", "music", "cuisine", "food", "garba"],
            handler: culture,
        },
        Rule {
            name: "daily_life",
            triggers: &["daily life", "royal life", "lifestyle", "routine", "everyday"],
            handler: daily_life,
        },
        Rule {
            name: "resort_stay",
            triggers: &["resort", "hotel", "stay", "accommodation", "room", "booking", "night"],
            handler: resort_stay,
        },
        Rule {
            name: "visiting",
            triggers: &["visit", "timing", "hours", "open", "ticket", "entry", "price"],
            handler: visiting,
        },
        Rule {
            name: "location",
            triggers: &["location", "reach", "direction", "address", "rajpipla", "where"],
            handler: location,
        },
        Rule {
            name: "current_status",
            triggers: &["current", "today", "film", "shooting", "statue of unity", "status"],
            handler: current_status,
        },
        Rule {
            name: "thanks",
            triggers: &["thank"],
            handler: thanks,
        },
    ]
}

fn greet(_query: &str, _kb: &KnowledgeBase) -> ChatbotResponse {
    reply(
        "Namaste! Welcome to Rajvant Palace. I can help you explore the palace's history, \
         its architecture and everything you need to plan a visit."
            .to_string(),
        &[
            "What is the audio tour?",
            "Tell me about the palace history",
            "What are the visiting hours?",
        ],
    )
}

fn audio_tour(_query: &str, _kb: &KnowledgeBase) -> ChatbotResponse {
    reply(
        "The audio tour takes you through the palace with multi-language narration in \
         English, Hindi and Gujarati, covering the durbar hall, the royal chambers and \
         the gardens at your own pace."
            .to_string(),
        &[
            "How do I start the audio tour?",
            "Which languages does the narration cover?",
            "How long does the audio tour take?",
        ],
    )
}

fn virtual_tour(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "site_features") {
        Some(fact) => format!("{fact} It works on any phone or desktop browser."),
        None => "The virtual tour offers a 360-degree walkthrough of the durbar hall and \
                 galleries from any phone or desktop browser."
            .to_string(),
    };
    reply(
        message,
        &[
            "How do I open the virtual tour?",
            "What is the audio tour?",
            "Show me the photo archive",
        ],
    )
}

fn photo_archive(_query: &str, _kb: &KnowledgeBase) -> ChatbotResponse {
    reply(
        "The photo archive holds restored photographs from the royal collection, from \
         early durbar portraits to the 1934 Derby celebrations, organised by decade."
            .to_string(),
        &[
            "Show me photos of the durbar hall",
            "Are there photos of Windsor Lad?",
            "Tell me about the palace history",
        ],
    )
}

fn epsom_derby(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "history") {
        Some(fact) => format!(
            "{fact} The trophy and photographs from that season are displayed in the \
             palace galleries."
        ),
        None => "Windsor Lad, owned by Maharaja Vijaysinhji of Rajpipla, won the 1934 \
                 Epsom Derby, the only Derby victory ever by an Indian owner."
            .to_string(),
    };
    reply(
        message,
        &[
            "Who was Maharaja Vijaysinhji?",
            "Are there photos of Windsor Lad?",
            "Tell me about the royal stables",
        ],
    )
}

fn gohil_dynasty(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "history") {
        Some(fact) => fact.to_string(),
        None => "The Gohil Rajput dynasty ruled the princely state of Rajpipla for over \
                 six centuries, building Rajvant Palace as its twentieth-century seat."
            .to_string(),
    };
    reply(
        message,
        &[
            "How was the palace built?",
            "Who won the 1934 Epsom Derby?",
            "What was royal daily life like?",
        ],
    )
}

fn maharaja(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "history") {
        Some(fact) => fact.to_string(),
        None => "Maharaja Vijaysinhji was the last ruling maharaja of Rajpipla, remembered \
                 for his racing stable and for Windsor Lad's 1934 Epsom Derby victory."
            .to_string(),
    };
    reply(
        message,
        &[
            "Who won the 1934 Epsom Derby?",
            "Who were the Gohil dynasty?",
            "What was royal daily life like?",
        ],
    )
}

fn history(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "history") {
        Some(fact) => fact.to_string(),
        None => "Rajvant Palace was built in 1915 by Maharana Chhatra Singhji and remained \
                 the seat of the Gohil dynasty until Indian independence."
            .to_string(),
    };
    reply(
        message,
        &[
            "Who were the Gohil dynasty?",
            "Tell me about the architecture",
            "Who won the 1934 Epsom Derby?",
        ],
    )
}

fn architecture(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "architecture") {
        Some(fact) => fact.to_string(),
        None => "The palace blends Corinthian columns, Gothic arches and a grand Romanesque \
                 dome, furnished with Victorian and Belgian pieces throughout."
            .to_string(),
    };
    reply(
        message,
        &[
            "Tell me about the durbar hall",
            "Can I see the palace gardens?",
            "What is the virtual tour?",
        ],
    )
}

fn culture(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "culture") {
        Some(fact) => fact.to_string(),
        None => "Court life at Rajpipla mixed Rajput tradition with a cosmopolitan royal \
                 household, from festival processions to state banquets."
            .to_string(),
    };
    reply(
        message,
        &[
            "What festivals were celebrated here?",
            "What was royal daily life like?",
            "Tell me about the palace history",
        ],
    )
}

fn daily_life(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "daily_life") {
        Some(fact) => fact.to_string(),
        None => "Royal daily life at the palace moved between morning audiences, afternoons \
                 at the stables and formal banquets in the evening."
            .to_string(),
    };
    reply(
        message,
        &[
            "Tell me about the royal stables",
            "What festivals were celebrated here?",
            "Who was Maharaja Vijaysinhji?",
        ],
    )
}

fn resort_stay(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "current_status") {
        Some(fact) => format!("{fact} Rooms can be booked directly with the resort office."),
        None => "The palace operates as the Rajvant Palace Resort, a heritage hotel run by \
                 the royal family, and rooms can be booked directly with the resort office."
            .to_string(),
    };
    reply(
        message,
        &[
            "What are the visiting hours?",
            "How do I reach Rajpipla?",
            "What is there to see nearby?",
        ],
    )
}

fn visiting(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "site_features") {
        Some(fact) => fact.to_string(),
        None => "Guided visits run daily from 9 am to 6 pm, with the last entry an hour \
                 before closing."
            .to_string(),
    };
    reply(
        message,
        &[
            "How do I reach Rajpipla?",
            "Can I stay at the palace?",
            "What is the audio tour?",
        ],
    )
}

fn location(_query: &str, _kb: &KnowledgeBase) -> ChatbotResponse {
    reply(
        "The palace stands on the banks of the Karjan river in Rajpipla, Gujarat, about \
         90 minutes from Vadodara by road and an hour from the Statue of Unity."
            .to_string(),
        &[
            "What are the visiting hours?",
            "Can I stay at the palace?",
            "What is there to see nearby?",
        ],
    )
}

fn current_status(query: &str, kb: &KnowledgeBase) -> ChatbotResponse {
    let message = match first_fact(query, kb, "current_status") {
        Some(fact) => fact.to_string(),
        None => "The palace remains with the royal family, operating as a heritage resort \
                 and a popular film shooting location."
            .to_string(),
    };
    reply(
        message,
        &[
            "Can I stay at the palace?",
            "Which films were shot here?",
            "How do I reach Rajpipla?",
        ],
    )
}

fn thanks(_query: &str, _kb: &KnowledgeBase) -> ChatbotResponse {
    reply(
        "You are most welcome. Is there anything else about the palace I can help with?"
            .to_string(),
        &["What is the audio tour?", "What are the visiting hours?"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ResponseEngine {
        ResponseEngine::new(KnowledgeBase::palace_default())
    }

    #[test]
    fn audio_tour_query_mentions_narration() {
        let resp = engine().get_response("Tell me about the audio tour");
        assert!(resp.message.contains("multi-language narration"));
        assert!(resp
            .suggestions
            .iter()
            .any(|s| s == "How do I start the audio tour?"));
    }

    #[test]
    fn epsom_derby_query_mentions_windsor_lad() {
        let resp = engine().get_response("epsom derby");
        assert!(resp.message.contains("Windsor Lad"));
        assert!(resp.message.contains("1934"));
    }

    #[test]
    fn unmatched_query_gets_default_response() {
        let resp = engine().get_response("xyzzy nonsense query");
        assert_eq!(resp, ResponseEngine::default_response());
    }

    #[test]
    fn empty_query_gets_default_response() {
        let resp = engine().get_response("");
        assert_eq!(resp, ResponseEngine::default_response());
    }

    #[test]
    fn declaration_order_breaks_trigger_ties() {
        let engine = engine();
        // Contains both the audio-tour and the architecture trigger; the
        // earlier rule must win.
        let both = engine.get_response("audio tour architecture");
        let audio_only = engine.get_response("audio tour");
        assert_eq!(both, audio_only);
    }

    #[test]
    fn derby_rule_wins_over_later_history_rule() {
        let resp = engine().get_response("derby history");
        assert!(resp.message.contains("Windsor Lad"));
    }

    #[test]
    fn guard_matching_is_case_insensitive() {
        let engine = engine();
        assert_eq!(
            engine.get_response("EPSOM DERBY"),
            engine.get_response("epsom derby")
        );
    }

    #[test]
    fn quick_questions_are_fixed_and_lead_with_audio_tour() {
        let questions = ResponseEngine::quick_questions();
        assert!(!questions.is_empty());
        assert_eq!(questions[0], "What is the audio tour?");
    }

    #[test]
    fn every_quick_question_escapes_the_default_response() {
        let engine = engine();
        let default = ResponseEngine::default_response();
        for question in ResponseEngine::quick_questions() {
            let resp = engine.get_response(question);
            assert_ne!(resp.message, default.message, "no rule for {question:?}");
        }
    }

    #[test]
    fn suggestions_stay_within_bounds() {
        let engine = engine();
        for query in [
            "hello",
            "audio tour",
            "virtual tour",
            "photo archive",
            "epsom derby",
            "gohil",
            "maharaja",
            "history",
            "architecture",
            "festival",
            "daily life",
            "resort",
            "visiting hours",
            "where is the palace",
            "film shooting",
            "thank you",
            "no trigger here at all",
        ] {
            let resp = engine.get_response(query);
            assert!(resp.suggestions.len() <= 6, "too many suggestions for {query:?}");
        }
    }

    #[test]
    fn conversation_topics_are_non_empty() {
        let groups = ResponseEngine::conversation_topics();
        assert!(!groups.is_empty());
        for group in groups {
            assert!(!group.topics.is_empty(), "empty group {}", group.category);
            assert!(!group.color_tag.is_empty());
        }
    }

    #[test]
    fn alternate_knowledge_base_feeds_interpolation() {
        let kb = KnowledgeBase::new(vec![crate::knowledge::Category::new(
            "history",
            vec![(
                "milestones".to_string(),
                crate::knowledge::FactValue::List(vec![
                    "A test fact about the derby season.".to_string(),
                ]),
            )],
        )]);
        let resp = ResponseEngine::new(kb).get_response("derby");
        assert!(resp.message.starts_with("A test fact about the derby season."));
    }
}
