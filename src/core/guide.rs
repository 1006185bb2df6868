//! Scripted visitor guide.
//!
//! Messages are matched against an ordered list of keyword predicates; the
//! first predicate that fires selects the reply. Monastery names from the
//! catalog are checked before the general topics.

use serde::Serialize;

use crate::core::catalog::Catalog;
use crate::domain::model::MonasteryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    MonasteryInfo,
    BestTimeToVisit,
    Etiquette,
    Meditation,
    Traditions,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuideAction {
    ViewMonastery { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideReply {
    pub topic: Topic,
    pub message: String,
    pub action: Option<GuideAction>,
}

impl GuideReply {
    fn text(topic: Topic, message: impl Into<String>) -> Self {
        Self {
            topic,
            message: message.into(),
            action: None,
        }
    }
}

struct KeywordRule {
    keywords: &'static [&'static str],
    topic: Topic,
}

impl KeywordRule {
    fn fires(&self, message: &str) -> bool {
        self.keywords.iter().any(|k| message.contains(*k))
    }
}

// 順序即優先權
const TOPIC_RULES: [KeywordRule; 4] = [
    KeywordRule {
        keywords: &["visit", "time", "when"],
        topic: Topic::BestTimeToVisit,
    },
    KeywordRule {
        keywords: &["dress", "wear", "guidelines"],
        topic: Topic::Etiquette,
    },
    KeywordRule {
        keywords: &["meditation", "practice", "buddhist"],
        topic: Topic::Meditation,
    },
    KeywordRule {
        keywords: &["monastery", "monasteries"],
        topic: Topic::Traditions,
    },
];

const GREETING: &str = "Namaste! I am your monastery guide. Ask me about a monastery, \
    the best time to visit, how to dress, or Buddhist practice.";

const BEST_TIME: &str = "The best time to visit is October to March, when the skies are clear \
    and the mountain views are open. Early morning visits often coincide with prayer sessions.";

const ETIQUETTE: &str = "Dress modestly and remove your shoes before entering prayer halls. \
    Keep silent during prayers and follow the guidance of the monastery staff.";

const MEDITATION: &str = "Buddhist meditation centres on mindfulness and compassion. Many \
    monasteries offer sessions for visitors, and the quiet surroundings invite contemplation.";

const FALLBACK: &str = "Could you rephrase your question? I can help with the monasteries in \
    the catalog, visiting guidelines, Buddhist practice and the best time to travel.";

#[derive(Debug, Clone, Copy)]
pub struct Guide<'a> {
    catalog: &'a Catalog,
}

impl<'a> Guide<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn greeting(&self) -> GuideReply {
        GuideReply::text(Topic::Greeting, GREETING)
    }

    /// Returns `None` for blank input.
    pub fn reply(&self, message: &str) -> Option<GuideReply> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        let lower = message.to_lowercase();

        if let Some(record) = self.mentioned_monastery(&lower) {
            tracing::debug!("Guide matched monastery '{}'", record.id);
            return Some(monastery_reply(record));
        }

        let reply = match TOPIC_RULES.iter().find(|rule| rule.fires(&lower)) {
            Some(rule) => self.topic_reply(rule.topic),
            None => GuideReply::text(Topic::Fallback, FALLBACK),
        };
        tracing::debug!("Guide answered with {:?}", reply.topic);
        Some(reply)
    }

    fn mentioned_monastery(&self, lower: &str) -> Option<&'a MonasteryRecord> {
        let message_words: Vec<&str> = words(lower).collect();
        self.catalog.records().iter().find(|record| {
            leading_token(&record.name).map_or(false, |token| message_words.contains(&token.as_str()))
        })
    }

    fn topic_reply(&self, topic: Topic) -> GuideReply {
        match topic {
            Topic::BestTimeToVisit => GuideReply::text(topic, BEST_TIME),
            Topic::Etiquette => GuideReply::text(topic, ETIQUETTE),
            Topic::Meditation => GuideReply::text(topic, MEDITATION),
            Topic::Traditions => GuideReply::text(topic, self.traditions_overview()),
            Topic::Greeting => self.greeting(),
            Topic::MonasteryInfo | Topic::Fallback => GuideReply::text(Topic::Fallback, FALLBACK),
        }
    }

    fn traditions_overview(&self) -> String {
        let mut seen: Vec<(&str, &str)> = Vec::new();
        for record in self.catalog.records() {
            if record.tradition.is_empty() || seen.iter().any(|(t, _)| *t == record.tradition) {
                continue;
            }
            seen.push((record.tradition.as_str(), record.name.as_str()));
        }

        if seen.is_empty() {
            return "Each monastery has its own character and lineage.".to_string();
        }
        let parts: Vec<String> = seen
            .iter()
            .map(|(tradition, name)| format!("{} follows the {} tradition", name, tradition))
            .collect();
        format!("Each monastery has its own character. {}.", parts.join("; "))
    }
}

// 名稱開頭若是這些字，不視為提到某座寺院
const NAME_STOP_WORDS: [&str; 5] = ["the", "old", "new", "holy", "sacred"];

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn leading_token(name: &str) -> Option<String> {
    words(name)
        .next()
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() > 2 && !NAME_STOP_WORDS.contains(&token.as_str()))
}

fn monastery_reply(record: &MonasteryRecord) -> GuideReply {
    let message = [&record.description, &record.history, &record.significance]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    GuideReply {
        topic: Topic::MonasteryInfo,
        message: if message.is_empty() {
            record.name.clone()
        } else {
            message
        },
        action: Some(GuideAction::ViewMonastery {
            id: record.id.clone(),
        }),
    }
}
