//! Output data model for the two compiled dictionaries.
use indexmap::IndexMap;
use serde::Serialize;

/// word → part of speech → pronunciation + senses.
pub type LemmaDict = IndexMap<String, IndexMap<String, LemmaInfo>>;

/// part of speech → grammatical label strings.
pub type PosLabels = IndexMap<String, Vec<String>>;

/// surface form → lemma → [PosLabels].
pub type FormDict = IndexMap<String, IndexMap<String, PosLabels>>;

/// Raw morphological table data: surface form → lemma → pos → tag strings.
/// Same shape as [FormDict] but collected from the `forms` field, used only
/// to gap-fill the deinflection table.
pub type AutomatedForms = FormDict;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LemmaInfo {
    pub ipa: Vec<IpaInfo>,
    pub senses: Vec<OutputSense>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpaInfo {
    pub ipa: String,
    pub tags: Vec<String>,
}

/// One finalized sense of a lemma.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputSense {
    pub glosses: Vec<Gloss>,
    pub tags: Vec<String>,
}

/// A gloss is either plain text or a rendered outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Gloss {
    Text(String),
    Structured(Vec<ContentNode>),
}

/// One node of a rendered outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    pub kind: NodeKind,
    pub list_type: ListType,
    pub indent: usize,
    pub content: NodeContent,
}

impl ContentNode {
    pub fn item(list_type: ListType, indent: usize, text: String) -> Self {
        Self {
            kind: NodeKind::ListItem,
            list_type,
            indent,
            content: NodeContent::Text(text),
        }
    }

    pub fn container(indent: usize, children: Vec<ContentNode>) -> Self {
        Self {
            kind: NodeKind::ListContainer,
            list_type: ListType::Ol,
            indent,
            content: NodeContent::Children(children),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "list-container")]
    ListContainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Li,
    Number,
    Ol,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeContent {
    Text(String),
    Children(Vec<ContentNode>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gloss_serialization_shapes() {
        let flat = Gloss::Text("a red fruit".to_string());
        assert_eq!(serde_json::to_value(&flat).unwrap(), json!("a red fruit"));

        let nested = Gloss::Structured(vec![
            ContentNode::item(ListType::Li, 1, "fruit".to_string()),
            ContentNode::container(
                2,
                vec![ContentNode::item(ListType::Li, 2, "1. a red fruit".to_string())],
            ),
        ]);
        assert_eq!(
            serde_json::to_value(&nested).unwrap(),
            json!([
                {
                    "kind": "list-item",
                    "listType": "li",
                    "indent": 1,
                    "content": "fruit"
                },
                {
                    "kind": "list-container",
                    "listType": "ol",
                    "indent": 2,
                    "content": [
                        {
                            "kind": "list-item",
                            "listType": "li",
                            "indent": 2,
                            "content": "1. a red fruit"
                        }
                    ]
                }
            ])
        );
    }

    #[test]
    fn lemma_info_serialization() {
        let info = LemmaInfo {
            ipa: vec![IpaInfo {
                ipa: "/ɹʌn/".to_string(),
                tags: vec!["UK".to_string()],
            }],
            senses: vec![OutputSense {
                glosses: vec![Gloss::Text("to move quickly".to_string())],
                tags: vec![],
            }],
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "ipa": [{"ipa": "/ɹʌn/", "tags": ["UK"]}],
                "senses": [{"glosses": ["to move quickly"], "tags": []}]
            })
        );
    }
}
