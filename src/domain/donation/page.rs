//! Page data rendered by the host.
//!
//! The controller never draws anything; it emits these structures and the
//! host decides how to present them.

use serde::{Deserialize, Serialize};

use super::table::Table;
use crate::domain::foundation::{Progress, Translatable};

/// Page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub title: Translatable,
}

/// A questionnaire question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Question {
    MultipleChoiceCheckbox {
        id: u32,
        question: Translatable,
        choices: Vec<Translatable>,
    },
}

/// Kind-specific page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageBody {
    /// Ask the user for an export file.
    FilePrompt {
        description: Translatable,
        extensions: String,
    },
    /// Ask whether to try another file after an unrecognized submission.
    Confirm {
        text: Translatable,
        ok: Translatable,
        cancel: Translatable,
    },
    /// Consent form listing the tables that would be donated.
    DonationForm { tables: Vec<Table> },
    /// Follow-up questionnaire.
    Questionnaire {
        description: Translatable,
        questions: Vec<Question>,
    },
    /// Terminal page.
    End,
}

/// Discriminant of [`PageBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    FilePrompt,
    Confirm,
    DonationForm,
    Questionnaire,
    End,
}

impl PageKind {
    /// Returns true if the host must answer this page with a user reply.
    pub fn awaits_reply(&self) -> bool {
        !matches!(self, Self::End)
    }
}

impl PageBody {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::FilePrompt { .. } => PageKind::FilePrompt,
            Self::Confirm { .. } => PageKind::Confirm,
            Self::DonationForm { .. } => PageKind::DonationForm,
            Self::Questionnaire { .. } => PageKind::Questionnaire,
            Self::End => PageKind::End,
        }
    }
}

/// A full page: optional platform and header, body, and current progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    pub body: PageBody,
    pub progress: Progress,
}

impl Page {
    pub fn kind(&self) -> PageKind {
        self.body.kind()
    }

    /// Tables on a donation form page; empty for every other kind.
    pub fn tables(&self) -> &[Table] {
        match &self.body {
            PageBody::DonationForm { tables } => tables,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_end_page_does_not_await_reply() {
        assert!(PageKind::FilePrompt.awaits_reply());
        assert!(PageKind::Confirm.awaits_reply());
        assert!(PageKind::DonationForm.awaits_reply());
        assert!(PageKind::Questionnaire.awaits_reply());
        assert!(!PageKind::End.awaits_reply());
    }

    #[test]
    fn body_serializes_with_kebab_case_kind() {
        let page = Page {
            platform: None,
            header: None,
            body: PageBody::End,
            progress: Progress::HUNDRED,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["body"]["kind"], "end");
        assert_eq!(json["progress"], 100.0);
        assert!(json.get("platform").is_none());
    }

    #[test]
    fn question_serializes_with_kind_tag() {
        let q = Question::MultipleChoiceCheckbox {
            id: 1,
            question: Translatable::same("Which groups?"),
            choices: vec![Translatable::same("Chess club")],
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["kind"], "multiple-choice-checkbox");
        assert_eq!(json["choices"][0]["en"], "Chess club");
    }

    #[test]
    fn tables_is_empty_for_non_form_pages() {
        let page = Page {
            platform: Some("X".into()),
            header: None,
            body: PageBody::FilePrompt {
                description: Translatable::same("d"),
                extensions: "application/zip".into(),
            },
            progress: Progress::ZERO,
        };
        assert!(page.tables().is_empty());
        assert_eq!(page.kind(), PageKind::FilePrompt);
    }
}
