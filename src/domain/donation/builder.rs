//! Stateless constructors for pages and commands.
//!
//! Every label is built with English and Dutch variants.

use super::page::{Header, Page, PageBody, Question};
use super::protocol::OutboundCommand;
use super::table::Table;
use crate::domain::foundation::{Progress, Translatable};

/// Exit code for a completed session.
pub const EXIT_SUCCESS: i32 = 0;

/// Id of the group question on the follow-up questionnaire.
pub const GROUP_QUESTION_ID: u32 = 1;

/// Wraps a body in a donation page for `platform`.
pub fn render_donation_page(platform: &str, body: PageBody, progress: Progress) -> OutboundCommand {
    OutboundCommand::Render {
        page: Page {
            platform: Some(platform.to_string()),
            header: Some(Header {
                title: Translatable::same(platform),
            }),
            body,
            progress,
        },
    }
}

/// File prompt for a platform export.
pub fn prompt_file(extensions: &str, platform: &str) -> PageBody {
    PageBody::FilePrompt {
        description: Translatable::en_nl(
            format!(
                "Please follow the download instructions and choose the file you stored on \
                 your device. If you do not have a file from {platform}, click \
                 \u{201c}Skip\u{201d} at the bottom right."
            ),
            format!(
                "Volg de download instructies en kies het bestand dat u heeft opgeslagen op \
                 uw apparaat. Als u geen {platform} bestand heeft, klik dan op \
                 \u{201c}Overslaan\u{201d} rechts onder."
            ),
        ),
        extensions: extensions.to_string(),
    }
}

/// Retry question after an unrecognized file.
pub fn retry_confirmation(platform: &str) -> PageBody {
    PageBody::Confirm {
        text: Translatable::en_nl(
            format!(
                "Unfortunately, we could not process your {platform} file. \
                 If you are sure you selected the correct file, press Continue. \
                 To select a different file, press Try again."
            ),
            format!(
                "Helaas kunnen we uw {platform} bestand niet verwerken. \
                 Weet u zeker dat u het juiste bestand heeft gekozen? Ga dan verder. \
                 Probeer opnieuw als u een ander bestand wilt kiezen."
            ),
        ),
        ok: Translatable::en_nl("Try again", "Probeer opnieuw"),
        cancel: Translatable::en_nl("Continue", "Verder"),
    }
}

/// Consent form listing the extracted tables.
pub fn consent_form(tables: Vec<Table>) -> PageBody {
    PageBody::DonationForm { tables }
}

/// Questionnaire with one checkbox question listing every group.
pub fn checkbox_questionnaire(groups: &[String]) -> PageBody {
    let choices = groups.iter().map(Translatable::same).collect();
    PageBody::Questionnaire {
        description: Translatable::en_nl(
            "Below you will find a few questions about the data donation process",
            "Hieronder vindt u een paar vragen over het data donatie proces",
        ),
        questions: vec![Question::MultipleChoiceCheckbox {
            id: GROUP_QUESTION_ID,
            question: Translatable::en_nl(
                "Check all groups you identify yourself with",
                "Vink alle groepen aan waarmee u zich identificeert",
            ),
            choices,
        }],
    }
}

/// Questionnaire page for `platform`.
pub fn render_questionnaire_page(
    platform: &str,
    groups: &[String],
    progress: Progress,
) -> OutboundCommand {
    OutboundCommand::Render {
        page: Page {
            platform: Some(platform.to_string()),
            header: Some(Header {
                title: Translatable::en_nl("Questionnaire", "Vragenlijst"),
            }),
            body: checkbox_questionnaire(groups),
            progress,
        },
    }
}

pub fn render_end_page(progress: Progress) -> OutboundCommand {
    OutboundCommand::Render {
        page: Page {
            platform: None,
            header: None,
            body: PageBody::End,
            progress,
        },
    }
}

pub fn donate(key: impl Into<String>, payload: impl Into<String>) -> OutboundCommand {
    OutboundCommand::Donate {
        key: key.into(),
        payload: payload.into(),
    }
}

pub fn exit(code: i32, message: impl Into<String>) -> OutboundCommand {
    OutboundCommand::Exit {
        code,
        message: message.into(),
    }
}
