//! Quote extraction.
//!
//! Version 1 quotes are inlined into the text body:
//!
//! ```text
//! > ABCDEFGH: Quoted text
//! > Quoted text ctd.
//!
//! Body text
//! ```
//!
//! Version 2 quotes reference the quoted message by its protocol id.

use std::sync::LazyLock;

use regex::Regex;

use crate::builder::MsgpackObjectBuilder;
use crate::error::Result;
use crate::model::{MessageModel, MessageType, Receiver};
use crate::services::ConversionContext;

use super::message::{self, DetailLevel};

const IDENTITY: &str = "identity";
const TEXT: &str = "text";
const MESSAGE: &str = "message";

const QUOTE_PREFIX: &str = "> ";

pub const QUOTE_NOT_FOUND: &str = "The quoted message could not be found";
pub const QUOTED_MESSAGE_DELETED: &str = "The quoted message has been deleted";

const V1_HEADER_PATTERN: &str = r"\A> ([A-Z0-9*]{8}): ";

static V1_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(V1_HEADER_PATTERN).expect("v1 quote header pattern is valid"));

/// What a message quotes, and its body without the quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteContent {
    /// Author of the quoted text; absent for unresolvable quotes.
    pub identity: Option<String>,
    pub quoted_text: String,
    pub body: Option<String>,
    /// The resolved quoted message (version 2 only).
    pub quoted_message: Option<MessageModel>,
}

/// Splits a version 1 quote off `text`.
///
/// The quote ends at the first line that is non-empty up to the end of the
/// text and does not continue the `> ` prefix.
pub fn parse_v1(text: &str) -> Option<QuoteContent> {
    let header = V1_HEADER.captures(text)?;
    let identity = header.get(1)?.as_str();
    let quoted_start = header.get(0)?.end();

    let body_start = text[quoted_start..]
        .match_indices('\n')
        .map(|(offset, _)| quoted_start + offset + 1)
        .find(|&line_start| {
            let rest = &text[line_start..];
            !rest.is_empty() && !rest.starts_with(QUOTE_PREFIX)
        })?;

    let quoted_text = text[quoted_start..body_start]
        .replace("\n> ", "\n")
        .trim()
        .to_owned();
    Some(QuoteContent {
        identity: Some(identity.to_owned()),
        quoted_text,
        body: Some(text[body_start..].trim().to_owned()),
        quoted_message: None,
    })
}

fn resolve_v2(
    ctx: &ConversionContext<'_>,
    message: &MessageModel,
    receiver: &Receiver,
    quoted_message_id: &str,
) -> Result<QuoteContent> {
    let services = &ctx.services;
    let body = message.body.clone();
    let unresolved = |placeholder: &str| QuoteContent {
        identity: None,
        quoted_text: placeholder.to_owned(),
        body: body.clone(),
        quoted_message: None,
    };

    let Some(quoted) = services.messages.by_api_message_id(quoted_message_id, receiver)? else {
        return Ok(unresolved(QUOTED_MESSAGE_DELETED));
    };
    if !quoted.same_conversation(message) {
        return Ok(unresolved(QUOTE_NOT_FOUND));
    }

    let view = services.messages.view_element(&quoted)?;
    let quoted_text = view
        .text
        .filter(|text| !text.is_empty())
        .or(view.placeholder)
        .unwrap_or_default();
    let identity = if quoted.is_outbox {
        Some(services.user.identity()?)
    } else {
        quoted.identity.clone()
    };
    Ok(QuoteContent {
        identity,
        quoted_text,
        body,
        quoted_message: Some(quoted),
    })
}

/// Extracts the quote of `message`, if any.
pub fn content(
    ctx: &ConversionContext<'_>,
    message: &MessageModel,
    receiver: &Receiver,
) -> Result<Option<QuoteContent>> {
    if let Some(quoted_message_id) = message.quoted_message_id.as_deref() {
        return resolve_v2(ctx, message, receiver, quoted_message_id).map(Some);
    }
    if message.message_type != MessageType::Text {
        return Ok(None);
    }
    Ok(message
        .body
        .as_deref()
        .filter(|body| !body.is_empty())
        .and_then(parse_v1))
}

/// `{identity?, text, message?}`; the quoted message is embedded without its own quote.
pub fn convert(
    ctx: &ConversionContext<'_>,
    content: &QuoteContent,
    receiver: &Receiver,
) -> Result<MsgpackObjectBuilder> {
    let quoted_message = content
        .quoted_message
        .as_ref()
        .map(|quoted| message::convert(ctx, quoted, receiver, false, DetailLevel::NoQuote))
        .transpose()?;
    Ok(MsgpackObjectBuilder::new()
        .maybe_put(IDENTITY, content.identity.as_deref())
        .put(TEXT, content.quoted_text.as_str())
        .maybe_put(MESSAGE, quoted_message))
}
