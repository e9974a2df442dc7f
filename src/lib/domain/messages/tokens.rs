//! Token substitution
//!
//! Each message part is rewritten by an ordered table of token rules. More
//! specific forms come first so that the bare identifier fallback cannot eat
//! the markup around a `renderfield` label before it is matched.

use regex::{NoExpand, Regex};
use tracing::warn;

use crate::domain::forms::{FieldMetadata, SubmittedField};

use super::MessageDraft;

/// Which value a token is replaced with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ValueSource {
    /// Sanitized and formatted display value
    Formatted,

    /// Value exactly as submitted
    Raw,
}

/// `renderfield` attribute of a label token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenderField {
    Default,
    Value,
    Text,
}

impl RenderField {
    fn attribute(self) -> &'static str {
        match self {
            RenderField::Default => "",
            RenderField::Value => r#" renderfield="Value""#,
            RenderField::Text => r#" renderfield="Text""#,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenForm {
    /// `[<label id="ID">Label</label>]`
    Label(RenderField),

    /// `ID`
    BareId,

    /// `[ID]`
    BracketedId,

    /// `[Value: DisplayName]`
    ValueOf,

    /// `[Text: DisplayName]`
    TextOf,

    /// `[DisplayName]`
    DisplayName,

    /// `[Name]` of the field item
    ItemName,

    /// `[FieldName]` of the submitted field
    FieldName,
}

#[derive(Clone, Copy, Debug)]
struct TokenRule {
    form: TokenForm,
    source: ValueSource,
}

const fn rule(form: TokenForm, source: ValueSource) -> TokenRule {
    TokenRule { form, source }
}

const HTML_BODY_RULES: &[TokenRule] = &[
    rule(TokenForm::Label(RenderField::Default), ValueSource::Formatted),
    rule(TokenForm::Label(RenderField::Value), ValueSource::Raw),
    rule(TokenForm::Label(RenderField::Text), ValueSource::Formatted),
    rule(TokenForm::BareId, ValueSource::Formatted),
];

const SMS_BODY_RULES: &[TokenRule] = &[
    rule(TokenForm::DisplayName, ValueSource::Formatted),
    rule(TokenForm::ItemName, ValueSource::Formatted),
];

const HEADER_RULES: &[TokenRule] = &[
    rule(TokenForm::BracketedId, ValueSource::Formatted),
    rule(TokenForm::BareId, ValueSource::Formatted),
    rule(TokenForm::ValueOf, ValueSource::Raw),
    rule(TokenForm::TextOf, ValueSource::Formatted),
    rule(TokenForm::DisplayName, ValueSource::Formatted),
    rule(TokenForm::FieldName, ValueSource::Formatted),
];

/// The tokens of one submitted field and the values they resolve to
#[derive(Debug)]
pub(crate) struct FieldTokens<'a> {
    metadata: &'a FieldMetadata,
    field: &'a SubmittedField,
    value: &'a str,
}

impl<'a> FieldTokens<'a> {
    pub(crate) fn new(metadata: &'a FieldMetadata, field: &'a SubmittedField, value: &'a str) -> Self {
        Self {
            metadata,
            field,
            value,
        }
    }

    /// Substitutes this field's tokens in every part of the draft
    pub(crate) fn apply(&self, draft: &mut MessageDraft) {
        let body_rules = if draft.is_sms() {
            SMS_BODY_RULES
        } else {
            HTML_BODY_RULES
        };

        self.apply_rules(body_rules, &mut draft.body);

        for part in [
            &mut draft.from,
            &mut draft.to,
            &mut draft.cc,
            &mut draft.subject,
        ] {
            self.apply_rules(HEADER_RULES, part);
        }
    }

    fn apply_rules(&self, rules: &[TokenRule], text: &mut String) {
        for rule in rules {
            self.substitute(rule, text);
        }
    }

    fn substitute(&self, rule: &TokenRule, text: &mut String) {
        let replacement = match rule.source {
            ValueSource::Formatted => self.value,
            ValueSource::Raw => self.field.value.as_str(),
        };

        if let TokenForm::Label(render) = rule.form {
            if let Some(regex) = self.label_regex(render) {
                if regex.is_match(text) {
                    *text = regex.replace_all(text, NoExpand(replacement)).into_owned();
                }
            }
            return;
        }

        if let Some(token) = self.literal_token(rule.form) {
            if text.contains(&token) {
                *text = text.replace(&token, replacement);
            }
        }
    }

    fn label_regex(&self, render: RenderField) -> Option<Regex> {
        if self.metadata.id.is_empty() {
            return None;
        }

        let pattern = format!(
            r#"\[<label id="{}"{}>[^<]+?</label>\]"#,
            regex::escape(&self.metadata.id),
            render.attribute()
        );

        Regex::new(&pattern)
            .map_err(|e| warn!("could not build label pattern for {}: {}", self.metadata.id, e))
            .ok()
    }

    /// The literal text of a token, or `None` if the key it is built from is
    /// empty.
    fn literal_token(&self, form: TokenForm) -> Option<String> {
        let (key, token) = match form {
            TokenForm::Label(_) => return None,
            TokenForm::BareId => (&self.metadata.id, self.metadata.id.clone()),
            TokenForm::BracketedId => (&self.metadata.id, format!("[{}]", self.metadata.id)),
            TokenForm::ValueOf => (
                &self.metadata.display_name,
                format!("[Value: {}]", self.metadata.display_name),
            ),
            TokenForm::TextOf => (
                &self.metadata.display_name,
                format!("[Text: {}]", self.metadata.display_name),
            ),
            TokenForm::DisplayName => (
                &self.metadata.display_name,
                format!("[{}]", self.metadata.display_name),
            ),
            TokenForm::ItemName => (&self.metadata.name, format!("[{}]", self.metadata.name)),
            TokenForm::FieldName => (
                &self.field.field_name,
                format!("[{}]", self.field.field_name),
            ),
        };

        (!key.is_empty()).then_some(token)
    }
}
