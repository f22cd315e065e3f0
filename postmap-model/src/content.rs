//! Message content and file payloads

use crate::recipient::Address;
use postmap_codec::{Describe, Field, FieldValue, ToField};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::Deref;

/// Base64 file payload; shared shape of attachments and inline images
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct File {
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    /// File name (or content id for inline images)
    pub name: Option<String>,
    /// Base64-encoded bytes
    pub data: Option<String>,
}

impl File {
    /// File with every field set
    pub fn new(
        mime_type: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            mime_type: Some(mime_type.into()),
            name: Some(name.into()),
            data: Some(data.into()),
        }
    }
}

impl Describe for File {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Type", self.mime_type.to_field()),
            Field::new("Name", self.name.to_field()),
            Field::new("Data", self.data.to_field()),
        ]
    }
}

macro_rules! file_kind {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            /// Underlying file payload
            pub file: File,
        }

        impl From<File> for $name {
            fn from(file: File) -> Self {
                Self { file }
            }
        }

        impl Deref for $name {
            type Target = File;

            fn deref(&self) -> &File {
                &self.file
            }
        }

        impl Describe for $name {
            fn describe(&self) -> Vec<Field<'_>> {
                self.file.describe()
            }
        }
    };
}

file_kind!(
    /// File attached to the message
    Attachment
);
file_kind!(
    /// Image referenced from the HTML body by content id
    InlineImage
);

/// Message content, inline or by stored template
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Content {
    /// Sender
    pub from: Option<Address>,
    /// Subject line
    pub subject: Option<String>,
    /// Plain-text body
    pub text: Option<String>,
    /// HTML body
    pub html: Option<String>,
    /// `Reply-To` header value
    pub reply_to: Option<String>,
    /// Extra headers, sent as given
    pub headers: BTreeMap<String, String>,
    /// Attached files
    pub attachments: Vec<Attachment>,
    /// Images referenced from the HTML body
    pub inline_images: Vec<InlineImage>,
    /// Stored template to render instead of inline content
    pub template_id: Option<String>,
    /// Render the draft version of the stored template
    pub use_draft_template: Option<bool>,
}

impl Describe for Content {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("From", FieldValue::object_opt(&self.from)),
            Field::new("Subject", self.subject.to_field()),
            Field::new("Text", self.text.to_field()),
            Field::new("Html", self.html.to_field()),
            Field::new("ReplyTo", self.reply_to.to_field()),
            Field::new("Headers", self.headers.to_field()),
            Field::new("Attachments", FieldValue::objects(&self.attachments)),
            Field::new("InlineImages", FieldValue::objects(&self.inline_images)),
            Field::new("TemplateId", self.template_id.to_field()),
            Field::new("UseDraftTemplate", self.use_draft_template.to_field()),
        ]
    }
}
