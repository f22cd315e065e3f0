//! postmap Model - Mail API domain entities and their wire conversion
//!
//! This crate provides the domain model of the mail API client together with
//! everything that turns it into request payloads:
//!
//! - Entities (transmissions, recipients, content, suppressions, webhooks,
//!   subaccounts, query bundles)
//! - One conversion routine per entity, registered in [`routines::registry`]
//! - Carbon-copy header computation
//! - Payload builders for requests that wrap mapped entities
//! - Decoding of list response bodies
//!
//! ```
//! use postmap_codec::MapperOptions;
//! use postmap_model::{routines, Recipient, RecipientList};
//!
//! let mapper = routines::data_mapper(MapperOptions::default()).unwrap();
//! let list = RecipientList {
//!     id: Some("test-name".into()),
//!     recipients: vec![Recipient::to("test@test.com")],
//!     ..RecipientList::default()
//! };
//! let wire = mapper.to_wire(&list).unwrap();
//! assert_eq!(wire["id"], "test-name");
//! assert_eq!(wire["recipients"][0]["address"]["email"], "test@test.com");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cc;
pub mod content;
pub mod message_events;
pub mod payloads;
pub mod recipient;
pub mod responses;
pub mod routines;
pub mod subaccount;
pub mod suppression;
pub mod transmission;
pub mod webhook;

// Re-export commonly used types
pub use postmap_codec::{DataMapper, MapperOptions, WireMapping, WireValue};

// Re-export our own types
pub use content::{Attachment, Content, File, InlineImage};
pub use message_events::{MessageEvent, MessageEventsQuery};
pub use recipient::{Address, Recipient, RecipientList, RecipientType};
pub use responses::{ListMessageEventsResponse, ListSuppressionResponse, PageLink};
pub use subaccount::{Subaccount, SubaccountStatus};
pub use suppression::{Suppression, SuppressionsQuery};
pub use transmission::{Options, Transmission};
pub use webhook::Webhook;
