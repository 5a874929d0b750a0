pub mod mime;
pub mod parse;
pub mod reply;
pub mod tree;

pub use mime::{ComposeRequest, Threading};
pub use parse::{AttachmentDescriptor, AttachmentIndex, ParsedEmail, ParsedMessage, parse_message};
pub use reply::{ReplyMessage, build_reply};
