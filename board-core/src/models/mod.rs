//! Domain models for the idea board.
//!
//! - [`Idea`]: a proposal that collects votes. Created once, then only mutated
//!   by voting and by appending notes.
//! - [`Note`]: an immutable comment appended to an idea.
//! - [`Attachment`]: a reference to a file uploaded when the idea was created.
//!
//! Ideas own their notes and attachments; neither has a lifecycle of its own.
//! All records serialize with camelCase keys, which is also the on-disk format.

mod attachment;
mod idea;
mod note;
mod timestamp;

pub use attachment::*;
pub use idea::*;
pub use note::*;
