//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the chat
//! backend. Each entity serializes to the exact document shape stored in the
//! document store, so repositories can map with serde alone.
//!
//! ## Core Entities
//!
//! - **User**: Profile synced from the identity provider
//! - **Server**: A community/workspace containing channels and members
//! - **Channel**: A text channel within a server
//! - **Message**: A text message sent in a channel
//! - **Reaction**: An emoji reaction on a message
//!
//! ## Supporting Types
//!
//! - **LogEntry**: Immutable audit record embedded in a Server document
//! - **PublicServer**: Reduced server shape exposed by list endpoints
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer over
//! the document store, following the dependency inversion principle.

mod user;
mod server;
mod channel;
mod message;
mod reaction;

// Re-export User entity and related types
pub use user::{User, UserRepository};

// Re-export Server entity and related types
pub use server::{
    LogAction, LogEntry, LogType, NewLogEntry, NewServer, PublicServer, Server, ServerOrder,
    ServerRepository,
};

// Re-export Channel entity and related types
pub use channel::{Channel, ChannelKind, ChannelRepository};

// Re-export Message entity and related types
pub use message::{Message, MessageRepository, NewMessage};

// Re-export Reaction entity and related types
pub use reaction::{EmojiReactions, Reaction, ReactionRepository};
