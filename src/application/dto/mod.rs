//! Data Transfer Objects
//!
//! DTOs for API request/response serialization. All wire names are
//! camelCase. Entity shapes (User, Server, Channel, Message) serialize
//! directly as responses; the structs here cover request bodies, query
//! strings and the envelope responses that wrap or reduce entities.

pub mod request;
pub mod response;
