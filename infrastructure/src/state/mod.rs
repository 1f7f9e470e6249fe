//! Shared conversation state adapters.
//!
//! Provides [`InMemoryConversationState`], the default implementation of the
//! [`ConversationStatePort`](floor_application::ConversationStatePort).

mod in_memory;

pub use in_memory::InMemoryConversationState;
