use anyhow::Result;

use crate::models::{Conversation, Message, unix_timestamp_ms};

/// Message transport behind the chat shell. The shipped app has no working
/// transport; [`MockChatTransport`] reproduces that: a local echo with no
/// delivery guarantee, no retry, no persistence. A real implementation can
/// be swapped in without touching [`ChatShell`].
pub trait ChatTransport: Send {
    /// "Sends" a message and returns the message record to echo locally.
    fn send_message(&mut self, conversation_id: &str, body: &str) -> Result<Message>;

    /// Propagates a read receipt. Best-effort.
    fn mark_read(&mut self, conversation_id: &str, message_id: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MockChatTransport {
    next_message_id: u64,
}

impl ChatTransport for MockChatTransport {
    fn send_message(&mut self, _conversation_id: &str, body: &str) -> Result<Message> {
        self.next_message_id += 1;
        Ok(Message {
            id: format!("local-{}", self.next_message_id),
            sender: "me".to_string(),
            body: body.to_string(),
            sent_at: unix_timestamp_ms(),
            read: true,
        })
    }

    fn mark_read(&mut self, _conversation_id: &str, _message_id: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    pub active: Option<String>,
}

#[derive(Debug)]
pub enum ChatAction {
    StartChat(Conversation),
    AppendMessage {
        conversation_id: String,
        message: Message,
    },
    MarkMessageRead {
        conversation_id: String,
        message_id: String,
    },
    SetActive(Option<String>),
}

pub fn reduce(mut state: ChatState, action: ChatAction) -> ChatState {
    match action {
        ChatAction::StartChat(conversation) => {
            state.active = Some(conversation.id.clone());
            if !state.conversations.iter().any(|c| c.id == conversation.id) {
                state.conversations.push(conversation);
            }
        }
        ChatAction::AppendMessage {
            conversation_id,
            message,
        } => {
            if let Some(conversation) = state
                .conversations
                .iter_mut()
                .find(|c| c.id == conversation_id)
            {
                if !message.read {
                    conversation.unread += 1;
                }
                conversation.messages.push(message);
            }
        }
        ChatAction::MarkMessageRead {
            conversation_id,
            message_id,
        } => {
            if let Some(conversation) = state
                .conversations
                .iter_mut()
                .find(|c| c.id == conversation_id)
            {
                if let Some(message) = conversation
                    .messages
                    .iter_mut()
                    .find(|m| m.id == message_id)
                {
                    if !message.read {
                        message.read = true;
                        conversation.unread = conversation.unread.saturating_sub(1);
                    }
                }
            }
        }
        ChatAction::SetActive(id) => {
            state.active = id;
        }
    }
    state
}

/// Placeholder chat surface. Operations are callable but everything stays
/// local; nothing leaves the process until a real transport lands.
pub struct ChatShell {
    state: ChatState,
    transport: Box<dyn ChatTransport>,
    next_conversation_id: u64,
}

impl Default for ChatShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatShell {
    pub fn new() -> Self {
        Self::with_transport(Box::new(MockChatTransport::default()))
    }

    pub fn with_transport(transport: Box<dyn ChatTransport>) -> Self {
        Self {
            state: ChatState::default(),
            transport,
            next_conversation_id: 1,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.state.conversations
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.state.active.as_deref()?;
        self.state.conversations.iter().find(|c| c.id == id)
    }

    /// Opens (or re-opens) a conversation with the given peer and makes it
    /// active. Returns the conversation id.
    pub fn start_chat(&mut self, peer_name: impl Into<String>) -> String {
        let peer_name = peer_name.into();
        if let Some(existing) = self
            .state
            .conversations
            .iter()
            .find(|c| c.peer_name == peer_name)
        {
            let id = existing.id.clone();
            self.dispatch(ChatAction::SetActive(Some(id.clone())));
            return id;
        }

        let id = format!("c-{}", self.next_conversation_id);
        self.next_conversation_id += 1;
        self.dispatch(ChatAction::StartChat(Conversation {
            id: id.clone(),
            peer_name,
            messages: Vec::new(),
            unread: 0,
        }));
        id
    }

    /// Sends through the transport and appends the returned echo to the
    /// local conversation. With the mock transport this is the only place
    /// the message ever exists.
    pub fn send_message(&mut self, conversation_id: &str, body: &str) -> Result<Message> {
        let message = self.transport.send_message(conversation_id, body)?;
        self.dispatch(ChatAction::AppendMessage {
            conversation_id: conversation_id.to_string(),
            message: message.clone(),
        });
        Ok(message)
    }

    pub fn mark_message_as_read(&mut self, conversation_id: &str, message_id: &str) -> Result<()> {
        self.transport.mark_read(conversation_id, message_id)?;
        self.dispatch(ChatAction::MarkMessageRead {
            conversation_id: conversation_id.to_string(),
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    /// Injects an inbound message, e.g. from seeded sample data.
    pub fn receive_message(&mut self, conversation_id: &str, message: Message) {
        self.dispatch(ChatAction::AppendMessage {
            conversation_id: conversation_id.to_string(),
            message,
        });
    }

    fn dispatch(&mut self, action: ChatAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(id: &str, body: &str) -> Message {
        Message {
            id: id.to_string(),
            sender: "owner".to_string(),
            body: body.to_string(),
            sent_at: 0,
            read: false,
        }
    }

    #[test]
    fn start_chat_creates_once_and_activates() {
        let mut chat = ChatShell::new();
        let id = chat.start_chat("Sunrise PG Owner");
        assert_eq!(chat.conversations().len(), 1);
        assert_eq!(chat.active_conversation().unwrap().id, id);

        let again = chat.start_chat("Sunrise PG Owner");
        assert_eq!(again, id);
        assert_eq!(chat.conversations().len(), 1);
    }

    #[test]
    fn send_message_is_a_local_echo() {
        let mut chat = ChatShell::new();
        let id = chat.start_chat("Sunrise PG Owner");

        let sent = chat.send_message(&id, "Is the room still available?").unwrap();
        assert_eq!(sent.sender, "me");
        assert!(sent.read);

        let conversation = chat.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].body, "Is the room still available?");
        assert_eq!(conversation.unread, 0);
    }

    #[test]
    fn inbound_messages_count_as_unread_until_marked() {
        let mut chat = ChatShell::new();
        let id = chat.start_chat("Sunrise PG Owner");
        chat.receive_message(&id, inbound("m-1", "Yes, come visit"));
        chat.receive_message(&id, inbound("m-2", "Available from Monday"));
        assert_eq!(chat.active_conversation().unwrap().unread, 2);

        chat.mark_message_as_read(&id, "m-1").unwrap();
        assert_eq!(chat.active_conversation().unwrap().unread, 1);

        // Marking twice must not underflow.
        chat.mark_message_as_read(&id, "m-1").unwrap();
        assert_eq!(chat.active_conversation().unwrap().unread, 1);
    }

    #[test]
    fn message_to_unknown_conversation_is_dropped() {
        let mut chat = ChatShell::new();
        chat.receive_message("c-404", inbound("m-1", "hello?"));
        assert!(chat.conversations().is_empty());
    }
}
