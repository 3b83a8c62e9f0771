//! Request context seen by observers

/// Name logged for requests without a signed-in user
pub const ANONYMOUS: &str = "Anonymous";

/// Who triggered an assembly, plus the flash messages queued for them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    user: Option<String>,
    messages: Vec<String>,
}

impl RequestContext {
    /// Context for an anonymous visitor
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a signed-in user
    pub fn for_user(name: impl Into<String>) -> Self {
        Self {
            user: Some(name.into()),
            messages: Vec::new(),
        }
    }

    /// Signed-in user name, if any
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// User name, or [`ANONYMOUS`]
    pub fn display_user(&self) -> &str {
        self.user.as_deref().unwrap_or(ANONYMOUS)
    }

    /// Queue a flash message
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Queued flash messages
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drain queued flash messages
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}
