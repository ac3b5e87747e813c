// Router session state
//
// The router authenticates every request with a session cookie and guards
// every state-changing POST with a single-use CSRF token. Each accepted POST
// answers with a replacement token, so the client keeps a tiny LIFO: pop one
// to send, push the reply's token back.

use std::collections::VecDeque;

use crate::error::Error;

/// Most tokens the router ever hands out at once (the home page carries two).
pub const TOKEN_CAPACITY: usize = 2;

/// Cookie plus a bounded stack of CSRF tokens, most recent on top.
///
/// Pushing onto a full stack evicts the oldest token, since only the most
/// recently issued ones are still honored by the router.
#[derive(Debug, Clone, Default)]
pub struct Session {
    cookie: Option<String>,
    tokens: VecDeque<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a bootstrap response. Tokens are pushed in
    /// document order, so the last one becomes the top of the stack.
    pub fn from_parts(cookie: Option<String>, tokens: impl IntoIterator<Item = String>) -> Self {
        let mut session = Self {
            cookie,
            tokens: VecDeque::with_capacity(TOKEN_CAPACITY),
        };
        for token in tokens {
            session.push_token(Some(token));
        }
        session
    }

    /// A session needs both a cookie and at least one token to make an
    /// authenticated request.
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none() || self.tokens.is_empty()
    }

    /// Drop the cookie and every token.
    pub fn reset(&mut self) {
        self.cookie = None;
        self.tokens.clear();
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn set_cookie(&mut self, cookie: Option<String>) {
        self.cookie = cookie;
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Push a token returned by the router. `None` is a no-op.
    pub fn push_token(&mut self, token: Option<String>) {
        let Some(token) = token else {
            return;
        };
        if self.tokens.len() == TOKEN_CAPACITY {
            self.tokens.pop_front();
        }
        self.tokens.push_back(token);
    }

    /// Consume the most recently issued token.
    pub fn pop_token(&mut self) -> Result<String, Error> {
        self.tokens.pop_back().ok_or(Error::NoTokenAvailable)
    }
}
