// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::monitor::search_monitor::SearchMonitor;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};

/// Cheap cooperative stop flag shared across threads.
#[derive(Clone, Default, Debug)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Relaxed)
    }

    #[inline]
    pub fn request_stop(&self) {
        self.0.store(true, Relaxed)
    }
}

impl PartialEq for StopToken {
    /// Identity, not current value.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for StopToken {}

impl fmt::Display for StopToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopToken(set: {})", self.is_set())
    }
}

/// Terminates the search once its [`StopToken`] is set from elsewhere.
#[derive(Debug, Clone)]
pub struct InterruptMonitor {
    token: StopToken,
}

impl InterruptMonitor {
    #[inline]
    pub fn new(token: StopToken) -> Self {
        Self { token }
    }

    #[inline]
    pub fn token(&self) -> &StopToken {
        &self.token
    }
}

impl SearchMonitor for InterruptMonitor {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    #[inline]
    fn should_terminate(&self) -> bool {
        self.token.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_token_identity_and_behavior() {
        let a = StopToken::new();
        let b = a.clone();
        let c = StopToken::new();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_set());

        b.request_stop();
        assert!(a.is_set());
        assert!(!c.is_set());
        assert_eq!(a.to_string(), "StopToken(set: true)");
    }

    #[test]
    fn test_interrupt_monitor_follows_token() {
        let token = StopToken::new();
        let m = InterruptMonitor::new(token.clone());
        assert!(!m.should_terminate());
        assert_eq!(m.token(), &token);

        let handle = std::thread::spawn(move || token.request_stop());
        handle.join().unwrap();
        assert!(m.should_terminate());
    }
}
