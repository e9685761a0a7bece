// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::oneshot;
use parking_lot::Mutex;
use rivulet_fetch::{Request, Response, Transport, TransportError, TransportFuture};
use std::collections::VecDeque;
use std::sync::Arc;

type Outcome = Result<Response, TransportError>;

#[derive(Default)]
struct MockState {
    requests: Vec<Request>,
    pending: VecDeque<oneshot::Sender<Outcome>>,
    aborts: usize,
}

/// Transport whose calls park until the test settles them, in call order.
///
/// A call counts as aborted when its future is dropped before it produced
/// an outcome, which is what the native abort of a fetch does.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

struct CallGuard {
    state: Arc<Mutex<MockState>>,
    settled: bool,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.state.lock().aborts += 1;
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the transport was invoked.
    pub fn calls(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Requests in the order they were issued.
    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().requests.clone()
    }

    /// Number of calls dropped before settling.
    pub fn aborts(&self) -> usize {
        self.state.lock().aborts
    }

    /// Number of calls still waiting for an outcome.
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .pending
            .iter()
            .filter(|tx| !tx.is_canceled())
            .count()
    }

    /// Settle the oldest pending call. Returns `false` if no call was waiting
    /// or its caller already went away.
    pub fn settle_next(&self, outcome: Outcome) -> bool {
        let sender = self.state.lock().pending.pop_front();
        sender.is_some_and(|tx| tx.send(outcome).is_ok())
    }

    /// Settle the oldest pending call with `response`.
    pub fn respond(&self, response: Response) -> bool {
        self.settle_next(Ok(response))
    }

    /// Settle the oldest pending call with `error`.
    pub fn fail(&self, error: TransportError) -> bool {
        self.settle_next(Err(error))
    }
}

impl Transport for MockTransport {
    fn send(&self, request: Request) -> TransportFuture {
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.state.lock();
            state.requests.push(request);
            state.pending.push_back(tx);
        }

        let mut guard = CallGuard {
            state: Arc::clone(&self.state),
            settled: false,
        };
        Box::pin(async move {
            let outcome = rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("mock call dropped".into())));
            guard.settled = true;
            outcome
        })
    }
}
