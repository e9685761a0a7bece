// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Binding, InsertionTarget, Parser, Placement, Teardown};
use parking_lot::Mutex;
use rivulet_core::{Multicast, MulticastStream, Notification};
use rivulet_fetch::Response;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Parsed content of a lazy fetch.
///
/// Shares the laziness and windowing of its source: nothing is fetched until
/// something subscribes to [`on_content`](Self::on_content) or renders with
/// [`render_into`](Self::render_into), and every subscriber of a window sees the same
/// parsed units. A parse failure is the terminal error of that window.
pub struct FetchResult<U: Clone + Send + Sync + 'static> {
    content: Multicast<Vec<U>>,
}

impl<U: Clone + Send + Sync + 'static> FetchResult<U> {
    /// Parse every response of `source` with `parser`.
    pub fn from_source<P>(source: &Multicast<Response>, parser: P) -> Self
    where
        P: Parser<U>,
    {
        Self::from_content(source.try_map(move |response| parser.parse(&response)))
    }

    /// Wrap an already-parsed content multicast.
    pub fn from_content(content: Multicast<Vec<U>>) -> Self {
        Self { content }
    }

    /// The parsed content units, one delivery per window.
    #[must_use]
    pub fn on_content(&self) -> &Multicast<Vec<U>> {
        &self.content
    }

    /// Subscribe to the parsed content as an async stream.
    pub fn stream(&self) -> MulticastStream<Vec<U>> {
        self.content.stream()
    }

    /// Render every delivery into `target`, replacing what is there.
    ///
    /// Cancelling the returned binding stops further renderings and leaves
    /// the last rendered content in place.
    pub fn render_into<T>(&self, target: T) -> Binding
    where
        T: InsertionTarget<U>,
    {
        self.render_into_with(target, Teardown::Retain)
    }

    /// Like [`render_into`](Self::render_into), with an explicit [`Teardown`].
    ///
    /// With [`Teardown::Retract`], cancelling removes this binding's content
    /// only while it is still the latest rendering at `target`; content placed
    /// by a later binding stays.
    pub fn render_into_with<T>(&self, target: T, teardown: Teardown) -> Binding
    where
        T: InsertionTarget<U>,
    {
        let target = Arc::new(target);
        let cancelled = Arc::new(AtomicBool::new(false));
        let last: Arc<Mutex<Option<Placement>>> = Arc::new(Mutex::new(None));

        let subscription = {
            let target = Arc::clone(&target);
            let cancelled = Arc::clone(&cancelled);
            let last = Arc::clone(&last);
            self.content.subscribe(move |notification| {
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                match notification {
                    Notification::Next(units) | Notification::Complete(units) => {
                        let placement = Placement::next();
                        trace!("rendering {} units as placement {}", units.len(), placement.id());
                        target.replace(placement, units);
                        *last.lock() = Some(placement);
                    }
                    Notification::Error(error) => {
                        warn!("fetch result not rendered: {}", error);
                    }
                    Notification::Cancelled => {}
                }
            })
        };

        let on_cancel = match teardown {
            Teardown::Retain => None,
            Teardown::Retract => Some(Box::new(move || {
                if let Some(placement) = last.lock().take() {
                    target.retract(placement);
                }
            }) as Box<dyn Fn() + Send + Sync>),
        };

        Binding::new(subscription, cancelled, on_cancel)
    }
}

impl<U: Clone + Send + Sync + 'static> Clone for FetchResult<U> {
    fn clone(&self) -> Self {
        Self {
            content: self.content.clone(),
        }
    }
}
