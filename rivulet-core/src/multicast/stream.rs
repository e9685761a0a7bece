// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{Multicast, Subscription};
use crate::{Notification, StreamItem};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::{Stream, StreamExt};

/// Async view of one subscription to a [`Multicast`].
///
/// Created by [`Multicast::stream`]. Yields `StreamItem::Value` for `Next`
/// and `Complete`, `StreamItem::Error` for a failure, and ends after the
/// terminal notification. A silent cancellation ends the stream without an
/// item. The subscription is released as soon as the stream ends or is
/// dropped.
pub struct MulticastStream<T> {
    receiver: UnboundedReceiver<Notification<T>>,
    subscription: Option<Subscription>,
}

impl<T: Clone + Send + Sync + 'static> MulticastStream<T> {
    pub(crate) fn new(source: &Multicast<T>) -> Self {
        let (tx, receiver) = mpsc::unbounded();
        let subscription = source.subscribe(move |notification| {
            let _ = tx.unbounded_send(notification);
        });
        Self {
            receiver,
            subscription: Some(subscription),
        }
    }
}

impl<T> Stream for MulticastStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.subscription.is_none() {
            return Poll::Ready(None);
        }

        match this.receiver.poll_next_unpin(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(None) => {
                this.subscription = None;
                Poll::Ready(None)
            }
            Poll::Ready(Some(notification)) => {
                if notification.is_terminal() {
                    this.subscription = None;
                }
                Poll::Ready(notification.into_stream_item())
            }
        }
    }
}
