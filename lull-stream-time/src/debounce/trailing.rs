// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use futures::Stream;
use lull_runtime::Timer;
use pin_project::pin_project;

#[pin_project]
pub(super) struct TrailingDebounceStream<S, T, TM>
where
    S: Stream<Item = T>,
    TM: Timer,
{
    #[pin]
    stream: S,
    duration: Duration,
    timer: TM,
    pending_value: Option<T>,
    #[pin]
    sleep: Option<TM::Sleep>,
    stream_ended: bool,
}

impl<S, T, TM> TrailingDebounceStream<S, T, TM>
where
    S: Stream<Item = T>,
    TM: Timer,
{
    pub(super) fn new(stream: S, duration: Duration, timer: TM) -> Self {
        Self {
            stream,
            duration,
            timer,
            pending_value: None,
            sleep: None,
            stream_ended: false,
        }
    }
}

impl<S, T, TM> Stream for TrailingDebounceStream<S, T, TM>
where
    S: Stream<Item = T>,
    TM: Timer,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.stream_ended {
                this.sleep.set(None);
                return Poll::Ready(this.pending_value.take());
            }

            if this.pending_value.is_some() {
                if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
                    if sleep.poll(cx).is_ready() {
                        this.sleep.set(None);
                        return Poll::Ready(this.pending_value.take());
                    }
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    // Restart the quiet period and keep only the newest value
                    this.sleep
                        .set(Some(this.timer.sleep_future(*this.duration)));
                    *this.pending_value = Some(value);
                    continue;
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                    continue;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
