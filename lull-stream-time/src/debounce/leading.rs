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
pub(super) struct LeadingDebounceStream<S, TM>
where
    S: Stream,
    TM: Timer,
{
    #[pin]
    stream: S,
    duration: Duration,
    timer: TM,
    #[pin]
    window: Option<TM::Sleep>,
}

impl<S, TM> LeadingDebounceStream<S, TM>
where
    S: Stream,
    TM: Timer,
{
    pub(super) fn new(stream: S, duration: Duration, timer: TM) -> Self {
        Self {
            stream,
            duration,
            timer,
            window: None,
        }
    }
}

impl<S, TM> Stream for LeadingDebounceStream<S, TM>
where
    S: Stream,
    TM: Timer,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // 1. Close the window once its timer has expired
            if let Some(window) = this.window.as_mut().as_pin_mut() {
                if window.poll(cx).is_ready() {
                    this.window.set(None);
                }
            }

            // 2. Poll source stream
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    if this.window.is_some() {
                        continue;
                    }
                    this.window
                        .set(Some(this.timer.sleep_future(*this.duration)));
                    return Poll::Ready(Some(value));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
