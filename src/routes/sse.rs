use crate::state::RollbookState;
use axum::{
    extract::State,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{
    StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseEvent {
    StudentChanged,
}

impl SseEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::StudentChanged => "student_changed",
        }
    }
}

pub async fn sse_feed(
    State(state): State<RollbookState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe_to_sse_feed()).filter_map(|msg| {
        match msg {
            Ok(event) => Some(Ok(Event::default().event(event.name()).data(event.name()))),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                debug!(?skipped, "sse subscriber lagged");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
