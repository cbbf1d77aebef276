use std::future;

use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent};
use futures::{Stream, StreamExt};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
}

pub fn terminal_events() -> impl Stream<Item = Result<Event>> {
    EventStream::new().filter_map(|evt| {
        future::ready(match evt {
            Ok(CrosstermEvent::Key(key)) => Some(Ok(Event::Key(key))),
            Ok(CrosstermEvent::Resize(_, _)) => Some(Ok(Event::Resize)),
            Ok(_) => None,
            Err(err) => Some(Err(err.into())),
        })
    })
}
