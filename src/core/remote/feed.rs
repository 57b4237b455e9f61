use std::future::Future;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::models::{ContactInfo, Project, RecordKind};

const FEED_CAPACITY: usize = 16;

/// Full replacement value for one record kind, as pushed by the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteChange {
    Projects(Vec<Project>),
    Contact(Option<ContactInfo>),
    ProfileImage(Option<String>),
}

impl RemoteChange {
    pub fn kind(&self) -> RecordKind {
        match self {
            RemoteChange::Projects(_) => RecordKind::Projects,
            RemoteChange::Contact(_) => RecordKind::Contact,
            RemoteChange::ProfileImage(_) => RecordKind::ProfileImage,
        }
    }
}

/// A live subscription to one record kind.
///
/// The producer task runs until the feed is dropped; dropping it is the unsubscribe.
#[derive(Debug)]
pub struct RemoteFeed {
    kind: RecordKind,
    receiver: mpsc::Receiver<RemoteChange>,
    producer: JoinHandle<()>,
}

impl RemoteFeed {
    pub fn spawn<F, Fut>(kind: RecordKind, producer: F) -> Self
    where
        F: FnOnce(mpsc::Sender<RemoteChange>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(FEED_CAPACITY);
        let producer = tokio::spawn(producer(sender));
        Self {
            kind,
            receiver,
            producer,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Next pushed value, or `None` once the remote side ended the stream.
    pub async fn next(&mut self) -> Option<RemoteChange> {
        self.receiver.recv().await
    }
}

impl Drop for RemoteFeed {
    fn drop(&mut self) {
        self.producer.abort();
    }
}
