use crate::model::GraphSnapshot;

/// Receives a snapshot after every applied mutation, synchronously.
///
/// This is the seam to the external persistence layer.
pub trait SnapshotObserver {
    fn on_save(&mut self, snapshot: &GraphSnapshot);

    /// Called once the editor is idle again after handling an event or command.
    fn on_settled(&mut self) {}
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&GraphSnapshot),
{
    fn on_save(&mut self, snapshot: &GraphSnapshot) {
        self(snapshot)
    }
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SnapshotObserver for NullObserver {
    fn on_save(&mut self, _snapshot: &GraphSnapshot) {}
}

/// Holds back the intermediate snapshots of a gesture and forwards only the latest one
/// when the editor settles. The last state the inner observer sees is unchanged.
#[derive(Debug)]
pub struct CoalescingObserver<O> {
    inner: O,
    pending: Option<GraphSnapshot>,
}

impl<O: SnapshotObserver> CoalescingObserver<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forwards the held snapshot, if any.
    pub fn flush(&mut self) {
        if let Some(snapshot) = self.pending.take() {
            self.inner.on_save(&snapshot);
        }
    }

    pub fn into_inner(mut self) -> O {
        self.flush();
        self.inner
    }
}

impl<O: SnapshotObserver> SnapshotObserver for CoalescingObserver<O> {
    fn on_save(&mut self, snapshot: &GraphSnapshot) {
        self.pending = Some(snapshot.clone());
    }

    fn on_settled(&mut self) {
        self.flush();
        self.inner.on_settled();
    }
}
