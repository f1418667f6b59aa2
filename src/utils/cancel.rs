//! Tag-based cancellation
//!
//! Every tagged request registers with a [`TagRegistry`] for as long as it is
//! in flight. Cancelling a tag wakes all of its registered requests at once;
//! requests registered afterwards start a fresh group and are not affected.

use crate::error::NetError;
use crate::types::Tag;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct TagGroup {
    generation: u64,
    token: CancellationToken,
    in_flight: usize,
}

#[derive(Debug, Default)]
struct RegistryState {
    groups: HashMap<Tag, TagGroup>,
    next_generation: u64,
}

/// In-flight request groups keyed by tag.
#[derive(Debug, Default)]
pub struct TagRegistry {
    state: Mutex<RegistryState>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // State stays consistent across a panic in another holder.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register one in-flight request under `tag`.
    pub fn register(self: &Arc<Self>, tag: &Tag) -> TagGuard {
        let mut state = self.lock();
        state.next_generation += 1;
        let generation = state.next_generation;
        let group = state.groups.entry(tag.clone()).or_insert_with(|| TagGroup {
            generation,
            token: CancellationToken::new(),
            in_flight: 0,
        });
        group.in_flight += 1;
        TagGuard {
            registry: Arc::clone(self),
            tag: tag.clone(),
            generation: group.generation,
            token: group.token.child_token(),
        }
    }

    /// Cancel every in-flight request carrying `tag`. Returns how many were
    /// cancelled.
    pub fn cancel(&self, tag: &Tag) -> usize {
        let group = self.lock().groups.remove(tag);
        match group {
            Some(group) => {
                group.token.cancel();
                group.in_flight
            }
            None => 0,
        }
    }

    /// Cancel every in-flight tagged request. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let groups: Vec<TagGroup> = self.lock().groups.drain().map(|(_, g)| g).collect();
        groups
            .into_iter()
            .map(|group| {
                group.token.cancel();
                group.in_flight
            })
            .sum()
    }

    /// Number of in-flight requests carrying `tag`.
    pub fn in_flight(&self, tag: &Tag) -> usize {
        self.lock().groups.get(tag).map(|g| g.in_flight).unwrap_or(0)
    }

    /// Tags with at least one request in flight.
    pub fn active_tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.lock().groups.keys().cloned().collect();
        tags.sort();
        tags
    }

    fn release(&self, tag: &Tag, generation: u64) {
        let mut state = self.lock();
        let remove = match state.groups.get_mut(tag) {
            // A cancelled group was already removed; a newer group with the
            // same tag must not be touched.
            Some(group) if group.generation == generation => {
                group.in_flight = group.in_flight.saturating_sub(1);
                group.in_flight == 0
            }
            _ => false,
        };
        if remove {
            state.groups.remove(tag);
        }
    }
}

/// Registration of one in-flight request; releases it on drop.
#[derive(Debug)]
pub struct TagGuard {
    registry: Arc<TagRegistry>,
    tag: Tag,
    generation: u64,
    token: CancellationToken,
}

impl TagGuard {
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` to completion unless the tag is cancelled first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, NetError>
    where
        F: Future<Output = Result<T, NetError>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(NetError::Cancelled {
                tag: self.tag.to_string(),
            }),
            res = fut => res,
        }
    }
}

impl Drop for TagGuard {
    fn drop(&mut self) {
        self.registry.release(&self.tag, self.generation);
    }
}
