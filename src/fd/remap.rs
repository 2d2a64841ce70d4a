/*!
 * Descriptor Remapping
 *
 * Installs every received descriptor at its destination number. A
 * destination may currently be occupied by another received descriptor
 * that has not been moved yet; that one is duplicated out of the way
 * first, so swaps and cycles resolve without losing a file.
 */

use super::table::FdTable;
use crate::core::{BridgeError, BridgeResult, FdMapping, FdOperation};
use std::collections::BTreeMap;
use std::os::fd::RawFd;
use tracing::{trace, warn};

/// Pending moves, kept as a bidirectional map
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FdRemapper {
    destination_to_received: BTreeMap<RawFd, RawFd>,
    received_to_destination: BTreeMap<RawFd, RawFd>,
}

impl FdRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from mappings in arrival order
    pub fn from_mappings<T: FdTable>(
        table: &mut T,
        mappings: impl IntoIterator<Item = FdMapping>,
    ) -> BridgeResult<Self> {
        let mut remapper = Self::new();
        for mapping in mappings {
            remapper.insert(table, mapping)?;
        }
        Ok(remapper)
    }

    /// Record one received descriptor
    ///
    /// When a destination is named twice the latest descriptor wins and the
    /// earlier one is closed right away.
    pub fn insert<T: FdTable>(&mut self, table: &mut T, mapping: FdMapping) -> BridgeResult<()> {
        let FdMapping {
            received,
            destination,
        } = mapping;

        // The kernel never hands out the same number twice while it is open
        if self.received_to_destination.contains_key(&received) {
            return Err(BridgeError::InvalidDescriptor {
                received,
                destination,
            });
        }

        if let Some(previous) = self.destination_to_received.insert(destination, received) {
            warn!(
                expected_destination_fd = destination,
                latest_received_fd = received,
                "Received an expected destination fd more than once; latest received fd wins"
            );
            table
                .close(previous)
                .map_err(|e| BridgeError::descriptor(FdOperation::Close, previous, e))?;
            self.received_to_destination.remove(&previous);
        }
        self.received_to_destination.insert(received, destination);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.destination_to_received.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destination_to_received.is_empty()
    }

    /// Received descriptor currently recorded for `destination`
    pub fn received_for(&self, destination: RawFd) -> Option<RawFd> {
        self.destination_to_received.get(&destination).copied()
    }

    /// Move every descriptor to its destination, in ascending destination
    /// order. Returns how many descriptors had to be moved.
    pub fn apply<T: FdTable>(mut self, table: &mut T) -> BridgeResult<usize> {
        let destinations: Vec<RawFd> = self.destination_to_received.keys().copied().collect();
        let mut moved = 0;

        for destination in destinations {
            let received = self.destination_to_received[&destination];
            if received != destination {
                self.evict(table, destination)?;

                trace!(
                    destination_fd = destination,
                    received_fd = received,
                    "Replacing destination fd with received fd"
                );
                table
                    .dup2(received, destination)
                    .map_err(|e| BridgeError::descriptor(FdOperation::Dup2, received, e))?;
                table
                    .close(received)
                    .map_err(|e| BridgeError::descriptor(FdOperation::Close, received, e))?;
                moved += 1;
            }
            self.received_to_destination.remove(&received);
        }

        Ok(moved)
    }

    /// If `destination` holds a received descriptor still waiting to be
    /// moved, duplicate it elsewhere and update the bookkeeping
    fn evict<T: FdTable>(&mut self, table: &mut T, destination: RawFd) -> BridgeResult<()> {
        let Some(waiting_for) = self.received_to_destination.remove(&destination) else {
            return Ok(());
        };

        // dup2 closes the original when it overwrites the destination
        let relocated = table
            .dup(destination)
            .map_err(|e| BridgeError::descriptor(FdOperation::Dup, destination, e))?;
        trace!(
            from_fd = destination,
            to_fd = relocated,
            for_destination_fd = waiting_for,
            "Relocated received fd occupying a destination"
        );
        self.received_to_destination.insert(relocated, waiting_for);
        self.destination_to_received.insert(waiting_for, relocated);
        Ok(())
    }
}
